//! Type definitions for property paths.

/// One step of a property path: an object key or an array index in
/// decimal form.
pub type PathStep = String;

/// A parsed property path.
pub type Path = Vec<PathStep>;

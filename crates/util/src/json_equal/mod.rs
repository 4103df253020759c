//! JSON equality utilities.

mod deep_equal;

pub use deep_equal::{deep_equal, deep_equal_opt};

//! String casing helpers used to derive field labels and binding paths.

mod case;

pub use case::{is_js_identifier, start_case, words};

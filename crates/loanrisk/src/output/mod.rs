//! Report output formatting.

pub mod json;
pub mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_description, format_effect, format_report, is_verbose};

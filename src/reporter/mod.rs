//! Output formatting for audit results

pub mod console;
pub mod json;

pub use console::ConsoleReporter;
pub use json::{JsonReporter, SeoReport};

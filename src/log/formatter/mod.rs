mod core;
mod json_formatter;

pub use core::LogFormatter;
pub use json_formatter::{JsonFormatter, JsonFormatterConfig};

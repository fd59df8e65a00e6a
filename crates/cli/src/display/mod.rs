pub mod formatter;

pub use formatter::{print_execution_errors, print_registration_report};

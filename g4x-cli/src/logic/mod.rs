//! Pure functional business logic
//!
//! Formatting and argument validation with no I/O. Command handlers in
//! `commands/` call into these and print the result.

pub mod format;
pub mod registry;
pub mod rules;
pub mod view;

pub use format::{render, OutputFormat};
pub use registry::{investment_lines, lookup_lines, registration_lines, user_lines};
pub use rules::{preset_catalog, preset_lines, rule_table_lines};
pub use view::{conversion_line, quote_lines, view_lines, view_warnings};

//! Command handlers
//!
//! Each handler resolves its collaborators from the `CliContext`, calls the
//! engine or the client library, and prints through an `Output`.

pub mod quote;
pub mod registry;
pub mod rules;
pub mod view;

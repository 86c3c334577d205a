//! Output abstraction for testable printing
//!
//! Command handlers write through `Output` so tests can capture what a user
//! would see.

use crate::error::CliResult;
use crate::logic::format::{render, OutputFormat};

pub trait Output: Send + Sync {
    fn print(&self, msg: &str) -> CliResult<()>;

    fn error(&self, msg: &str) -> CliResult<()>;

    fn success(&self, msg: &str) -> CliResult<()> {
        self.print(&format!("✅ {}", msg))
    }

    fn warning(&self, msg: &str) -> CliResult<()> {
        self.print(&format!("⚠️  {}", msg))
    }

    fn header(&self, title: &str) -> CliResult<()> {
        self.print(&format!("\n{}\n{}", title, "=".repeat(title.chars().count())))
    }

    /// Print `data` as pretty JSON, or as the given table lines
    fn emit(&self, format: OutputFormat, data: &serde_json::Value, table: &[String]) -> CliResult<()> {
        self.print(&render(format, data, table)?)
    }
}

pub struct ConsoleOutput;

impl Output for ConsoleOutput {
    fn print(&self, msg: &str) -> CliResult<()> {
        println!("{}", msg);
        Ok(())
    }

    fn error(&self, msg: &str) -> CliResult<()> {
        eprintln!("❌ {}", msg);
        Ok(())
    }
}

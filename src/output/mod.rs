//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// Types that can be rendered in every output format
pub trait Formattable {
    /// Render the data according to the requested format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Render and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(table::format_table(self)),
            OutputFormat::Table => Ok(table::format_plain(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

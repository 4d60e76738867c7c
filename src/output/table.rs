//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

const EMPTY_MESSAGE: &str = "No results found.";

/// Format data as a rounded, human-oriented table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format data as borderless columns, one row per entry
pub fn format_plain<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let mut table = Table::new(data);
    table.with(Style::blank());

    table.to_string()
}

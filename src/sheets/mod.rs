mod auth;
mod client;
mod grid;

pub use client::SheetsClient;
pub use grid::RowGrid;

// Re-export clear_tokens for CLI usage
pub use auth::clear_tokens as clear_google_tokens;

use crate::error::Result;
use async_trait::async_trait;

/// Which spreadsheet to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetRef {
    /// Opaque spreadsheet identifier, as found in the sheet URL.
    Id(String),
    /// Spreadsheet title, looked up through Drive.
    Name(String),
}

/// Which part of the spreadsheet to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSelector {
    /// A bounds string like "Sheet1!A1:B3".
    Explicit(String),
    /// Every value on the first sheet.
    FirstSheet,
}

#[async_trait]
pub trait SheetSource {
    async fn read(&self, selector: &RangeSelector) -> Result<RowGrid>;
}

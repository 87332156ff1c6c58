use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MessageStyle {
    /// "Daily update:" header, cells joined with ": ", one row per line.
    #[default]
    Update,
    /// Cells joined with " | ", rows joined with newlines, no header.
    Table,
}

impl MessageStyle {
    fn header(&self) -> Option<&'static str> {
        match self {
            MessageStyle::Update => Some("Daily update:"),
            MessageStyle::Table => None,
        }
    }
}

/// Render the grid body: rows in order, cells joined by the style's delimiter.
pub fn format_grid(grid: &[Vec<String>], style: MessageStyle) -> String {
    match style {
        MessageStyle::Update => grid
            .iter()
            .map(|row| {
                let mut line = row.join(": ");
                line.push('\n');
                line
            })
            .collect(),
        MessageStyle::Table => grid
            .iter()
            .map(|row| row.join(" | "))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Assemble the posted message: style header (if any) followed by the body.
pub fn build_message(grid: &[Vec<String>], style: MessageStyle) -> String {
    let body = format_grid(grid, style);
    match style.header() {
        Some(header) => format!("{}\n{}", header, body),
        None => body,
    }
}

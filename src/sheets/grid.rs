use serde_json::Value;

/// Rows of string cells as read from the spreadsheet. Rows may be ragged;
/// short rows are not padded.
pub type RowGrid = Vec<Vec<String>>;

/// Convert the API's JSON cell values into plain strings.
pub(super) fn to_row_grid(values: Vec<Vec<Value>>) -> RowGrid {
    values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect()
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_cells_pass_through() {
        let grid = to_row_grid(vec![vec![json!("A"), json!("10")]]);
        assert_eq!(grid, vec![vec!["A".to_string(), "10".to_string()]]);
    }

    #[test]
    fn test_non_string_cells_are_rendered() {
        let grid = to_row_grid(vec![vec![json!(10), json!(2.5), json!(true), json!(null)]]);
        assert_eq!(
            grid,
            vec![vec![
                "10".to_string(),
                "2.5".to_string(),
                "true".to_string(),
                String::new(),
            ]]
        );
    }

    #[test]
    fn test_ragged_rows_stay_ragged() {
        let grid = to_row_grid(vec![vec![json!("a")], vec![json!("b"), json!("c")]]);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].len(), 1);
        assert_eq!(grid[1].len(), 2);
    }

    #[test]
    fn test_empty_values() {
        assert!(to_row_grid(Vec::new()).is_empty());
    }
}

//! Decoded attachment content and the request payload built from it.

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell.
///
/// Cells are untyped scalars. The grid is handed to the model as-is and
/// the model decides which columns matter, so no typing is imposed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Numeric cell (integers and floats alike)
    Number(f64),

    /// Boolean cell
    Bool(bool),

    /// Text cell
    Text(String),

    /// Empty cell, serialized as JSON `null`
    Empty,
}

impl Cell {
    /// Text cell from anything string-like.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Numeric cell.
    pub fn number(value: impl Into<f64>) -> Self {
        Self::Number(value.into())
    }
}

/// A spreadsheet decoded into rows of untyped cells.
///
/// The header row is included at index 0 when the sheet has one; no
/// fixed column layout is assumed. Serializes as a JSON array-of-arrays,
/// which is exactly the shape embedded in the packing-list user payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowGrid(pub Vec<Vec<Cell>>);

impl RowGrid {
    /// Create a grid from rows.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self(rows)
    }

    /// Number of rows, header included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the grid has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The rows themselves.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.0
    }

    /// Serialize as the JSON array-of-arrays payload sent to the model.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

impl From<Vec<Vec<Cell>>> for RowGrid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self(rows)
    }
}

/// Content of an attachment after the format decoder ran.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedContent {
    /// Plain text, from a bill-of-lading PDF
    PlainText(String),

    /// Cell grid, from a packing-list spreadsheet
    Rows(RowGrid),
}

/// One prompt pair ready for the LLM collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Task instructions for the model
    pub system_prompt: String,

    /// Document content: raw PDF text for bills, JSON array-of-rows for
    /// packing lists
    pub user_payload: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_serializes_as_array_of_arrays() {
        let grid = RowGrid::new(vec![
            vec![Cell::text("SKU"), Cell::text("QTY")],
            vec![Cell::text("SNSFNWO5006NR2"), Cell::number(82.0)],
            vec![Cell::Empty, Cell::Bool(true)],
        ]);

        let json = grid.to_json();
        assert_eq!(
            json,
            r#"[["SKU","QTY"],["SNSFNWO5006NR2",82.0],[null,true]]"#
        );
    }

    #[test]
    fn test_grid_roundtrips_through_json() {
        let json = r#"[["SKU","QTY"],["A-1",5],[null,"n/a"]]"#;
        let grid: RowGrid = serde_json::from_str(json).unwrap();

        assert_eq!(grid.len(), 3);
        assert_eq!(grid.rows()[1][1], Cell::Number(5.0));
        assert_eq!(grid.rows()[2][0], Cell::Empty);
        assert_eq!(grid.rows()[2][1], Cell::Text("n/a".to_string()));
    }
}

//! Level loading: comma-separated cost rows, one line per grid row.
//!
//! The format is the classic spreadsheet-exported map: `1,3,2,1` per
//! line, every line the same width, every value a non-negative integer.

use std::fmt;
use std::fs;
use std::path::Path;

use tactics_core::{CostGrid, GridError};

/// Errors that can occur when loading a level.
#[derive(Debug)]
pub enum MapError {
    /// Reading the file failed.
    Io(std::io::Error),
    /// A field that does not parse as a non-negative integer.
    BadField {
        line: usize,
        field: String,
    },
    /// Structural problems (empty, ragged rows) caught by the grid.
    Grid(GridError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read map: {e}"),
            Self::BadField { line, field } => {
                write!(f, "line {line}: \"{field}\" is not a non-negative integer")
            }
            Self::Grid(e) => write!(f, "bad map: {e}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::BadField { .. } => None,
        }
    }
}

impl From<GridError> for MapError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Parse comma-separated cost rows into a [`CostGrid`].
///
/// Blank lines (including a trailing newline) are skipped; fields may
/// carry surrounding whitespace. Line numbers in errors are 1-based.
pub fn parse_map(text: &str) -> Result<CostGrid, MapError> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut row = Vec::new();
        for field in line.split(',') {
            let field = field.trim();
            let value: i32 = field.parse().map_err(|_| MapError::BadField {
                line: i + 1,
                field: field.to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok(CostGrid::from_rows(&rows)?)
}

/// Read and parse a level file.
pub fn load_map(path: &Path) -> Result<CostGrid, MapError> {
    let text = fs::read_to_string(path).map_err(MapError::Io)?;
    parse_map(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::Cell;

    #[test]
    fn parses_a_simple_map() {
        let g = parse_map("1,2,3\n4,5,6\n").unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
        assert_eq!(g.cost(Cell::new(1, 1)), Ok(5));
    }

    #[test]
    fn tolerates_whitespace_and_blank_lines() {
        let g = parse_map(" 1 , 2 \n\n 3 ,4 \n\n").unwrap();
        assert_eq!(g.height(), 2);
        assert_eq!(g.cost(Cell::new(0, 1)), Ok(3));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let err = parse_map("1,2\n3,x\n").unwrap_err();
        match err {
            MapError::BadField { line, field } => {
                assert_eq!(line, 2);
                assert_eq!(field, "x");
            }
            other => panic!("expected BadField, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_costs() {
        let err = parse_map("1,-2\n").unwrap_err();
        assert!(matches!(err, MapError::Grid(GridError::NegativeCost { .. })));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = parse_map("1,2,3\n4,5\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::Grid(GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(parse_map(""), Err(MapError::Grid(GridError::Empty))));
        assert!(matches!(
            parse_map("\n\n"),
            Err(MapError::Grid(GridError::Empty))
        ));
    }
}

//! Text maps: a [`Grid`] plus optional start and end markers, parsed from
//! ASCII art.
//!
//! ```text
//! S..#.
//! .#.#.
//! .#...
//! .###.
//! ....E
//! ```
//!
//! `.` is an open cell, `#` a wall, `S` the start and `E` the end. Lines are
//! separated by `'\n'`, must all have the same width, and the map must be
//! square.

use std::fmt;
use std::str::FromStr;

use crate::geom::Pos;
use crate::grid::Grid;

/// Character for an open cell.
pub const OPEN: char = '.';
/// Character for a wall cell.
pub const WALL: char = '#';
/// Character for the start cell.
pub const START: char = 'S';
/// Character for the end cell.
pub const END: char = 'E';

/// A grid together with its designated endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    pub grid: Grid,
    pub start: Option<Pos>,
    pub end: Option<Pos>,
}

impl GridMap {
    /// Parse a map from ASCII art.
    ///
    /// Leading/trailing whitespace is trimmed from the whole string but not
    /// from individual lines.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let s = s.trim();
        let lines: Vec<&str> = s.lines().collect();
        let rows = lines.len();
        let width = lines.first().map_or(0, |l| l.chars().count());

        if lines.iter().any(|l| l.chars().count() != width) {
            return Err(MapError::InconsistentSize(s.to_string()));
        }
        if width != rows {
            return Err(MapError::NotSquare { rows, cols: width });
        }

        let mut map = GridMap {
            grid: Grid::new(rows as i32),
            start: None,
            end: None,
        };

        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row as i32, col as i32);
                match ch {
                    OPEN => {}
                    WALL => {
                        // In bounds by construction.
                        map.grid
                            .set_wall(pos, true)
                            .map_err(|_| MapError::InvalidChar { ch, pos })?;
                    }
                    START => Self::place(&mut map.start, ch, pos)?,
                    END => Self::place(&mut map.end, ch, pos)?,
                    _ => return Err(MapError::InvalidChar { ch, pos }),
                }
            }
        }
        Ok(map)
    }

    fn place(slot: &mut Option<Pos>, ch: char, pos: Pos) -> Result<(), MapError> {
        if let Some(first) = *slot {
            return Err(MapError::DuplicateMarker {
                ch,
                first,
                second: pos,
            });
        }
        *slot = Some(pos);
        Ok(())
    }
}

impl FromStr for GridMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self.grid.dims();
        for row in 0..dims.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..dims.cols {
                let p = Pos::new(row, col);
                let ch = if self.start == Some(p) {
                    START
                } else if self.end == Some(p) {
                    END
                } else if self.grid.is_open(p) {
                    OPEN
                } else {
                    WALL
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a [`GridMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Lines have inconsistent widths.
    InconsistentSize(String),
    /// The number of rows differs from the number of columns.
    NotSquare { rows: usize, cols: usize },
    /// A character other than `.`, `#`, `S` or `E` was found.
    InvalidChar { ch: char, pos: Pos },
    /// `S` or `E` appears more than once.
    DuplicateMarker { ch: char, first: Pos, second: Pos },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize(s) => write!(f, "map: inconsistent line widths:\n{s}"),
            Self::NotSquare { rows, cols } => {
                write!(f, "map must be square, got {rows} rows and {cols} columns")
            }
            Self::InvalidChar { ch, pos } => {
                write!(f, "map contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { ch, first, second } => {
                write!(f, "map marker {ch} appears twice, at {first} and {second}")
            }
        }
    }
}

impl std::error::Error for MapError {}

#[cfg(test)]
mod tests {
    use super::*;

    const MAZE: &str = "
S..#.
.#.#.
.#...
.###.
....E
";

    #[test]
    fn parse_markers_and_walls() {
        let m = GridMap::parse(MAZE).unwrap();
        assert_eq!(m.grid.rows(), 5);
        assert_eq!(m.start, Some(Pos::new(0, 0)));
        assert_eq!(m.end, Some(Pos::new(4, 4)));
        assert_eq!(m.grid.wall_count(), 7);
        assert_eq!(m.grid.is_wall(Pos::new(0, 3)), Ok(true));
        // Markers are open cells.
        assert!(m.grid.is_open(Pos::new(0, 0)));
    }

    #[test]
    fn display_round_trips() {
        let m: GridMap = MAZE.parse().unwrap();
        assert_eq!(m.to_string(), MAZE.trim());
    }

    #[test]
    fn markers_are_optional() {
        let m = GridMap::parse("..\n.#").unwrap();
        assert_eq!(m.start, None);
        assert_eq!(m.end, None);
        assert_eq!(m.grid.wall_count(), 1);
    }

    #[test]
    fn inconsistent_width() {
        assert!(matches!(
            GridMap::parse("...\n..\n..."),
            Err(MapError::InconsistentSize(_))
        ));
    }

    #[test]
    fn not_square() {
        assert_eq!(
            GridMap::parse("...\n..."),
            Err(MapError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn invalid_char() {
        assert_eq!(
            GridMap::parse("..\n.x"),
            Err(MapError::InvalidChar {
                ch: 'x',
                pos: Pos::new(1, 1)
            })
        );
    }

    #[test]
    fn duplicate_start() {
        let err = GridMap::parse("S.\n.S").unwrap_err();
        assert_eq!(
            err,
            MapError::DuplicateMarker {
                ch: 'S',
                first: Pos::new(0, 0),
                second: Pos::new(1, 1)
            }
        );
        assert!(err.to_string().contains("appears twice"));
    }
}

//! The [`Grid`] type — a square grid of cells that are either open or walls.
//!
//! The grid only stores wall state. Search scores live in the search engine,
//! so a grid can be searched any number of times without being reset.

use std::fmt;

use crate::geom::{Dims, Pos};

/// Error returned when a coordinate falls outside a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The position is not inside the grid's dimensions.
    OutOfBounds { pos: Pos, dims: Dims },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, dims } => {
                write!(f, "position {pos} is outside the {dims} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// An `N × N` grid of cells with a wall flag each.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    dims: Dims,
    walls: Vec<bool>,
}

impl Grid {
    /// Create a `rows × rows` grid with every cell open.
    pub fn new(rows: i32) -> Self {
        let dims = Dims::square(rows);
        Self {
            dims,
            walls: vec![false; dims.len()],
        }
    }

    /// The grid's dimensions.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of rows (equal to the number of columns).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.dims.rows
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.dims.contains(p)
    }

    fn checked_index(&self, p: Pos) -> Result<usize, GridError> {
        self.dims.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            dims: self.dims,
        })
    }

    /// Set or clear the wall flag of a single cell.
    pub fn set_wall(&mut self, p: Pos, value: bool) -> Result<(), GridError> {
        let i = self.checked_index(p)?;
        self.walls[i] = value;
        Ok(())
    }

    /// Whether the cell at `p` is a wall.
    pub fn is_wall(&self, p: Pos) -> Result<bool, GridError> {
        let i = self.checked_index(p)?;
        Ok(self.walls[i])
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_open(&self, p: Pos) -> bool {
        self.dims.index(p).is_some_and(|i| !self.walls[i])
    }

    /// Append the open axis-aligned neighbours of `p` to `buf`, in the order
    /// up, down, left, right. The caller clears `buf` before calling.
    ///
    /// Adjacency is computed from the current wall state on every call.
    pub fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        for n in p.neighbors_4() {
            if self.is_open(n) {
                buf.push(n);
            }
        }
    }

    /// Convenience wrapper around [`neighbors`](Self::neighbors) that
    /// allocates a fresh vector.
    pub fn neighbors_of(&self, p: Pos) -> Vec<Pos> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors(p, &mut buf);
        buf
    }

    /// Remove every wall.
    pub fn clear_walls(&mut self) {
        self.walls.fill(false);
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }

    /// Iterate over the positions of all wall cells in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Pos> + '_ {
        self.dims.iter().filter(move |&p| !self.is_open(p))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            dims: Dims,
            walls: Vec<bool>,
        }

        let Raw { dims, walls } = Raw::deserialize(deserializer)?;
        if dims != Dims::square(dims.rows) {
            return Err(serde::de::Error::custom(format!(
                "grid must be square with a non-negative size, got {dims}"
            )));
        }
        if walls.len() != dims.len() {
            return Err(serde::de::Error::invalid_length(
                walls.len(),
                &format!("{} wall flags for a {dims} grid", dims.len()).as_str(),
            ));
        }
        Ok(Self { dims, walls })
    }
}

impl fmt::Display for Grid {
    /// Renders walls as `#` and open cells as `.`, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dims.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.dims.cols {
                let ch = if self.is_open(Pos::new(row, col)) { '.' } else { '#' };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_open() {
        let g = Grid::new(4);
        assert_eq!(g.dims(), Dims::new(4, 4));
        assert_eq!(g.wall_count(), 0);
        assert_eq!(g.is_wall(Pos::new(3, 3)), Ok(false));
    }

    #[test]
    fn set_wall_and_read_back() {
        let mut g = Grid::new(3);
        g.set_wall(Pos::new(1, 2), true).unwrap();
        assert_eq!(g.is_wall(Pos::new(1, 2)), Ok(true));
        assert!(!g.is_open(Pos::new(1, 2)));
        g.set_wall(Pos::new(1, 2), false).unwrap();
        assert!(g.is_open(Pos::new(1, 2)));
    }

    #[test]
    fn set_wall_out_of_bounds() {
        let mut g = Grid::new(3);
        let err = g.set_wall(Pos::new(3, 0), true).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                pos: Pos::new(3, 0),
                dims: Dims::square(3)
            }
        );
        assert!(g.set_wall(Pos::new(0, -1), true).is_err());
        assert!(g.is_wall(Pos::new(-1, 0)).is_err());
    }

    #[test]
    fn neighbors_corner_and_center() {
        let g = Grid::new(3);
        assert_eq!(
            g.neighbors_of(Pos::new(0, 0)),
            vec![Pos::new(1, 0), Pos::new(0, 1)]
        );
        assert_eq!(g.neighbors_of(Pos::new(1, 1)).len(), 4);
    }

    #[test]
    fn neighbors_exclude_walls_and_reflect_edits() {
        let mut g = Grid::new(3);
        g.set_wall(Pos::new(0, 1), true).unwrap();
        assert_eq!(g.neighbors_of(Pos::new(1, 1)).len(), 3);
        assert!(!g.neighbors_of(Pos::new(1, 1)).contains(&Pos::new(0, 1)));
        g.set_wall(Pos::new(0, 1), false).unwrap();
        assert_eq!(g.neighbors_of(Pos::new(1, 1)).len(), 4);
    }

    #[test]
    fn neighbors_appends_to_buffer() {
        let g = Grid::new(2);
        let mut buf = vec![Pos::new(9, 9)];
        g.neighbors(Pos::new(0, 0), &mut buf);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf[0], Pos::new(9, 9));
    }

    #[test]
    fn clear_walls_and_iterate() {
        let mut g = Grid::new(3);
        g.set_wall(Pos::new(2, 0), true).unwrap();
        g.set_wall(Pos::new(0, 2), true).unwrap();
        let walls: Vec<_> = g.walls().collect();
        assert_eq!(walls, vec![Pos::new(0, 2), Pos::new(2, 0)]);
        g.clear_walls();
        assert_eq!(g.wall_count(), 0);
    }

    #[test]
    fn display_renders_rows() {
        let mut g = Grid::new(2);
        g.set_wall(Pos::new(0, 1), true).unwrap();
        assert_eq!(g.to_string(), ".#\n..");
    }

    #[test]
    fn error_message_names_position() {
        let err = GridError::OutOfBounds {
            pos: Pos::new(5, 1),
            dims: Dims::square(3),
        };
        assert_eq!(err.to_string(), "position (5, 1) is outside the 3x3 grid");
    }
}

//! **gridstar-core** — grid types shared across the *gridstar* crates.
//!
//! This crate provides the geometry primitives, the wall [`Grid`] that
//! searches run over, and a small ASCII map format for building grids from
//! text.

pub mod geom;
pub mod grid;
pub mod map;

pub use geom::{Dims, DimsIter, Pos};
pub use grid::{Grid, GridError};
pub use map::{GridMap, MapError};

//! Common types that are useful for working with `dat2vtk`
#![allow(unused_imports)]

pub use crate::config::ConvertConfig;
pub use crate::data::{Element, FileType, Row, RowCount, Timestep, Zone};
pub use crate::lines::{Line, LineSource};
pub use crate::mesh::{CellType, Point, PolyData, ScalarField};
pub use crate::patterns::Pattern;

pub(crate) use crate::{Error, ParseError};
pub(crate) use std::io::{BufRead, Write};

pub(crate) use derive_more::{Constructor, Display, From};

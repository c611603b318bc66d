//! Convert the tabular ASCII output of a structural-mechanics simulator into legacy VTK
//! POLYDATA files that ParaView can open, one file per timestep.
//!
//! ```no_run
//! use dat2vtk::{ConvertConfig, FileType};
//!
//! let input = std::io::BufReader::new(std::fs::File::open("results/beam.dat").unwrap());
//! let config = ConvertConfig::new(FileType::Damage, "beam");
//!
//! // writes ./convertedbeam/beam_<title>_<time>.vtk for every timestep
//! let report = dat2vtk::convert(input, &config).unwrap();
//! println!("{} timesteps converted", report.timesteps());
//! ```
//!
//! The individual stages are public as well: [`LineSource`] and [`parse::read_timestep`]
//! produce a [`Timestep`], [`PolyData::from_timestep`] turns it into an indexed mesh and
//! [`write_vtk()`] serializes that mesh.

pub mod config;
mod convert;
mod data;
mod lines;
pub mod mesh;
pub mod parse;
pub mod patterns;
pub mod prelude;
mod write_vtk;

pub use config::{base_name_from_path, ConfigError, ConvertConfig};
pub use convert::{convert, convert_file, ConversionReport};
pub use data::{Element, FileType, Row, RowCount, Timestep, Zone};
pub use data::{SolutionTimeMismatch, ZoneTimeMismatch};
pub use lines::{Line, LineSource};
pub use mesh::{CellType, MeshError, Point, PolyData, ScalarField};
pub use parse::ParseError;
pub use patterns::Pattern;
pub use write_vtk::write_vtk;
pub use write_vtk::{output_directory, output_path, write_to_directory, MissingFieldValue};

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Error while parsing simulation output: {0}")]
    Parse(#[from] parse::ParseError),
    #[error("ERROR - there is a ZONE with wrong SOLUTIONTIME: {0}")]
    SolutionTime(#[from] SolutionTimeMismatch),
    #[error("Could not build mesh: {0}")]
    Mesh(#[from] MeshError),
    #[error("Could not write vtk data: {0}")]
    MissingFieldValue(#[from] MissingFieldValue),
    #[error("{0}")]
    Config(#[from] ConfigError),
}

//! reading and parsing simulator `.dat` output
//!
//! Parsing is driven line by line through a [`LineSource`](crate::LineSource). A file is
//! read one [`Timestep`](crate::Timestep) at a time with [`read_timestep`], which in turn
//! reads every zone of the timestep with [`read_zone`].
//!
//! ```text
//! 12                                              <- CRACK files only, skipped
//! TITLE = "step 3"
//! VARIABLES = "X", "Y", "Sigma"
//! ZONE T="E1" SOLUTIONTIME=3 I=1, J=2, F=FEPOINT  <- I rows of J points each
//! 0.0 0.0 1.5 1.0 0.0 2.5
//! ZONE T="E2" SOLUTIONTIME=3                      <- rows until the next ZONE / trailer / ## ##
//! 0.0 1.0 4.0
//! Load factor = 1.0 Total deformation = 0.2 Iter = 3
//! ## ##
//! ```

pub mod error;
mod timestep;
mod zone;

pub use error::ParseError;
pub use timestep::read_timestep;
pub use zone::read_zone;

use crate::prelude::*;

use crate::patterns::Pattern;

/// An error caused while reading the simulator output. Every variant is fatal to the
/// conversion of the file.
#[derive(Debug, thiserror::Error, From)]
pub enum ParseError {
    #[error("{0}")]
    MalformedLine(MalformedLine),
    #[error("{0}")]
    UnexpectedEof(UnexpectedEof),
    #[error("{0}")]
    MalformedNumber(MalformedNumber),
    #[error("{0}")]
    MissingValues(MissingValues),
    #[error("{0}")]
    MissingZones(MissingZones),
    #[error("failed to read input: {0}")]
    Io(std::io::Error),
}

impl ParseError {
    /// line number of the input the error points at, when there is one
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::MalformedLine(e) => Some(e.line_number),
            Self::UnexpectedEof(e) => Some(e.line_number),
            Self::MalformedNumber(e) => Some(e.line_number),
            Self::MissingValues(e) => Some(e.line_number),
            Self::MissingZones(e) => Some(e.line_number),
            Self::Io(_) => None,
        }
    }
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "line {line_number}: expected {expected}, got `{actual}`")]
pub struct MalformedLine {
    pub line_number: usize,
    pub expected: &'static str,
    pub actual: String,
}

impl MalformedLine {
    pub(crate) fn from_line(line: &Line, expected: Pattern) -> Self {
        Self::new(line.number, expected.describe(), line.text.clone())
    }
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "input ended after line {line_number} while expecting {expected}")]
pub struct UnexpectedEof {
    pub line_number: usize,
    pub expected: &'static str,
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "line {line_number}: `{token}` could not be parsed as a number")]
pub struct MalformedNumber {
    pub line_number: usize,
    pub token: String,
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "line {line_number}: expected {expected} values on a data line, found {found}")]
pub struct MissingValues {
    pub line_number: usize,
    pub expected: usize,
    pub found: usize,
}

#[derive(Display, Debug, Constructor)]
#[display(
    fmt = "timestep `{title}` ending at line {line_number} has no ZONE to take its time from"
)]
pub struct MissingZones {
    pub line_number: usize,
    pub title: String,
}

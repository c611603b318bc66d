//! In-memory model of a parsed simulator output file
//!
//! A file is a sequence of [`Timestep`]s. Every timestep declares its variable names once
//! and then lists one or more [`Zone`]s, each a table of [`Row`]s whose cells are
//! [`Element`]s (one value per declared variable).

use crate::prelude::*;

use std::fmt;
use std::str::FromStr;

/// Which simulator output is being read. Decides how timesteps are framed
/// and whether connectivity is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// a stray number may precede each title and the time comes from the first zone
    Crack,
    Damage,
    /// written as a point cloud, without cells
    VonMises,
}

impl FileType {
    /// the single letter selector used on the command line
    pub fn selector(&self) -> char {
        match self {
            Self::Crack => 'c',
            Self::Damage => 'd',
            Self::VonMises => 'v',
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crack => write!(f, "CRACK"),
            Self::Damage => write!(f, "DAMAGE"),
            Self::VonMises => write!(f, "VON MISES"),
        }
    }
}

impl FromStr for FileType {
    type Err = crate::config::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "crack" => Ok(Self::Crack),
            "d" | "damage" => Ok(Self::Damage),
            "v" | "von-mises" | "vonmises" | "von_mises" => Ok(Self::VonMises),
            _ => Err(crate::config::UnknownFileType::new(s.to_string()).into()),
        }
    }
}

/// One value per variable of the owning [`Timestep`], stored in variable order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub values: Vec<f64>,
}

impl Element {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// the points of a single data line, one element per zone column
pub type Row = Vec<Element>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCount {
    /// declared through `I=` in a full zone header
    Known(usize),
    /// partial zone header: rows are read until a terminating line shows up
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub title: String,
    pub solution_time: u64,
    pub row_count: RowCount,
    /// number of points on every data line (`J=` in a full header)
    pub column_count: usize,
    pub rows: Vec<Row>,
}

impl Zone {
    pub fn new(title: String, solution_time: u64, row_count: RowCount, column_count: usize) -> Self {
        Self {
            title,
            solution_time,
            row_count,
            column_count,
            rows: Vec::new(),
        }
    }

    /// iterate every element of the zone in row, then column order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.rows.iter().flat_map(|row| row.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timestep {
    pub title: String,
    pub time: u64,
    /// column order of the values in every data row
    pub variables: Vec<String>,
    pub zones: Vec<Zone>,
}

impl Timestep {
    /// position of `name` inside every [`Element`] of this timestep.
    ///
    /// If a name was declared twice the later column is used, as it would overwrite
    /// the earlier one in a name keyed map.
    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.variables.iter().rposition(|variable| variable == name)
    }

    /// look up the value of variable `name` in `element`
    pub fn value(&self, element: &Element, name: &str) -> Option<f64> {
        self.variable_index(name)
            .and_then(|index| element.values.get(index).copied())
    }

    /// Check that every zone carries the same solution time as the timestep itself.
    ///
    /// All offending zones are reported, not just the first.
    pub fn check_solution_times(&self) -> Result<(), SolutionTimeMismatch> {
        let zones: Vec<ZoneTimeMismatch> = self
            .zones
            .iter()
            .filter(|zone| zone.solution_time != self.time)
            .map(|zone| ZoneTimeMismatch::new(zone.title.clone(), zone.solution_time))
            .collect();

        if zones.is_empty() {
            Ok(())
        } else {
            Err(SolutionTimeMismatch::new(self.title.clone(), self.time, zones))
        }
    }
}

#[derive(Display, Debug, Clone, PartialEq, Eq, Constructor)]
#[display(fmt = "zone {title} has solutionTime {solution_time}")]
pub struct ZoneTimeMismatch {
    pub title: String,
    pub solution_time: u64,
}

/// zones of a timestep whose solution time differs from the time of the timestep
#[derive(Debug, Clone, PartialEq, Eq, Constructor, thiserror::Error)]
pub struct SolutionTimeMismatch {
    pub timestep: String,
    pub expected: u64,
    pub zones: Vec<ZoneTimeMismatch>,
}

impl fmt::Display for SolutionTimeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestep `{}` has zones with a SOLUTIONTIME other than {}: ",
            self.timestep, self.expected
        )?;

        for (idx, zone) in self.zones.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{zone}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(title: &str, solution_time: u64) -> Zone {
        Zone::new(title.to_string(), solution_time, RowCount::Known(0), 1)
    }

    #[test]
    fn file_type_selectors() {
        assert_eq!("c".parse::<FileType>().unwrap(), FileType::Crack);
        assert_eq!("D".parse::<FileType>().unwrap(), FileType::Damage);
        assert_eq!(" v ".parse::<FileType>().unwrap(), FileType::VonMises);
        assert_eq!("von-mises".parse::<FileType>().unwrap(), FileType::VonMises);
        assert!("x".parse::<FileType>().is_err());
        assert_eq!(FileType::VonMises.selector(), 'v');
    }

    #[test]
    fn mismatched_zones_are_all_reported() {
        let timestep = Timestep {
            title: "T".into(),
            time: 5,
            variables: vec!["X".into(), "Y".into()],
            zones: vec![zone("a", 5), zone("b", 7), zone("c", 5), zone("d", 1)],
        };

        let mismatch = timestep.check_solution_times().unwrap_err();
        assert_eq!(mismatch.expected, 5);
        assert_eq!(
            mismatch.zones,
            vec![
                ZoneTimeMismatch::new("b".into(), 7),
                ZoneTimeMismatch::new("d".into(), 1)
            ]
        );

        let message = mismatch.to_string();
        assert!(message.contains("zone b has solutionTime 7"));
        assert!(message.contains("zone d has solutionTime 1"));
    }

    #[test]
    fn later_duplicate_variable_wins() {
        let timestep = Timestep {
            title: "T".into(),
            time: 0,
            variables: vec!["X".into(), "S".into(), "S".into()],
            zones: vec![],
        };
        let element = Element::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(timestep.value(&element, "S"), Some(3.0));
        assert_eq!(timestep.value(&element, "Y"), None);
    }
}

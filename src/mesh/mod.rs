//! # Mesh Information
//!
//! The simulator writes every geometric point once for each element that touches it.
//! Visualization tools want an indexed mesh instead: a list of unique points, cells
//! that refer to those points by index, and scalar fields with one value per point.
//!
//! [`PolyData::from_timestep`] performs that normalization. Points are deduplicated by
//! exact coordinate equality and keep the order in which they were first seen, so the
//! same input always produces the same point indices.
//!
//! Every zone of the timestep turns into exactly one cell, its vertices listed in the
//! row / column order of the zone. The `X` and `Y` variables become the point
//! coordinates; all other variables become scalar fields.

mod point;

pub use point::Point;
use point::PointSet;

use crate::prelude::*;

/// names of the variables that hold point coordinates rather than field data
pub const X_VARIABLE: &str = "X";
pub const Y_VARIABLE: &str = "Y";

#[derive(Debug, thiserror::Error, From)]
pub enum MeshError {
    #[error("{0}")]
    MissingCoordinate(MissingCoordinate),
    #[error("{0}")]
    MissingValue(MissingValue),
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "timestep `{timestep}` does not declare the coordinate variable `{variable}`")]
pub struct MissingCoordinate {
    pub timestep: String,
    pub variable: &'static str,
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "an element of zone `{zone}` has no value for variable `{variable}`")]
pub struct MissingValue {
    pub zone: String,
    pub variable: String,
}

/// A named scalar value attached to the points of a [`PolyData`]
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    pub name: String,
    /// indexed by point index. `None` for points no element ever assigned a value to.
    values: Vec<Option<f64>>,
}

impl ScalarField {
    fn new(name: String) -> Self {
        Self {
            name,
            values: Vec::new(),
        }
    }

    fn set(&mut self, point_index: usize, value: f64) {
        if self.values.len() <= point_index {
            self.values.resize(point_index + 1, None);
        }
        self.values[point_index] = Some(value);
    }

    pub fn value_at(&self, point_index: usize) -> Option<f64> {
        self.values.get(point_index).copied().flatten()
    }

    /// true if there is a value for each of the first `point_count` points
    pub fn is_complete(&self, point_count: usize) -> bool {
        (0..point_count).all(|index| self.value_at(index).is_some())
    }
}

/// Which VTK cell keyword a set of cells is written under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Lines,
    Polygons,
}

impl CellType {
    /// Pick the topology from the first cell only: two vertices make a line, anything
    /// else a polygon. Cells of mixed sizes are written with the keyword of the first.
    pub fn for_cells(cells: &[Vec<usize>]) -> Self {
        match cells.first() {
            Some(cell) if cell.len() == 2 => Self::Lines,
            _ => Self::Polygons,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Lines => "LINES",
            Self::Polygons => "POLYGONS",
        }
    }
}

/// Indexed polygonal mesh of a single timestep
#[derive(Debug, Clone)]
pub struct PolyData {
    pub title: String,
    pub time: u64,
    points: PointSet,
    cells: Vec<Vec<usize>>,
    fields: Vec<ScalarField>,
}

impl PolyData {
    /// Build the deduplicated mesh for a parsed timestep.
    ///
    /// Should a point show up in several elements with different field values, the
    /// value of the last element wins.
    pub fn from_timestep(timestep: &Timestep) -> Result<Self, MeshError> {
        let x = coordinate_index(timestep, X_VARIABLE)?;
        let y = coordinate_index(timestep, Y_VARIABLE)?;

        let mut fields: Vec<ScalarField> = Vec::new();
        let mut field_columns: Vec<usize> = Vec::new();

        for name in &timestep.variables {
            if name == X_VARIABLE || name == Y_VARIABLE {
                continue;
            }
            if fields.iter().any(|field| &field.name == name) {
                continue;
            }
            // the lookup by name returns the last column declared under this name
            if let Some(column) = timestep.variable_index(name) {
                fields.push(ScalarField::new(name.clone()));
                field_columns.push(column);
            }
        }

        let mut points = PointSet::default();
        let mut cells = Vec::with_capacity(timestep.zones.len());

        for zone in &timestep.zones {
            let mut cell = Vec::new();

            for element in zone.elements() {
                let point = Point::planar(
                    column_value(timestep, zone, element, x)?,
                    column_value(timestep, zone, element, y)?,
                );
                let point_index = points.insert(point);
                cell.push(point_index);

                for (field, column) in fields.iter_mut().zip(&field_columns) {
                    let value = column_value(timestep, zone, element, *column)?;
                    field.set(point_index, value);
                }
            }

            cells.push(cell);
        }

        Ok(Self {
            title: timestep.title.clone(),
            time: timestep.time,
            points,
            cells,
            fields,
        })
    }

    /// unique points in first-seen order
    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }

    /// one cell per zone, each a list of indices into [`PolyData::points`]
    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    /// scalar fields in variable declaration order
    pub fn fields(&self) -> &[ScalarField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&ScalarField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn point_index(&self, point: &Point) -> Option<usize> {
        self.points.get(point)
    }

    /// value of field `name` at `point`
    pub fn value(&self, name: &str, point: &Point) -> Option<f64> {
        let index = self.point_index(point)?;
        self.field(name)?.value_at(index)
    }

    pub fn cell_type(&self) -> CellType {
        CellType::for_cells(&self.cells)
    }

    /// number of integers in the connectivity block: every cell lists its size and
    /// then its point indices
    pub fn connectivity_size(&self) -> usize {
        self.cells.iter().map(|cell| 1 + cell.len()).sum()
    }
}

impl TryFrom<&Timestep> for PolyData {
    type Error = MeshError;

    fn try_from(timestep: &Timestep) -> Result<Self, Self::Error> {
        Self::from_timestep(timestep)
    }
}

fn coordinate_index(timestep: &Timestep, variable: &'static str) -> Result<usize, MeshError> {
    timestep
        .variable_index(variable)
        .ok_or_else(|| MissingCoordinate::new(timestep.title.clone(), variable).into())
}

fn column_value(
    timestep: &Timestep,
    zone: &Zone,
    element: &Element,
    column: usize,
) -> Result<f64, MeshError> {
    element.values.get(column).copied().ok_or_else(|| {
        MissingValue::new(zone.title.clone(), timestep.variables[column].clone()).into()
    })
}

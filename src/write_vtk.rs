//! Legacy (`.vtk`) ASCII POLYDATA output
//!
//! ```text
//! # vtk DataFile Version 3.0
//! <title without spaces>
//! ASCII
//! DATASET POLYDATA
//! POINTS <n> double
//! <x> <y> <z>
//! ...
//! <LINES|POLYGONS> <cells> <size>        <- not written for VON MISES files
//! <vertices> <i0> <i1> ...
//! POINT_DATA <n>
//! SCALARS <field> double 1
//! LOOKUP_TABLE default
//! <value>
//! ...
//! ```

use crate::mesh::PolyData;
use crate::prelude::*;

use std::fs;
use std::path::{Path, PathBuf};

const HEADER: &str = "# vtk DataFile Version 3.0";

/// A point without a value for one of the fields, which would make the
/// `POINT_DATA` section unreadable
#[derive(Debug, Constructor, thiserror::Error)]
#[error("field `{field}` has no value for point {point_index}")]
pub struct MissingFieldValue {
    pub field: String,
    pub point_index: usize,
}

/// Write a mesh in legacy VTK ASCII format to a `Writer`.
///
/// Connectivity is left out for [`FileType::VonMises`] output, which is a point cloud.
pub fn write_vtk<W: Write>(
    mut writer: W,
    polydata: &PolyData,
    file_type: FileType,
) -> Result<(), Error> {
    write_header(&mut writer, polydata)?;
    write_points(&mut writer, polydata)?;

    if file_type != FileType::VonMises {
        write_cells(&mut writer, polydata)?;
    }

    write_point_data(&mut writer, polydata)?;

    writer.flush()?;

    Ok(())
}

fn write_header<W: Write>(writer: &mut W, polydata: &PolyData) -> Result<(), Error> {
    writeln!(writer, "{HEADER}")?;
    writeln!(writer, "{}", strip_spaces(&polydata.title))?;
    writeln!(writer, "ASCII")?;
    writeln!(writer, "DATASET POLYDATA")?;
    Ok(())
}

fn write_points<W: Write>(writer: &mut W, polydata: &PolyData) -> Result<(), Error> {
    let points = polydata.points();
    writeln!(writer, "POINTS {} double", points.len())?;

    let mut buffer = ryu::Buffer::new();

    for point in points {
        write!(writer, "{} ", buffer.format(point.x))?;
        write!(writer, "{} ", buffer.format(point.y))?;
        writeln!(writer, "{}", buffer.format(point.z))?;
    }

    Ok(())
}

fn write_cells<W: Write>(writer: &mut W, polydata: &PolyData) -> Result<(), Error> {
    let cells = polydata.cells();

    // nothing to connect
    if cells.is_empty() {
        return Ok(());
    }

    writeln!(
        writer,
        "{} {} {}",
        polydata.cell_type().keyword(),
        cells.len(),
        polydata.connectivity_size()
    )?;

    for cell in cells {
        write!(writer, "{}", cell.len())?;
        for index in cell {
            write!(writer, " {index}")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn write_point_data<W: Write>(writer: &mut W, polydata: &PolyData) -> Result<(), Error> {
    let point_count = polydata.points().len();
    writeln!(writer, "POINT_DATA {point_count}")?;

    let mut buffer = ryu::Buffer::new();

    for field in polydata.fields() {
        writeln!(writer, "SCALARS {} double 1", strip_spaces(&field.name))?;
        writeln!(writer, "LOOKUP_TABLE default")?;

        for point_index in 0..point_count {
            let value = field
                .value_at(point_index)
                .ok_or_else(|| MissingFieldValue::new(field.name.clone(), point_index))?;
            writeln!(writer, "{}", buffer.format(value))?;
        }
    }

    Ok(())
}

fn strip_spaces(text: &str) -> String {
    text.replace(' ', "")
}

/// `<root>/converted<base_name>`
pub fn output_directory(root: &Path, base_name: &str) -> PathBuf {
    root.join(format!("converted{base_name}"))
}

/// `<root>/converted<base_name>/<base_name>_<title>_<time:06>.vtk`
pub fn output_path(root: &Path, base_name: &str, polydata: &PolyData) -> PathBuf {
    let file_name = format!(
        "{base_name}_{}_{:06}.vtk",
        strip_spaces(&polydata.title),
        polydata.time
    );
    output_directory(root, base_name).join(file_name)
}

/// Write `polydata` into its own file below `root`, creating the output directory if
/// it does not exist yet. Returns the path of the written file.
pub fn write_to_directory(
    root: &Path,
    base_name: &str,
    polydata: &PolyData,
    file_type: FileType,
) -> Result<PathBuf, Error> {
    fs::create_dir_all(output_directory(root, base_name))?;

    let path = output_path(root, base_name, polydata);
    let file = fs::File::create(&path)?;
    write_vtk(std::io::BufWriter::new(file), polydata, file_type)?;

    Ok(path)
}

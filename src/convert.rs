//! Whole-file conversion: parse every timestep, check it, and write it out

use crate::prelude::*;

use crate::config::ConvertConfig;
use crate::parse::read_timestep;
use crate::write_vtk;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// What a finished conversion produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// every written `.vtk` file, in the order of the timesteps in the input
    pub written: Vec<PathBuf>,
}

impl ConversionReport {
    pub fn timesteps(&self) -> usize {
        self.written.len()
    }
}

/// Convert every timestep readable from `reader`.
///
/// Reading stops at the end of the input or at an end-of-file marker line (`## ##`).
/// The first error ends the conversion: files already written for earlier timesteps
/// are kept, nothing is written for the failing timestep.
pub fn convert<R: BufRead>(reader: R, config: &ConvertConfig) -> Result<ConversionReport, Error> {
    let mut lines = LineSource::new(reader);
    let mut report = ConversionReport::default();

    while !lines.matches(Pattern::EndOfFile)? && !lines.is_at_end()? {
        let timestep = read_timestep(&mut lines, config.file_type)?;

        if let Err(mismatch) = timestep.check_solution_times() {
            for zone in &mismatch.zones {
                tracing::error!(
                    "zone {} has solutionTime {} instead of {}!",
                    zone.title,
                    zone.solution_time,
                    mismatch.expected
                );
            }
            return Err(mismatch.into());
        }

        let polydata = PolyData::from_timestep(&timestep)?;
        let path = write_vtk::write_to_directory(
            &config.output_root,
            &config.base_name,
            &polydata,
            config.file_type,
        )?;

        tracing::info!(
            title = %polydata.title,
            time = polydata.time,
            points = polydata.points().len(),
            cells = polydata.cells().len(),
            "wrote {}",
            path.display()
        );

        report.written.push(path);
    }

    Ok(report)
}

/// Convert the file at `path`, naming the outputs after its base name and placing them
/// below `output_root`.
pub fn convert_file(
    path: &Path,
    file_type: FileType,
    output_root: &Path,
) -> Result<ConversionReport, Error> {
    let config = ConvertConfig::for_input(path, file_type)?.with_output_root(output_root);

    tracing::info!(
        input = %path.display(),
        file_type = %file_type,
        output = %config.output_directory().display(),
        "converting"
    );

    let file = File::open(path)?;
    convert(BufReader::new(file), &config)
}

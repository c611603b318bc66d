use crate::prelude::*;

use super::error;
use super::zone::read_zone;
use crate::patterns::{self, Pattern};

/// Read one complete timestep.
///
/// The framing depends on `file_type`: CRACK files may put a bare number in front of
/// the title and take their time from the first zone, all other files close a timestep
/// with a `Load factor = .. Iter = <time>` trailer.
pub fn read_timestep<R: BufRead>(
    lines: &mut LineSource<R>,
    file_type: FileType,
) -> Result<Timestep, ParseError> {
    if file_type == FileType::Crack && lines.matches(Pattern::NumericOnly)? {
        let skipped = lines.next_non_empty()?;
        tracing::trace!(?skipped, "skipping number in front of CRACK title");
    }

    let title_line = expect_line(lines, Pattern::Title)?;
    let title = Pattern::Title
        .captures(title_line.as_str())
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| error::MalformedLine::from_line(&title_line, Pattern::Title))?;

    let variables_line = expect_line(lines, Pattern::Variables)?;
    let variables = patterns::parse_variable_names(variables_line.as_str())
        .ok_or_else(|| error::MalformedLine::from_line(&variables_line, Pattern::Variables))?;

    let mut zones = Vec::new();
    while lines.matches(Pattern::Zone)? {
        zones.push(read_zone(&variables, lines)?);
    }

    let time = match file_type {
        FileType::Crack => zones
            .first()
            .map(|zone| zone.solution_time)
            .ok_or_else(|| error::MissingZones::new(lines.line_number(), title.clone()))?,
        FileType::Damage | FileType::VonMises => read_trailer(lines)?,
    };

    tracing::debug!(
        title = %title,
        time,
        variables = variables.len(),
        zones = zones.len(),
        "parsed timestep"
    );

    Ok(Timestep {
        title,
        time,
        variables,
        zones,
    })
}

fn read_trailer<R: BufRead>(lines: &mut LineSource<R>) -> Result<u64, ParseError> {
    let line = lines.next_non_empty()?.ok_or_else(|| {
        error::UnexpectedEof::new(lines.line_number(), Pattern::TimestepTrailer.describe())
    })?;

    let captures = Pattern::TimestepTrailer
        .captures_ignore_case(line.as_str())
        .ok_or_else(|| error::MalformedLine::from_line(&line, Pattern::TimestepTrailer))?;

    captures[1]
        .parse()
        .map_err(|_| error::MalformedNumber::new(line.number, captures[1].to_string()).into())
}

/// consume the next line, which has to be present and match `pattern`
fn expect_line<R: BufRead>(
    lines: &mut LineSource<R>,
    pattern: Pattern,
) -> Result<Line, ParseError> {
    let line = lines
        .next_non_empty()?
        .ok_or_else(|| error::UnexpectedEof::new(lines.line_number(), pattern.describe()))?;

    if pattern.is_match(line.as_str()) {
        Ok(line)
    } else {
        Err(error::MalformedLine::from_line(&line, pattern).into())
    }
}

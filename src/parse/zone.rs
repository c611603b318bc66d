use crate::prelude::*;

use super::error;
use crate::patterns::Pattern;

/// Read a single zone: its header line followed by its data rows.
///
/// `variables` are the names declared by the owning timestep. Every point on a data
/// line takes `variables.len()` consecutive values, in declaration order.
pub fn read_zone<R: BufRead>(
    variables: &[String],
    lines: &mut LineSource<R>,
) -> Result<Zone, ParseError> {
    let header = lines.next_non_empty()?.ok_or_else(|| {
        error::UnexpectedEof::new(lines.line_number(), Pattern::Zone.describe())
    })?;

    let mut zone = read_header(&header)?;

    // no data line can hold more than `usize::MAX` values
    let values_per_row = variables
        .len()
        .checked_mul(zone.column_count)
        .ok_or_else(|| {
            error::MalformedNumber::new(header.number, zone.column_count.to_string())
        })?;

    while next_row_available(&zone, lines)? {
        let line = lines.next_non_empty()?.ok_or_else(|| {
            error::UnexpectedEof::new(lines.line_number(), "another data row of the zone")
        })?;

        let row = read_row(&line, variables.len(), values_per_row)?;
        zone.rows.push(row);
    }

    tracing::debug!(
        zone = %zone.title,
        solution_time = zone.solution_time,
        rows = zone.rows.len(),
        columns = zone.column_count,
        "parsed zone"
    );

    Ok(zone)
}

fn read_header(header: &Line) -> Result<Zone, ParseError> {
    if let Some(captures) = Pattern::ZoneFullHeader.captures(header.as_str()) {
        let solution_time = parse_integer(header, &captures[2])?;
        let rows = parse_integer(header, &captures[3])?;
        let columns = parse_integer(header, &captures[4])?;

        return Ok(Zone::new(
            captures[1].to_string(),
            solution_time,
            RowCount::Known(rows),
            columns,
        ));
    }

    if let Some(captures) = Pattern::ZonePartialHeader.captures(header.as_str()) {
        let solution_time = parse_integer(header, &captures[2])?;

        return Ok(Zone::new(
            captures[1].to_string(),
            solution_time,
            RowCount::Unknown,
            1,
        ));
    }

    Err(error::MalformedLine::from_line(header, Pattern::ZonePartialHeader).into())
}

/// decide, without consuming anything, whether another data row belongs to this zone
fn next_row_available<R: BufRead>(
    zone: &Zone,
    lines: &mut LineSource<R>,
) -> Result<bool, ParseError> {
    match zone.row_count {
        RowCount::Known(rows) => Ok(zone.rows.len() < rows),
        RowCount::Unknown => {
            let finished = lines.is_at_end()?
                || lines.matches(Pattern::Zone)?
                || lines.matches_ignore_case(Pattern::TimestepTrailer)?
                || lines.matches(Pattern::EndOfFile)?
                || lines.matches(Pattern::NumericOnly)?;

            Ok(!finished)
        }
    }
}

fn read_row(line: &Line, variable_count: usize, expected: usize) -> Result<Row, ParseError> {
    let tokens: Vec<&str> = line.as_str().split_ascii_whitespace().collect();

    if tokens.len() < expected {
        return Err(error::MissingValues::new(line.number, expected, tokens.len()).into());
    }

    // without variables a row holds no points
    tokens[..expected]
        .chunks(variable_count.max(1))
        .map(|point| {
            point
                .iter()
                .map(|token| parse_float(line, token))
                .collect::<Result<Vec<f64>, ParseError>>()
                .map(Element::new)
        })
        .collect()
}

fn parse_float(line: &Line, token: &str) -> Result<f64, ParseError> {
    token
        .parse()
        .map_err(|_| error::MalformedNumber::new(line.number, token.to_string()).into())
}

fn parse_integer<T: std::str::FromStr>(line: &Line, digits: &str) -> Result<T, ParseError> {
    // the patterns only let digits through, so this can only overflow
    digits
        .parse()
        .map_err(|_| error::MalformedNumber::new(line.number, digits.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variables(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn full_header_reads_exact_row_count() {
        let text = "ZONE T=\"Z1\" SOLUTIONTIME=3 I=2, J=2,\n\
                    0.0 0.0 1.5 1.0 0.0 2.5\n\
                    1.0 0.0 2.5 1.0 1.0 3.5\n\
                    9 9 9\n";
        let mut lines = LineSource::new(text.as_bytes());

        let zone = read_zone(&variables(&["X", "Y", "S"]), &mut lines).unwrap();

        assert_eq!(zone.title, "Z1");
        assert_eq!(zone.solution_time, 3);
        assert_eq!(zone.row_count, RowCount::Known(2));
        assert_eq!(zone.column_count, 2);
        assert_eq!(zone.rows.len(), 2);
        assert_eq!(zone.rows[0][1].values, vec![1.0, 0.0, 2.5]);
        assert_eq!(zone.rows[1][1].values, vec![1.0, 1.0, 3.5]);

        // the following line is left untouched
        assert_eq!(lines.next_non_empty().unwrap().unwrap().text, "9 9 9");
    }

    #[test]
    fn partial_header_reads_until_terminator() {
        let terminators = [
            "ZONE T=\"next\" SOLUTIONTIME=4",
            "load factor = 1.0 total deformation = 0.1 iter = 4",
            "## ##",
            "17",
        ];

        for terminator in terminators {
            let text = format!(
                "ZONE T=\"tip\" SOLUTIONTIME=4\n1.0 2.0 3.0\n\n4.0 5.0 6.0\n{terminator}\n"
            );
            let mut lines = LineSource::new(text.as_bytes());

            let zone = read_zone(&variables(&["X", "Y", "D"]), &mut lines).unwrap();

            assert_eq!(zone.title, "tip");
            assert_eq!(zone.row_count, RowCount::Unknown);
            assert_eq!(zone.column_count, 1);
            assert_eq!(zone.rows.len(), 2, "terminator: {terminator}");
            assert_eq!(lines.next_non_empty().unwrap().unwrap().text, terminator);
        }
    }

    #[test]
    fn partial_header_stops_at_end_of_input() {
        let text = "ZONE T=\"tip\" SOLUTIONTIME=4\n1.0 2.0 3.0\n";
        let mut lines = LineSource::new(text.as_bytes());

        let zone = read_zone(&variables(&["X", "Y", "D"]), &mut lines).unwrap();
        assert_eq!(zone.rows.len(), 1);
    }

    #[test]
    fn malformed_number_points_at_line() {
        let text = "ZONE T=\"Z\" SOLUTIONTIME=1 I=1, J=1,\n\n0.0 abc\n";
        let mut lines = LineSource::new(text.as_bytes());

        let err = read_zone(&variables(&["X", "Y"]), &mut lines).unwrap_err();
        match err {
            ParseError::MalformedNumber(e) => {
                assert_eq!(e.line_number, 3);
                assert_eq!(e.token, "abc");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn short_data_line() {
        let text = "ZONE T=\"Z\" SOLUTIONTIME=1 I=1, J=2,\n0.0 0.0 1.0\n";
        let mut lines = LineSource::new(text.as_bytes());

        let err = read_zone(&variables(&["X", "Y"]), &mut lines).unwrap_err();
        assert!(matches!(err, ParseError::MissingValues(_)));
        assert_eq!(err.line_number(), Some(2));
    }

    #[test]
    fn known_rows_missing_from_input() {
        let text = "ZONE T=\"Z\" SOLUTIONTIME=1 I=3, J=1,\n0.0 0.0\n";
        let mut lines = LineSource::new(text.as_bytes());

        let err = read_zone(&variables(&["X", "Y"]), &mut lines).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof(_)));
    }

    #[test]
    fn oversized_column_count() {
        let text = "ZONE T=\"Z\" SOLUTIONTIME=1 I=1, J=9223372036854775808,\n0 0\n";
        let mut lines = LineSource::new(text.as_bytes());

        let err = read_zone(&variables(&["X", "Y"]), &mut lines).unwrap_err();
        assert!(matches!(err, ParseError::MalformedNumber(_)));
        assert_eq!(err.line_number(), Some(1));
    }

    #[test]
    fn column_count_beyond_integer_range() {
        let text = "ZONE T=\"Z\" SOLUTIONTIME=1 I=1, J=99999999999999999999999,\n0 0\n";
        let mut lines = LineSource::new(text.as_bytes());

        let err = read_zone(&variables(&["X", "Y"]), &mut lines).unwrap_err();
        assert!(matches!(err, ParseError::MalformedNumber(_)));
    }

    #[test]
    fn unrecognized_header() {
        let text = "ZONE something else\n";
        let mut lines = LineSource::new(text.as_bytes());

        let err = read_zone(&variables(&["X", "Y"]), &mut lines).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine(_)));
        assert_eq!(err.line_number(), Some(1));
    }
}

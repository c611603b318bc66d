//! Pull based line reading with a single line of lookahead
//!
//! The simulator output is only loosely structured, so the parsers constantly need to
//! look at the next line before deciding what to do with it. [`LineSource`] skips blank
//! lines and keeps at most one line buffered: peeking twice gives the same line, and
//! consuming after a peek hands out exactly the peeked line.

use crate::patterns::Pattern;

use std::io::{self, BufRead};

/// A single non-blank line of the input with its (1-based) physical line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    /// line content with surrounding whitespace removed
    pub text: String,
}

impl Line {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

pub struct LineSource<R> {
    reader: R,
    // `Some(None)` records that the peek already hit the end of the stream
    peeked: Option<Option<Line>>,
    lines_read: usize,
    buffer: String,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            lines_read: 0,
            buffer: String::new(),
        }
    }

    /// Consume the next non-blank line, or `None` once the stream is exhausted
    pub fn next_non_empty(&mut self) -> io::Result<Option<Line>> {
        match self.peeked.take() {
            Some(line) => Ok(line),
            None => self.read_non_empty(),
        }
    }

    /// Look at the next non-blank line without consuming it
    pub fn peek_non_empty(&mut self) -> io::Result<Option<&Line>> {
        if self.peeked.is_none() {
            let line = self.read_non_empty()?;
            self.peeked = Some(line);
        }

        Ok(self.peeked.as_ref().and_then(|line| line.as_ref()))
    }

    pub fn is_at_end(&mut self) -> io::Result<bool> {
        Ok(self.peek_non_empty()?.is_none())
    }

    /// check the next line against `pattern`. At the end of the stream nothing matches.
    pub fn matches(&mut self, pattern: Pattern) -> io::Result<bool> {
        Ok(self
            .peek_non_empty()?
            .map(|line| pattern.is_match(line.as_str()))
            .unwrap_or(false))
    }

    pub fn matches_ignore_case(&mut self, pattern: Pattern) -> io::Result<bool> {
        Ok(self
            .peek_non_empty()?
            .map(|line| pattern.is_match_ignore_case(line.as_str()))
            .unwrap_or(false))
    }

    /// number of physical lines pulled from the underlying reader so far
    pub fn line_number(&self) -> usize {
        self.lines_read
    }

    fn read_non_empty(&mut self) -> io::Result<Option<Line>> {
        loop {
            self.buffer.clear();
            let bytes = self.reader.read_line(&mut self.buffer)?;

            if bytes == 0 {
                return Ok(None);
            }

            self.lines_read += 1;

            let trimmed = self.buffer.trim();
            if !trimmed.is_empty() {
                return Ok(Some(Line {
                    number: self.lines_read,
                    text: trimmed.to_string(),
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(text: &str) -> LineSource<&[u8]> {
        LineSource::new(text.as_bytes())
    }

    #[test]
    fn skips_blank_lines() {
        let mut lines = source("\n   \nfirst\n\n\t\nsecond\n");

        let first = lines.next_non_empty().unwrap().unwrap();
        assert_eq!(first.text, "first");
        assert_eq!(first.number, 3);

        let second = lines.next_non_empty().unwrap().unwrap();
        assert_eq!(second.text, "second");
        assert_eq!(second.number, 6);

        assert!(lines.next_non_empty().unwrap().is_none());
    }

    #[test]
    fn peek_twice_then_consume() {
        let mut lines = source("  a  \nb\n");

        let peeked = lines.peek_non_empty().unwrap().cloned();
        let peeked_again = lines.peek_non_empty().unwrap().cloned();
        assert_eq!(peeked, peeked_again);
        assert_eq!(peeked.as_ref().map(Line::as_str), Some("a"));

        let consumed = lines.next_non_empty().unwrap();
        assert_eq!(consumed, peeked);

        assert_eq!(lines.next_non_empty().unwrap().unwrap().text, "b");
    }

    #[test]
    fn end_of_stream_is_not_an_error() {
        let mut lines = source("\n\n   \n");
        assert!(lines.is_at_end().unwrap());
        assert!(lines.peek_non_empty().unwrap().is_none());
        assert!(lines.next_non_empty().unwrap().is_none());
        assert!(!lines.matches(Pattern::Zone).unwrap());
    }

    #[test]
    fn matching_does_not_consume() {
        let mut lines = source("ZONE T=\"a\" SOLUTIONTIME=1\n");
        assert!(lines.matches(Pattern::Zone).unwrap());
        assert!(!lines.matches(Pattern::Title).unwrap());
        assert!(lines.matches(Pattern::ZonePartialHeader).unwrap());
        assert_eq!(lines.line_number(), 1);
        assert!(lines.next_non_empty().unwrap().is_some());
        assert!(lines.is_at_end().unwrap());
    }

    #[test]
    fn case_insensitive_trailer() {
        let mut lines = source("LOAD FACTOR = 1.0 total deformation = 2.0 iter = 7\n");
        assert!(!lines.matches(Pattern::TimestepTrailer).unwrap());
        assert!(lines.matches_ignore_case(Pattern::TimestepTrailer).unwrap());
    }
}

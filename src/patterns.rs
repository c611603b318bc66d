//! The fixed set of line shapes found in simulator output files
//!
//! Lines are classified by matching their trimmed text against these patterns. Each
//! pattern is compiled once in a case sensitive and a case insensitive flavor.

use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};

const NUMBER: &str = r"[0-9.E-]+";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// a line of nothing but a number, e.g. the stray counter in front of a CRACK title
    NumericOnly,
    /// `## ##`
    EndOfFile,
    /// `Load factor = <num> Total deformation = <num> Iter = <int>`
    TimestepTrailer,
    /// `TITLE = "<text>"`
    Title,
    /// `VARIABLES = "<name>", "<name>", ...`
    Variables,
    /// anything starting with `ZONE`
    Zone,
    /// `ZONE T="<title>" SOLUTIONTIME=<int> I=<int>, J=<int>, ...`
    ZoneFullHeader,
    /// `ZONE T="<title>" SOLUTIONTIME=<int>`
    ZonePartialHeader,
}

const ALL: [Pattern; 8] = [
    Pattern::NumericOnly,
    Pattern::EndOfFile,
    Pattern::TimestepTrailer,
    Pattern::Title,
    Pattern::Variables,
    Pattern::Zone,
    Pattern::ZoneFullHeader,
    Pattern::ZonePartialHeader,
];

static CASE_SENSITIVE: Lazy<Vec<Regex>> = Lazy::new(|| compile(false));
static CASE_INSENSITIVE: Lazy<Vec<Regex>> = Lazy::new(|| compile(true));
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("quoted name regex"));

fn compile(case_insensitive: bool) -> Vec<Regex> {
    ALL.iter()
        .map(|pattern| {
            RegexBuilder::new(&pattern.source())
                .case_insensitive(case_insensitive)
                .build()
                .expect("line patterns are fixed and valid")
        })
        .collect()
}

impl Pattern {
    fn source(self) -> String {
        match self {
            Self::NumericOnly => format!("^{NUMBER}$"),
            Self::EndOfFile => r"^#+ *#+$".to_string(),
            Self::TimestepTrailer => format!(
                r"^Load factor *= *{NUMBER} *Total deformation *= *{NUMBER} *Iter *= *(\d+)$"
            ),
            Self::Title => r#"^TITLE *= *"(.*)"$"#.to_string(),
            Self::Variables => r#"^VARIABLES *=(?: *"[^"]*",?)+$"#.to_string(),
            Self::Zone => r"^ZONE.*$".to_string(),
            Self::ZoneFullHeader => {
                r#"^ZONE *T *= *"([^"]*)" *SOLUTIONTIME *= *(\d+) *I *= *(\d+) *, *J *= *(\d+) *,.*$"#
                    .to_string()
            }
            Self::ZonePartialHeader => {
                r#"^ZONE *T *= *"([^"]*)" *SOLUTIONTIME *= *(\d+)$"#.to_string()
            }
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn regex(self) -> &'static Regex {
        &CASE_SENSITIVE[self.index()]
    }

    fn regex_ignore_case(self) -> &'static Regex {
        &CASE_INSENSITIVE[self.index()]
    }

    pub fn is_match(self, line: &str) -> bool {
        self.regex().is_match(line.trim())
    }

    pub fn is_match_ignore_case(self, line: &str) -> bool {
        self.regex_ignore_case().is_match(line.trim())
    }

    pub fn captures(self, line: &str) -> Option<Captures<'_>> {
        self.regex().captures(line.trim())
    }

    pub fn captures_ignore_case(self, line: &str) -> Option<Captures<'_>> {
        self.regex_ignore_case().captures(line.trim())
    }

    /// short human readable name of the line shape, used in error messages
    pub fn describe(self) -> &'static str {
        match self {
            Self::NumericOnly => "a numeric-only line",
            Self::EndOfFile => "an end-of-file marker",
            Self::TimestepTrailer => "a `Load factor = .. Total deformation = .. Iter = ..` line",
            Self::Title => "a `TITLE = \"..\"` line",
            Self::Variables => "a `VARIABLES = \"..\", ..` line",
            Self::Zone => "a `ZONE` line",
            Self::ZoneFullHeader => "a full `ZONE T=\"..\" SOLUTIONTIME=.. I=.., J=..,` header",
            Self::ZonePartialHeader => "a `ZONE T=\"..\" SOLUTIONTIME=..` header",
        }
    }
}

/// Pull the quoted names out of a `VARIABLES` line, in order of appearance.
///
/// Returns `None` if the line is not a variables line.
pub fn parse_variable_names(line: &str) -> Option<Vec<String>> {
    if !Pattern::Variables.is_match(line) {
        return None;
    }

    let (_, names) = line.split_once('=')?;

    let names = QUOTED
        .captures_iter(names)
        .map(|capture| capture[1].to_string())
        .collect();

    Some(names)
}

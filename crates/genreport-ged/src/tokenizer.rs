use std::fmt::{self, Display};

use genreport_common::xref::is_xref;

use crate::types::GedError;

/// One physical GED line: `level [@xref@] TAG [value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedLine {
    pub level: u16,
    pub xref: Option<String>,
    pub tag: String,
    pub value: String,
    /// 1-based line number in the source text.
    pub line: usize,
}

impl Display for GedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(xref) = &self.xref {
            write!(f, " {xref}")?;
        }
        write!(f, " {}", self.tag)?;
        if !self.value.is_empty() {
            write!(f, " {}", self.value)?;
        }
        Ok(())
    }
}

impl GedLine {
    /// Parse one line. Returns `Ok(None)` for blank lines.
    pub fn parse(raw: &str, line: usize) -> Result<Option<Self>, GedError> {
        let text = raw.trim_start_matches('\u{feff}').trim_end_matches(['\r', '\n']);
        let text = text.trim_start();
        if text.trim().is_empty() {
            return Ok(None);
        }

        let (level_str, rest) = split_word(text);
        let level: u16 = level_str.parse().map_err(|_| {
            GedError::line(line, format!("expected a level number, found `{level_str}`"))
        })?;

        let (first, rest) = split_word(rest);
        if first.is_empty() {
            return Err(GedError::line(line, "missing tag"));
        }

        let (xref, tag, value) = if is_xref(first) {
            let (tag, value) = split_word(rest);
            if tag.is_empty() {
                return Err(GedError::line(line, format!("missing tag after {first}")));
            }
            (Some(first.to_string()), tag, value)
        } else {
            (None, first, rest)
        };

        Ok(Some(GedLine {
            level,
            xref,
            tag: tag.to_ascii_uppercase(),
            value: value.to_string(),
            line,
        }))
    }
}

/// Split off the first space-delimited word. The remainder keeps its inner
/// spacing but loses the single delimiter.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start_matches([' ', '\t']);
    match s.find([' ', '\t']) {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    }
}

/// Line tokenizer over a whole decoded GED text.
pub struct Tokenizer {
    pub items: Vec<GedLine>,
}

impl Tokenizer {
    pub fn new(source: &str) -> Result<Self, GedError> {
        let mut items = Vec::with_capacity(source.len() / 24);
        for (i, raw) in source.lines().enumerate() {
            if let Some(line) = GedLine::parse(raw, i + 1)? {
                items.push(line);
            }
        }
        Ok(Self { items })
    }
}

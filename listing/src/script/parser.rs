use std::{fmt, ops::Range};

use miette::NamedSource;
use serde::Deserialize;

use super::{Action, ActionTable};
use crate::ParseError;

/// Delimiters enclosing a marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Markers {
    pub begin: String,
    pub end: String,
}

impl Markers {
    /// Create markers; both delimiters must be non-empty.
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Result<Self, ParseError> {
        let markers = Self {
            begin: begin.into(),
            end: end.into(),
        };
        markers.validate()?;
        Ok(markers)
    }

    pub(crate) fn validate(&self) -> Result<(), ParseError> {
        if self.begin.is_empty() || self.end.is_empty() {
            return Err(ParseError::EmptyMarkers);
        }
        Ok(())
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            begin: "{{".to_string(),
            end: "}}".to_string(),
        }
    }
}

/// Explicit binding of a marker to a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// A positional slot.
    Index(usize),
    /// A named value.
    Key(String),
}

impl Selector {
    /// Parse selector text. Integers are normalized, so `01` and `1` select
    /// the same slot; blank text selects nothing.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let selector = match text.parse::<i64>() {
            Ok(n) => match usize::try_from(n) {
                Ok(index) => Self::Index(index),
                Err(_) => Self::Key(n.to_string()),
            },
            Err(_) => Self::Key(text.to_string()),
        };
        Some(selector)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{}", index),
            Self::Key(key) => f.write_str(key),
        }
    }
}

/// A marker resolved to its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInstruction {
    action: Action,
    marker: String,
    selector: Option<Selector>,
    span: Range<usize>,
}

impl ActionInstruction {
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// The marker as written, delimiters included.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    /// Byte range of the marker in the template.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// One step of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Literal text, appended verbatim.
    Text(String),
    /// A marker.
    Action(ActionInstruction),
}

/// Split `source` into instructions.
pub(super) fn parse(
    name: &str,
    source: &str,
    markers: &Markers,
) -> Result<Vec<Instruction>, ParseError> {
    markers.validate()?;
    let Markers { begin, end } = markers;
    let mut instructions = Vec::new();
    let mut pos = 0;

    while let Some(found) = source[pos..].find(begin.as_str()) {
        let start = pos + found;
        if start > pos {
            instructions.push(Instruction::Text(source[pos..start].to_string()));
        }
        let body_start = start + begin.len();
        let Some(body_len) = source[body_start..].find(end.as_str()) else {
            return Err(ParseError::Unterminated {
                src: NamedSource::new(name, source.to_string()),
                span: (start..source.len()).into(),
                end: end.clone(),
            });
        };
        let body_end = body_start + body_len;
        let marker_end = body_end + end.len();
        pos = marker_end;

        let body = &source[body_start..body_end];
        let (body, comment) = match body.split_once("//") {
            Some((body, _)) => (body, true),
            None => (body, false),
        };
        let (code, selector) = match body.split_once(':') {
            Some((code, selector)) => (code.trim(), Selector::parse(selector)),
            None => (body.trim(), None),
        };
        if code.is_empty() && comment {
            continue;
        }
        let action = ActionTable::lookup(code).ok_or_else(|| ParseError::UnknownAction {
            src: NamedSource::new(name, source.to_string()),
            span: (start..marker_end).into(),
            code: code.to_string(),
        })?;
        instructions.push(Instruction::Action(ActionInstruction {
            action,
            marker: source[start..marker_end].to_string(),
            selector,
            span: start..marker_end,
        }));
    }

    if pos < source.len() {
        instructions.push(Instruction::Text(source[pos..].to_string()));
    }
    Ok(instructions)
}

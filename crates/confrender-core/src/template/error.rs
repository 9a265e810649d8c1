//! Template error types

use serde::Serialize;
use std::fmt;

/// Position of a placeholder in the template source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Byte offset of `{{`
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A well-formed placeholder whose path is not in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    /// The trimmed dotted path
    pub path: String,
    /// The placeholder exactly as written in the template
    pub text: String,
    pub location: Location,
}

/// What is structurally wrong with a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    /// `{{` with no `}}` before the end of the template
    Unclosed,
    /// Nothing but whitespace between the delimiters
    Empty,
    /// A character outside `[A-Za-z0-9_.]` in the path
    InvalidCharacter(char),
}

/// A structural defect in the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed {
    pub kind: MalformedKind,
    /// Offending source text (for unclosed placeholders, the rest of the line)
    pub text: String,
    pub location: Location,
}

/// Template rendering errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// One entry per missing placeholder occurrence, in document order
    Unresolved(Vec<Unresolved>),

    /// Structural defects; no output is produced
    Malformed(Vec<Malformed>),
}

impl RenderError {
    /// Unresolved paths in occurrence order (empty for malformed templates)
    pub fn paths(&self) -> Vec<&str> {
        match self {
            RenderError::Unresolved(items) => items.iter().map(|u| u.path.as_str()).collect(),
            RenderError::Malformed(_) => Vec::new(),
        }
    }

    /// Check whether the template itself is broken
    pub fn is_malformed(&self) -> bool {
        matches!(self, RenderError::Malformed(_))
    }

    /// Flatten into printable diagnostics
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            RenderError::Unresolved(items) => items
                .iter()
                .map(|u| Diagnostic {
                    code: "UNRESOLVED_PLACEHOLDER",
                    message: format!("no value for '{}' in {}", u.path, u.text),
                    path: Some(u.path.clone()),
                    location: u.location,
                })
                .collect(),
            RenderError::Malformed(items) => items
                .iter()
                .map(|m| Diagnostic {
                    code: "MALFORMED_TEMPLATE",
                    message: m.to_string(),
                    path: None,
                    location: m.location,
                })
                .collect(),
        }
    }
}

/// One line of a failure report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub location: Location,
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MalformedKind::Unclosed => {
                write!(f, "unclosed placeholder '{}': missing '}}}}'", self.text)
            }
            MalformedKind::Empty => write!(f, "empty placeholder '{}'", self.text),
            MalformedKind::InvalidCharacter(c) => write!(
                f,
                "invalid character {:?} in placeholder '{}': paths may only contain letters, digits, '_' and '.'",
                c, self.text
            ),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Unresolved(items) => {
                let paths: Vec<&str> = items.iter().map(|u| u.path.as_str()).collect();
                write!(
                    f,
                    "{} unresolved placeholder(s): {}",
                    items.len(),
                    paths.join(", ")
                )
            }
            RenderError::Malformed(items) => match items.first() {
                Some(first) if items.len() == 1 => {
                    write!(f, "Malformed template at {}: {}", first.location, first)
                }
                Some(first) => write!(
                    f,
                    "Malformed template at {}: {} (and {} more)",
                    first.location,
                    first,
                    items.len() - 1
                ),
                None => write!(f, "Malformed template"),
            },
        }
    }
}

impl std::error::Error for RenderError {}

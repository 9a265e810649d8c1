//! Helper functions for template rendering

use crate::template::error::{Location, Malformed, MalformedKind};

/// Characters allowed in a placeholder path
pub(crate) fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Trim placeholder content and check it is a usable path
pub(crate) fn validate_content<'a>(
    content: &'a str,
    raw: &str,
    location: Location,
) -> Result<&'a str, Malformed> {
    let path = content.trim();

    if path.is_empty() {
        return Err(Malformed {
            kind: MalformedKind::Empty,
            text: raw.to_string(),
            location,
        });
    }

    if let Some(c) = path.chars().find(|&c| !is_path_char(c)) {
        return Err(Malformed {
            kind: MalformedKind::InvalidCharacter(c),
            text: raw.to_string(),
            location,
        });
    }

    Ok(path)
}

/// Source text quoted for an unclosed placeholder: `{{` up to the end of its line
pub(crate) fn unclosed_excerpt(template: &str, start: usize) -> &str {
    let rest = &template[start..];
    match rest.find('\n') {
        Some(end) => rest[..end].trim_end_matches('\r'),
        None => rest,
    }
}

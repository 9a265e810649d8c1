//! Template renderer implementation

mod helpers;
mod tokenize;

use crate::template::error::{Location, Malformed, MalformedKind, RenderError, Unresolved};
use crate::tree::ConfigTree;

use helpers::{unclosed_excerpt, validate_content};
use tokenize::{Token, TokenStream};

/// A validated placeholder located in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte offset of `{{`
    pub start: usize,
    /// Byte offset just past `}}`
    pub end: usize,
    /// Dotted path, trimmed of surrounding whitespace
    pub path: String,
    pub line: usize,
    pub column: usize,
}

impl Placeholder {
    pub fn location(&self) -> Location {
        Location {
            offset: self.start,
            line: self.line,
            column: self.column,
        }
    }
}

/// Locate and validate every placeholder in a template
///
/// Offsets are strictly increasing. If any placeholder is malformed the whole
/// template is rejected, with every defect found in the pass.
pub fn scan(template: &str) -> Result<Vec<Placeholder>, RenderError> {
    let mut placeholders = Vec::new();
    let mut malformed = Vec::new();

    for token in TokenStream::new(template) {
        match token {
            Token::Placeholder {
                start,
                end,
                content,
                line,
                column,
            } => {
                let location = Location {
                    offset: start,
                    line,
                    column,
                };
                match validate_content(content, &template[start..end], location) {
                    Ok(path) => placeholders.push(Placeholder {
                        start,
                        end,
                        path: path.to_string(),
                        line,
                        column,
                    }),
                    Err(defect) => malformed.push(defect),
                }
            }
            Token::Unclosed {
                start,
                line,
                column,
            } => malformed.push(Malformed {
                kind: MalformedKind::Unclosed,
                text: unclosed_excerpt(template, start).to_string(),
                location: Location {
                    offset: start,
                    line,
                    column,
                },
            }),
        }
    }

    if malformed.is_empty() {
        Ok(placeholders)
    } else {
        Err(RenderError::Malformed(malformed))
    }
}

/// Unique placeholder paths in order of first occurrence
pub fn referenced_paths(template: &str) -> Result<Vec<String>, RenderError> {
    let mut paths: Vec<String> = Vec::new();
    for placeholder in scan(template)? {
        if !paths.contains(&placeholder.path) {
            paths.push(placeholder.path);
        }
    }
    Ok(paths)
}

/// Renderer substituting placeholders with configuration tree values
///
/// Rendering is a pure function of the template and the tree: no I/O, no
/// clock, no state kept between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self
    }

    /// Render a template with the given tree
    ///
    /// # Errors
    ///
    /// - [`RenderError::Malformed`] if the template has an unclosed `{{` or a
    ///   placeholder that is empty or contains characters outside `[A-Za-z0-9_.]`
    /// - [`RenderError::Unresolved`] listing every placeholder occurrence whose
    ///   path is missing from `tree`
    pub fn render(&self, template: &str, tree: &ConfigTree) -> Result<String, RenderError> {
        let placeholders = scan(template)?;

        let mut output = String::with_capacity(template.len());
        let mut unresolved = Vec::new();
        let mut cursor = 0;

        for placeholder in placeholders {
            output.push_str(&template[cursor..placeholder.start]);
            let raw = &template[placeholder.start..placeholder.end];

            match tree.get(&placeholder.path) {
                Some(value) => output.push_str(&value.to_string()),
                None => {
                    output.push_str(raw);
                    unresolved.push(Unresolved {
                        location: placeholder.location(),
                        text: raw.to_string(),
                        path: placeholder.path,
                    });
                }
            }
            cursor = placeholder.end;
        }
        output.push_str(&template[cursor..]);

        if unresolved.is_empty() {
            Ok(output)
        } else {
            Err(RenderError::Unresolved(unresolved))
        }
    }
}

/// Convenience function to render a template
pub fn render(template: &str, tree: &ConfigTree) -> Result<String, RenderError> {
    TemplateRenderer::new().render(template, tree)
}

#[cfg(test)]
mod tests;

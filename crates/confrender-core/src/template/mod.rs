//! Template module - placeholder substitution for configuration files
//!
//! Templates are plain text (HCL, TOML, INI, anything) containing placeholders
//! that are replaced with values from a [`ConfigTree`](crate::tree::ConfigTree).
//!
//! ## Syntax
//!
//! - Placeholders: `{{vault.address}}` or `{{ vault.address }}` (spaces optional)
//! - Paths use `[A-Za-z0-9_.]` only
//! - No nesting, loops or escapes: the first `}}` after `{{` closes the placeholder
//!
//! ## Quoting
//!
//! Values are inserted verbatim. A template that needs a quoted string writes
//! the quotes itself: `address = "{{ vault.address }}"`.
//!
//! ## Failure
//!
//! Rendering never returns partial output. Structural problems (unclosed `{{`,
//! empty or invalid paths) produce [`RenderError::Malformed`]; otherwise every
//! missing path is listed, in order, in [`RenderError::Unresolved`].

pub mod engine;
pub mod error;

pub use engine::{referenced_paths, render, scan, Placeholder, TemplateRenderer};
pub use error::{Diagnostic, Location, Malformed, MalformedKind, RenderError, Unresolved};

// Core modules
pub mod config;
pub mod error;
pub mod namespace;
pub mod template;
pub mod tree;

// Re-export commonly used types
pub use error::{ConfrenderError, Result};
pub use template::{render, RenderError, TemplateRenderer};
pub use tree::{ConfigTree, Scalar};

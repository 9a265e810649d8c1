//! CLI command implementations

pub mod check;
pub mod gendata;
pub mod render;

//! Tests for the template renderer
//!
//! Organized into focused submodules.

use super::*;

// Test helper functions
mod helpers;

// Dtype module for the Tessera schema system
//
// This module provides the canonical element-type set and the normalization
// path that turns user-facing type names into canonical values:
//
// 1. Canonical dtype enum with classification and sizing helpers
// 2. Extensible registry for deployment-specific type-name aliases

// Re-export public types and functions
pub use self::registry::DtypeRegistry;
pub use self::types::{Dtype, ALL_DTYPES};

// Sub-modules
pub mod registry;
pub mod types;

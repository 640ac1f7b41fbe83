// Schema module for the Tessera schema system
//
// This module provides schema definition and flattening functionality for
// Tessera datasets. It includes:
//
// 1. Nested schema tree types (primitives, field groups, shaped tensors)
// 2. Declaration dispatch via featurify
// 3. Flattening of nested trees into leaf tensor descriptors
// 4. JSON-like schema declaration parser
// 5. Declaration serialization for metadata round trips

// Re-export public types and functions
pub use self::flatten::Flatten;
pub use self::parser::SchemaParser;
pub use self::serialize::to_value;
pub use self::types::{
    featurify, featurify_with, Dim, FieldGroup, FlatTensor, Primitive, SchemaDecl, SchemaNode,
    Shape, Tensor,
};

// Sub-modules
pub mod flatten;
pub mod parser;
pub mod serialize;
pub mod types;

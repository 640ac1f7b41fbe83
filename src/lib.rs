// Tessera library entry point
// Schema definition and flattening core

pub mod dtype;
pub mod internal;
pub mod schema;

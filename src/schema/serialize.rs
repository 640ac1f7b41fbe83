// Schema declaration serialization for Tessera
//
// This module emits the JSON declaration form the parser accepts, so schema
// trees can round-trip through dataset metadata. Primitives become type-name
// strings, groups become plain objects, and tensors become "type": "tensor"
// objects with max_shape emitted only when it differs from shape.

use serde_json::{Map, Value};

use crate::schema::types::{Dim, SchemaNode, Shape};

/// Converts a schema tree back to its JSON declaration.
///
/// The output re-parses to an equal tree. Group field names that collide
/// with the `"type"` tag are outside the declaration format and will not
/// round-trip.
pub fn to_value(node: &SchemaNode) -> Value {
    match node {
        SchemaNode::Primitive(primitive) => Value::String(primitive.dtype().name().to_string()),
        SchemaNode::Group(group) => {
            let mut obj = Map::new();
            for (name, child) in group.fields() {
                obj.insert(name.clone(), to_value(child));
            }
            Value::Object(obj)
        }
        SchemaNode::Tensor(tensor) => {
            let mut obj = Map::new();
            obj.insert("type".to_string(), Value::String("tensor".to_string()));
            obj.insert("shape".to_string(), shape_to_value(tensor.shape()));
            obj.insert("dtype".to_string(), to_value(tensor.dtype()));
            if tensor.max_shape() != tensor.shape() {
                obj.insert("max_shape".to_string(), shape_to_value(tensor.max_shape()));
            }
            Value::Object(obj)
        }
    }
}

/// Converts a shape to a JSON array; variable dimensions become `null`.
fn shape_to_value(shape: &Shape) -> Value {
    Value::Array(
        shape
            .dims()
            .iter()
            .map(|dim| match dim {
                Dim::Fixed(n) => Value::from(*n as u64),
                Dim::Variable => Value::Null,
            })
            .collect(),
    )
}

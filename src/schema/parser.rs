// JSON-like schema declaration parser for Tessera
//
// This module implements a parser for JSON schema declarations, converting
// them to Tessera schema trees. A JSON string is a primitive type name, a
// plain object is a field group, and an object tagged "type": "tensor"
// carries shape, dtype and an optional max_shape.

use serde_json::Value;

use crate::dtype::{Dtype, DtypeRegistry};
use crate::internal::error::{Error, Result};
use crate::schema::types::{Dim, FieldGroup, Primitive, SchemaNode, Shape, Tensor};

/// Parser for JSON-like schema declarations
#[derive(Debug, Default)]
pub struct SchemaParser {
    /// Resolves raw dtype names, including user-registered aliases
    dtypes: DtypeRegistry,
}

impl SchemaParser {
    /// Creates a new schema parser with only the built-in dtype names.
    pub fn new() -> Self {
        Self {
            dtypes: DtypeRegistry::new(),
        }
    }

    /// Creates a parser around an existing dtype registry.
    pub fn with_registry(dtypes: DtypeRegistry) -> Self {
        Self { dtypes }
    }

    /// Registers a custom dtype alias for subsequent parses.
    pub fn add_dtype_alias(&mut self, alias: &str, dtype: Dtype) {
        self.dtypes.register_alias(alias, dtype);
    }

    /// Parses a JSON declaration into a schema tree.
    pub fn parse_schema(&self, json: &Value) -> Result<SchemaNode> {
        match json {
            Value::String(name) => Ok(SchemaNode::Primitive(Primitive::with_registry(
                name,
                &self.dtypes,
            )?)),
            Value::Object(obj) => {
                // An object with a "type" tag is a single typed node;
                // anything else is a group of named fields.
                match obj.get("type") {
                    Some(Value::String(tag)) if tag == "tensor" => self.parse_tensor(obj),
                    Some(Value::String(name)) => Ok(SchemaNode::Primitive(
                        Primitive::with_registry(name, &self.dtypes)?,
                    )),
                    Some(_) => Err(Error::SchemaError(
                        "Field 'type' must be a string".to_string(),
                    )),
                    None => self.parse_group(obj),
                }
            }
            _ => Err(Error::SchemaError(format!(
                "Invalid schema declaration: {:?}, expected string or object",
                json
            ))),
        }
    }

    /// Parses a plain object into a field group, preserving key order.
    fn parse_group(&self, obj: &serde_json::Map<String, Value>) -> Result<SchemaNode> {
        let mut fields: Vec<(String, SchemaNode)> = Vec::with_capacity(obj.len());
        for (name, decl) in obj {
            let node = self.parse_schema(decl)?;
            fields.push((name.clone(), node));
        }
        Ok(SchemaNode::Group(FieldGroup::with_registry(
            fields,
            &self.dtypes,
        )?))
    }

    /// Parses a `"type": "tensor"` object.
    fn parse_tensor(&self, obj: &serde_json::Map<String, Value>) -> Result<SchemaNode> {
        let shape = match obj.get("shape") {
            Some(value) => self.parse_shape(value)?,
            None => {
                return Err(Error::SchemaError(
                    "Tensor schema must specify 'shape'".to_string(),
                ))
            }
        };

        let dtype = match obj.get("dtype") {
            Some(value) => self.parse_schema(value)?,
            None => {
                return Err(Error::SchemaError(
                    "Tensor schema must specify 'dtype'".to_string(),
                ))
            }
        };

        let max_shape = match obj.get("max_shape") {
            Some(value) => Some(self.parse_shape(value)?),
            None => None,
        };

        let tensor = Tensor::with_registry(shape, dtype, max_shape, &self.dtypes)?;
        Ok(SchemaNode::Tensor(tensor))
    }

    /// Parses a shape array; `null` entries are variable dimensions.
    fn parse_shape(&self, value: &Value) -> Result<Shape> {
        let entries = match value {
            Value::Array(entries) => entries,
            _ => {
                return Err(Error::SchemaError(format!(
                    "Shape must be an array, got: {:?}",
                    value
                )))
            }
        };

        let mut dims = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                Value::Null => dims.push(Dim::Variable),
                Value::Number(n) => match n.as_u64() {
                    Some(extent) => dims.push(Dim::Fixed(extent as usize)),
                    None => {
                        return Err(Error::SchemaError(format!(
                            "Shape dimension must be a non-negative integer, got: {}",
                            n
                        )))
                    }
                },
                _ => {
                    return Err(Error::SchemaError(format!(
                        "Shape dimension must be a non-negative integer or null, got: {:?}",
                        entry
                    )))
                }
            }
        }
        Ok(Shape::new(dims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::flatten::Flatten;
    use serde_json::json;

    #[test]
    fn test_parse_primitive_string() {
        let parser = SchemaParser::new();
        let node = parser.parse_schema(&json!("int32")).unwrap();
        match node {
            SchemaNode::Primitive(primitive) => assert_eq!(primitive.dtype(), Dtype::Int32),
            other => panic!("expected primitive, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_typed_primitive_object() {
        let parser = SchemaParser::new();
        let node = parser.parse_schema(&json!({"type": "float64"})).unwrap();
        match node {
            SchemaNode::Primitive(primitive) => assert_eq!(primitive.dtype(), Dtype::Float64),
            other => panic!("expected primitive, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_group_preserves_order() {
        let parser = SchemaParser::new();
        let node = parser
            .parse_schema(&json!({"z": "int32", "a": "float64"}))
            .unwrap();
        let records = node.flatten();
        let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/z", "/a"]);
    }

    #[test]
    fn test_parse_nested_group() {
        let parser = SchemaParser::new();
        let node = parser
            .parse_schema(&json!({"meta": {"id": "int64"}, "label": "uint8"}))
            .unwrap();
        let records = node.flatten();
        let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/meta/id", "/label"]);
    }

    #[test]
    fn test_parse_tensor() {
        let parser = SchemaParser::new();
        let node = parser
            .parse_schema(&json!({
                "type": "tensor",
                "shape": [null, null, 3],
                "dtype": "uint8",
                "max_shape": [480, 640, 3]
            }))
            .unwrap();
        match &node {
            SchemaNode::Tensor(tensor) => {
                assert_eq!(
                    tensor.shape(),
                    &Shape::new(vec![Dim::Variable, Dim::Variable, Dim::Fixed(3)])
                );
                assert_eq!(tensor.max_shape(), &Shape::fixed(&[480, 640, 3]));
            }
            other => panic!("expected tensor, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_tensor_defaults_max_shape() {
        let parser = SchemaParser::new();
        let node = parser
            .parse_schema(&json!({"type": "tensor", "shape": [28, 28], "dtype": "float32"}))
            .unwrap();
        match node {
            SchemaNode::Tensor(tensor) => assert_eq!(tensor.max_shape(), tensor.shape()),
            other => panic!("expected tensor, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_tensor_dtype() {
        let parser = SchemaParser::new();
        let node = parser
            .parse_schema(&json!({
                "type": "tensor",
                "shape": [2],
                "dtype": {"type": "tensor", "shape": [3], "dtype": "int8"}
            }))
            .unwrap();
        let records = node.flatten();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].shape, Shape::fixed(&[2, 3]));
    }

    #[test]
    fn test_parse_tensor_over_group() {
        let parser = SchemaParser::new();
        let node = parser
            .parse_schema(&json!({
                "type": "tensor",
                "shape": [4],
                "dtype": {"x": "int32", "y": "int32"}
            }))
            .unwrap();
        let records = node.flatten();
        let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/x", "/y"]);
        assert_eq!(records[0].shape, Shape::fixed(&[4]));
    }

    #[test]
    fn test_parse_custom_alias() {
        let mut parser = SchemaParser::new();
        parser.add_dtype_alias("pixel", Dtype::UInt8);
        let node = parser
            .parse_schema(&json!({"img": {"type": "tensor", "shape": [8, 8], "dtype": "pixel"}}))
            .unwrap();
        let records = node.flatten();
        assert_eq!(records[0].dtype, Dtype::UInt8);
    }

    #[test]
    fn test_parse_rejects_non_schema_values() {
        let parser = SchemaParser::new();
        assert!(parser.parse_schema(&json!(42)).is_err());
        assert!(parser.parse_schema(&json!(true)).is_err());
        assert!(parser.parse_schema(&json!(["int32"])).is_err());
        assert!(parser.parse_schema(&json!(null)).is_err());
    }

    #[test]
    fn test_parse_tensor_missing_shape() {
        let parser = SchemaParser::new();
        let result = parser.parse_schema(&json!({"type": "tensor", "dtype": "uint8"}));
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Schema Error: Tensor schema must specify 'shape'"
        );
    }

    #[test]
    fn test_parse_tensor_missing_dtype() {
        let parser = SchemaParser::new();
        let result = parser.parse_schema(&json!({"type": "tensor", "shape": [2]}));
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Schema Error: Tensor schema must specify 'dtype'"
        );
    }

    #[test]
    fn test_parse_rejects_negative_dimension() {
        let parser = SchemaParser::new();
        let result = parser.parse_schema(&json!({
            "type": "tensor",
            "shape": [-1, 3],
            "dtype": "uint8"
        }));
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Schema Error: Shape dimension must be a non-negative integer, got: -1"
        );
    }

    #[test]
    fn test_parse_rejects_max_shape_rank_mismatch() {
        let parser = SchemaParser::new();
        let result = parser.parse_schema(&json!({
            "type": "tensor",
            "shape": [2, 3],
            "dtype": "uint8",
            "max_shape": [2]
        }));
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Schema Error: max_shape rank 1 does not match shape rank 2"
        );
    }

    #[test]
    fn test_parse_propagates_unknown_dtype() {
        let parser = SchemaParser::new();
        let result = parser.parse_schema(&json!({"a": "quaternion"}));
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Dtype Error: Unknown dtype: quaternion"
        );
    }
}

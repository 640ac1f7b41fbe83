// Schema flattening for the Tessera schema system
//
// This module reduces a nested schema tree to its leaf tensor descriptors.
// Each primitive leaf becomes one record; groups contribute a `/name` path
// segment per level and tensors contribute leading dimensions. Emission is
// depth first in declaration order, so the record sequence is deterministic
// for a given tree.

use super::types::{FieldGroup, FlatTensor, Primitive, SchemaNode, Shape, Tensor};

/// Capability of reducing a schema (sub)tree to its leaf descriptors.
pub trait Flatten {
    /// Emits one record per reachable primitive leaf, depth first, in
    /// declaration order.
    fn flatten(&self) -> Vec<FlatTensor>;
}

impl Flatten for Primitive {
    /// One record: empty path, scalar shape, scalar bound.
    fn flatten(&self) -> Vec<FlatTensor> {
        vec![FlatTensor::new(
            "",
            Shape::scalar(),
            self.dtype(),
            Shape::scalar(),
        )]
    }
}

impl Flatten for FieldGroup {
    /// Prefixes each child record's path with `/` and the field name.
    /// Shapes and dtypes pass through untouched. An empty group emits
    /// nothing.
    fn flatten(&self) -> Vec<FlatTensor> {
        let mut records = Vec::new();
        for (name, child) in self.fields() {
            for leaf in child.flatten() {
                records.push(FlatTensor::new(
                    format!("/{}{}", name, leaf.path),
                    leaf.shape,
                    leaf.dtype,
                    leaf.max_shape,
                ));
            }
        }
        records
    }
}

impl Flatten for Tensor {
    /// Prepends this tensor's dimensions to each child record, applying
    /// `shape` and `max_shape` independently. Paths pass through untouched;
    /// tensors contribute no path segment.
    fn flatten(&self) -> Vec<FlatTensor> {
        self.dtype()
            .flatten()
            .into_iter()
            .map(|leaf| {
                FlatTensor::new(
                    leaf.path,
                    self.shape().concat(&leaf.shape),
                    leaf.dtype,
                    self.max_shape().concat(&leaf.max_shape),
                )
            })
            .collect()
    }
}

impl Flatten for SchemaNode {
    fn flatten(&self) -> Vec<FlatTensor> {
        match self {
            SchemaNode::Primitive(primitive) => primitive.flatten(),
            SchemaNode::Group(group) => group.flatten(),
            SchemaNode::Tensor(tensor) => tensor.flatten(),
        }
    }
}

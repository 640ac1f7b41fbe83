// Schema node types for the Tessera schema system
//
// This module defines the nested schema tree a user declares (primitives,
// named field groups, shaped tensors) and the leaf descriptor records the
// tree flattens into. Nodes are immutable after construction; the flattening
// rules live in `flatten.rs`.

use std::fmt;

use crate::dtype::{Dtype, DtypeRegistry};
use crate::internal::error::{Error, Result};

/// A single dimension extent: a fixed size or the variable sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dim {
    /// Fixed extent, known at declaration time
    Fixed(usize),
    /// Variable extent, bounded only by the enclosing `max_shape`
    Variable,
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::Fixed(n) => write!(f, "{}", n),
            Dim::Variable => write!(f, "?"),
        }
    }
}

impl From<usize> for Dim {
    fn from(extent: usize) -> Self {
        Dim::Fixed(extent)
    }
}

/// An ordered tuple of dimension extents. The empty shape denotes a scalar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shape(Vec<Dim>);

impl Shape {
    /// Creates a shape from explicit dimensions.
    pub fn new(dims: Vec<Dim>) -> Self {
        Self(dims)
    }

    /// The rank-0 scalar shape.
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    /// Creates a shape whose dimensions are all fixed.
    pub fn fixed(dims: &[usize]) -> Self {
        Self(dims.iter().map(|&d| Dim::Fixed(d)).collect())
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// The dimension extents in order.
    pub fn dims(&self) -> &[Dim] {
        &self.0
    }

    /// Returns true when every dimension is fixed.
    pub fn is_fixed(&self) -> bool {
        self.0.iter().all(|d| matches!(d, Dim::Fixed(_)))
    }

    /// Total element count, or `None` when any dimension is variable.
    pub fn numel(&self) -> Option<usize> {
        let mut total = 1usize;
        for dim in &self.0 {
            match dim {
                Dim::Fixed(n) => total *= n,
                Dim::Variable => return None,
            }
        }
        Some(total)
    }

    /// Concatenates two shapes, own dimensions first.
    pub fn concat(&self, other: &Shape) -> Shape {
        let mut dims = Vec::with_capacity(self.0.len() + other.0.len());
        dims.extend_from_slice(&self.0);
        dims.extend_from_slice(&other.0);
        Shape(dims)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dim)?;
        }
        write!(f, ")")
    }
}

impl From<Vec<Dim>> for Shape {
    fn from(dims: Vec<Dim>) -> Self {
        Shape(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::fixed(dims)
    }
}

/// A leaf tensor descriptor produced by flattening.
///
/// Each record maps to exactly one physical storage column. `path` is the
/// column key, unique within the output of a single root schema; the empty
/// path denotes a schema that is itself a bare scalar at the root.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatTensor {
    /// Slash-delimited column path
    pub path: String,
    /// Nominal shape; may contain variable dimensions
    pub shape: Shape,
    /// Canonical element type
    pub dtype: Dtype,
    /// Per-dimension upper bound; always the same rank as `shape`
    pub max_shape: Shape,
}

impl FlatTensor {
    /// Creates a new leaf descriptor.
    pub fn new(path: impl Into<String>, shape: Shape, dtype: Dtype, max_shape: Shape) -> Self {
        FlatTensor {
            path: path.into(),
            shape,
            dtype,
            max_shape,
        }
    }
}

/// Schema node wrapping a single canonical element type.
///
/// Flattens to exactly one record with an empty path and scalar shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    dtype: Dtype,
}

impl Primitive {
    /// Creates a primitive from a raw type name, normalizing it immediately.
    ///
    /// Fails with the normalization error for unrecognized names.
    pub fn new(raw: &str) -> Result<Self> {
        Ok(Self {
            dtype: Dtype::parse(raw)?,
        })
    }

    /// Creates a primitive resolving the raw name through a registry.
    pub fn with_registry(raw: &str, registry: &DtypeRegistry) -> Result<Self> {
        Ok(Self {
            dtype: registry.normalize(raw)?,
        })
    }

    /// Creates a primitive from an already-canonical dtype.
    pub fn from_dtype(dtype: Dtype) -> Self {
        Self { dtype }
    }

    /// The stored canonical element type.
    pub fn dtype(&self) -> Dtype {
        self.dtype
    }
}

/// Schema node owning named child schemas in declaration order.
///
/// Field order determines column emission order, so it is preserved exactly
/// as declared.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    fields: Vec<(String, SchemaNode)>,
}

impl FieldGroup {
    /// Builds a group from `(name, declaration)` pairs, dispatching every
    /// declaration through [`featurify`].
    ///
    /// Duplicate field names are rejected: two fields with the same name
    /// would flatten onto the same column path.
    pub fn new<S, D>(entries: Vec<(S, D)>) -> Result<Self>
    where
        S: Into<String>,
        D: Into<SchemaDecl>,
    {
        Self::with_registry(entries, &DtypeRegistry::default())
    }

    /// Builds a group resolving raw type names through a registry.
    pub fn with_registry<S, D>(entries: Vec<(S, D)>, registry: &DtypeRegistry) -> Result<Self>
    where
        S: Into<String>,
        D: Into<SchemaDecl>,
    {
        let mut fields: Vec<(String, SchemaNode)> = Vec::with_capacity(entries.len());
        for (name, decl) in entries {
            let name = name.into();
            if fields.iter().any(|(existing, _)| *existing == name) {
                return Err(Error::SchemaError(format!(
                    "Duplicate field name '{}' in group",
                    name
                )));
            }
            let node = featurify_with(decl, registry)?;
            fields.push((name, node));
        }
        Ok(Self { fields })
    }

    /// Field entries in declaration order.
    pub fn fields(&self) -> &[(String, SchemaNode)] {
        &self.fields
    }

    /// Number of direct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the group has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a direct child by field name.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, node)| node)
    }
}

/// Schema node adding leading dimensions to an element sub-schema.
///
/// The element sub-schema may itself be a primitive, a field group, or
/// another tensor; nested tensors accumulate their dimensions outermost
/// first when flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    max_shape: Shape,
    dtype: Box<SchemaNode>,
}

impl Tensor {
    /// Creates a tensor whose `max_shape` equals its `shape`.
    pub fn new(shape: Shape, dtype: impl Into<SchemaDecl>) -> Result<Self> {
        Self::with_registry(shape, dtype, None, &DtypeRegistry::default())
    }

    /// Creates a tensor with an explicit per-dimension upper bound.
    ///
    /// `max_shape` must have the same rank as `shape`. Per-dimension
    /// ordering between the two is the caller's contract and is not checked.
    pub fn with_max_shape(
        shape: Shape,
        dtype: impl Into<SchemaDecl>,
        max_shape: Shape,
    ) -> Result<Self> {
        Self::with_registry(shape, dtype, Some(max_shape), &DtypeRegistry::default())
    }

    /// Registry-aware constructor; `max_shape` defaults to `shape` when
    /// absent.
    pub fn with_registry(
        shape: Shape,
        dtype: impl Into<SchemaDecl>,
        max_shape: Option<Shape>,
        registry: &DtypeRegistry,
    ) -> Result<Self> {
        let max_shape = match max_shape {
            Some(max) => {
                if max.rank() != shape.rank() {
                    return Err(Error::SchemaError(format!(
                        "max_shape rank {} does not match shape rank {}",
                        max.rank(),
                        shape.rank()
                    )));
                }
                max
            }
            None => shape.clone(),
        };
        let dtype = featurify_with(dtype, registry)?;
        Ok(Self {
            shape,
            max_shape,
            dtype: Box::new(dtype),
        })
    }

    /// The leading dimensions this tensor contributes.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Per-dimension upper bound for the leading dimensions.
    pub fn max_shape(&self) -> &Shape {
        &self.max_shape
    }

    /// The element sub-schema of each tensor cell.
    pub fn dtype(&self) -> &SchemaNode {
        &self.dtype
    }
}

/// A node in the user-declared schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Bare scalar leaf
    Primitive(Primitive),
    /// Named fields, declaration-ordered
    Group(FieldGroup),
    /// Leading dimensions over an element sub-schema
    Tensor(Tensor),
}

impl SchemaNode {
    /// Number of primitive leaves reachable from this node.
    ///
    /// Equals the number of records `flatten` emits.
    pub fn leaf_count(&self) -> usize {
        match self {
            SchemaNode::Primitive(_) => 1,
            SchemaNode::Group(group) => group
                .fields()
                .iter()
                .map(|(_, child)| child.leaf_count())
                .sum(),
            SchemaNode::Tensor(tensor) => tensor.dtype().leaf_count(),
        }
    }
}

/// An untyped schema declaration, before canonicalization.
///
/// This is the input [`featurify`] accepts: a raw element-type name, a
/// mapping from field names to nested declarations, or an
/// already-constructed node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDecl {
    /// Raw element-type name, e.g. `"int32"`
    Dtype(String),
    /// Field-name to declaration mapping
    Fields(Vec<(String, SchemaDecl)>),
    /// Already-constructed schema node
    Node(SchemaNode),
}

impl From<&str> for SchemaDecl {
    fn from(raw: &str) -> Self {
        SchemaDecl::Dtype(raw.to_string())
    }
}

impl From<String> for SchemaDecl {
    fn from(raw: String) -> Self {
        SchemaDecl::Dtype(raw)
    }
}

impl From<Dtype> for SchemaDecl {
    fn from(dtype: Dtype) -> Self {
        SchemaDecl::Node(SchemaNode::Primitive(Primitive::from_dtype(dtype)))
    }
}

impl From<Primitive> for SchemaDecl {
    fn from(primitive: Primitive) -> Self {
        SchemaDecl::Node(SchemaNode::Primitive(primitive))
    }
}

impl From<FieldGroup> for SchemaDecl {
    fn from(group: FieldGroup) -> Self {
        SchemaDecl::Node(SchemaNode::Group(group))
    }
}

impl From<Tensor> for SchemaDecl {
    fn from(tensor: Tensor) -> Self {
        SchemaDecl::Node(SchemaNode::Tensor(tensor))
    }
}

impl From<SchemaNode> for SchemaDecl {
    fn from(node: SchemaNode) -> Self {
        SchemaDecl::Node(node)
    }
}

impl<S, D> From<Vec<(S, D)>> for SchemaDecl
where
    S: Into<String>,
    D: Into<SchemaDecl>,
{
    fn from(entries: Vec<(S, D)>) -> Self {
        SchemaDecl::Fields(
            entries
                .into_iter()
                .map(|(name, decl)| (name.into(), decl.into()))
                .collect(),
        )
    }
}

/// Normalizes an arbitrary declaration into a schema node.
///
/// Mappings become [`FieldGroup`]s (every value dispatched recursively),
/// already-constructed nodes pass through unchanged, and anything else is
/// treated as a raw element-type name and wrapped in a [`Primitive`].
/// Normalization failures propagate unchanged.
pub fn featurify(decl: impl Into<SchemaDecl>) -> Result<SchemaNode> {
    featurify_with(decl, &DtypeRegistry::default())
}

/// Normalizes a declaration, resolving raw type names through `registry`.
pub fn featurify_with(decl: impl Into<SchemaDecl>, registry: &DtypeRegistry) -> Result<SchemaNode> {
    match decl.into() {
        SchemaDecl::Fields(entries) => Ok(SchemaNode::Group(FieldGroup::with_registry(
            entries, registry,
        )?)),
        SchemaDecl::Node(node) => Ok(node),
        SchemaDecl::Dtype(raw) => Ok(SchemaNode::Primitive(Primitive::with_registry(
            &raw, registry,
        )?)),
    }
}

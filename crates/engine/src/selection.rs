//! Requested-field shapes.
//!
//! The query-resolution layer hands the engine the caller's requested output
//! shape as a [`SelectionShape`] tree. [`SelectionShape::selected_fields`]
//! flattens the names selected directly under a path; nested objects stay a
//! single name there, because expanding composites (for example `customer`)
//! is the mapping table's job.

use serde_json::Value;

/// A node of the caller's requested output shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionShape {
    fields: Vec<SelectionField>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SelectionField {
    name: String,
    children: SelectionShape,
}

impl SelectionShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a leaf field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(SelectionField {
            name: name.into(),
            children: SelectionShape::default(),
        });
        self
    }

    /// Adds a nested field carrying its own selection.
    #[must_use]
    pub fn node(mut self, name: impl Into<String>, children: SelectionShape) -> Self {
        self.fields.push(SelectionField {
            name: name.into(),
            children,
        });
        self
    }

    /// Returns the ordered field names selected immediately under `path`.
    ///
    /// A path that cannot be resolved yields an empty set: the caller asked
    /// for nothing under that node. That is not an error, and operations
    /// still run with an empty projection.
    pub fn selected_fields(&self, path: &[&str]) -> Vec<String> {
        let mut node = self;
        for segment in path {
            match node.fields.iter().find(|f| f.name == *segment) {
                Some(field) => node = &field.children,
                None => return Vec::new(),
            }
        }
        node.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Builds a shape from a JSON value: object keys become fields, nested
    /// objects become nodes, anything else a leaf.
    pub fn from_json(value: &Value) -> Self {
        let mut shape = SelectionShape::new();
        if let Value::Object(map) = value {
            for (name, child) in map {
                shape = match child {
                    Value::Object(_) => shape.node(name, SelectionShape::from_json(child)),
                    _ => shape.field(name),
                };
            }
        }
        shape
    }
}

//! Core data model types for host tables.
//!
//! A host table is an in-memory [`DataSet`] described by a [`Schema`] (a list of typed
//! [`Field`]s). Each field may carry one or more [`DataRole`] tags telling the visual which
//! column plays the category, breakdown, value or start-value part of the waterfall.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical data type for a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// Semantic role a column plays in the waterfall.
///
/// Category-like roles ([`DataRole::Category`], [`DataRole::Breakdown`]) label rows; value-like
/// roles ([`DataRole::Value`], [`DataRole::StartValue`]) carry numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataRole {
    /// Category labels; rows are grouped by this column.
    Category,
    /// Optional sub-label within a category.
    Breakdown,
    /// Signed delta contributed by each row.
    Value,
    /// Scalar starting total (first row only).
    StartValue,
}

impl DataRole {
    /// All roles, in the order the host declares them.
    pub const ALL: [DataRole; 4] = [
        DataRole::Category,
        DataRole::Breakdown,
        DataRole::Value,
        DataRole::StartValue,
    ];

    /// Role name as it appears in host payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            DataRole::Category => "category",
            DataRole::Breakdown => "breakdown",
            DataRole::Value => "value",
            DataRole::StartValue => "startValue",
        }
    }

    /// Parse a role from its host name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == name)
    }

    /// Whether columns with this role belong to the category-like collection.
    pub fn is_category_like(self) -> bool {
        matches!(self, DataRole::Category | DataRole::Breakdown)
    }
}

impl fmt::Display for DataRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
    /// Roles this column plays in the visual. Untagged columns are ignored by the visual.
    pub roles: Vec<DataRole>,
}

impl Field {
    /// Create a new field without roles.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            roles: Vec::new(),
        }
    }

    /// Tag the field with an additional role.
    pub fn with_role(mut self, role: DataRole) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Whether the field carries `role`.
    pub fn has_role(&self, role: DataRole) -> bool {
        self.roles.contains(&role)
    }
}

/// A list of fields describing the expected shape of incoming data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed cell value.
///
/// Serialized untagged, so host JSON cells (`null`, booleans, numbers, strings) map directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Numeric reading of the cell.
    ///
    /// Returns `None` for nulls, booleans, strings and NaN; callers treat those as `0`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Label reading of the cell.
    ///
    /// Returns `None` for cells the host considers blank: null, empty string, `false`, zero and
    /// NaN. Everything else is rendered with its display text.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Value::Null | Value::Bool(false) | Value::Int64(0) => None,
            Value::Float64(v) if *v == 0.0 || v.is_nan() => None,
            Value::Utf8(s) if s.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Copy one column out of the row-major storage.
    ///
    /// Short rows yield [`Value::Null`] for the missing cell.
    pub fn column(&self, idx: usize) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or(Value::Null))
            .collect()
    }
}

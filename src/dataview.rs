//! Host payload types.
//!
//! The host delivers each update as one or more [`DataView`]s. The visual only reads the
//! categorical shape: two parallel column collections (category-like and value-like), each
//! column annotated with role tags and a flat list of cells aligned by row index.
//!
//! ```rust
//! use waterfall_visual::dataview::DataView;
//! use waterfall_visual::types::DataRole;
//!
//! let view = DataView::from_json_str(
//!     r#"{
//!         "categorical": {
//!             "categories": [
//!                 {
//!                     "source": {"displayName": "Region", "roles": {"category": true}},
//!                     "values": ["A", "B"]
//!                 }
//!             ],
//!             "values": [
//!                 {
//!                     "source": {"displayName": "Delta", "roles": {"value": true}},
//!                     "values": [10, -3]
//!                 }
//!             ]
//!         }
//!     }"#,
//! )
//! .unwrap();
//!
//! let categorical = view.categorical.unwrap();
//! let categories = categorical.categories.unwrap();
//! assert!(categories[0].source.has_role(DataRole::Category));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::VisualResult;
use crate::types::{DataRole, DataSet, Value};

/// Arguments of one host update call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOptions {
    /// Data views supplied by the host; only the first one is read.
    #[serde(default)]
    pub data_views: Vec<DataView>,
}

impl UpdateOptions {
    /// Wrap a single data view.
    pub fn new(view: DataView) -> Self {
        Self {
            data_views: vec![view],
        }
    }

    /// Decode update options from host JSON.
    pub fn from_json_str(input: &str) -> VisualResult<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

/// One query result handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataView {
    /// Categorical shape of the result; `None` when the host has no fields bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorical: Option<CategoricalView>,
    /// View metadata, including persisted formatting objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DataViewMetadata>,
}

/// Metadata attached to a [`DataView`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewMetadata {
    /// Persisted formatting objects, keyed by card name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<serde_json::Value>,
}

/// Parallel category-like and value-like column collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalView {
    /// Category-like columns (roles `category`, `breakdown`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<DataViewColumn>>,
    /// Value-like columns (roles `value`, `startValue`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<DataViewColumn>>,
}

impl CategoricalView {
    /// Whether both column collections are present and non-empty.
    pub fn has_required_collections(&self) -> bool {
        let non_empty =
            |cols: &Option<Vec<DataViewColumn>>| cols.as_ref().is_some_and(|c| !c.is_empty());
        non_empty(&self.categories) && non_empty(&self.values)
    }
}

/// A role-tagged column with its cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewColumn {
    /// Column metadata.
    pub source: ColumnSource,
    /// Cells aligned by row index across every column of the view.
    #[serde(default)]
    pub values: Vec<Value>,
}

/// Column metadata: display name and role tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSource {
    /// Human-readable column name.
    #[serde(default)]
    pub display_name: String,
    /// Role tags as sent by the host (`{"category": true}`).
    #[serde(default)]
    pub roles: BTreeMap<String, bool>,
}

impl ColumnSource {
    /// Create column metadata tagged with `roles`.
    pub fn new(display_name: impl Into<String>, roles: &[DataRole]) -> Self {
        Self {
            display_name: display_name.into(),
            roles: roles.iter().map(|r| (r.as_str().to_string(), true)).collect(),
        }
    }

    /// Whether the column is tagged with `role`.
    pub fn has_role(&self, role: DataRole) -> bool {
        self.roles.get(role.as_str()).copied().unwrap_or(false)
    }
}

impl DataView {
    /// Decode a data view from host JSON.
    pub fn from_json_str(input: &str) -> VisualResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Build a categorical data view from a role-tagged table.
    ///
    /// Fields tagged with a category-like role become category columns; fields tagged with a
    /// value-like role become value columns. Untagged fields are dropped. A field tagged with
    /// roles from both sides appears in both collections.
    pub fn from_dataset(dataset: &DataSet) -> Self {
        let mut categories = Vec::new();
        let mut values = Vec::new();

        for (idx, field) in dataset.schema.fields.iter().enumerate() {
            let (category_roles, value_roles): (Vec<DataRole>, Vec<DataRole>) =
                field.roles.iter().partition(|r| r.is_category_like());

            if !category_roles.is_empty() {
                categories.push(DataViewColumn {
                    source: ColumnSource::new(&field.name, &category_roles),
                    values: dataset.column(idx),
                });
            }
            if !value_roles.is_empty() {
                values.push(DataViewColumn {
                    source: ColumnSource::new(&field.name, &value_roles),
                    values: dataset.column(idx),
                });
            }
        }

        Self {
            categorical: Some(CategoricalView {
                categories: Some(categories),
                values: Some(values),
            }),
            metadata: None,
        }
    }

    /// Attach persisted formatting objects.
    pub fn with_objects(mut self, objects: serde_json::Value) -> Self {
        self.metadata = Some(DataViewMetadata {
            objects: Some(objects),
        });
        self
    }

    /// Persisted formatting objects, if any.
    pub fn objects(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref().and_then(|m| m.objects.as_ref())
    }
}

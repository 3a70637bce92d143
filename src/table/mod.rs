//! Loading exported host tables.
//!
//! A host without a native binding can hand the visual its already-queried table as a CSV
//! export. The header row carries the role tags the host would otherwise send as column
//! metadata:
//!
//! ```text
//! region[category],product[breakdown],delta[value],opening[startValue],comment
//! ```
//!
//! A header may carry several roles (`amount[value,startValue]`). Untagged columns are
//! dropped. A table with no `category` or no `value` column is rejected before any row is
//! read, so a broken export fails loudly instead of showing the missing-fields placeholder.
//!
//! ```rust
//! use waterfall_visual::processing::{transform_columns, RoleColumns};
//! use waterfall_visual::table::read_csv;
//!
//! let csv = "region[category],delta[value]\nA,10\nA,-3\nB,5\n";
//! let view = read_csv(csv.as_bytes()).unwrap();
//!
//! let categorical = view.categorical.unwrap();
//! let points = transform_columns(&RoleColumns::from_view(&categorical), true);
//! assert_eq!(points.last().unwrap().cumulative_value, 12.0);
//! ```

mod csv;

pub use self::csv::{load_csv, read_csv};

use crate::error::{VisualError, VisualResult};
use crate::types::DataRole;

/// A header cell split into column name and role tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedHeader {
    /// Column name without the tag suffix.
    pub name: String,
    /// Roles in the order they were written.
    pub roles: Vec<DataRole>,
}

impl TaggedHeader {
    /// Parse `name[role,role]`.
    ///
    /// Returns `Ok(None)` for a header without a tag suffix. An empty tag list or a name that is
    /// not a [`DataRole`] is an error.
    pub fn parse(raw: &str) -> VisualResult<Option<Self>> {
        let raw = raw.trim();
        let Some((name, tags)) = raw
            .strip_suffix(']')
            .and_then(|rest| rest.rsplit_once('['))
        else {
            return Ok(None);
        };

        let name = name.trim();
        let mut roles = Vec::new();
        for tag in tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let role = DataRole::from_name(tag).ok_or_else(|| VisualError::InvalidRoleTag {
                column: name.to_string(),
                tag: tag.to_string(),
            })?;
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        if roles.is_empty() {
            return Err(VisualError::InvalidRoleTag {
                column: name.to_string(),
                tag: String::new(),
            });
        }

        Ok(Some(Self {
            name: name.to_string(),
            roles,
        }))
    }

    /// Roles that place the column in the category collection.
    pub fn category_roles(&self) -> Vec<DataRole> {
        self.roles.iter().copied().filter(|r| r.is_category_like()).collect()
    }

    /// Roles that place the column in the value collection.
    pub fn value_roles(&self) -> Vec<DataRole> {
        self.roles.iter().copied().filter(|r| !r.is_category_like()).collect()
    }
}

/// Fail unless some header carries `category` and some header carries `value`.
pub(crate) fn require_chart_roles(headers: &[&TaggedHeader]) -> VisualResult<()> {
    for role in [DataRole::Category, DataRole::Value] {
        if !headers.iter().any(|h| h.roles.contains(&role)) {
            return Err(VisualError::MissingRole { role });
        }
    }
    Ok(())
}

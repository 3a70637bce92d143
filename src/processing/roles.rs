//! Role-tagged column lookup over a [`CategoricalView`].

use std::collections::BTreeMap;

use crate::dataview::{CategoricalView, DataViewColumn};
use crate::types::{DataRole, Value};

/// Columns of one update, keyed by the role they play.
///
/// Category-like roles are looked up in the category collection and value-like roles in the
/// value collection. When several columns carry the same role the last one wins.
#[derive(Debug, Clone, Default)]
pub struct RoleColumns<'a> {
    by_role: BTreeMap<DataRole, &'a DataViewColumn>,
}

impl<'a> RoleColumns<'a> {
    /// Scan both column collections once and index them by role.
    pub fn from_view(view: &'a CategoricalView) -> Self {
        let mut by_role = BTreeMap::new();

        let collections = [
            (view.categories.as_deref().unwrap_or_default(), true),
            (view.values.as_deref().unwrap_or_default(), false),
        ];
        for (columns, category_side) in collections {
            for column in columns {
                for role in DataRole::ALL {
                    if role.is_category_like() == category_side && column.source.has_role(role) {
                        by_role.insert(role, column);
                    }
                }
            }
        }

        Self { by_role }
    }

    /// The column tagged with `role`, if any.
    pub fn column(&self, role: DataRole) -> Option<&'a DataViewColumn> {
        self.by_role.get(&role).copied()
    }

    /// Category labels (required for a chart).
    pub fn categories(&self) -> Option<&'a [Value]> {
        self.cells(DataRole::Category)
    }

    /// Breakdown labels (optional).
    pub fn breakdowns(&self) -> Option<&'a [Value]> {
        self.cells(DataRole::Breakdown)
    }

    /// Main values (required for a chart).
    pub fn values(&self) -> Option<&'a [Value]> {
        self.cells(DataRole::Value)
    }

    /// Start value read from the first cell of the start-value column.
    ///
    /// `None` when no column carries the role; `Some(0.0)` when the column exists but its first
    /// cell is empty or non-numeric.
    pub fn start_value(&self) -> Option<f64> {
        self.cells(DataRole::StartValue)
            .map(|cells| cells.first().and_then(Value::as_number).unwrap_or(0.0))
    }

    fn cells(&self, role: DataRole) -> Option<&'a [Value]> {
        self.column(role).map(|c| c.values.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataview::ColumnSource;

    fn column(name: &str, roles: &[DataRole], values: Vec<Value>) -> DataViewColumn {
        DataViewColumn {
            source: ColumnSource::new(name, roles),
            values,
        }
    }

    #[test]
    fn locates_each_role_on_its_side() {
        let view = CategoricalView {
            categories: Some(vec![
                column("region", &[DataRole::Category], vec![Value::Utf8("A".into())]),
                column("item", &[DataRole::Breakdown], vec![Value::Utf8("x".into())]),
            ]),
            values: Some(vec![
                column(
                    "opening",
                    &[DataRole::StartValue],
                    vec![Value::Int64(100), Value::Int64(7)],
                ),
                column("delta", &[DataRole::Value], vec![Value::Float64(2.5)]),
            ]),
        };
        let roles = RoleColumns::from_view(&view);

        assert_eq!(roles.categories(), Some(&[Value::Utf8("A".into())][..]));
        assert_eq!(roles.breakdowns(), Some(&[Value::Utf8("x".into())][..]));
        assert_eq!(roles.values(), Some(&[Value::Float64(2.5)][..]));
        assert_eq!(roles.start_value(), Some(100.0));
    }

    #[test]
    fn value_roles_in_category_collection_are_ignored() {
        let view = CategoricalView {
            categories: Some(vec![column("delta", &[DataRole::Value], vec![Value::Int64(1)])]),
            values: Some(Vec::new()),
        };
        let roles = RoleColumns::from_view(&view);
        assert!(roles.values().is_none());
        assert!(roles.categories().is_none());
    }

    #[test]
    fn last_column_with_a_role_wins() {
        let view = CategoricalView {
            categories: Some(Vec::new()),
            values: Some(vec![
                column("first", &[DataRole::Value], vec![Value::Int64(1)]),
                column("second", &[DataRole::Value], vec![Value::Int64(2)]),
            ]),
        };
        let roles = RoleColumns::from_view(&view);
        assert_eq!(roles.column(DataRole::Value).unwrap().source.display_name, "second");
    }

    #[test]
    fn start_value_distinguishes_absent_from_blank() {
        let absent = CategoricalView::default();
        assert_eq!(RoleColumns::from_view(&absent).start_value(), None);

        let blank = CategoricalView {
            categories: None,
            values: Some(vec![column("opening", &[DataRole::StartValue], vec![Value::Null])]),
        };
        assert_eq!(RoleColumns::from_view(&blank).start_value(), Some(0.0));

        let empty = CategoricalView {
            categories: None,
            values: Some(vec![column("opening", &[DataRole::StartValue], Vec::new())]),
        };
        assert_eq!(RoleColumns::from_view(&empty).start_value(), Some(0.0));
    }
}

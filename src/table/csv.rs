use std::io::Read;
use std::path::Path;

use log::debug;

use crate::dataview::{CategoricalView, ColumnSource, DataView, DataViewColumn};
use crate::error::{VisualError, VisualResult};
use crate::types::{DataRole, Value};

use super::{require_chart_roles, TaggedHeader};

/// Load a role-tagged CSV export from disk.
pub fn load_csv(path: impl AsRef<Path>) -> VisualResult<DataView> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let view = read_csv(file)?;
    debug!("loaded table export {}", path.display());
    Ok(view)
}

/// Read a role-tagged CSV export into a categorical [`DataView`].
///
/// Category-side cells are kept as text labels (blank cells become [`Value::Null`]).
/// Value-side cells must be numbers or blank; anything else is a [`VisualError::ParseError`]
/// naming the 1-based file row.
pub fn read_csv(input: impl Read) -> VisualResult<DataView> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut categories = Vec::new();
    let mut values = Vec::new();
    let mut tagged = Vec::new();
    for (idx, raw) in rdr.headers()?.iter().enumerate() {
        let Some(header) = TaggedHeader::parse(raw)? else {
            continue;
        };
        let category_roles = header.category_roles();
        if !category_roles.is_empty() {
            categories.push(RoleColumn::new(idx, &header.name, &category_roles, CellKind::Label));
        }
        let value_roles = header.value_roles();
        if !value_roles.is_empty() {
            values.push(RoleColumn::new(idx, &header.name, &value_roles, CellKind::Number));
        }
        tagged.push(header);
    }
    require_chart_roles(&tagged.iter().collect::<Vec<_>>())?;

    let mut rows = 0;
    for (row0, record) in rdr.records().enumerate() {
        let record = record?;
        // Header is file row 1.
        let row = row0 + 2;
        for column in categories.iter_mut().chain(values.iter_mut()) {
            column.push(row, record.get(column.csv_idx).unwrap_or(""))?;
        }
        rows += 1;
    }
    debug!(
        "read table: rows={} category_columns={} value_columns={}",
        rows,
        categories.len(),
        values.len()
    );

    Ok(DataView {
        categorical: Some(CategoricalView {
            categories: Some(categories.into_iter().map(|c| c.column).collect()),
            values: Some(values.into_iter().map(|c| c.column).collect()),
        }),
        metadata: None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Label,
    Number,
}

/// A data view column being filled from one CSV column.
struct RoleColumn {
    csv_idx: usize,
    kind: CellKind,
    column: DataViewColumn,
}

impl RoleColumn {
    fn new(csv_idx: usize, name: &str, roles: &[DataRole], kind: CellKind) -> Self {
        Self {
            csv_idx,
            kind,
            column: DataViewColumn {
                source: ColumnSource::new(name, roles),
                values: Vec::new(),
            },
        }
    }

    fn push(&mut self, row: usize, raw: &str) -> VisualResult<()> {
        let cell = if raw.is_empty() {
            Value::Null
        } else {
            match self.kind {
                CellKind::Label => Value::Utf8(raw.to_string()),
                CellKind::Number => {
                    let n = raw.parse::<f64>().map_err(|e| VisualError::ParseError {
                        row,
                        column: self.column.source.display_name.clone(),
                        raw: raw.to_string(),
                        message: e.to_string(),
                    })?;
                    Value::Float64(n)
                }
            }
        };
        self.column.values.push(cell);
        Ok(())
    }
}

use crate::database::cursor::ResultSet;
use crate::database::datatype::SqlType;
use crate::database::value::{Value, ValueKind};
use crate::database::vendor::VendorSupportedTypes;
use crate::error::{CursorError, MappingError};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Decides whether a value should be read through type-directed extraction.
pub trait TypeSupport {
    fn supports(&self, kind: ValueKind, sql_type: SqlType) -> bool;
}

impl TypeSupport for VendorSupportedTypes {
    fn supports(&self, kind: ValueKind, sql_type: SqlType) -> bool {
        self.is_supported(kind, sql_type)
    }
}

/// A plain set of kinds opts in regardless of the column's declared type.
impl TypeSupport for HashSet<ValueKind> {
    fn supports(&self, kind: ValueKind, _sql_type: SqlType) -> bool {
        self.contains(&kind)
    }
}

/// Column lookup by label, consumed by whatever materializes rows into objects.
pub trait ColumnSource {
    /// Whether `label` names a column of the result, ignoring case.
    fn has_column(&self, label: &str) -> bool;

    /// Reads the column named `label` from the current row.
    ///
    /// `Ok(None)` means the result has no such column, `Ok(Some(Value::Null))` means
    /// the column exists and holds SQL NULL.
    fn get_value<S>(
        &mut self,
        label: &str,
        target: ValueKind,
        supported: &S,
    ) -> Result<Option<Value>, MappingError>
    where
        S: TypeSupport + ?Sized;
}

#[derive(Debug, Clone, PartialEq)]
struct IndexedColumn {
    label: String,
    position: u16,
    sql_type: SqlType,
}

/// Wraps a [`ResultSet`] with a case-insensitive label index built once at construction.
///
/// When a label occurs more than once, the first column wins.
pub struct ResultSetAccessor<'r, R: ResultSet> {
    result_set: &'r mut R,
    index: IndexMap<String, IndexedColumn>,
}

impl<'r, R: ResultSet> ResultSetAccessor<'r, R> {
    pub fn new(result_set: &'r mut R) -> Result<Self, MappingError> {
        let index = index_columns(result_set)
            .map_err(|source| MappingError::MetadataUnavailable { source })?;
        debug!("Indexed {} result columns", index.len());
        Ok(ResultSetAccessor { result_set, index })
    }

    pub fn column_position(&self, label: &str) -> Option<u16> {
        self.index.get(&fold(label)).map(|column| column.position)
    }

    pub fn column_type(&self, label: &str) -> Option<SqlType> {
        self.index.get(&fold(label)).map(|column| column.sql_type)
    }

    /// Indexed labels as reported by the driver, in column order.
    pub fn column_labels(&self) -> impl Iterator<Item = &str> {
        self.index.values().map(|column| column.label.as_str())
    }

    pub fn next_row(&mut self) -> Result<bool, MappingError> {
        self.result_set
            .next_row()
            .map_err(|source| MappingError::RowUnavailable { source })
    }

    pub fn result_set(&mut self) -> &mut R {
        &mut *self.result_set
    }
}

impl<R: ResultSet> ColumnSource for ResultSetAccessor<'_, R> {
    fn has_column(&self, label: &str) -> bool {
        self.index.contains_key(&fold(label))
    }

    fn get_value<S>(
        &mut self,
        label: &str,
        target: ValueKind,
        supported: &S,
    ) -> Result<Option<Value>, MappingError>
    where
        S: TypeSupport + ?Sized,
    {
        let Some(column) = self.index.get(&fold(label)) else {
            return Ok(None);
        };

        let result = if supported.supports(target, column.sql_type) {
            trace!(
                "Reading {} at {} as {} (type-directed)",
                label,
                column.position,
                target
            );
            self.result_set.get_value_as(column.position, target)
        } else {
            trace!("Reading {} at {} (generic)", label, column.position);
            self.result_set.get_value(column.position)
        };

        result
            .map(Some)
            .map_err(|source| MappingError::ValueUnreadable {
                column: label.to_string(),
                source,
            })
    }
}

fn fold(label: &str) -> String {
    label.to_lowercase()
}

fn index_columns<R: ResultSet>(
    result_set: &mut R,
) -> Result<IndexMap<String, IndexedColumn>, CursorError> {
    let count = result_set.column_count()?;
    let mut index = IndexMap::with_capacity(count as usize);

    for position in 1..=count {
        let label = result_set.column_label(position)?;
        let key = fold(&label);
        if index.contains_key(&key) {
            warn!("ResultSet contains {} multiple times", label);
            continue;
        }
        let sql_type = result_set.column_type(position)?;
        index.insert(
            key,
            IndexedColumn {
                label,
                position,
                sql_type,
            },
        );
    }

    Ok(index)
}

use crate::database::datatype::SqlType;
use crate::database::value::{Value, ValueKind};
use crate::error::CursorError;
use odbc_api::Cursor;
use tracing::trace;

/// Positional, forward-only access to the rows of a query result.
///
/// Positions are 1-based, as in ODBC. Implementations are not expected to be shared
/// between threads while a result is being read.
pub trait ResultSet {
    fn column_count(&mut self) -> Result<u16, CursorError>;

    fn column_label(&mut self, position: u16) -> Result<String, CursorError>;

    fn column_type(&mut self, position: u16) -> Result<SqlType, CursorError>;

    /// Moves to the next row. Returns `false` once the result is exhausted.
    fn next_row(&mut self) -> Result<bool, CursorError>;

    /// Generic extraction: the driver picks the representation.
    fn get_value(&mut self, position: u16) -> Result<Value, CursorError>;

    /// Type-directed extraction: the caller names the representation.
    fn get_value_as(&mut self, position: u16, kind: ValueKind) -> Result<Value, CursorError>;
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Binary(Vec<u8>),
}

/// [`ResultSet`] over a live ODBC cursor.
///
/// Each call to `next_row` copies the cells of the fetched row, so values can be read
/// in any order and more than once.
pub struct OdbcResultSet<C: Cursor> {
    cursor: C,
    column_types: Option<Vec<SqlType>>,
    current: Option<Vec<Option<Cell>>>,
}

impl<C: Cursor> OdbcResultSet<C> {
    pub fn new(cursor: C) -> Self {
        OdbcResultSet {
            cursor,
            column_types: None,
            current: None,
        }
    }

    pub fn into_inner(self) -> C {
        self.cursor
    }

    fn column_types(&mut self) -> Result<&[SqlType], CursorError> {
        if self.column_types.is_none() {
            let count = self.column_count()?;
            let types = (1..=count)
                .map(|i| self.cursor.col_data_type(i).map(|t| SqlType::from(&t)))
                .collect::<Result<Vec<_>, _>>()?;
            self.column_types = Some(types);
        }
        Ok(self.column_types.as_deref().unwrap_or_default())
    }

    fn cell(&self, position: u16) -> Result<Option<&Cell>, CursorError> {
        cell_at(self.current.as_deref(), position)
    }
}

/// Zero-based slot of a 1-based column position.
fn slot(position: u16, count: usize) -> Result<usize, CursorError> {
    if position == 0 || position as usize > count {
        return Err(CursorError::ColumnOutOfRange {
            position,
            count: count as u16,
        });
    }
    Ok(position as usize - 1)
}

fn cell_at(row: Option<&[Option<Cell>]>, position: u16) -> Result<Option<&Cell>, CursorError> {
    let row = row.ok_or(CursorError::NoCurrentRow)?;
    Ok(row[slot(position, row.len())?].as_ref())
}

impl<C: Cursor> ResultSet for OdbcResultSet<C> {
    fn column_count(&mut self) -> Result<u16, CursorError> {
        Ok(self.cursor.num_result_cols()?.max(0) as u16)
    }

    fn column_label(&mut self, position: u16) -> Result<String, CursorError> {
        Ok(self.cursor.col_name(position)?)
    }

    fn column_type(&mut self, position: u16) -> Result<SqlType, CursorError> {
        let types = self.column_types()?;
        Ok(types[slot(position, types.len())?])
    }

    fn next_row(&mut self) -> Result<bool, CursorError> {
        let types = self.column_types()?.to_vec();
        let Some(mut row) = self.cursor.next_row()? else {
            self.current = None;
            return Ok(false);
        };

        let mut cells = Vec::with_capacity(types.len());
        for (i, sql_type) in types.iter().enumerate() {
            let position = i as u16 + 1;
            let mut buf = Vec::new();
            let cell = if sql_type.is_binary() {
                row.get_binary(position, &mut buf)?
                    .then_some(Cell::Binary(buf))
            } else if row.get_text(position, &mut buf)? {
                let text = String::from_utf8(buf).map_err(|e| {
                    CursorError::Driver(format!("Column {} is not valid UTF-8: {}", position, e))
                })?;
                Some(Cell::Text(text))
            } else {
                None
            };
            cells.push(cell);
        }
        trace!("Fetched row with {} cells", cells.len());
        self.current = Some(cells);
        Ok(true)
    }

    fn get_value(&mut self, position: u16) -> Result<Value, CursorError> {
        let sql_type = self.column_type(position)?;
        match self.cell(position)? {
            None => Ok(Value::Null),
            Some(Cell::Binary(bytes)) => Ok(Value::Bytes(bytes.clone())),
            Some(Cell::Text(text)) => Value::parse_generic(text, sql_type),
        }
    }

    fn get_value_as(&mut self, position: u16, kind: ValueKind) -> Result<Value, CursorError> {
        match self.cell(position)? {
            None => Ok(Value::Null),
            Some(Cell::Binary(bytes)) if kind == ValueKind::Bytes => {
                Ok(Value::Bytes(bytes.clone()))
            }
            Some(Cell::Binary(_)) => Err(CursorError::Conversion {
                kind,
                text: "<binary>".to_string(),
                reason: "binary columns can only be read as bytes".to_string(),
            }),
            Some(Cell::Text(text)) => Value::parse(text, kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Vec<Option<Cell>> {
        vec![Some(Cell::Text("7".to_string())), None]
    }

    #[test]
    fn test_read_before_first_row() {
        let err = cell_at(None, 1).unwrap_err();
        assert!(matches!(err, CursorError::NoCurrentRow));
    }

    #[test]
    fn test_read_within_row() {
        let row = row();
        assert_eq!(
            cell_at(Some(row.as_slice()), 1).unwrap(),
            Some(&Cell::Text("7".to_string()))
        );
        assert_eq!(cell_at(Some(row.as_slice()), 2).unwrap(), None);
    }

    #[test]
    fn test_read_past_column_count() {
        let row = row();
        let err = cell_at(Some(row.as_slice()), 3).unwrap_err();
        assert!(matches!(
            err,
            CursorError::ColumnOutOfRange {
                position: 3,
                count: 2
            }
        ));
    }

    #[test]
    fn test_position_zero_is_out_of_range() {
        let row = row();
        assert!(matches!(
            cell_at(Some(row.as_slice()), 0).unwrap_err(),
            CursorError::ColumnOutOfRange { position: 0, .. }
        ));
        assert!(matches!(
            slot(0, 5).unwrap_err(),
            CursorError::ColumnOutOfRange {
                position: 0,
                count: 5
            }
        ));
        assert_eq!(slot(5, 5).unwrap(), 4);
    }
}

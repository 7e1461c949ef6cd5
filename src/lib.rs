//! Label-based access to ODBC query results for row mappers.
//!
//! A [`ResultSetAccessor`] indexes the columns of a result once, ignoring case, and then
//! reads values by label. Whether a value is read with a type hint is decided per vendor
//! by a [`VendorSupportedTypes`] table.
//!
//! ```ignore
//! let parameters: Parameters = conn_str.parse()?;
//! init_tracing(Some(&parameters.log));
//! let supported = parameters.supported_types();
//!
//! let mut result_set = OdbcResultSet::new(cursor);
//! let mut accessor = ResultSetAccessor::new(&mut result_set)?;
//! while accessor.next_row()? {
//!     let created = accessor.get_value("created_at", ValueKind::OffsetDateTime, &supported)?;
//! }
//! ```

pub mod database;
pub mod error;
pub mod logging;
pub mod parameter;

pub use database::accessor::{ColumnSource, ResultSetAccessor, TypeSupport};
pub use database::cursor::{OdbcResultSet, ResultSet};
pub use database::datatype::SqlType;
pub use database::dialect::Vendor;
pub use database::value::{Value, ValueKind};
pub use database::vendor::VendorSupportedTypes;
pub use error::{ConfigError, CursorError, MappingError};
pub use logging::{init_tracing, LogConfig};
pub use parameter::Parameters;

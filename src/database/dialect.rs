use crate::database::vendor::VendorSupportedTypes;
use crate::error::CursorError;
use odbc_api::Connection;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Database product behind a connection, as far as type conversion is concerned.
#[derive(Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Clone, Copy, Default)]
#[strum(ascii_case_insensitive)]
pub enum Vendor {
    #[default]
    Generic,
    #[strum(serialize = "Postgres", serialize = "PostgreSQL")]
    Postgres,
    Sqlite,
    MsAccess,
    MsExcel,
}

impl Vendor {
    /// Guesses the vendor from a driver name (`PostgreSQL Unicode`, `SQLite3 ODBC Driver`,
    /// ...) or a DBMS name as reported by `SQLGetInfo`.
    pub fn detect(name: &str) -> Self {
        let name = name.to_lowercase();
        let vendor = if name.contains("postgres") {
            Vendor::Postgres
        } else if name.contains("sqlite") {
            Vendor::Sqlite
        } else if name.contains("access") || name.contains("*.mdb") || name.contains("*.accdb") {
            Vendor::MsAccess
        } else if name.contains("excel") || name.contains("*.xls") {
            Vendor::MsExcel
        } else {
            Vendor::Generic
        };
        debug!("Detected vendor {} from '{}'", vendor, name);
        vendor
    }

    pub fn from_connection(connection: &Connection<'_>) -> Result<Self, CursorError> {
        let dbms_name = connection.database_management_system_name()?;
        Ok(Vendor::detect(&dbms_name))
    }

    pub fn supported_types(&self) -> VendorSupportedTypes {
        match self {
            Vendor::Postgres => VendorSupportedTypes::postgres(),
            Vendor::Generic | Vendor::Sqlite | Vendor::MsAccess | Vendor::MsExcel => {
                VendorSupportedTypes::create_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::datatype::SqlType;
    use crate::database::value::ValueKind;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_detect_driver_names() {
        assert_eq!(Vendor::detect("PostgreSQL Unicode"), Vendor::Postgres);
        assert_eq!(Vendor::detect("PostgreSQL"), Vendor::Postgres);
        assert_eq!(Vendor::detect("SQLite3 ODBC Driver"), Vendor::Sqlite);
        assert_eq!(
            Vendor::detect("Microsoft Access Driver (*.mdb, *.accdb)"),
            Vendor::MsAccess
        );
        assert_eq!(
            Vendor::detect("Microsoft Excel Driver (*.xls, *.xlsx, *.xlsm, *.xlsb)"),
            Vendor::MsExcel
        );
        assert_eq!(Vendor::detect("Oracle"), Vendor::Generic);
    }

    #[test]
    fn test_parse_vendor_name() {
        assert_eq!(Vendor::from_str("postgresql").unwrap(), Vendor::Postgres);
        assert_eq!(Vendor::from_str("POSTGRES").unwrap(), Vendor::Postgres);
        assert_eq!(Vendor::from_str("msaccess").unwrap(), Vendor::MsAccess);
        assert!(Vendor::from_str("db2").is_err());
    }

    #[test]
    fn test_only_postgres_has_vendor_types() {
        for vendor in Vendor::iter() {
            let table = vendor.supported_types();
            assert_eq!(table.is_empty(), vendor != Vendor::Postgres);
        }
        assert!(Vendor::Postgres
            .supported_types()
            .is_supported(ValueKind::OffsetDateTime, SqlType::TimestampWithTimezone));
    }
}

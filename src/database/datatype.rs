use crate::database::value::ValueKind;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use odbc_api::DataType;
use strum_macros::{Display, EnumIter};

/// SQL type code of a result column, numbered like `java.sql.Types` / ODBC `SQL_*`.
#[derive(
    Debug, Display, EnumIter, Eq, Hash, PartialEq, Clone, Copy, TryFromPrimitive, IntoPrimitive,
)]
#[repr(i32)]
pub enum SqlType {
    Bit = -7,
    TinyInt = -6,
    BigInt = -5,
    LongVarbinary = -4,
    Varbinary = -3,
    Binary = -2,
    LongVarchar = -1,
    Null = 0,
    Char = 1,
    Numeric = 2,
    Decimal = 3,
    Integer = 4,
    SmallInt = 5,
    Float = 6,
    Real = 7,
    Double = 8,
    Varchar = 12,
    Boolean = 16,
    Date = 91,
    Time = 92,
    Timestamp = 93,
    Other = 1111,
    TimeWithTimezone = 2013,
    TimestampWithTimezone = 2014,
}

// SQL_SS_TIMESTAMPOFFSET, reported by SQL Server drivers for DATETIMEOFFSET.
const SQL_SS_TIMESTAMPOFFSET: i16 = -155;

impl SqlType {
    pub fn from_code(code: i32) -> Self {
        if code == i32::from(SQL_SS_TIMESTAMPOFFSET) {
            return SqlType::TimestampWithTimezone;
        }
        SqlType::try_from(code).unwrap_or(SqlType::Other)
    }

    pub fn code(self) -> i32 {
        self.into()
    }

    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            SqlType::Binary | SqlType::Varbinary | SqlType::LongVarbinary
        )
    }

    /// The value kind a generic, untyped extraction produces for this column type.
    pub fn default_kind(&self) -> ValueKind {
        match self {
            SqlType::Bit | SqlType::Boolean => ValueKind::Boolean,
            SqlType::TinyInt | SqlType::SmallInt | SqlType::Integer => ValueKind::Integer,
            SqlType::BigInt => ValueKind::Long,
            SqlType::Float | SqlType::Real | SqlType::Double => ValueKind::Double,
            SqlType::Numeric | SqlType::Decimal => ValueKind::Decimal,
            SqlType::Binary | SqlType::Varbinary | SqlType::LongVarbinary => ValueKind::Bytes,
            SqlType::Date => ValueKind::LocalDate,
            SqlType::Time | SqlType::TimeWithTimezone => ValueKind::LocalTime,
            // offset is normalized away, see Value::parse
            SqlType::Timestamp | SqlType::TimestampWithTimezone => ValueKind::LocalDateTime,
            SqlType::Char
            | SqlType::Varchar
            | SqlType::LongVarchar
            | SqlType::Null
            | SqlType::Other => ValueKind::String,
        }
    }
}

impl From<&DataType> for SqlType {
    fn from(data_type: &DataType) -> Self {
        match data_type {
            DataType::Bit => SqlType::Bit,
            DataType::TinyInt => SqlType::TinyInt,
            DataType::SmallInt => SqlType::SmallInt,
            DataType::Integer => SqlType::Integer,
            DataType::BigInt => SqlType::BigInt,
            DataType::Real => SqlType::Real,
            DataType::Float { .. } => SqlType::Float,
            DataType::Double => SqlType::Double,
            DataType::Decimal { .. } => SqlType::Decimal,
            DataType::Numeric { .. } => SqlType::Numeric,
            DataType::Char { .. } | DataType::WChar { .. } => SqlType::Char,
            DataType::Varchar { .. } | DataType::WVarchar { .. } => SqlType::Varchar,
            DataType::LongVarchar { .. } => SqlType::LongVarchar,
            DataType::Binary { .. } => SqlType::Binary,
            DataType::Varbinary { .. } => SqlType::Varbinary,
            DataType::LongVarbinary { .. } => SqlType::LongVarbinary,
            DataType::Date => SqlType::Date,
            DataType::Time { .. } => SqlType::Time,
            DataType::Timestamp { .. } => SqlType::Timestamp,
            DataType::Other { data_type, .. } => SqlType::from_code(i32::from(data_type.0)),
            _ => SqlType::Other,
        }
    }
}

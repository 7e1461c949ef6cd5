use crate::database::datatype::SqlType;
use crate::error::CursorError;
use strum_macros::{Display, EnumIter};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour]:[minute]:[second][optional [.[subsecond]]]");
const DATE_TIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
);
const OFFSET_DATE_TIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory][optional [:[offset_minute]]]"
);

/// The target type a caller asks the cursor for.
#[derive(Debug, Display, EnumIter, Eq, Hash, PartialEq, Clone, Copy)]
pub enum ValueKind {
    String,
    Boolean,
    Integer,
    Long,
    Double,
    Decimal,
    Bytes,
    LocalDate,
    LocalTime,
    LocalDateTime,
    OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Double(f64),
    /// Kept as the driver's text to avoid losing precision.
    Decimal(String),
    Bytes(Vec<u8>),
    LocalDate(Date),
    LocalTime(Time),
    LocalDateTime(PrimitiveDateTime),
    OffsetDateTime(OffsetDateTime),
}

impl Value {
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Null => None,
            Value::String(_) => Some(ValueKind::String),
            Value::Boolean(_) => Some(ValueKind::Boolean),
            Value::Integer(_) => Some(ValueKind::Integer),
            Value::Long(_) => Some(ValueKind::Long),
            Value::Double(_) => Some(ValueKind::Double),
            Value::Decimal(_) => Some(ValueKind::Decimal),
            Value::Bytes(_) => Some(ValueKind::Bytes),
            Value::LocalDate(_) => Some(ValueKind::LocalDate),
            Value::LocalTime(_) => Some(ValueKind::LocalTime),
            Value::LocalDateTime(_) => Some(ValueKind::LocalDateTime),
            Value::OffsetDateTime(_) => Some(ValueKind::OffsetDateTime),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts the textual representation delivered by a driver into `kind`.
    pub fn parse(text: &str, kind: ValueKind) -> Result<Value, CursorError> {
        let trimmed = text.trim();
        let fail = |reason: String| CursorError::Conversion {
            kind,
            text: text.to_string(),
            reason,
        };
        let value = match kind {
            ValueKind::String => Value::String(text.to_string()),
            ValueKind::Boolean => Value::Boolean(parse_bool(trimmed).ok_or_else(|| {
                fail("expected one of 1/0, t/f, true/false, y/n, yes/no".to_string())
            })?),
            ValueKind::Integer => {
                Value::Integer(trimmed.parse().map_err(|e| fail(format!("{}", e)))?)
            }
            ValueKind::Long => Value::Long(trimmed.parse().map_err(|e| fail(format!("{}", e)))?),
            ValueKind::Double => {
                Value::Double(trimmed.parse().map_err(|e| fail(format!("{}", e)))?)
            }
            ValueKind::Decimal => {
                trimmed
                    .parse::<f64>()
                    .map_err(|e| fail(format!("{}", e)))?;
                Value::Decimal(trimmed.to_string())
            }
            ValueKind::Bytes => Value::Bytes(text.as_bytes().to_vec()),
            ValueKind::LocalDate => Value::LocalDate(
                Date::parse(trimmed, DATE_FORMAT).map_err(|e| fail(format!("{}", e)))?,
            ),
            ValueKind::LocalTime => Value::LocalTime(
                Time::parse(strip_offset(trimmed), TIME_FORMAT)
                    .map_err(|e| fail(format!("{}", e)))?,
            ),
            ValueKind::LocalDateTime => {
                let text = normalize_separator(trimmed);
                let value = match PrimitiveDateTime::parse(&text, DATE_TIME_FORMAT) {
                    Ok(value) => value,
                    Err(e) => OffsetDateTime::parse(&text, OFFSET_DATE_TIME_FORMAT)
                        .map(to_utc)
                        .map_err(|_| fail(format!("{}", e)))?,
                };
                Value::LocalDateTime(value)
            }
            ValueKind::OffsetDateTime => Value::OffsetDateTime(
                OffsetDateTime::parse(&normalize_separator(trimmed), OFFSET_DATE_TIME_FORMAT)
                    .map_err(|e| fail(format!("{}", e)))?,
            ),
        };
        Ok(value)
    }

    /// Converts driver text the way an untyped extraction does for a column of `sql_type`.
    ///
    /// Timestamps carrying an offset are shifted to UTC and lose the offset, which is
    /// exactly the widening a vendor capability table is meant to bypass. Drivers such as
    /// psqlODBC report `timestamptz` as a plain TIMESTAMP, so both column types accept it.
    pub fn parse_generic(text: &str, sql_type: SqlType) -> Result<Value, CursorError> {
        Value::parse(text, sql_type.default_kind())
    }
}

fn to_utc(value: OffsetDateTime) -> PrimitiveDateTime {
    let utc = value.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(utc.date(), utc.time())
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "y" | "yes" => Some(true),
        "0" | "f" | "false" | "n" | "no" => Some(false),
        _ => None,
    }
}

fn normalize_separator(text: &str) -> String {
    match text.find('T') {
        Some(10) => format!("{} {}", &text[..10], &text[11..]),
        _ => text.to_string(),
    }
}

// TIME WITH TIME ZONE comes back as e.g. "10:15:30+02", the local part is what we keep
fn strip_offset(text: &str) -> &str {
    match text.rfind(['+', '-']) {
        Some(pos) if pos > 0 => &text[..pos],
        _ => text,
    }
}

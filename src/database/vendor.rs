use crate::database::datatype::SqlType;
use crate::database::value::ValueKind;
use std::collections::{HashMap, HashSet};

/// Value kinds a driver can deliver through type-directed extraction, beyond what its
/// generic extraction produces, keyed by kind to the SQL types it works for.
///
/// Immutable once built, so a single table can be shared by every query against the
/// same vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorSupportedTypes {
    supported: HashMap<ValueKind, HashSet<SqlType>>,
}

impl VendorSupportedTypes {
    pub fn new(supported: HashMap<ValueKind, HashSet<SqlType>>) -> Self {
        VendorSupportedTypes { supported }
    }

    /// Nothing registered: every lookup falls back to generic extraction.
    pub fn create_default() -> Self {
        VendorSupportedTypes::default()
    }

    /// Date/time conversions the PostgreSQL driver performs natively.
    ///
    /// psqlODBC describes `timestamptz` columns as TIMESTAMP, so `OffsetDateTime` is
    /// registered for both.
    pub fn postgres() -> Self {
        VendorSupportedTypes::create_default()
            .with(
                ValueKind::OffsetDateTime,
                [SqlType::TimestampWithTimezone, SqlType::Timestamp],
            )
            .with(ValueKind::LocalDateTime, [SqlType::Timestamp])
            .with(ValueKind::LocalDate, [SqlType::Date])
            .with(ValueKind::LocalTime, [SqlType::Time])
    }

    pub fn with(mut self, kind: ValueKind, sql_types: impl IntoIterator<Item = SqlType>) -> Self {
        self.supported.entry(kind).or_default().extend(sql_types);
        self
    }

    pub fn is_supported(&self, kind: ValueKind, sql_type: SqlType) -> bool {
        self.supported
            .get(&kind)
            .is_some_and(|sql_types| sql_types.contains(&sql_type))
    }

    pub fn supported_kinds(&self) -> HashSet<ValueKind> {
        self.supported
            .iter()
            .filter(|(_, sql_types)| !sql_types.is_empty())
            .map(|(kind, _)| *kind)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.supported.values().all(HashSet::is_empty)
    }
}

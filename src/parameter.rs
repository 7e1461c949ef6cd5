use crate::database::dialect::Vendor;
use crate::database::vendor::VendorSupportedTypes;
use crate::error::ConfigError;
use crate::logging::LogConfig;
use std::str::FromStr;
use tracing::debug;

/// Settings read from an ODBC connection string.
///
/// Recognized keys (case-insensitive): `Driver`, `Vendor`, `LogLevel`, `LogFile`.
/// An explicit `Vendor` wins over detection from `Driver`. Other keys are left to the driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    pub vendor: Vendor,
    pub log: LogConfig,
}

impl Parameters {
    pub fn supported_types(&self) -> VendorSupportedTypes {
        self.vendor.supported_types()
    }
}

impl FromStr for Parameters {
    type Err = ConfigError;

    fn from_str(conn_str: &str) -> Result<Self, Self::Err> {
        let mut detected = None;
        let mut explicit = None;
        let mut log = LogConfig::default();

        for (key, value) in split_pairs(conn_str) {
            match key.to_ascii_lowercase().as_str() {
                "driver" => detected = Some(Vendor::detect(&value)),
                "vendor" => {
                    let vendor =
                        Vendor::from_str(&value).map_err(|e| ConfigError::BadParameter {
                            param: key.clone(),
                            message: format!("{} ({})", e, value),
                        })?;
                    explicit = Some(vendor);
                }
                "loglevel" => log.level = Some(value),
                "logfile" => log.file = Some(value),
                _ => {}
            }
        }

        let parameters = Parameters {
            vendor: explicit.or(detected).unwrap_or_default(),
            log,
        };
        debug!("Parameters: {:?}", parameters);
        Ok(parameters)
    }
}

/// Splits `key=value;` pairs. Values may be wrapped in braces to contain `;`.
fn split_pairs(conn_str: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut rest = conn_str;

    while !rest.is_empty() {
        let Some(eq) = rest.find('=') else {
            break;
        };
        let key = rest[..eq].trim().to_string();
        rest = &rest[eq + 1..];

        let value = if let Some(braced) = rest.trim_start().strip_prefix('{') {
            let end = braced.find('}').unwrap_or(braced.len());
            let value = braced[..end].to_string();
            rest = braced.get(end + 1..).unwrap_or("");
            rest = rest.split_once(';').map(|(_, tail)| tail).unwrap_or("");
            value
        } else {
            let (value, tail) = rest.split_once(';').unwrap_or((rest, ""));
            rest = tail;
            value.trim().to_string()
        };

        if !key.is_empty() {
            pairs.push((key, value));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_detected_from_driver() {
        let parameters: Parameters =
            "Driver={PostgreSQL Unicode};Server=localhost;Port=5432;Database=test;"
                .parse()
                .unwrap();
        assert_eq!(parameters.vendor, Vendor::Postgres);
        assert!(!parameters.supported_types().is_empty());
        assert_eq!(parameters.log, LogConfig::default());
    }

    #[test]
    fn test_explicit_vendor_wins() {
        let parameters: Parameters = "vendor=sqlite;DRIVER={PostgreSQL Unicode}"
            .parse()
            .unwrap();
        assert_eq!(parameters.vendor, Vendor::Sqlite);
        assert!(parameters.supported_types().is_empty());
    }

    #[test]
    fn test_log_settings() {
        let parameters: Parameters =
            "Driver={Microsoft Access Driver (*.mdb, *.accdb)};DBQ=C:\\db.accdb;LogLevel=debug;LogFile={C:\\logs\\a;b.log}"
                .parse()
                .unwrap();
        assert_eq!(parameters.vendor, Vendor::MsAccess);
        assert_eq!(parameters.log.level.as_deref(), Some("debug"));
        assert_eq!(parameters.log.file.as_deref(), Some("C:\\logs\\a;b.log"));
    }

    #[test]
    fn test_unknown_vendor_is_rejected() {
        let err = "Vendor=db2".parse::<Parameters>().unwrap_err();
        assert!(matches!(err, ConfigError::BadParameter { ref param, .. } if param == "Vendor"));
    }

    #[test]
    fn test_empty_connection_string() {
        let parameters: Parameters = "".parse().unwrap();
        assert_eq!(parameters.vendor, Vendor::Generic);
    }
}

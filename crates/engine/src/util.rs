//! Internal helpers for value parsing and conversion.
//!
//! These utilities are **not** part of the public API. They centralize the
//! decimal-as-text and timestamp conventions so every module applies the
//! same rules.

use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;
use sea_orm::DbErr;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{EngineError, ResultEngine};

/// Current UTC time as an RFC 3339 string, the format every
/// `last_modified_time` column carries.
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parses a decimal stored as text.
///
/// Thousands separators are stripped first; some historical purchase rows
/// carry amounts like `1,234.00`.
pub(crate) fn parse_decimal(text: &str, label: &str) -> ResultEngine<Decimal> {
    let cleaned = text.replace(',', "");
    cleaned.parse::<Decimal>().map_err(|_| {
        EngineError::Database(DbErr::Custom(format!(
            "stored {label} is not a decimal: {text}"
        )))
    })
}

/// Parses an optional decimal column read back as text.
pub(crate) fn decimal_col(value: Option<String>, label: &str) -> ResultEngine<Option<Decimal>> {
    value.as_deref().map(|v| parse_decimal(v, label)).transpose()
}

/// Parses a `HH:MM:SS` clock duration into whole seconds.
pub(crate) fn duration_seconds(text: &str, label: &str) -> ResultEngine<i64> {
    let invalid = || {
        EngineError::Database(DbErr::Custom(format!(
            "stored {label} is not a HH:MM:SS duration: {text}"
        )))
    };

    let mut parts = text.split(':');
    let hours: i64 = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let minutes: i64 = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let seconds: i64 = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(hours * 3600 + minutes * 60 + seconds)
}

/// Serializes a JSON-shaped column value for storage.
pub(crate) fn encode_json<T: Serialize>(value: &T, label: &str) -> ResultEngine<String> {
    serde_json::to_string(value)
        .map_err(|err| EngineError::InvalidInput(format!("cannot encode {label}: {err}")))
}

/// Deserializes a JSON-shaped column read back from storage.
pub(crate) fn decode_json<T: DeserializeOwned>(text: &str, label: &str) -> ResultEngine<T> {
    serde_json::from_str(text).map_err(|err| {
        EngineError::Database(DbErr::Custom(format!("stored {label} is not valid JSON: {err}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_parses_hours_minutes_seconds() {
        assert_eq!(duration_seconds("01:30:00", "time_total").unwrap(), 5400);
        assert_eq!(duration_seconds("00:00:59", "time_total").unwrap(), 59);
    }

    #[test]
    fn duration_rejects_garbage() {
        assert!(duration_seconds("90m", "time_total").is_err());
        assert!(duration_seconds("1:2:3:4", "time_total").is_err());
    }

    #[test]
    fn decimal_strips_thousands_separators() {
        assert_eq!(
            parse_decimal("1,234.50", "amount").unwrap(),
            Decimal::new(123450, 2)
        );
    }
}

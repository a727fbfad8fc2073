//! HTTP handlers

pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod guests;
pub mod health;
pub mod properties;
pub mod reports;
pub mod rooms;
pub mod tenants;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Reference date for availability and report defaults.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates. Use with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub(crate) fn default_one() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        phone: Option<Option<String>>,
    }

    #[test]
    fn test_double_option_distinguishes_null_from_absent() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"phone":null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"phone":"+62"}"#).unwrap();

        assert_eq!(absent.phone, None);
        assert_eq!(null.phone, Some(None));
        assert_eq!(value.phone, Some(Some("+62".to_string())));
    }
}

//! Filter shapes shared by list queries.
//!
//! Filters nest under their parameter name and flatten into bracketed query
//! keys: a [`TimeRange`] under `created_at` becomes `created_at[after]=...`
//! and an [`InFilter`] under `status` becomes `status[in]=open,closed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

increase_core::string_enum! {
    /// ISO 4217 currency of an amount.
    pub enum Currency {
        /// Canadian Dollar.
        Cad => "CAD",
        /// Swiss Franc.
        Chf => "CHF",
        /// Euro.
        Eur => "EUR",
        /// British Pound.
        Gbp => "GBP",
        /// Japanese Yen.
        Jpy => "JPY",
        /// US Dollar.
        Usd => "USD",
    }
}

/// Bounds on a timestamp. Unset bounds are not sent.
///
/// ## Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use increase::filters::TimeRange;
///
/// let june = TimeRange::new()
///     .on_or_after(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
///     .before(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());
/// assert!(june.after.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Strictly after this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DateTime<Utc>>,
    /// Strictly before this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_or_after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_or_before: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(mut self, at: DateTime<Utc>) -> Self {
        self.after = Some(at);
        self
    }

    pub fn before(mut self, at: DateTime<Utc>) -> Self {
        self.before = Some(at);
        self
    }

    pub fn on_or_after(mut self, at: DateTime<Utc>) -> Self {
        self.on_or_after = Some(at);
        self
    }

    pub fn on_or_before(mut self, at: DateTime<Utc>) -> Self {
        self.on_or_before = Some(at);
        self
    }

    /// Returns `true` when no bound is set.
    pub fn is_empty(&self) -> bool {
        self.after.is_none()
            && self.before.is_none()
            && self.on_or_after.is_none()
            && self.on_or_before.is_none()
    }
}

/// Matches any of the listed values.
///
/// Values are sent comma-joined in the given order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InFilter<T> {
    #[serde(rename = "in")]
    pub values: Vec<T>,
}

impl<T> InFilter<T> {
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl<T> Default for InFilter<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<T> FromIterator<T> for InFilter<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use increase_core::codec::{to_pairs, to_query_string};

    #[derive(Serialize)]
    struct Query {
        #[serde(skip_serializing_if = "Option::is_none")]
        created_at: Option<TimeRange>,
        #[serde(skip_serializing_if = "Option::is_none")]
        currency: Option<InFilter<Currency>>,
    }

    #[test]
    fn test_time_range_sends_only_set_bounds() {
        let query = Query {
            created_at: Some(
                TimeRange::new().on_or_after(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            ),
            currency: None,
        };
        let pairs = to_pairs(&query).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "created_at[on_or_after]");
        assert!(pairs[0].1.starts_with("2024-06-01T00:00:00"));
    }

    #[test]
    fn test_in_filter_keeps_order() {
        let query = Query {
            created_at: None,
            currency: Some(InFilter::new([Currency::Usd, Currency::Eur])),
        };
        assert_eq!(
            to_query_string(&query).unwrap(),
            "currency%5Bin%5D=USD%2CEUR"
        );
    }

    #[test]
    fn test_empty_range() {
        assert!(TimeRange::new().is_empty());
        assert!(!TimeRange::new().after(Utc::now()).is_empty());
    }

    #[test]
    fn test_currency_unknown_round_trips() {
        let currency: Currency = serde_json::from_str(r#""MXN""#).unwrap();
        assert!(currency.is_unknown());
        assert_eq!(serde_json::to_string(&currency).unwrap(), r#""MXN""#);
    }
}

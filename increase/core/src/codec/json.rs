//! JSON bodies.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{DecodeError, EncodeError};

/// Decodes a response body.
///
/// ## Errors
///
/// - [`DecodeError::EmptyBody`] if `bytes` is empty or only whitespace
/// - [`DecodeError::Malformed`] if the body is not valid JSON
/// - [`DecodeError::TypeMismatch`] if a value does not fit the declared type
///
/// ## Examples
///
/// ```rust
/// use increase_core::codec::{decode, Extras};
///
/// let extras: Extras = decode(br#"{"a":1}"#).unwrap();
/// assert_eq!(extras["a"], 1);
/// ```
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::EmptyBody);
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Encodes a request body.
///
/// ## Errors
///
/// Returns [`EncodeError::Json`] if a `Serialize` implementation fails.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;
    use crate::codec::Extras;
    use serde::Deserialize;
    use serde_json::{Value, json};

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    struct Account {
        #[serde(skip_serializing_if = "Field::is_omitted")]
        id: Field<String>,
        #[serde(skip_serializing_if = "Field::is_omitted")]
        balance: Field<i64>,
        #[serde(skip_serializing_if = "Field::is_omitted")]
        closed_at: Field<String>,
        #[serde(flatten)]
        extras: Extras,
    }

    #[derive(Debug, Deserialize)]
    struct Strict {
        #[allow(dead_code)]
        id: String,
    }

    #[test]
    fn test_empty_body() {
        assert!(matches!(decode::<Account>(b""), Err(DecodeError::EmptyBody)));
        assert!(matches!(decode::<Account>(b" \n"), Err(DecodeError::EmptyBody)));
    }

    #[test]
    fn test_malformed_body() {
        let err = decode::<Account>(br#"{"id": "#).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_type_mismatch() {
        let err = decode::<Account>(br#"{"balance": "ten"}"#).unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_missing_required_field_is_type_mismatch() {
        let err = decode::<Strict>(b"{}").unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_unknown_members_land_in_extras() {
        let account: Account =
            decode(br#"{"id":"account_1","interest_rate":"0.01","nested":{"a":[1,2]}}"#).unwrap();
        assert_eq!(account.id.as_deref(), Some("account_1"));
        assert_eq!(account.extras["interest_rate"], json!("0.01"));
        assert_eq!(account.extras["nested"], json!({ "a": [1, 2] }));
    }

    #[test]
    fn test_round_trip_preserves_every_key() {
        let original = json!({
            "id": "account_1",
            "balance": 0,
            "closed_at": null,
            "program_id": "program_1",
            "future_flag": true
        });
        let bytes = serde_json::to_vec(&original).unwrap();
        let account: Account = decode(&bytes).unwrap();
        assert!(account.closed_at.is_null());

        let reencoded: Value = serde_json::from_slice(&encode(&account).unwrap()).unwrap();
        assert_eq!(reencoded, original);
    }
}

//! Field deserializers that never fail. A leaf of the wrong type becomes
//! `None` (or a default element) instead of rejecting the whole payload.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Any value that does not fit `T` reads as `None`.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A list whose malformed elements become `T::default()`, so positions and
/// length survive. A non-list reads as `None`.
pub fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_array().map(|items| {
        items
            .iter()
            .map(|item| T::deserialize(item).unwrap_or_default())
            .collect()
    }))
}

/// Ids arrive as strings or numbers depending on the endpoint.
pub fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Epoch milliseconds, sent either as a number or as a numeric string.
pub fn epoch_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Leaves {
        #[serde(default, deserialize_with = "super::option")]
        runs: Option<u32>,
        #[serde(default, deserialize_with = "super::list")]
        items: Option<Vec<Item>>,
        #[serde(default, deserialize_with = "super::id")]
        id: Option<String>,
        #[serde(default, deserialize_with = "super::epoch_millis")]
        at: Option<i64>,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Item {
        n: u8,
    }

    fn leaves(value: serde_json::Value) -> Leaves {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn wrong_type_reads_as_none() {
        assert_eq!(leaves(json!({"runs": 120})).runs, Some(120));
        assert_eq!(leaves(json!({"runs": "120"})).runs, None);
        assert_eq!(leaves(json!({"runs": null})).runs, None);
        assert_eq!(leaves(json!({})).runs, None);
    }

    #[test]
    fn list_keeps_length() {
        let parsed = leaves(json!({"items": [{"n": 1}, "junk", {"n": 300}]}));
        assert_eq!(
            parsed.items,
            Some(vec![Item { n: 1 }, Item::default(), Item::default()])
        );
        assert_eq!(leaves(json!({"items": {"n": 1}})).items, None);
    }

    #[test]
    fn ids_from_strings_or_numbers() {
        assert_eq!(leaves(json!({"id": "abc"})).id.as_deref(), Some("abc"));
        assert_eq!(leaves(json!({"id": 42})).id.as_deref(), Some("42"));
        assert_eq!(leaves(json!({"id": [1]})).id, None);
    }

    #[test]
    fn epoch_from_strings_or_numbers() {
        assert_eq!(leaves(json!({"at": "1704067200000"})).at, Some(1_704_067_200_000));
        assert_eq!(leaves(json!({"at": " 1704067200000 "})).at, Some(1_704_067_200_000));
        assert_eq!(leaves(json!({"at": 1704067200000_i64})).at, Some(1_704_067_200_000));
        assert_eq!(leaves(json!({"at": "tomorrow"})).at, None);
    }
}

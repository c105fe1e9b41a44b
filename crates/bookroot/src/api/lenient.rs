//! Per field decoding that never fails the surrounding document.
//!
//! The search APIs are not strict about the types they return, a value of the wrong type is
//! decoded as if the field was absent so that the rest of the record and the page survive.

use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// A value of the wrong type becomes `None`.
pub(crate) fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// A missing or invalid value becomes `T::default()`, counters become 0.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    option(deserializer).map(Option::unwrap_or_default)
}

/// Elements that cannot be decoded are skipped, a value that is not a list is an empty list.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = option::<D, Vec<Value>>(deserializer)?.unwrap_or_default();
    let total = values.len();

    let decoded: Vec<T> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if decoded.len() < total {
        warn!("Skipped {} results that could not be read", total - decoded.len());
    }
    Ok(decoded)
}

/// A field the API returns as either a list or a single value.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(untagged)]
pub(crate) enum Text {
    List(Vec<Value>),
    Scalar(Value),
}

impl Text {
    /// Lists are joined with ", " and scalars are used as they are.
    pub(crate) fn into_string(self) -> String {
        match self {
            Self::List(values) => values
                .into_iter()
                .map(value_to_string)
                .collect::<Vec<_>>()
                .join(", "),
            Self::Scalar(value) => value_to_string(value),
        }
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::Text;

    #[derive(Deserialize)]
    struct Counted {
        #[serde(default, deserialize_with = "super::or_default")]
        count: u64,
        #[serde(default, deserialize_with = "super::option")]
        pages: Option<u32>,
        #[serde(default, deserialize_with = "super::list")]
        names: Vec<String>,
    }

    #[test]
    fn wrong_types_fall_back_per_field() {
        let counted: Counted =
            serde_json::from_str(r#"{"count": null, "pages": "300", "names": ["a", 1, "b"]}"#)
                .unwrap();

        assert_eq!(0, counted.count);
        assert_eq!(None, counted.pages);
        assert_eq!(vec!["a", "b"], counted.names);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let counted: Counted = serde_json::from_str("{}").unwrap();

        assert_eq!(0, counted.count);
        assert_eq!(None, counted.pages);
        assert!(counted.names.is_empty());
    }

    #[test]
    fn valid_values_are_kept() {
        let counted: Counted =
            serde_json::from_str(r#"{"count": 12, "pages": 300, "names": "not a list"}"#).unwrap();

        assert_eq!(12, counted.count);
        assert_eq!(Some(300), counted.pages);
        assert!(counted.names.is_empty());
    }

    #[test]
    fn scalar_values_are_stringified() {
        let text: Text = serde_json::from_str("1848").unwrap();
        assert_eq!("1848", text.into_string());

        let text: Text = serde_json::from_str(r#"["Paris", 1832]"#).unwrap();
        assert_eq!("Paris, 1832", text.into_string());

        let text: Text = serde_json::from_str("[]").unwrap();
        assert_eq!("", text.into_string());
    }
}

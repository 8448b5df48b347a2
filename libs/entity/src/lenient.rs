//! Deserializers for loosely typed client input.

use serde::{de::IgnoredAny, Deserialize, Deserializer};
use serde_with::DeserializeAs;

/// A code that is only meaningful as a string; any other JSON value reads
/// as absent.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Code {
    Text(String),
    Other(IgnoredAny),
}

impl Code {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Code::Text(text) => Some(text),
            Code::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Day count read like `parseInt(value) || 1`: floats and numeric prefixes
/// are truncated, zero and anything unreadable become 1.
pub struct LenientDays;

impl<'de> DeserializeAs<'de, i64> for LenientDays {
    fn deserialize_as<D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let days = match Count::deserialize(deserializer)? {
            Count::Integer(days) => Some(days),
            Count::Float(days) if days.is_finite() => Some(days.trunc() as i64),
            Count::Float(_) => None,
            Count::Text(text) => leading_integer(&text),
            Count::Other(_) => None,
        };

        Ok(days.filter(|days| *days != 0).unwrap_or(1))
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let digits = text
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    text[..digits].parse().ok()
}

#[cfg(test)]
mod test {
    use serde::Deserialize;
    use serde_with::serde_as;

    use super::{leading_integer, Code, LenientDays};

    #[serde_as]
    #[derive(Deserialize)]
    struct Days(#[serde_as(as = "LenientDays")] i64);

    fn days(json: &str) -> i64 {
        serde_json::from_str::<Days>(json).unwrap().0
    }

    #[test]
    fn test_lenient_days() {
        assert_eq!(days("3"), 3);
        assert_eq!(days(r#""4""#), 4);
        assert_eq!(days(r#"" 5 days""#), 5);
        assert_eq!(days("2.5"), 2);
        assert_eq!(days(r#""2.5""#), 2);
        assert_eq!(days("-3"), -3);
        assert_eq!(days("0"), 1);
        assert_eq!(days("null"), 1);
        assert_eq!(days(r#""abc""#), 1);
        assert_eq!(days("true"), 1);
        assert_eq!(days("[2]"), 1);
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("12abc"), Some(12));
        assert_eq!(leading_integer("+7"), Some(7));
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn test_code_ignores_non_strings() {
        let codes = serde_json::from_str::<Vec<Code>>(r#"["en", 5, null, {}]"#).unwrap();

        let codes: Vec<_> = codes.iter().map(Code::as_str).collect();

        assert_eq!(codes, vec![Some("en"), None, None, None]);
    }
}

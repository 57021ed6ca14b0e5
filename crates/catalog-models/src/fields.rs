//! Lenient serde codecs for the loosely-typed dataset fields.
//!
//! Bundled datasets carry ratings, vote counts and years as strings
//! (`"8.5"`, `"12,345"`, `"2011–"`), sometimes as bare numbers, and use
//! `"N/A"` for missing values. These helpers turn that into `Option`s so the
//! query code never has to look at sentinels.

use serde::{Deserialize, Deserializer, Serializer};

/// Placeholder the datasets use for a missing value
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl Loose {
    fn into_text(self) -> String {
        match self {
            Loose::Text(s) => s,
            Loose::Number(n) => n.to_string(),
            Loose::Flag(b) => b.to_string(),
        }
    }
}

/// Trimmed text, or `None` for empty and `"N/A"` values
pub fn clean_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_AVAILABLE) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn parse_rating(raw: &str) -> Option<f64> {
    let rating = clean_text(raw)?.parse::<f64>().ok()?;
    rating.is_finite().then_some(rating)
}

/// Vote counts come formatted with thousands separators ("12,345")
pub fn parse_votes(raw: &str) -> Option<u64> {
    let digits: String = clean_text(raw)?.chars().filter(|c| *c != ',').collect();
    digits.parse::<u64>().ok()
}

/// Shortest exact text for a rating, keeping one decimal for whole numbers
/// ("9.0", "7.25")
pub fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{:.1}", rating)
    } else {
        rating.to_string()
    }
}

pub fn format_votes(votes: u64) -> String {
    let digits = votes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `null` decodes to the type's default instead of failing the record
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Required text such as ids and titles. Numbers are kept as their text and
/// `null` becomes an empty string.
pub mod text {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Loose>::deserialize(deserializer)?;
        Ok(raw.map(|v| v.into_text().trim().to_string()).unwrap_or_default())
    }

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }
}

pub mod optional_text {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Loose>::deserialize(deserializer)?;
        Ok(raw.and_then(|v| clean_text(&v.into_text())))
    }

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

pub mod rating {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Loose>::deserialize(deserializer)?;
        Ok(raw.and_then(|v| parse_rating(&v.into_text())))
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(rating) => serializer.serialize_str(&format_rating(*rating)),
            None => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

pub mod votes {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Loose>::deserialize(deserializer)?;
        Ok(raw.and_then(|v| parse_votes(&v.into_text())))
    }

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(votes) => serializer.serialize_str(&format_votes(*votes)),
            None => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

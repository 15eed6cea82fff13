use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Per-colour counts keyed by heart token (e.g. `heart01`, `b_heart02`, `ALL1`).
pub type HeartCounts = BTreeMap<String, String>;

/// One catalog entry. Only `card_number` is expected on every record;
/// everything else depends on the card type and may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardData {
    #[serde(default, deserialize_with = "lenient_text")]
    pub card_number: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub img_url: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub set: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub card_type: String,
    #[serde(default, deserialize_with = "string_list")]
    pub group: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rarity: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub score: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cost: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub blades: Option<String>,
    /// Member cards.
    #[serde(default, deserialize_with = "lenient_counts")]
    pub hearts: Option<HeartCounts>,
    /// Live cards. Merged with `hearts` when filtering by heart count.
    #[serde(default, deserialize_with = "lenient_counts")]
    pub required_hearts: Option<HeartCounts>,
    /// Presence-only keys.
    #[serde(default, deserialize_with = "lenient_counts")]
    pub blade_hearts: Option<HeartCounts>,
    #[serde(default, deserialize_with = "lenient_lines")]
    pub info_text: Option<Vec<String>>,
}

/// The four components of a composite card identifier,
/// e.g. `PL!N-bp4-001-L+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardId {
    pub series: String,
    pub product: String,
    pub number: String,
    pub rarity: String,
}

impl CardId {
    /// Parse `SERIES-PRODUCT-NUMBER-RARITY`. Returns `None` unless the
    /// normalized string splits into exactly four parts.
    pub fn parse(card_number: &str) -> Option<Self> {
        let normalized = normalize_plus(card_number);
        let parts: Vec<&str> = normalized.split('-').collect();
        let [series, product, number, rarity] = parts.as_slice() else {
            return None;
        };
        Some(Self {
            series: series.to_string(),
            product: product.to_string(),
            number: number.to_string(),
            rarity: rarity.to_string(),
        })
    }

    /// Normalized lookup key.
    pub fn key(&self) -> String {
        compose_key(&self.series, &self.product, &self.number, &self.rarity)
    }
}

/// Replace full-width plus signs (`＋`) with ASCII `+`.
pub fn normalize_plus(s: &str) -> String {
    s.replace('＋', "+")
}

pub(crate) fn compose_key(series: &str, product: &str, number: &str, rarity: &str) -> String {
    format!("{}-{}-{}-{}", series, product, number, rarity)
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Strings from a JSON array; other elements are dropped.
fn string_elements(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        Value::String(s) => Some(vec![s]),
        _ => None,
    }
}

// Catalog dumps are not consistent about quoting numbers, and some fields
// are null on cards that do not use them.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string).unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string))
}

fn lenient_counts<'de, D>(deserializer: D) -> Result<Option<HeartCounts>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => Some(
            map.into_iter()
                .filter_map(|(k, v)| value_to_string(v).map(|v| (k, v)))
                .collect(),
        ),
        _ => None,
    })
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(string_elements).unwrap_or_default())
}

fn lenient_lines<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(string_elements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_four_parts() {
        let id = CardId::parse("PL!N-bp4-001-L+").unwrap();
        assert_eq!(id.series, "PL!N");
        assert_eq!(id.product, "bp4");
        assert_eq!(id.number, "001");
        assert_eq!(id.rarity, "L+");
        assert_eq!(id.key(), "PL!N-bp4-001-L+");
    }

    #[test]
    fn test_parse_normalizes_fullwidth_plus() {
        let id = CardId::parse("PL!N-bp4-001-L＋").unwrap();
        assert_eq!(id.rarity, "L+");
        assert_eq!(id.key(), "PL!N-bp4-001-L+");
    }

    #[test]
    fn test_parse_rejects_wrong_part_count() {
        assert!(CardId::parse("001").is_none());
        assert!(CardId::parse("PL!-bp4-003").is_none());
        assert!(CardId::parse("PL!-bp4-003-R-extra").is_none());
        assert!(CardId::parse("").is_none());
    }

    #[test]
    fn test_parse_allows_empty_segments() {
        let id = CardId::parse("---").unwrap();
        assert_eq!(id.series, "");
        assert_eq!(id.rarity, "");
    }

    #[test]
    fn test_deserialize_partial_record() {
        let card: CardData = serde_json::from_value(serde_json::json!({
            "card_number": "005",
            "name": "Awesome Live",
            "unit": null,
            "group": null,
            "cost": 4,
            "required_hearts": {"heart01": "3", "heart02": 1},
        }))
        .unwrap();

        assert_eq!(card.unit, None);
        assert!(card.group.is_empty());
        assert_eq!(card.cost.as_deref(), Some("4"));
        assert_eq!(card.blades, None);
        let req = card.required_hearts.unwrap();
        assert_eq!(req.get("heart01").map(String::as_str), Some("3"));
        assert_eq!(req.get("heart02").map(String::as_str), Some("1"));
        assert!(card.hearts.is_none());
        assert!(card.info_text.is_none());
    }

    #[test]
    fn test_deserialize_wrongly_typed_fields() {
        let card: CardData = serde_json::from_value(serde_json::json!({
            "card_number": 7,
            "name": "numeric id",
            "card_type": null,
            "rarity": null,
            "group": ["μ's", null, 3],
            "info_text": ["Love Arrow Shoot", null],
            "hearts": "none",
        }))
        .unwrap();

        assert_eq!(card.card_number, "7");
        assert_eq!(card.card_type, "");
        assert_eq!(card.rarity, "");
        assert_eq!(card.group, vec!["μ's"]);
        assert_eq!(card.info_text, Some(vec!["Love Arrow Shoot".to_string()]));
        assert!(card.hearts.is_none());
    }
}

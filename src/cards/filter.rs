use std::collections::BTreeMap;

use super::types::{normalize_plus, CardData, HeartCounts};

/// Advanced search criteria. Every dimension is optional; an unset (or
/// empty) dimension does not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub rarity: Option<String>,
    /// Character name, compared with whitespace removed.
    pub character: Option<String>,
    pub unit: Option<String>,
    pub group: Option<String>,
    /// Case-insensitive substring of the card name.
    pub query: Option<String>,
    pub card_number: Option<String>,
    pub card_type: Option<String>,
    /// Case-insensitive substring of the name or any ability line.
    pub text_query: Option<String>,
    pub cost_min: Option<i64>,
    pub cost_max: Option<i64>,
    pub blades_min: Option<i64>,
    pub blades_max: Option<i64>,
    /// Heart colour -> minimum count, summed over `hearts` and `required_hearts`.
    pub hearts: BTreeMap<String, u32>,
    /// Matches when the card carries at least one of these keys.
    pub blade_hearts: Vec<String>,
}

impl SearchFilters {
    /// The five filters of the plain `/search` command.
    pub fn legacy(
        query: Option<String>,
        character: Option<String>,
        unit: Option<String>,
        group: Option<String>,
        rarity: Option<String>,
    ) -> Self {
        Self {
            query,
            character,
            unit,
            group,
            rarity,
            ..Default::default()
        }
    }

    /// True when `card` passes every active dimension. Dimensions are
    /// ANDed, so the order they are checked in does not change the result.
    pub fn matches(&self, card: &CardData) -> bool {
        if let Some(rarity) = active(&self.rarity) {
            if normalize_plus(&card.rarity) != normalize_plus(rarity) {
                return false;
            }
        }

        if let Some(character) = active(&self.character) {
            if !strip_whitespace(&card.name).contains(&strip_whitespace(character)) {
                return false;
            }
        }

        if let Some(unit) = active(&self.unit) {
            if card.unit.as_deref() != Some(unit) {
                return false;
            }
        }

        if let Some(group) = active(&self.group) {
            if !card.group.iter().any(|g| g == group) {
                return false;
            }
        }

        if let Some(query) = active(&self.query) {
            if !contains_ignore_case(&card.name, query) {
                return false;
            }
        }

        if let Some(number) = active(&self.card_number) {
            if !contains_ignore_case(&card.card_number, number) {
                return false;
            }
        }

        if let Some(card_type) = active(&self.card_type) {
            if card.card_type != card_type {
                return false;
            }
        }

        if let Some(text) = active(&self.text_query) {
            let in_name = contains_ignore_case(&card.name, text);
            let in_ability = card
                .info_text
                .iter()
                .flatten()
                .any(|line| contains_ignore_case(line, text));
            if !in_name && !in_ability {
                return false;
            }
        }

        if !check_range(card.cost.as_deref(), self.cost_min, self.cost_max).is_match() {
            return false;
        }

        if !check_range(card.blades.as_deref(), self.blades_min, self.blades_max).is_match() {
            return false;
        }

        if !self.hearts.is_empty() && !meets_hearts(card, &self.hearts) {
            return false;
        }

        if !self.blade_hearts.is_empty() && !has_any_blade_heart(card, &self.blade_hearts) {
            return false;
        }

        true
    }
}

/// Outcome of an inclusive numeric range check over a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeCheck {
    Matches,
    /// A bound is set but the value is missing or not an integer.
    NotNumeric,
    OutOfRange,
}

impl RangeCheck {
    pub fn is_match(self) -> bool {
        self == RangeCheck::Matches
    }
}

pub fn check_range(value: Option<&str>, min: Option<i64>, max: Option<i64>) -> RangeCheck {
    if min.is_none() && max.is_none() {
        return RangeCheck::Matches;
    }
    let Some(n) = value.and_then(|v| v.trim().parse::<i64>().ok()) else {
        return RangeCheck::NotNumeric;
    };
    if min.is_some_and(|lo| n < lo) || max.is_some_and(|hi| n > hi) {
        return RangeCheck::OutOfRange;
    }
    RangeCheck::Matches
}

/// Parse a heart count; absent or empty means zero.
fn heart_count(counts: Option<&HeartCounts>, color: &str) -> Option<u32> {
    match counts.and_then(|c| c.get(color)).map(|v| v.trim()) {
        None | Some("") => Some(0),
        Some(v) => v.parse().ok(),
    }
}

fn meets_hearts(card: &CardData, minimums: &BTreeMap<String, u32>) -> bool {
    minimums.iter().all(|(color, &min)| {
        let own = heart_count(card.hearts.as_ref(), color);
        let required = heart_count(card.required_hearts.as_ref(), color);
        match (own, required) {
            (Some(a), Some(b)) => a.saturating_add(b) >= min,
            _ => false,
        }
    })
}

fn has_any_blade_heart(card: &CardData, wanted: &[String]) -> bool {
    card.blade_hearts
        .as_ref()
        .is_some_and(|bh| wanted.iter().any(|k| bh.contains_key(k)))
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, &str)]) -> Option<HeartCounts> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_check_range_tri_state() {
        assert_eq!(check_range(Some("4"), Some(3), Some(4)), RangeCheck::Matches);
        assert_eq!(check_range(Some("5"), Some(3), Some(4)), RangeCheck::OutOfRange);
        assert_eq!(check_range(Some("2"), Some(3), None), RangeCheck::OutOfRange);
        assert_eq!(check_range(Some("x"), Some(3), None), RangeCheck::NotNumeric);
        assert_eq!(check_range(None, None, Some(3)), RangeCheck::NotNumeric);
        assert_eq!(check_range(Some(" 3 "), None, Some(3)), RangeCheck::Matches);
    }

    #[test]
    fn test_check_range_unbounded_ignores_value() {
        assert_eq!(check_range(None, None, None), RangeCheck::Matches);
        assert_eq!(check_range(Some("garbage"), None, None), RangeCheck::Matches);
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = SearchFilters::default();
        assert!(filters.matches(&CardData::default()));
    }

    #[test]
    fn test_empty_strings_are_inactive() {
        let filters = SearchFilters {
            unit: Some(String::new()),
            text_query: Some(String::new()),
            ..Default::default()
        };
        assert!(filters.matches(&CardData::default()));
    }

    #[test]
    fn test_heart_merge() {
        let card = CardData {
            hearts: counts(&[("heart01", "1")]),
            required_hearts: counts(&[("heart01", "2")]),
            ..Default::default()
        };
        let mut filters = SearchFilters::default();
        filters.hearts.insert("heart01".into(), 3);
        assert!(filters.matches(&card));
        filters.hearts.insert("heart01".into(), 4);
        assert!(!filters.matches(&card));
    }

    #[test]
    fn test_hearts_and_across_colors() {
        let card = CardData {
            hearts: counts(&[("heart01", "2"), ("heart02", "1")]),
            ..Default::default()
        };
        let mut filters = SearchFilters::default();
        filters.hearts.insert("heart01".into(), 2);
        filters.hearts.insert("heart02".into(), 1);
        assert!(filters.matches(&card));
        filters.hearts.insert("heart03".into(), 1);
        assert!(!filters.matches(&card));
    }

    #[test]
    fn test_hearts_garbage_count_fails() {
        let card = CardData {
            hearts: counts(&[("heart01", "lots")]),
            ..Default::default()
        };
        let mut filters = SearchFilters::default();
        filters.hearts.insert("heart01".into(), 0);
        assert!(!filters.matches(&card));
    }

    #[test]
    fn test_blade_hearts_requires_mapping() {
        let filters = SearchFilters {
            blade_hearts: vec!["ALL1".into()],
            ..Default::default()
        };
        assert!(!filters.matches(&CardData::default()));
        let card = CardData {
            blade_hearts: counts(&[("ALL1", "1")]),
            ..Default::default()
        };
        assert!(filters.matches(&card));
    }

    #[test]
    fn test_character_ignores_spaces() {
        let card = CardData {
            name: "百生 吟子".into(),
            ..Default::default()
        };
        let filters = SearchFilters {
            character: Some("百生吟子".into()),
            ..Default::default()
        };
        assert!(filters.matches(&card));

        let card = CardData {
            name: "百生吟子".into(),
            ..Default::default()
        };
        let filters = SearchFilters {
            character: Some("百生　吟子".into()),
            ..Default::default()
        };
        assert!(filters.matches(&card));
    }

    #[test]
    fn test_rarity_normalizes_plus() {
        let card = CardData {
            rarity: "L＋".into(),
            ..Default::default()
        };
        let filters = SearchFilters {
            rarity: Some("L+".into()),
            ..Default::default()
        };
        assert!(filters.matches(&card));
    }

    #[test]
    fn test_text_query_searches_ability_lines() {
        let card = CardData {
            name: "園田海未".into(),
            info_text: Some(vec!["Love Arrow Shoot".into()]),
            ..Default::default()
        };
        let hit = SearchFilters {
            text_query: Some("arrow".into()),
            ..Default::default()
        };
        let name_hit = SearchFilters {
            text_query: Some("海未".into()),
            ..Default::default()
        };
        let miss = SearchFilters {
            text_query: Some("bow".into()),
            ..Default::default()
        };
        assert!(hit.matches(&card));
        assert!(name_hit.matches(&card));
        assert!(!miss.matches(&card));
    }

    #[test]
    fn test_legacy_query_is_name_only() {
        let card = CardData {
            name: "Awesome Live".into(),
            info_text: Some(vec!["Arrow".into()]),
            ..Default::default()
        };
        let filters = SearchFilters::legacy(Some("awesome".into()), None, None, None, None);
        assert!(filters.matches(&card));
        let filters = SearchFilters::legacy(Some("Arrow".into()), None, None, None, None);
        assert!(!filters.matches(&card));
    }
}

use std::collections::BTreeMap;

use crate::cards::filter::SearchFilters;

/// Heart colour keys in display order.
pub const HEART_COLORS: &[(&str, &str)] = &[
    ("heart01", "Pink"),
    ("heart02", "Red"),
    ("heart03", "Yellow"),
    ("heart04", "Green"),
    ("heart05", "Blue"),
    ("heart06", "Purple"),
    ("heart0", "Gray"),
];

pub const BLADE_HEARTS: &[(&str, &str)] = &[
    ("b_heart01", "Pink 🩷"),
    ("b_heart02", "Red ❤️"),
    ("b_heart03", "Yellow 💛"),
    ("b_heart04", "Green 💚"),
    ("b_heart05", "Blue 💙"),
    ("b_heart06", "Purple 💜"),
    ("ドロー", "Draw ✍️"),
    ("スコア", "Score 🎼"),
    ("ALL1", "All (Rainbow)"),
];

/// Catalog card types offered by the type selector.
pub const CARD_TYPES: &[(&str, &str)] = &[("メンバー", "Member"), ("ライブ", "Live")];

fn label<'a>(table: &[(&str, &'a str)], key: &'a str) -> &'a str {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, l)| *l)
        .unwrap_or(key)
}

/// Filters being edited on the advanced search dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub card_type: Option<String>,
    pub cost_min: Option<i64>,
    pub cost_max: Option<i64>,
    pub blades_min: Option<i64>,
    pub blades_max: Option<i64>,
    pub text_query: Option<String>,
    pub card_number: Option<String>,
    pub blade_hearts: Vec<String>,
    pub hearts: BTreeMap<String, u32>,
}

impl FilterState {
    pub fn to_filters(&self) -> SearchFilters {
        SearchFilters {
            card_type: self.card_type.clone(),
            cost_min: self.cost_min,
            cost_max: self.cost_max,
            blades_min: self.blades_min,
            blades_max: self.blades_max,
            text_query: self.text_query.clone(),
            card_number: self.card_number.clone(),
            blade_hearts: self.blade_hearts.clone(),
            hearts: self.hearts.clone(),
            ..Default::default()
        }
    }

    /// Set the text filters from modal input; blank clears.
    pub fn set_text(&mut self, text: Option<String>, number: Option<String>) {
        self.text_query = text.filter(|t| !t.trim().is_empty());
        self.card_number = number.filter(|n| !n.trim().is_empty());
    }

    /// Human-readable summary, one filter per line.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if let Some(card_type) = &self.card_type {
            parts.push(format!("Type: {}", label(CARD_TYPES, card_type)));
        }
        if let Some(range) = describe_range(self.cost_min, self.cost_max) {
            parts.push(format!("Cost: {}", range));
        }
        if let Some(range) = describe_range(self.blades_min, self.blades_max) {
            parts.push(format!("Blades: {}", range));
        }
        if let Some(text) = &self.text_query {
            parts.push(format!("Text: '{}'", text));
        }
        if let Some(number) = &self.card_number {
            parts.push(format!("Num: '{}'", number));
        }
        if !self.blade_hearts.is_empty() {
            let labels: Vec<&str> = self
                .blade_hearts
                .iter()
                .map(|k| label(BLADE_HEARTS, k))
                .collect();
            parts.push(format!("Blade Hearts: {}", labels.join(", ")));
        }
        if !self.hearts.is_empty() {
            let hearts: Vec<String> = self
                .hearts
                .iter()
                .map(|(k, v)| format!("{}:{}", label(HEART_COLORS, k), v))
                .collect();
            parts.push(format!("Hearts: {}", hearts.join(", ")));
        }

        if parts.is_empty() {
            "No filters set.".to_string()
        } else {
            parts.join("\n")
        }
    }
}

fn describe_range(min: Option<i64>, max: Option<i64>) -> Option<String> {
    if min.is_none() && max.is_none() {
        return None;
    }
    let lo = min.unwrap_or(0).to_string();
    let hi = max.map_or_else(|| "Inf".to_string(), |m| m.to_string());
    Some(format!("{}-{}", lo, hi))
}

/// Page bookkeeping for the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub total: usize,
    pub per_page: usize,
    pub page: usize,
}

impl Pager {
    pub fn new(total: usize, per_page: usize) -> Self {
        Self {
            total,
            per_page: per_page.max(1),
            page: 0,
        }
    }

    /// At least one page, even with no results.
    pub fn pages(&self) -> usize {
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page * self.per_page).min(self.total);
        start..(start + self.per_page).min(self.total)
    }

    pub fn first(&mut self) {
        self.page = 0;
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn next(&mut self) {
        self.page = (self.page + 1).min(self.pages() - 1);
    }

    pub fn last(&mut self) {
        self.page = self.pages() - 1;
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        self.page + 1 >= self.pages()
    }
}

pub mod filter;
pub mod mappings;
pub mod types;

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::CardError;
use filter::SearchFilters;
use types::{compose_key, normalize_plus, CardData, CardId};

/// Discord rejects autocomplete responses with more choices than this.
pub const MAX_AUTOCOMPLETE_CHOICES: usize = 25;
pub const DEFAULT_AUTOCOMPLETE_LIMIT: usize = MAX_AUTOCOMPLETE_CHOICES;
pub const DEFAULT_SEARCH_LIMIT: usize = 25;

/// Tunables for the repository, passed in explicitly at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Discord caps autocomplete at 25 choices.
    pub autocomplete_limit: usize,
    pub search_limit: usize,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            autocomplete_limit: DEFAULT_AUTOCOMPLETE_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// In-memory card catalog with lookup indices.
///
/// Built once and read-only afterwards; a reload produces a fresh
/// repository instead of mutating this one.
pub struct CardRepository {
    data_path: PathBuf,
    config: RepositoryConfig,
    cards: Vec<CardData>,
    /// Normalized `series-product-number-rarity` -> position in `cards`.
    id_map: HashMap<String, usize>,
    series_index: Vec<String>,
    product_index: Vec<String>,
    number_index: Vec<String>,
    rarity_index: Vec<String>,
}

impl CardRepository {
    pub fn new(data_path: impl Into<PathBuf>, config: RepositoryConfig) -> Self {
        Self {
            data_path: data_path.into(),
            config,
            cards: Vec::new(),
            id_map: HashMap::new(),
            series_index: Vec::new(),
            product_index: Vec::new(),
            number_index: Vec::new(),
            rarity_index: Vec::new(),
        }
    }

    /// Build a repository directly from records, without touching disk.
    #[cfg(test)]
    pub fn from_cards(cards: Vec<CardData>, config: RepositoryConfig) -> Self {
        let mut repo = Self::new(PathBuf::new(), config);
        repo.cards = cards;
        repo.build_indices();
        repo
    }

    /// Read the catalog file and rebuild every index.
    ///
    /// The file is a JSON object whose values are card arrays (e.g.
    /// `{"PBN": [...], "BP04": [...]}`); all arrays are flattened in order.
    pub fn load(&mut self) -> Result<(), CardError> {
        let raw = std::fs::read_to_string(&self.data_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CardError::NotFound(self.data_path.clone())
            } else {
                CardError::Io {
                    path: self.data_path.clone(),
                    source: e,
                }
            }
        })?;

        self.cards = parse_catalog(&raw, &self.data_path)?;
        self.build_indices();
        info!(
            cards = self.cards.len(),
            indexed = self.id_map.len(),
            path = %self.data_path.display(),
            "Card data loaded"
        );
        Ok(())
    }

    /// A freshly loaded copy of this repository, reading the same path
    /// with the same config.
    pub fn reload(&self) -> Result<Self, CardError> {
        let mut fresh = Self::new(self.data_path.clone(), self.config);
        fresh.load()?;
        Ok(fresh)
    }

    /// Rebuild the autocomplete indices and the id map from `cards`.
    pub fn build_indices(&mut self) {
        let mut series = BTreeSet::new();
        let mut product = BTreeSet::new();
        let mut number = BTreeSet::new();
        let mut rarity = BTreeSet::new();

        self.id_map.clear();

        for (pos, card) in self.cards.iter().enumerate() {
            if card.card_number.is_empty() {
                warn!(name = %card.name, "Skipping card without card number");
                continue;
            }
            let Some(id) = CardId::parse(&card.card_number) else {
                warn!(card_number = %card.card_number, "Skipping malformed card number");
                continue;
            };

            // Duplicate ids: the last record loaded wins.
            self.id_map.insert(id.key(), pos);
            series.insert(id.series);
            product.insert(id.product);
            number.insert(id.number);
            rarity.insert(id.rarity);
        }

        self.series_index = series.into_iter().collect();
        self.product_index = product.into_iter().collect();
        self.number_index = number.into_iter().collect();
        self.rarity_index = rarity.into_iter().collect();
        debug!(
            series = self.series_index.len(),
            products = self.product_index.len(),
            numbers = self.number_index.len(),
            rarities = self.rarity_index.len(),
            "Indices built"
        );
    }

    pub fn config(&self) -> RepositoryConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of distinct well-formed identifiers.
    pub fn indexed_len(&self) -> usize {
        self.id_map.len()
    }

    /// Exact lookup. `number` must already be formatted the way the
    /// catalog stores it (zero-padded to three digits).
    pub fn get_card(
        &self,
        series: &str,
        product: &str,
        number: &str,
        rarity: &str,
    ) -> Option<&CardData> {
        let key = compose_key(series, product, number, &normalize_plus(rarity));
        self.id_map.get(&key).map(|&pos| &self.cards[pos])
    }

    pub fn search_series(&self, query: &str) -> Vec<String> {
        self.search_index(&self.series_index, query)
    }

    pub fn search_product(&self, query: &str) -> Vec<String> {
        self.search_index(&self.product_index, query)
    }

    pub fn search_number(&self, query: &str) -> Vec<String> {
        self.search_index(&self.number_index, query)
    }

    pub fn search_rarity(&self, query: &str) -> Vec<String> {
        self.search_index(&self.rarity_index, query)
    }

    /// Case-insensitive substring match, in index order.
    fn search_index(&self, index: &[String], query: &str) -> Vec<String> {
        let query = query.to_lowercase();
        index
            .iter()
            .filter(|val| val.to_lowercase().contains(&query))
            .take(self.config.autocomplete_limit)
            .cloned()
            .collect()
    }

    /// Cards passing every active filter, in catalog order. Stops scanning
    /// once `limit` matches are found.
    pub fn search_cards(
        &self,
        filters: &SearchFilters,
        limit: usize,
    ) -> Result<Vec<&CardData>, CardError> {
        if limit == 0 {
            return Err(CardError::InvalidLimit);
        }
        Ok(self
            .cards
            .iter()
            .filter(|card| filters.matches(card))
            .take(limit)
            .collect())
    }
}

fn parse_catalog(raw: &str, path: &Path) -> Result<Vec<CardData>, CardError> {
    let parse_err = |message: String| CardError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let root: Value = serde_json::from_str(raw).map_err(|e| parse_err(e.to_string()))?;
    let Value::Object(groups) = root else {
        return Err(parse_err("top level is not an object".to_string()));
    };

    let mut cards = Vec::new();
    for (group, entries) in groups {
        let Value::Array(entries) = entries else {
            debug!(group = %group, "Ignoring non-list catalog entry");
            continue;
        };
        for entry in entries {
            if !entry.is_object() {
                warn!(group = %group, "Skipping catalog entry that is not a record");
                continue;
            }
            // Field types are read leniently, so a record only fails here
            // if serde_json itself cannot walk it.
            match serde_json::from_value::<CardData>(entry) {
                Ok(card) => cards.push(card),
                Err(e) => warn!(group = %group, error = %e, "Skipping unreadable card record"),
            }
        }
    }
    Ok(cards)
}

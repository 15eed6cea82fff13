use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::cards::{RepositoryConfig, MAX_AUTOCOMPLETE_CHOICES};

const DEFAULT_CARD_DATA_PATH: &str = "./data/cards.json";

/// Process settings, read once from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    /// Guilds to register commands in; empty means global registration.
    pub guild_ids: Vec<u64>,
    pub card_data_path: PathBuf,
    pub admin_ids: HashSet<u64>,
    pub repository: RepositoryConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let discord_token = get("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .context("DISCORD_TOKEN is not set")?;

        let guild_ids = parse_id_list(get("DISCORD_GUILD_IDS").as_deref())
            .context("DISCORD_GUILD_IDS must be a comma-separated list of ids")?;
        let admin_ids: HashSet<u64> = parse_id_list(get("ADMIN_USER_IDS").as_deref())
            .context("ADMIN_USER_IDS must be a comma-separated list of ids")?
            .into_iter()
            .collect();

        let card_data_path: PathBuf = get("CARD_DATA_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CARD_DATA_PATH.to_string())
            .into();

        let defaults = RepositoryConfig::default();
        let repository = RepositoryConfig {
            autocomplete_limit: parse_limit(
                get("AUTOCOMPLETE_LIMIT"),
                defaults.autocomplete_limit,
                Some(MAX_AUTOCOMPLETE_CHOICES),
            )
            .with_context(|| {
                format!(
                    "AUTOCOMPLETE_LIMIT must be an integer from 1 to {}",
                    MAX_AUTOCOMPLETE_CHOICES
                )
            })?,
            search_limit: parse_limit(get("SEARCH_LIMIT"), defaults.search_limit, None)
                .context("SEARCH_LIMIT must be a positive integer")?,
        };

        Ok(Self {
            discord_token,
            guild_ids,
            card_data_path,
            admin_ids,
            repository,
        })
    }
}

fn parse_id_list(raw: Option<&str>) -> Result<Vec<u64>> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| u64::from_str(s).with_context(|| format!("invalid id `{}`", s)))
        .collect()
}

fn parse_limit(raw: Option<String>, default: usize, max: Option<usize>) -> Result<usize> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => {
            let n = s.parse::<usize>()?;
            if n == 0 {
                anyhow::bail!("limit must be at least 1");
            }
            if let Some(max) = max.filter(|&m| n > m) {
                anyhow::bail!("limit {} is above the maximum of {}", n, max);
            }
            Ok(n)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[("DISCORD_TOKEN", "abc")]).unwrap();
        assert_eq!(s.discord_token, "abc");
        assert!(s.guild_ids.is_empty());
        assert!(s.admin_ids.is_empty());
        assert_eq!(s.card_data_path, PathBuf::from(DEFAULT_CARD_DATA_PATH));
        assert_eq!(s.repository, RepositoryConfig::default());
    }

    #[test]
    fn test_token_required() {
        assert!(settings(&[]).is_err());
        assert!(settings(&[("DISCORD_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn test_id_lists() {
        let s = settings(&[
            ("DISCORD_TOKEN", "abc"),
            ("DISCORD_GUILD_IDS", "1, 2,,3"),
            ("ADMIN_USER_IDS", "42"),
        ])
        .unwrap();
        assert_eq!(s.guild_ids, vec![1, 2, 3]);
        assert!(s.admin_ids.contains(&42));

        assert!(settings(&[("DISCORD_TOKEN", "abc"), ("DISCORD_GUILD_IDS", "1,x")]).is_err());
    }

    #[test]
    fn test_limits() {
        let s = settings(&[
            ("DISCORD_TOKEN", "abc"),
            ("AUTOCOMPLETE_LIMIT", "10"),
            ("SEARCH_LIMIT", "50"),
            ("CARD_DATA_PATH", "/srv/cards.json"),
        ])
        .unwrap();
        assert_eq!(s.repository.autocomplete_limit, 10);
        assert_eq!(s.repository.search_limit, 50);
        assert_eq!(s.card_data_path, PathBuf::from("/srv/cards.json"));

        assert!(settings(&[("DISCORD_TOKEN", "abc"), ("SEARCH_LIMIT", "0")]).is_err());
        assert!(settings(&[("DISCORD_TOKEN", "abc"), ("SEARCH_LIMIT", "many")]).is_err());
    }

    #[test]
    fn test_autocomplete_limit_capped_by_discord() {
        let s = settings(&[("DISCORD_TOKEN", "abc"), ("AUTOCOMPLETE_LIMIT", "25")]).unwrap();
        assert_eq!(s.repository.autocomplete_limit, MAX_AUTOCOMPLETE_CHOICES);

        assert!(settings(&[("DISCORD_TOKEN", "abc"), ("AUTOCOMPLETE_LIMIT", "26")]).is_err());
        assert!(settings(&[("DISCORD_TOKEN", "abc"), ("AUTOCOMPLETE_LIMIT", "50")]).is_err());
        assert!(settings(&[("DISCORD_TOKEN", "abc"), ("AUTOCOMPLETE_LIMIT", "0")]).is_err());

        // Search results are not sent as autocomplete choices.
        let s = settings(&[("DISCORD_TOKEN", "abc"), ("SEARCH_LIMIT", "100")]).unwrap();
        assert_eq!(s.repository.search_limit, 100);
    }
}

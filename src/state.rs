use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cards::{CardRepository, RepositoryConfig};

pub struct AppState {
    /// Swapped wholesale on reload; readers hold their own `Arc` snapshot.
    repository: RwLock<Arc<CardRepository>>,
    pub admin_ids: HashSet<u64>,
}

impl AppState {
    pub fn new(repository: CardRepository, admin_ids: HashSet<u64>) -> Self {
        Self {
            repository: RwLock::new(Arc::new(repository)),
            admin_ids,
        }
    }

    /// Snapshot of the current repository.
    pub async fn cards(&self) -> Arc<CardRepository> {
        self.repository.read().await.clone()
    }

    pub async fn replace_cards(&self, repository: CardRepository) {
        *self.repository.write().await = Arc::new(repository);
    }

    pub async fn config(&self) -> RepositoryConfig {
        self.repository.read().await.config()
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

pub type Context<'a> = poise::Context<'a, AppState, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::types::CardData;

    fn repo(numbers: &[&str]) -> CardRepository {
        let cards = numbers
            .iter()
            .map(|n| CardData {
                card_number: n.to_string(),
                ..Default::default()
            })
            .collect();
        CardRepository::from_cards(cards, RepositoryConfig::default())
    }

    #[tokio::test]
    async fn test_replace_keeps_existing_snapshots() {
        let state = AppState::new(repo(&["A-b-001-C"]), HashSet::from([7]));
        let before = state.cards().await;

        state.replace_cards(repo(&["A-b-001-C", "A-b-002-C"])).await;

        assert_eq!(before.len(), 1);
        assert_eq!(state.cards().await.len(), 2);
        assert!(state.is_admin(7));
        assert!(!state.is_admin(8));
    }
}

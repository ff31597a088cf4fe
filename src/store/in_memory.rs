use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::core::{Game, GameId};
use crate::store::GameStore;

/// Process-local store holding cloned snapshots.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    games: RwLock<HashMap<GameId, Game>>,
    next_id: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of games stored.
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl GameStore for InMemoryStore {
    async fn save(&self, game: Game) -> anyhow::Result<GameId> {
        let id = GameId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.games.write().await.insert(id, game.with_id(id));
        Ok(id)
    }

    async fn load(&self, id: GameId) -> anyhow::Result<Option<Game>> {
        Ok(self.games.read().await.get(&id).cloned())
    }

    async fn update(&self, game: &Game) -> anyhow::Result<()> {
        let id = game
            .id()
            .ok_or_else(|| anyhow::anyhow!("Cannot update a game that was never saved"))?;
        let mut games = self.games.write().await;
        match games.get_mut(&id) {
            Some(slot) => {
                *slot = game.clone();
                Ok(())
            }
            None => Err(anyhow::anyhow!("Game {} does not exist", id)),
        }
    }
}

//! Battle engine: the caller-facing operations over a [`GameStore`].
//!
//! Every mutating operation on a game runs under that game's exclusive lock:
//! lock (bounded wait), load a fresh snapshot, apply the rule in memory,
//! write back with exactly one `update`, unlock. A failed rule check writes
//! nothing. Reads go straight to the store's snapshot.
//!
//! `GameBusy` from a timed-out `update` leaves the outcome unknown: the store
//! may still complete the write after the caller has given up.

use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::{timeout, Duration};

use crate::core::{
    default_capacity, Bounds, EngineError, Game, GameId, GameStatus, MatchStatus, PlayerId,
    Position, ShotResult, VesselId, VesselKind,
};
use crate::store::GameStore;

/// Default wait for a game's lock before giving up with `GameBusy`.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(250);

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);

/// Runtime knobs of a [`BattleEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub lock_timeout: Duration,
    pub store_timeout: Duration,
    /// Capacity given to battlefields when `create_game` is not told one.
    pub default_capacity: NonZeroUsize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            default_capacity: default_capacity(),
        }
    }
}

pub struct BattleEngine<S: GameStore> {
    store: Arc<S>,
    config: EngineConfig,
    locks: Mutex<HashMap<GameId, Arc<Mutex<()>>>>,
}

impl<S: GameStore> BattleEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a game with `player1_name` on a battlefield of `bounds` and the
    /// configured default capacity.
    pub async fn create_game(&self, player1_name: &str, bounds: Bounds) -> Result<GameId, EngineError> {
        self.create_game_with_capacity(player1_name, bounds, self.config.default_capacity)
            .await
    }

    pub async fn create_game_with_capacity(
        &self,
        player1_name: &str,
        bounds: Bounds,
        max_vessel_capacity: NonZeroUsize,
    ) -> Result<GameId, EngineError> {
        let game = Game::create(player1_name, bounds, max_vessel_capacity)?;
        let id = self.bounded(None, self.store.save(game)).await?;
        info!("Game {} created by {:?} ({})", id, player1_name, bounds);
        Ok(id)
    }

    pub async fn join_game(&self, id: GameId, player2_name: &str) -> Result<PlayerId, EngineError> {
        let seat = self.mutate(id, |game| game.join(player2_name)).await?;
        info!("Game {}: {:?} joined as {}", id, player2_name, seat);
        Ok(seat)
    }

    pub async fn add_vessel(
        &self,
        id: GameId,
        player_name: &str,
        kind: VesselKind,
        position: Position,
    ) -> Result<VesselId, EngineError> {
        let vessel = self
            .mutate(id, |game| game.add_vessel(player_name, kind, position))
            .await?;
        info!(
            "Game {}: {:?} placed {} {} at {}",
            id, player_name, kind, vessel, position
        );
        Ok(vessel)
    }

    pub async fn shoot_at(
        &self,
        id: GameId,
        shooter_name: &str,
        vessel: VesselId,
        target: Position,
    ) -> Result<ShotResult, EngineError> {
        let result = self
            .mutate(id, |game| game.shoot_at(shooter_name, vessel, target))
            .await?;
        info!(
            "Game {}: {:?} vessel {} fired at {}: {:?}",
            id, shooter_name, vessel, target, result
        );
        Ok(result)
    }

    /// Status from `player_name`'s side; unknown players read `InProgress`.
    pub async fn game_status(&self, id: GameId, player_name: &str) -> Result<GameStatus, EngineError> {
        Ok(self.load(id).await?.status_for(player_name))
    }

    pub async fn match_status(&self, id: GameId) -> Result<MatchStatus, EngineError> {
        Ok(self.load(id).await?.match_status())
    }

    /// Full snapshot of a game.
    pub async fn get_game(&self, id: GameId) -> Result<Game, EngineError> {
        self.load(id).await
    }

    /// Run `op` against a freshly loaded game under its lock and persist the
    /// result once. Nothing is written if `op` fails.
    async fn mutate<T, F>(&self, id: GameId, op: F) -> Result<T, EngineError>
    where
        F: FnOnce(&mut Game) -> Result<T, EngineError> + Send,
        T: Send,
    {
        let _guard = self.lock_game(id).await?;
        let mut game = self.load(id).await?;
        let out = op(&mut game).inspect_err(|e| debug!("Game {}: rejected: {}", id, e))?;
        self.bounded(Some(id), self.store.update(&game)).await?;
        Ok(out)
    }

    /// Take `id`'s lock, waiting at most `lock_timeout`.
    ///
    /// Locks nobody holds or waits on are dropped from the map first, so ids
    /// that never named a game do not pile up.
    async fn lock_game(&self, id: GameId) -> Result<OwnedMutexGuard<()>, EngineError> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(id).or_default().clone()
        };
        timeout(self.config.lock_timeout, lock.lock_owned())
            .await
            .map_err(|_| {
                warn!(
                    "Game {}: lock not acquired within {:?}",
                    id, self.config.lock_timeout
                );
                EngineError::GameBusy(id)
            })
    }

    async fn load(&self, id: GameId) -> Result<Game, EngineError> {
        self.bounded(Some(id), self.store.load(id))
            .await?
            .ok_or(EngineError::GameNotFound(id))
    }

    /// Await a store call for at most `store_timeout`.
    ///
    /// A timeout on an existing game is `GameBusy`; with no game yet (`None`,
    /// during creation) it is a `Storage` failure.
    async fn bounded<T>(
        &self,
        id: Option<GameId>,
        call: impl Future<Output = anyhow::Result<T>> + Send,
    ) -> Result<T, EngineError> {
        match timeout(self.config.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!("Game {:?}: store failure: {:#}", id, e);
                Err(EngineError::Storage(e.to_string()))
            }
            Err(_) => {
                warn!(
                    "Game {:?}: store did not answer within {:?}",
                    id, self.config.store_timeout
                );
                Err(match id {
                    Some(id) => EngineError::GameBusy(id),
                    None => EngineError::Storage(format!(
                        "store did not answer within {:?}",
                        self.config.store_timeout
                    )),
                })
            }
        }
    }

    #[cfg(test)]
    async fn tracked_locks(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn unknown_games_leave_no_locks_behind() {
        let engine = BattleEngine::new(Arc::new(InMemoryStore::new()));
        for i in 1..=1_000 {
            assert_eq!(
                engine.join_game(GameId(i), "Bob").await,
                Err(EngineError::GameNotFound(GameId(i)))
            );
        }
        assert!(engine.tracked_locks().await <= 1);
    }

    #[tokio::test]
    async fn held_lock_survives_pruning() {
        let engine = BattleEngine::new(Arc::new(InMemoryStore::new()));
        let held = engine.lock_game(GameId(7)).await.unwrap();
        for i in 100..200 {
            let _ = engine.lock_game(GameId(i)).await.unwrap();
        }
        assert_eq!(engine.tracked_locks().await, 2);
        assert_eq!(
            engine.lock_game(GameId(7)).await.err(),
            Some(EngineError::GameBusy(GameId(7)))
        );
        drop(held);
        assert!(engine.lock_game(GameId(7)).await.is_ok());
    }
}

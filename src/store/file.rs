//! One file per game under a directory, replaced atomically on update.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use tokio::fs;

use crate::core::{Game, GameId};
use crate::store::codec::{decode_game, encode_game};
use crate::store::GameStore;

const EXTENSION: &str = "game";
const TMP_EXTENSION: &str = "tmp";

#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    next_id: AtomicU64,
    next_tmp: AtomicU64,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// Id allocation resumes after the highest id already on disk. Temp files
    /// left by interrupted writes are removed.
    pub async fn open(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("Cannot create store directory {}: {}", dir.display(), e))?;

        let mut highest = 0;
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(TMP_EXTENSION) {
                debug!("Removing stale {}", path.display());
                fs::remove_file(&path).await?;
            } else if let Some(id) = parse_file_name(&path) {
                highest = highest.max(id);
            }
        }
        debug!("Opened file store at {} (highest id {})", dir.display(), highest);
        Ok(Self {
            dir,
            next_id: AtomicU64::new(highest),
            next_tmp: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: GameId) -> PathBuf {
        self.dir.join(format!("{}.{}", id.0, EXTENSION))
    }

    async fn write(&self, id: GameId, game: &Game) -> anyhow::Result<()> {
        let bytes = encode_game(game)?;
        let path = self.path_for(id);
        // Temp paths are never reused across writes.
        let seq = self.next_tmp.fetch_add(1, Ordering::SeqCst);
        let tmp = self.dir.join(format!("{}.{}.{}", id.0, seq, TMP_EXTENSION));
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| anyhow::anyhow!("Write error for {}: {}", tmp.display(), e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| anyhow::anyhow!("Rename error for {}: {}", path.display(), e))?;
        Ok(())
    }
}

fn parse_file_name(path: &Path) -> Option<u64> {
    if path.extension()?.to_str()? != EXTENSION {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}

#[async_trait::async_trait]
impl GameStore for FileStore {
    async fn save(&self, game: Game) -> anyhow::Result<GameId> {
        let id = GameId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.write(id, &game.with_id(id)).await?;
        Ok(id)
    }

    async fn load(&self, id: GameId) -> anyhow::Result<Option<Game>> {
        let path = self.path_for(id);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(anyhow::anyhow!("Read error for {}: {}", path.display(), e)),
        };
        let game = decode_game(&bytes)?;
        if game.id() != Some(id) {
            return Err(anyhow::anyhow!(
                "File {} holds game {:?}",
                path.display(),
                game.id()
            ));
        }
        Ok(Some(game))
    }

    async fn update(&self, game: &Game) -> anyhow::Result<()> {
        let id = game
            .id()
            .ok_or_else(|| anyhow::anyhow!("Cannot update a game that was never saved"))?;
        if fs::metadata(self.path_for(id)).await.is_err() {
            return Err(anyhow::anyhow!("Game {} does not exist", id));
        }
        self.write(id, game).await
    }
}

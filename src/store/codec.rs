//! Canonical byte encoding of a [`Game`] for storage.
//!
//! Layout: 4-byte magic, 1-byte format version, bincode body. Decoding
//! re-validates every roster and battlefield invariant so a corrupt or
//! hand-edited record never reaches the engine.

use crate::core::Game;

/// Leading bytes of every stored game.
pub const MAGIC: [u8; 4] = *b"WSIM";

/// Bumped whenever the serialized shape of [`Game`] changes.
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = MAGIC.len() + 1;

pub fn encode_game(game: &Game) -> anyhow::Result<Vec<u8>> {
    let body = bincode::serialize(game)
        .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(&MAGIC);
    out.push(FORMAT_VERSION);
    out.extend_from_slice(&body);
    Ok(out)
}

pub fn decode_game(bytes: &[u8]) -> anyhow::Result<Game> {
    if bytes.len() < HEADER_LEN {
        return Err(anyhow::anyhow!("Record too short: {} bytes", bytes.len()));
    }
    let (header, body) = bytes.split_at(HEADER_LEN);
    if header[..MAGIC.len()] != MAGIC {
        return Err(anyhow::anyhow!("Not a game record (bad magic)"));
    }
    let version = header[MAGIC.len()];
    if version != FORMAT_VERSION {
        return Err(anyhow::anyhow!(
            "Unsupported record version: expected {}, got {}",
            FORMAT_VERSION,
            version
        ));
    }
    let game: Game = bincode::deserialize(body)
        .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
    game.validate()
        .map_err(|e| anyhow::anyhow!("Stored game violates invariants: {}", e))?;
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{default_capacity, Bounds, GameId, Position, VesselKind};

    fn sample() -> Game {
        let bounds = Bounds::new(0, 4, 0, 4, -1, 1).unwrap();
        let mut game = Game::create("Alice", bounds, default_capacity())
            .unwrap()
            .with_id(GameId(3));
        game.join("Bob").unwrap();
        game.add_vessel("Bob", VesselKind::Submarine, Position::new(2, 2, -1))
            .unwrap();
        game
    }

    #[test]
    fn decode_restores_encoded_game() {
        let game = sample();
        let bytes = encode_game(&game).unwrap();
        assert_eq!(&bytes[..4], b"WSIM");
        assert_eq!(decode_game(&bytes).unwrap(), game);
    }

    #[test]
    fn rejects_foreign_and_future_records() {
        let mut bytes = encode_game(&sample()).unwrap();
        bytes[4] = FORMAT_VERSION + 1;
        assert!(decode_game(&bytes).is_err());
        bytes[0] = b'X';
        assert!(decode_game(&bytes).is_err());
        assert!(decode_game(b"WS").is_err());
    }
}

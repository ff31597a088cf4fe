//! Seeded random match between two fleets; prints a JSON summary.

use std::sync::Arc;

use rand::{rngs::SmallRng, seq::IndexedRandom, Rng, SeedableRng};
use serde_json::json;
use war_simulator::{
    init_logging_with, BattleEngine, Bounds, EngineError, InMemoryStore, MatchStatus, Position,
    Vessel, VesselId, VesselKind,
};

const PLAYERS: [&str; 2] = ["Alice", "Bob"];
const MAX_TURNS: usize = 2_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging_with(log::LevelFilter::Warn);
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let mut rng = SmallRng::seed_from_u64(seed);

    let engine = BattleEngine::new(Arc::new(InMemoryStore::new()));
    let bounds = Bounds::new(0, 7, 0, 7, -1, 1)?;
    let game = engine.create_game(PLAYERS[0], bounds).await?;
    engine.join_game(game, PLAYERS[1]).await?;

    for player in PLAYERS {
        let mut field = engine
            .get_game(game)
            .await?
            .player(player)
            .map(|p| p.battlefield().clone())
            .ok_or_else(|| anyhow::anyhow!("{} missing", player))?;
        while !field.is_full() {
            let Some(position) = field.random_free_position(&mut rng) else {
                break;
            };
            let kind = *VesselKind::ALL
                .choose(&mut rng)
                .ok_or_else(|| anyhow::anyhow!("no vessel kinds"))?;
            engine.add_vessel(game, player, kind, position).await?;
            field.place_vessel(Vessel::new(kind, position))?;
        }
    }

    let mut shots = [0usize; 2];
    let mut hits = [0usize; 2];
    let mut turns = 0;
    while turns < MAX_TURNS && engine.match_status(game).await? == MatchStatus::InProgress {
        let seat = turns % 2;
        turns += 1;
        let snapshot = engine.get_game(game).await?;
        let (Some(me), Some(foe)) = (
            snapshot.player(PLAYERS[seat]),
            snapshot.opponent_of(PLAYERS[seat]),
        ) else {
            break;
        };

        let armed: Vec<(VesselId, Position)> = me
            .battlefield()
            .vessels()
            .iter()
            .filter(|v| v.can_fire())
            .map(|v| (v.id(), v.position()))
            .collect();
        if armed.is_empty() && foe.battlefield().ammunition_remaining() == 0 {
            break;
        }
        let Some(&(vessel, _)) = armed.choose(&mut rng) else {
            continue;
        };

        // Aim at a random cell of the opponent's box; half the time at a live vessel.
        let live: Vec<Position> = foe
            .battlefield()
            .vessels()
            .iter()
            .filter(|v| !v.is_destroyed())
            .map(|v| v.position())
            .collect();
        let target = match live.choose(&mut rng) {
            Some(p) if rng.random_bool(0.5) => *p,
            _ => {
                let (lo, hi) = (bounds.min(), bounds.max());
                Position::new(
                    rng.random_range(lo.x..=hi.x),
                    rng.random_range(lo.y..=hi.y),
                    rng.random_range(lo.z..=hi.z),
                )
            }
        };

        match engine.shoot_at(game, PLAYERS[seat], vessel, target).await {
            Ok(result) => {
                shots[seat] += 1;
                if result.is_hit() {
                    hits[seat] += 1;
                }
            }
            Err(EngineError::OutOfRange { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let winner = match engine.match_status(game).await? {
        MatchStatus::Player1Won => Some(PLAYERS[0]),
        MatchStatus::Player2Won => Some(PLAYERS[1]),
        MatchStatus::InProgress => None,
    };
    let mut report = serde_json::Map::new();
    for (seat, player) in PLAYERS.iter().enumerate() {
        let status = engine.game_status(game, player).await?;
        report.insert(
            (*player).to_string(),
            json!({
                "status": format!("{:?}", status),
                "shots": shots[seat],
                "hits": hits[seat],
            }),
        );
    }
    report.insert("seed".to_string(), json!(seed));
    report.insert("turns".to_string(), json!(turns));
    report.insert("winner".to_string(), json!(winner));

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

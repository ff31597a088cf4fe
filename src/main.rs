#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "std")]
use tokio::{net::TcpListener, time::Duration};
#[cfg(feature = "std")]
use war_simulator::{
    init_logging, transport::in_memory::InMemoryTransport, transport::tcp::TcpTransport,
    BattleEngine, BoundsSpec, Client, EngineConfig, FileStore, GameId, InMemoryStore, Position,
    Server, VesselId, VesselKind, DEFAULT_MAX_VESSEL_CAPACITY,
};

#[derive(Parser)]
#[command(author, version, about = "Two-player naval battle simulator", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Run a game server.
    Serve {
        #[arg(long, default_value = "127.0.0.1:7878")]
        bind: String,
        /// Keep games in this directory instead of in memory.
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long, default_value_t = 250)]
        lock_timeout_ms: u64,
        #[arg(long, default_value_t = 2000)]
        store_timeout_ms: u64,
        #[arg(long, default_value_t = DEFAULT_MAX_VESSEL_CAPACITY)]
        capacity: usize,
    },
    /// Play a short scripted game in-process and print each step.
    Demo,
    /// Create a game on a server.
    Create {
        #[command(flatten)]
        remote: Remote,
        #[arg(long)]
        player: String,
        /// min_x,max_x,min_y,max_y,min_z,max_z
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        bounds: Vec<i32>,
        #[arg(long)]
        capacity: Option<u32>,
    },
    /// Join an existing game.
    Join {
        #[command(flatten)]
        remote: Remote,
        #[arg(long)]
        game: u64,
        #[arg(long)]
        player: String,
    },
    /// Place a vessel on your battlefield.
    AddVessel {
        #[command(flatten)]
        remote: Remote,
        #[arg(long)]
        game: u64,
        #[arg(long)]
        player: String,
        #[arg(long, value_enum)]
        kind: VesselKind,
        /// x,y,z
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        at: Vec<i32>,
    },
    /// Fire one of your vessels at a cell.
    Shoot {
        #[command(flatten)]
        remote: Remote,
        #[arg(long)]
        game: u64,
        #[arg(long)]
        player: String,
        #[arg(long)]
        vessel: u32,
        /// x,y,z
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        at: Vec<i32>,
    },
    /// Show the game status for a player.
    Status {
        #[command(flatten)]
        remote: Remote,
        #[arg(long)]
        game: u64,
        #[arg(long)]
        player: String,
    },
}

#[derive(Args)]
#[cfg(feature = "std")]
struct Remote {
    #[arg(long, default_value = "127.0.0.1:7878")]
    connect: String,
}

#[cfg(feature = "std")]
impl Remote {
    async fn client(&self) -> anyhow::Result<Client<TcpTransport>> {
        Ok(Client::new(TcpTransport::connect(&self.connect).await?))
    }
}

#[cfg(feature = "std")]
fn position(coords: &[i32]) -> anyhow::Result<Position> {
    match coords {
        [x, y, z] => Ok(Position::new(*x, *y, *z)),
        _ => Err(anyhow::anyhow!("Expected x,y,z")),
    }
}

#[cfg(feature = "std")]
fn bounds(values: &[i32]) -> anyhow::Result<BoundsSpec> {
    match values {
        [min_x, max_x, min_y, max_y, min_z, max_z] => Ok(BoundsSpec {
            min_x: *min_x,
            max_x: *max_x,
            min_y: *min_y,
            max_y: *max_y,
            min_z: *min_z,
            max_z: *max_z,
        }),
        _ => Err(anyhow::anyhow!("Expected min_x,max_x,min_y,max_y,min_z,max_z")),
    }
}

#[cfg(feature = "std")]
async fn demo() -> anyhow::Result<()> {
    let engine = Arc::new(BattleEngine::new(Arc::new(InMemoryStore::new())));
    let server = Server::new(engine);
    let (server_end, client_end) = InMemoryTransport::pair();
    let server_task = tokio::spawn(async move { server.serve(server_end).await });

    let mut client = Client::new(client_end);
    let field = BoundsSpec {
        min_x: 0,
        max_x: 5,
        min_y: 0,
        max_y: 5,
        min_z: 0,
        max_z: 0,
    };
    let game = client.create_game("Alice", field, None).await?;
    println!("Alice created game {}", game);
    client.join_game(game, "Bob").await?;
    println!("Bob joined");

    let sub = client
        .add_vessel(game, "Alice", VesselKind::Submarine, Position::new(1, 1, 0))
        .await?;
    println!("Alice placed a Submarine ({}) at (1, 1, 0)", sub);
    let destroyer = client
        .add_vessel(game, "Bob", VesselKind::Destroyer, Position::new(5, 5, 0))
        .await?;
    println!("Bob placed a Destroyer ({}) at (5, 5, 0)", destroyer);

    if let Err(e) = client
        .shoot_at(game, "Alice", sub, Position::new(-20, -20, 0))
        .await
    {
        println!("Alice cannot fire: {}", e);
    }
    for target in [Position::new(9, 9, 0), Position::new(1, 1, 0)] {
        let result = client.shoot_at(game, "Bob", destroyer, target).await?;
        println!("Bob fires at {}: {:?}", target, result);
    }

    for player in ["Alice", "Bob"] {
        println!("{}: {:?}", player, client.game_status(game, player).await?);
    }

    drop(client);
    server_task.await??;
    Ok(())
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            data_dir,
            lock_timeout_ms,
            store_timeout_ms,
            capacity,
        } => {
            let config = EngineConfig {
                lock_timeout: Duration::from_millis(lock_timeout_ms),
                store_timeout: Duration::from_millis(store_timeout_ms),
                default_capacity: NonZeroUsize::new(capacity)
                    .ok_or_else(|| anyhow::anyhow!("--capacity must be positive"))?,
            };
            let listener = TcpListener::bind(&bind).await?;
            match data_dir {
                Some(dir) => {
                    let store = Arc::new(FileStore::open(dir).await?);
                    let engine = Arc::new(BattleEngine::with_config(store, config));
                    Server::new(engine).serve_tcp(listener).await?;
                }
                None => {
                    let store = Arc::new(InMemoryStore::new());
                    let engine = Arc::new(BattleEngine::with_config(store, config));
                    Server::new(engine).serve_tcp(listener).await?;
                }
            }
        }
        Commands::Demo => demo().await?,
        Commands::Create {
            remote,
            player,
            bounds: values,
            capacity,
        } => {
            let id = remote
                .client()
                .await?
                .create_game(&player, bounds(&values)?, capacity)
                .await?;
            println!("{}", id);
        }
        Commands::Join {
            remote,
            game,
            player,
        } => {
            let seat = remote.client().await?.join_game(GameId(game), &player).await?;
            println!("{}", seat);
        }
        Commands::AddVessel {
            remote,
            game,
            player,
            kind,
            at,
        } => {
            let id = remote
                .client()
                .await?
                .add_vessel(GameId(game), &player, kind, position(&at)?)
                .await?;
            println!("{}", id);
        }
        Commands::Shoot {
            remote,
            game,
            player,
            vessel,
            at,
        } => {
            let result = remote
                .client()
                .await?
                .shoot_at(GameId(game), &player, VesselId(vessel), position(&at)?)
                .await?;
            println!("{:?}", result);
        }
        Commands::Status {
            remote,
            game,
            player,
        } => {
            let status = remote.client().await?.game_status(GameId(game), &player).await?;
            println!("{:?}", status);
        }
    }
    Ok(())
}

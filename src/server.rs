//! Server side of the protocol: answers requests with a shared engine.

use std::num::NonZeroUsize;
use std::sync::Arc;

use anyhow::anyhow;
use log::{debug, info, warn};
use tokio::net::TcpListener;

use crate::core::EngineError;
use crate::engine::BattleEngine;
use crate::protocol::{ErrorCode, Message, PROTOCOL_VERSION};
use crate::store::GameStore;
use crate::transport::{tcp::TcpTransport, Transport};

pub struct Server<S: GameStore> {
    engine: Arc<BattleEngine<S>>,
}

impl<S: GameStore> Clone for Server<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

fn reply<T>(result: Result<T, EngineError>, ok: impl FnOnce(T) -> Message) -> Message {
    match result {
        Ok(value) => ok(value),
        Err(e) => Message::error(&e),
    }
}

fn bad_request(message: impl Into<String>) -> Message {
    Message::Error {
        code: ErrorCode::BadRequest,
        message: message.into(),
    }
}

impl<S: GameStore + 'static> Server<S> {
    pub fn new(engine: Arc<BattleEngine<S>>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<BattleEngine<S>> {
        &self.engine
    }

    /// Answer one request. Never fails: errors become `Message::Error`.
    pub async fn handle(&self, msg: Message) -> Message {
        let engine = &self.engine;
        match msg {
            Message::CreateGame {
                player_name,
                bounds,
                max_vessel_capacity,
            } => {
                let bounds = match bounds.to_bounds() {
                    Ok(b) => b,
                    Err(e) => return Message::error(&e),
                };
                let result = match max_vessel_capacity {
                    None => engine.create_game(&player_name, bounds).await,
                    Some(cap) => match NonZeroUsize::new(cap as usize) {
                        Some(cap) => {
                            engine
                                .create_game_with_capacity(&player_name, bounds, cap)
                                .await
                        }
                        None => return bad_request("max_vessel_capacity must be positive"),
                    },
                };
                reply(result, Message::GameCreated)
            }
            Message::JoinGame {
                game_id,
                player_name,
            } => reply(engine.join_game(game_id, &player_name).await, Message::Joined),
            Message::AddVessel {
                game_id,
                player_name,
                kind,
                position,
            } => reply(
                engine.add_vessel(game_id, &player_name, kind, position).await,
                Message::VesselAdded,
            ),
            Message::ShootAt {
                game_id,
                shooter_name,
                vessel_id,
                target,
            } => reply(
                engine.shoot_at(game_id, &shooter_name, vessel_id, target).await,
                Message::Shot,
            ),
            Message::GetStatus {
                game_id,
                player_name,
            } => reply(
                engine.game_status(game_id, &player_name).await,
                Message::Status,
            ),
            Message::GetGame { game_id } => {
                reply(engine.get_game(game_id).await, Message::GameSnapshot)
            }
            other => {
                debug!("Unexpected request: {:?}", other);
                bad_request("unexpected message")
            }
        }
    }

    /// Serve one connection until the peer goes away.
    pub async fn serve<T: Transport>(&self, mut transport: T) -> anyhow::Result<()> {
        match transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                transport
                    .send(Message::HelloAck {
                        version: PROTOCOL_VERSION,
                    })
                    .await?;
            }
            Message::Hello { version } => {
                transport
                    .send(bad_request(format!(
                        "protocol version mismatch: expected {}, got {}",
                        PROTOCOL_VERSION, version
                    )))
                    .await?;
                return Err(anyhow!(
                    "Protocol version mismatch: expected {}, got {}",
                    PROTOCOL_VERSION,
                    version
                ));
            }
            _ => return Err(anyhow!("Expected handshake")),
        }

        while let Ok(msg) = transport.recv().await {
            let reply = self.handle(msg).await;
            transport.send(reply).await?;
        }
        Ok(())
    }

    /// Accept TCP connections forever, one task per connection.
    pub async fn serve_tcp(&self, listener: TcpListener) -> anyhow::Result<()> {
        info!("Listening on {}", listener.local_addr()?);
        loop {
            let (socket, peer) = listener.accept().await?;
            debug!("Connection from {}", peer);
            let server = self.clone();
            tokio::spawn(async move {
                if let Err(e) = server.serve(TcpTransport::new(socket)).await {
                    warn!("Connection {} closed: {:#}", peer, e);
                }
            });
        }
    }
}

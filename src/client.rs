//! Typed client for a [`crate::Server`] reachable over any [`Transport`].

use crate::core::{Game, GameId, GameStatus, PlayerId, Position, ShotResult, VesselId, VesselKind};
use crate::protocol::{BoundsSpec, ErrorCode, Message, PROTOCOL_VERSION};
use crate::transport::Transport;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server ran the request and the engine refused it.
    #[error("{message} ({code:?})")]
    Engine { code: ErrorCode, message: String },
    /// The server answered with a message that does not fit the request.
    #[error("unexpected reply: {0:?}")]
    UnexpectedReply(Box<Message>),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl ClientError {
    /// Stable code when the failure came from the engine.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Engine { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub struct Client<T: Transport> {
    transport: T,
    handshaken: bool,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handshaken: false,
        }
    }

    async fn ensure_handshake(&mut self) -> Result<(), ClientError> {
        if self.handshaken {
            return Ok(());
        }
        self.transport
            .send(Message::Hello {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match self.transport.recv().await? {
            Message::HelloAck { version } if version == PROTOCOL_VERSION => {
                self.handshaken = true;
                Ok(())
            }
            Message::Error { code, message } => Err(ClientError::Engine { code, message }),
            other => Err(ClientError::UnexpectedReply(Box::new(other))),
        }
    }

    /// Send one request and return the reply, turning `Message::Error` into
    /// [`ClientError::Engine`].
    async fn call(&mut self, request: Message) -> Result<Message, ClientError> {
        self.ensure_handshake().await?;
        self.transport.send(request).await?;
        match self.transport.recv().await? {
            Message::Error { code, message } => Err(ClientError::Engine { code, message }),
            reply => Ok(reply),
        }
    }

    pub async fn create_game(
        &mut self,
        player_name: &str,
        bounds: BoundsSpec,
        max_vessel_capacity: Option<u32>,
    ) -> Result<GameId, ClientError> {
        let request = Message::CreateGame {
            player_name: player_name.to_string(),
            bounds,
            max_vessel_capacity,
        };
        match self.call(request).await? {
            Message::GameCreated(id) => Ok(id),
            other => Err(ClientError::UnexpectedReply(Box::new(other))),
        }
    }

    pub async fn join_game(&mut self, game_id: GameId, player_name: &str) -> Result<PlayerId, ClientError> {
        let request = Message::JoinGame {
            game_id,
            player_name: player_name.to_string(),
        };
        match self.call(request).await? {
            Message::Joined(id) => Ok(id),
            other => Err(ClientError::UnexpectedReply(Box::new(other))),
        }
    }

    pub async fn add_vessel(
        &mut self,
        game_id: GameId,
        player_name: &str,
        kind: VesselKind,
        position: Position,
    ) -> Result<VesselId, ClientError> {
        let request = Message::AddVessel {
            game_id,
            player_name: player_name.to_string(),
            kind,
            position,
        };
        match self.call(request).await? {
            Message::VesselAdded(id) => Ok(id),
            other => Err(ClientError::UnexpectedReply(Box::new(other))),
        }
    }

    pub async fn shoot_at(
        &mut self,
        game_id: GameId,
        shooter_name: &str,
        vessel_id: VesselId,
        target: Position,
    ) -> Result<ShotResult, ClientError> {
        let request = Message::ShootAt {
            game_id,
            shooter_name: shooter_name.to_string(),
            vessel_id,
            target,
        };
        match self.call(request).await? {
            Message::Shot(result) => Ok(result),
            other => Err(ClientError::UnexpectedReply(Box::new(other))),
        }
    }

    pub async fn game_status(&mut self, game_id: GameId, player_name: &str) -> Result<GameStatus, ClientError> {
        let request = Message::GetStatus {
            game_id,
            player_name: player_name.to_string(),
        };
        match self.call(request).await? {
            Message::Status(status) => Ok(status),
            other => Err(ClientError::UnexpectedReply(Box::new(other))),
        }
    }

    pub async fn get_game(&mut self, game_id: GameId) -> Result<Game, ClientError> {
        match self.call(Message::GetGame { game_id }).await? {
            Message::GameSnapshot(game) => Ok(game),
            other => Err(ClientError::UnexpectedReply(Box::new(other))),
        }
    }
}

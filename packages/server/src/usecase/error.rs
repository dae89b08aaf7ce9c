//! UseCase errors.
//!
//! None of these are fatal: the dispatcher logs them at debug level and
//! drops the event.

use thiserror::Error;

use crate::domain::{ConnectionId, RegistryError, ValidationError};

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// join 処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("invalid join payload: {0}")]
    Invalid(#[from] ValidationError),

    #[error("connection '{0}' is not registered")]
    UnknownConnection(ConnectionId),
}

/// message 処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("invalid message payload: {0}")]
    Invalid(#[from] ValidationError),

    #[error("connection '{0}' is not registered")]
    UnknownConnection(ConnectionId),
}

/// leave 処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveError {
    #[error("connection '{0}' is not registered")]
    UnknownConnection(ConnectionId),
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("connection '{0}' is not registered")]
    UnknownConnection(ConnectionId),
}

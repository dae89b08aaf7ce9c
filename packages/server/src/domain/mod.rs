//! Domain layer: value objects, per-connection session state, chat events
//! and the ports (traits) the use cases depend on.

mod error;
mod event;
mod message_pusher;
mod repository;
mod session;
mod value_object;

#[cfg(test)]
pub use message_pusher::MockMessagePusher;

pub use error::{RegistryError, ValidationError};
pub use event::{ChatEvent, ChatEventKind, ClientEvent};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::SessionRegistry;
pub use session::{SessionGuard, SessionState};
pub use value_object::{ConnectionId, ConnectionIdFactory, RoomName, Timestamp, Username};

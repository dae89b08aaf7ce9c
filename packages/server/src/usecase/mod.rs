//! UseCase layer: the event handlers of the room coordination engine.

mod connect_session;
mod disconnect_session;
mod dispatcher;
mod error;
mod get_rooms;
mod join_room;
mod leave_room;
mod room_exit;
mod send_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use dispatcher::EventDispatcher;
pub use error::{ConnectError, DisconnectError, JoinError, LeaveError, SendMessageError};
pub use get_rooms::{GetRoomsUseCase, RoomSummary};
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use send_message::SendMessageUseCase;

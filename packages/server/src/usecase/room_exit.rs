//! Leave sequence shared by join, leave and disconnect.

use crate::domain::{ChatEvent, MessagePusher, SessionGuard, SessionState, Timestamp};
use roomcast_shared::time::{Clock, timestamp_to_rfc3339};

/// Announce that the session left its room, then drop the connection from
/// the room's broadcast group. Returns `None` for an unjoined session.
///
/// The announcement goes out first, so the leaving connection receives its
/// own `leave` event as well.
///
/// The session keeps its `Joined` state until the broadcast has completed.
/// If the caller is cancelled while the broadcast is pending, the session is
/// still joined and a later leave or disconnect announces it instead.
pub(super) async fn announce_leave(
    message_pusher: &dyn MessagePusher,
    clock: &dyn Clock,
    session: &mut SessionGuard,
) -> Option<ChatEvent> {
    let SessionState::Joined { username, room } = (**session).clone() else {
        return None;
    };

    let event = ChatEvent::left(username, room, Timestamp::new(clock.now_millis()));
    message_pusher.broadcast_to_room(&event.room, &event).await;
    // announced: from here on the session no longer counts as joined
    session.take();

    message_pusher.leave_room(session.id(), &event.room).await;
    tracing::info!(
        "[leave] {} <- #{} ({}) at {}",
        event.username,
        event.room,
        session.id(),
        timestamp_to_rfc3339(event.timestamp.value()).unwrap_or_default()
    );
    Some(event)
}

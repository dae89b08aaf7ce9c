//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{ConnectSessionUseCase, EventDispatcher, GetRoomsUseCase};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（接続のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// EventDispatcher（join / message / leave / disconnect の振り分け）
    pub dispatcher: Arc<EventDispatcher>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
}

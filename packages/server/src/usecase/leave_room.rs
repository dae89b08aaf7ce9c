//! UseCase: ルーム退出処理

use std::sync::Arc;

use crate::domain::{ChatEvent, ConnectionId, MessagePusher, SessionRegistry};
use roomcast_shared::time::Clock;

use super::{error::LeaveError, room_exit::announce_leave};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（セッション状態の管理）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// サーバー時刻
    clock: Arc<dyn Clock>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// ルーム退出を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(event))` - 参加中のルームに leave イベントを送信した
    /// * `Ok(None)` - どのルームにも参加していなかった（何もしない）
    /// * `Err(LeaveError)` - 未登録の接続
    pub async fn execute(&self, id: &ConnectionId) -> Result<Option<ChatEvent>, LeaveError> {
        let mut session = self
            .registry
            .lock(id)
            .await
            .ok_or_else(|| LeaveError::UnknownConnection(id.clone()))?;

        Ok(announce_leave(
            self.message_pusher.as_ref(),
            self.clock.as_ref(),
            &mut session,
        )
        .await)
    }
}

//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - 参加中ルームへの leave 通知 → Registry からの削除 → 送信チャネルの登録解除
//!
//! ### なぜこのテストが必要か
//! - leave 通知は削除前に行う必要がある（通知に username / room を使うため）
//! - 切断後にセッションやルームグループが残るとリークになる
//! - leave と disconnect が競合しても leave 通知はちょうど 1 回
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中の接続の切断
//! - 正常系：未参加の接続の切断（通知なし）
//! - 競合：leave と disconnect の同時実行
//! - 異常系：未登録の接続

use std::sync::Arc;

use crate::domain::{ChatEvent, ConnectionId, MessagePusher, SessionRegistry};
use roomcast_shared::time::Clock;

use super::{error::DisconnectError, room_exit::announce_leave};

/// 切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Registry（セッション状態の管理）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// サーバー時刻
    clock: Arc<dyn Clock>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
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

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(event))` - 参加中だったルームに送信した leave イベント
    /// * `Ok(None)` - どのルームにも参加していなかった
    /// * `Err(DisconnectError)` - 未登録の接続（送信チャネルの登録解除だけ行う）
    pub async fn execute(&self, id: &ConnectionId) -> Result<Option<ChatEvent>, DisconnectError> {
        let Some(mut session) = self.registry.lock(id).await else {
            self.message_pusher.unregister_client(id).await;
            return Err(DisconnectError::UnknownConnection(id.clone()));
        };

        let left = announce_leave(
            self.message_pusher.as_ref(),
            self.clock.as_ref(),
            &mut session,
        )
        .await;

        // ロックを保持したまま削除し、待機中のハンドラーには「存在しない」と見せる
        self.registry.remove(id).await;
        drop(session);

        self.message_pusher.unregister_client(id).await;
        tracing::info!("[disconnect] {}", id);

        Ok(left)
    }
}

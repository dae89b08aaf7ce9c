//! UseCase: 接続処理
//!
//! トランスポート層が新しい接続を受け付けたときに呼ばれ、
//! Registry に空のセッションを作成し、MessagePusher に送信チャネルを登録する。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, SessionRegistry};

use super::error::ConnectError;

/// 接続のユースケース
pub struct ConnectSessionUseCase {
    /// Registry（セッション状態の管理）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 接続を実行
    ///
    /// 既に登録済みの ID の場合は既存のセッションを残したまま
    /// `ConnectError` を返し、送信チャネルは登録しない。
    pub async fn execute(
        &self,
        id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), ConnectError> {
        self.registry.connect(id.clone()).await?;
        tracing::info!("[connect] {}", id);
        self.message_pusher.register_client(id, sender).await;
        Ok(())
    }
}

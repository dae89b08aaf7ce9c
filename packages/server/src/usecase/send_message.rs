//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - payload の room 宛てのブロードキャスト（セッション状態は変更しない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中のルームへの送信（送信者自身も受信する）
//! - 仕様どおりの挙動：参加していないルームへの送信も配信される
//! - 異常系：username / room が空、未登録の接続

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ConnectionId, MessagePusher, RoomName, SessionRegistry, Timestamp, Username,
};
use roomcast_shared::time::Clock;

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Registry（セッション状態の管理）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// サーバー時刻
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
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

    /// メッセージ送信を実行
    ///
    /// 宛先の room は payload の値をそのまま使い、接続が参加中のルームとは
    /// 照合しない。本文は空でもよい。
    pub async fn execute(
        &self,
        id: &ConnectionId,
        username: String,
        message: String,
        room: String,
    ) -> Result<ChatEvent, SendMessageError> {
        let username = Username::new(username)?;
        let room = RoomName::new(room)?;

        // 同じ接続の join / leave と順序が入れ替わらないようにロックを取る
        let _session = self
            .registry
            .lock(id)
            .await
            .ok_or_else(|| SendMessageError::UnknownConnection(id.clone()))?;

        let event = ChatEvent::message(
            username,
            message,
            room,
            Timestamp::new(self.clock.now_millis()),
        );
        self.message_pusher
            .broadcast_to_room(&event.room, &event)
            .await;

        Ok(event)
    }
}

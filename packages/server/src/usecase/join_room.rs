//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 入力検証、旧ルームからの退出、新ルームへの参加とブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 1 接続が同時に参加できるルームは最大 1 つ（コアの不変条件）
//! - 別ルームへの参加時は「旧ルームへの leave → 新ルームへの join」の順序が必要
//!
//! ### どのような状況を想定しているか
//! - 正常系：未参加の接続が参加する
//! - 正常系：参加中の接続が別ルームへ移る
//! - 異常系：username / room が空（黙って無視）
//! - 異常系：未登録の接続

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ConnectionId, MessagePusher, RoomName, SessionRegistry, SessionState, Timestamp,
    Username,
};
use roomcast_shared::time::{Clock, timestamp_to_rfc3339};

use super::{error::JoinError, room_exit::announce_leave};

/// join の結果として送信されたイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// 旧ルームに送信された leave イベント（参加中だった場合のみ）
    pub left: Option<ChatEvent>,
    /// 新ルームに送信された join イベント
    pub joined: ChatEvent,
}

impl JoinOutcome {
    /// 送信された順にイベントを返す
    pub fn into_events(self) -> Vec<ChatEvent> {
        self.left.into_iter().chain(Some(self.joined)).collect()
    }
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（セッション状態の管理）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// サーバー時刻
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
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

    /// ルーム参加を実行
    ///
    /// 参加中のルームがあれば先に leave シーケンスを実行してから新ルームに参加する。
    /// 一連の処理はセッションのロックを保持したまま行われ、セッション状態は
    /// 対応する通知が送信された後にだけ更新される。
    pub async fn execute(
        &self,
        id: &ConnectionId,
        username: String,
        room: String,
    ) -> Result<JoinOutcome, JoinError> {
        let username = Username::new(username)?;
        let room = RoomName::new(room)?;

        let mut session = self
            .registry
            .lock(id)
            .await
            .ok_or_else(|| JoinError::UnknownConnection(id.clone()))?;

        let left = announce_leave(
            self.message_pusher.as_ref(),
            self.clock.as_ref(),
            &mut session,
        )
        .await;

        self.message_pusher.join_room(id, &room).await;
        let joined = ChatEvent::joined(username, room, Timestamp::new(self.clock.now_millis()));
        self.message_pusher
            .broadcast_to_room(&joined.room, &joined)
            .await;
        // 状態は join の通知が送信された後に更新する
        *session = SessionState::joined(joined.username.clone(), joined.room.clone());
        tracing::info!(
            "[join] {} -> #{} ({}) at {}",
            joined.username,
            joined.room,
            id,
            timestamp_to_rfc3339(joined.timestamp.value()).unwrap_or_default()
        );

        Ok(JoinOutcome { left, joined })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatEventKind, MockMessagePusher, ValidationError},
        infrastructure::dto::websocket::EventName,
        usecase::test_support::{Fixture, START_MILLIS, connection, drain, room},
    };
    use mockall::Sequence;
    use roomcast_shared::time::FixedClock;

    fn usecase(fixture: &Fixture) -> JoinRoomUseCase {
        JoinRoomUseCase::new(
            fixture.registry.clone(),
            fixture.message_pusher.clone(),
            fixture.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_join_broadcasts_to_new_room_including_joiner() {
        // テスト項目: 参加時、参加者自身を含むルーム全員に join イベントが届く
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = usecase(&fixture);
        let (c1, mut rx1) = fixture.connect("c1").await;
        let (c2, mut rx2) = fixture.connect("c2").await;
        usecase
            .execute(&c1, "alice".to_string(), "general".to_string())
            .await
            .unwrap();
        drain(&mut rx1);

        // when (操作):
        let outcome = usecase
            .execute(&c2, "bob".to_string(), "general".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome.left, None);
        assert_eq!(outcome.joined.message, "bob has joined the room");
        for rx in [&mut rx1, &mut rx2] {
            let frames = drain(rx);
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].event, EventName::Join);
            assert_eq!(frames[0].data.username, "bob");
            assert_eq!(frames[0].data.room, "general");
        }
        assert_eq!(
            fixture.registry.get(&c2).await,
            Some(SessionState::joined(
                Username::new("bob".to_string()).unwrap(),
                room("general")
            ))
        );
    }

    #[tokio::test]
    async fn test_join_elsewhere_leaves_old_room_first() {
        // テスト項目: 別ルームへの参加時、旧ルームへの leave が新ルームへの join より先に送られる
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = usecase(&fixture);
        let (c1, mut rx1) = fixture.connect("c1").await;
        let (c2, mut rx2) = fixture.connect("c2").await;
        usecase
            .execute(&c1, "alice".to_string(), "a".to_string())
            .await
            .unwrap();
        usecase
            .execute(&c2, "bob".to_string(), "a".to_string())
            .await
            .unwrap();
        drain(&mut rx1);
        drain(&mut rx2);

        // when (操作):
        let outcome = usecase
            .execute(&c1, "alice".to_string(), "b".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        let left = outcome.left.clone().unwrap();
        assert_eq!(left.kind, ChatEventKind::Leave);
        assert_eq!(left.room, room("a"));
        assert!(left.timestamp < outcome.joined.timestamp);

        // alice は旧ルームの leave（自分宛ても含む）→ 新ルームの join の順に受信する
        let alice_frames = drain(&mut rx1);
        let kinds: Vec<(EventName, String)> = alice_frames
            .iter()
            .map(|f| (f.event, f.data.room.clone()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (EventName::Leave, "a".to_string()),
                (EventName::Join, "b".to_string())
            ]
        );

        // bob は旧ルームの leave だけを受信する
        let bob_frames = drain(&mut rx2);
        assert_eq!(bob_frames.len(), 1);
        assert_eq!(bob_frames[0].data.message, "alice has left the room");

        assert_eq!(fixture.message_pusher.room_members(&room("a")).await, vec![c2]);
        assert_eq!(fixture.message_pusher.room_members(&room("b")).await, vec![c1]);
    }

    #[tokio::test]
    async fn test_repeated_joins_keep_exactly_one_room() {
        // テスト項目: 何度 join しても、直近に参加した 1 ルームのメンバーである
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = usecase(&fixture);
        let (c1, _rx1) = fixture.connect("c1").await;
        let rooms = ["a", "b", "c", "b", "b"];

        for name in rooms {
            // when (操作):
            usecase
                .execute(&c1, "alice".to_string(), name.to_string())
                .await
                .unwrap();

            // then (期待する結果):
            for other in ["a", "b", "c"] {
                let members = fixture.message_pusher.room_members(&room(other)).await;
                assert_eq!(members.contains(&c1), other == name);
            }
            assert_eq!(
                fixture.registry.get(&c1).await.unwrap().room(),
                Some(&room(name))
            );
        }
    }

    #[tokio::test]
    async fn test_join_with_empty_fields_is_ignored() {
        // テスト項目: username または room が空の join は状態を変えず、何も送信しない
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = usecase(&fixture);
        let (c1, mut rx1) = fixture.connect("c1").await;

        // when (操作):
        let no_username = usecase
            .execute(&c1, String::new(), "room1".to_string())
            .await;
        let no_room = usecase.execute(&c1, "alice".to_string(), String::new()).await;

        // then (期待する結果):
        assert_eq!(
            no_username,
            Err(JoinError::Invalid(ValidationError::EmptyUsername))
        );
        assert_eq!(no_room, Err(JoinError::Invalid(ValidationError::EmptyRoomName)));
        assert_eq!(fixture.registry.get(&c1).await, Some(SessionState::Unjoined));
        assert!(drain(&mut rx1).is_empty());
    }

    #[tokio::test]
    async fn test_join_unknown_connection() {
        // テスト項目: 未登録の接続からの join は何もしない
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = usecase(&fixture);

        // when (操作):
        let result = usecase
            .execute(&connection("ghost"), "alice".to_string(), "general".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(JoinError::UnknownConnection(connection("ghost"))));
        assert!(fixture.message_pusher.room_members(&room("general")).await.is_empty());
    }

    #[tokio::test]
    async fn test_join_elsewhere_call_order() {
        // テスト項目: MessagePusher の呼び出し順が leave 通知 → グループ離脱 → グループ参加 → join 通知 になる
        // given (前提条件):
        let fixture = Fixture::new();
        let c1 = connection("c1");
        fixture.registry.connect(c1.clone()).await.unwrap();
        fixture
            .registry
            .set(
                &c1,
                SessionState::joined(Username::new("alice".to_string()).unwrap(), room("a")),
            )
            .await
            .unwrap();

        let mut seq = Sequence::new();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast_to_room()
            .withf(|target, event| target.as_str() == "a" && event.kind == ChatEventKind::Leave)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(1usize);
        pusher
            .expect_leave_room()
            .withf(|id, target| id.as_str() == "c1" && target.as_str() == "a")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        pusher
            .expect_join_room()
            .withf(|id, target| id.as_str() == "c1" && target.as_str() == "b")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        pusher
            .expect_broadcast_to_room()
            .withf(|target, event| target.as_str() == "b" && event.kind == ChatEventKind::Join)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(1usize);

        let usecase = JoinRoomUseCase::new(
            fixture.registry.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(START_MILLIS)),
        );

        // when (操作):
        let outcome = usecase
            .execute(&c1, "alice".to_string(), "b".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome.into_events().len(), 2);
    }
}

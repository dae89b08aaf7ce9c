//! UseCase: ルーム一覧取得処理
//!
//! ルームは独立したエンティティではなく「同じ room を持つ接続の集合」なので、
//! Registry のスナップショットから集計する。

use std::{collections::BTreeMap, sync::Arc};

use crate::domain::{RoomName, SessionRegistry, SessionState, Username};

/// 参加者が 1 人以上いるルームの概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room: RoomName,
    /// 参加者のユーザー名（昇順、重複あり）
    pub members: Vec<Username>,
}

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Registry（セッション状態の管理）
    registry: Arc<dyn SessionRegistry>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム名の昇順でルーム一覧を返す
    pub async fn execute(&self) -> Vec<RoomSummary> {
        let mut rooms: BTreeMap<RoomName, Vec<Username>> = BTreeMap::new();
        for (_, state) in self.registry.sessions().await {
            if let SessionState::Joined { username, room } = state {
                rooms.entry(room).or_default().push(username);
            }
        }

        rooms
            .into_iter()
            .map(|(room, mut members)| {
                members.sort();
                RoomSummary { room, members }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::{
        JoinRoomUseCase,
        test_support::{Fixture, room},
    };

    #[tokio::test]
    async fn test_get_rooms_groups_joined_sessions() {
        // テスト項目: 参加中のセッションがルームごとにまとめられ、未参加の接続は含まれない
        // given (前提条件):
        let fixture = Fixture::new();
        let join = JoinRoomUseCase::new(
            fixture.registry.clone(),
            fixture.message_pusher.clone(),
            fixture.clock.clone(),
        );
        let (c1, _rx1) = fixture.connect("c1").await;
        let (c2, _rx2) = fixture.connect("c2").await;
        let (c3, _rx3) = fixture.connect("c3").await;
        let (_c4, _rx4) = fixture.connect("c4").await;
        join.execute(&c1, "carol".to_string(), "random".to_string())
            .await
            .unwrap();
        join.execute(&c2, "bob".to_string(), "general".to_string())
            .await
            .unwrap();
        join.execute(&c3, "alice".to_string(), "general".to_string())
            .await
            .unwrap();
        let usecase = GetRoomsUseCase::new(fixture.registry.clone());

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        let names = |members: &[Username]| -> Vec<String> {
            members.iter().map(|u| u.as_str().to_string()).collect()
        };
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room, room("general"));
        assert_eq!(names(&rooms[0].members), vec!["alice", "bob"]);
        assert_eq!(rooms[1].room, room("random"));
        assert_eq!(names(&rooms[1].members), vec!["carol"]);
    }

    #[tokio::test]
    async fn test_get_rooms_empty() {
        // テスト項目: 誰も参加していなければ空のリストを返す
        // given (前提条件):
        let fixture = Fixture::new();
        let _ = fixture.connect("c1").await;
        let usecase = GetRoomsUseCase::new(fixture.registry.clone());

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert!(rooms.is_empty());
    }
}

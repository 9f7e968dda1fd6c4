use chrono::{DateTime, Utc};

use crate::model::id::{ChatMessageId, ChatRoomId, MemberId};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: ChatRoomId,
    pub name: String,
    pub members: MemberPair,
}

// 2 人のメンバーの順序なしの組。常に (小さい ID, 大きい ID) の順で保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberPair {
    low: MemberId,
    high: MemberId,
}

impl MemberPair {
    // 同一メンバー同士の組は作れない
    pub fn new(a: MemberId, b: MemberId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn low(&self) -> MemberId {
        self.low
    }

    pub fn high(&self) -> MemberId {
        self.high
    }

    pub fn contains(&self, member_id: MemberId) -> bool {
        self.low == member_id || self.high == member_id
    }
}

pub fn room_name(first_nickname: &str, second_nickname: &str) -> String {
    format!("{first_nickname}&{second_nickname}")
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub chat_room_id: ChatRoomId,
    pub sent_by: MemberId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_order_independent() {
        let a = MemberId::new(7);
        let b = MemberId::new(3);
        assert_eq!(MemberPair::new(a, b), MemberPair::new(b, a));
        let pair = MemberPair::new(a, b).unwrap();
        assert_eq!(pair.low(), b);
        assert_eq!(pair.high(), a);
        assert!(pair.contains(a) && pair.contains(b));
        assert!(!pair.contains(MemberId::new(1)));
    }

    #[test]
    fn pair_rejects_same_member() {
        assert!(MemberPair::new(MemberId::new(1), MemberId::new(1)).is_none());
    }

    #[test]
    fn room_name_joins_nicknames() {
        assert_eq!(room_name("alice", "bob"), "alice&bob");
    }
}

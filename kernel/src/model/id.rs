use serde::{Deserialize, Serialize};

// BIGSERIAL の主キーをそのまま包む ID 型を定義するマクロ
macro_rules! define_id {
    ($id_type: ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $id_type(i64);

        impl $id_type {
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn raw(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $id_type {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$id_type> for i64 {
            fn from(value: $id_type) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $id_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(MemberId);
define_id!(PostId);
define_id!(ReviewId);
define_id!(ReservationId);
define_id!(ReportId);
define_id!(ChatRoomId);
define_id!(ChatMessageId);
define_id!(NotificationId);

use derive_new::new;

use crate::model::id::MemberId;

// アクセストークンの発行要求。トークン文字列自体は保存先の実装で生成する
#[derive(Debug, new)]
pub struct CreateToken {
    pub member_id: MemberId,
}

use derive_new::new;

#[derive(new)]
pub struct CreateMember {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

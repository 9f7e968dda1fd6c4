use shared::error::AppResult;

// bcrypt はコストの高い計算なので、非同期ランタイムのワーカーではなく blocking スレッドで実行する
pub(crate) async fn hash_password(password: String) -> AppResult<String> {
    let hash =
        tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST)).await??;
    Ok(hash)
}

pub(crate) async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    let verified =
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash)).await??;
    Ok(verified)
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use kernel::model::{id::MemberId, member::Member, role::Role};
use kernel::repository::{auth::MockAuthRepository, member::MockMemberRepository};
use registry::{AppRegistry, MockAppRegistryExt};
use serde_json::Value;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";

pub fn app(registry: MockAppRegistryExt) -> Router {
    let registry: AppRegistry = Arc::new(registry);
    Router::new()
        .merge(api::route::v1::routes())
        .merge(api::route::auth::routes())
        .with_state(registry)
}

pub fn member(id: i64) -> Member {
    Member {
        id: MemberId::new(id),
        email: format!("user{id}@example.com"),
        nickname: format!("user{id}"),
        role: Role::User,
    }
}

// TOKEN を持つリクエストを member_id のメンバーとして認証させる
pub fn authorize_as(registry: &mut MockAppRegistryExt, member_id: i64) {
    registry.expect_auth_repository().returning(move || {
        let mut auth = MockAuthRepository::new();
        auth.expect_fetch_member_id_from_token()
            .returning(move |token| {
                Ok((token.0 == TOKEN).then_some(MemberId::new(member_id)))
            });
        Arc::new(auth)
    });
    registry.expect_member_repository().returning(|| {
        let mut members = MockMemberRepository::new();
        members
            .expect_find_current_member()
            .returning(|id| Ok(Some(member(id.raw()))));
        Arc::new(members)
    });
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn anonymous_json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

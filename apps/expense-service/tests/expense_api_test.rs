//! # Expense API の結合テスト
//!
//! `build_app` で構築した本番と同じルーター（認証・Request ID レイヤー込み）に
//! インメモリリポジトリを注入し、HTTP レベルの振る舞いを検証する。
//!
//! - 作成 → 取得 → 一覧 → 更新の一連の流れ
//! - 認証の要否
//! - `X-Request-Id` の付与

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, Response, StatusCode, header},
};
use expense_domain::expense::NewExpense;
use expense_infra::mock::MockExpenseRepository;
use expense_service::{app_builder::build_app, handler::expense::ExpenseDto};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

const TOKEN: &str = "November 10, 2009";

// --- ヘルパー ---

fn test_app(repo: &MockExpenseRepository) -> Router {
    build_app(Arc::new(repo.clone()), TOKEN)
}

fn authorized(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, TOKEN);

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn sample() -> Value {
    json!({
        "title": "strawberry smoothie",
        "amount": 79,
        "note": "night market promotion discount 10 bath",
        "tags": ["food", "beverage"],
    })
}

// --- 作成 → 取得 → 一覧 → 更新 ---

#[tokio::test]
async fn test_作成した経費を取得と一覧で読み戻せる() {
    let repo = MockExpenseRepository::new();

    // 作成
    let response = test_app(&repo)
        .oneshot(authorized(Method::POST, "/expenses", Some(sample())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(id, 1);

    // 取得
    let response = test_app(&repo)
        .oneshot(authorized(Method::GET, &format!("/expenses/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    // 一覧
    let response = test_app(&repo)
        .oneshot(authorized(Method::GET, "/expenses", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([created]));
}

#[tokio::test]
async fn test_更新後の取得は新しい内容を返す() {
    let repo = MockExpenseRepository::new();
    let seeded = repo.seed(NewExpense {
        title:  "apple smoothie".to_string(),
        amount: 89.0,
        note:   "no discount".to_string(),
        tags:   vec!["beverage".to_string()],
    });
    let path = format!("/expenses/{}", seeded.id);

    let response = test_app(&repo)
        .oneshot(authorized(Method::PUT, &path, Some(sample())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = test_app(&repo)
        .oneshot(authorized(Method::GET, &path, None))
        .await
        .unwrap();
    let fetched: ExpenseDto = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(
        fetched,
        ExpenseDto {
            id:     seeded.id.as_i64(),
            title:  "strawberry smoothie".to_string(),
            amount: 79.0,
            note:   "night market promotion discount 10 bath".to_string(),
            tags:   vec!["food".to_string(), "beverage".to_string()],
        }
    );
}

#[tokio::test]
async fn test_作成レスポンスは金額を整数で出力する() {
    let repo = MockExpenseRepository::new();
    let body = json!({
        "title": "title",
        "amount": 100,
        "note": "note",
        "tags": ["tag1", "tag2"],
    });

    let response = test_app(&repo)
        .oneshot(authorized(Method::POST, "/expenses", Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_text(response).await,
        r#"{"id":1,"title":"title","amount":100,"note":"note","tags":["tag1","tag2"]}"#
    );
}

#[tokio::test]
async fn test_タグが空の作成は400で保存されない() {
    let repo = MockExpenseRepository::new();
    let body = json!({"title": "t", "amount": 1, "note": "n", "tags": []});

    let response = test_app(&repo)
        .oneshot(authorized(Method::POST, "/expenses", Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"message": "at least one tag is required"})
    );
    assert!(repo.expenses().is_empty());
}

#[tokio::test]
async fn test_存在しないidの取得は404() {
    let repo = MockExpenseRepository::new();

    let response = test_app(&repo)
        .oneshot(authorized(Method::GET, "/expenses/42", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"message": "expense not found"}));
}

#[tokio::test]
async fn test_更新のidはパスの値が本文より優先される() {
    let repo = MockExpenseRepository::new();
    let mut body = sample();
    body["id"] = json!(999);

    let response = test_app(&repo)
        .oneshot(authorized(Method::PUT, "/expenses/5", Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], json!(5));
}

#[tokio::test]
async fn test_utf8でないidの取得はjsonの500() {
    let repo = MockExpenseRepository::new();

    let response = test_app(&repo)
        .oneshot(authorized(Method::GET, "/expenses/%FF", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"message": "unable to scan expense"})
    );
}

#[rstest]
#[case::空の本文(None, "title is required")]
#[case::タイトルがnull(
    Some(json!({"title": null, "amount": 1, "note": "n", "tags": ["a"]})),
    "title is required"
)]
#[case::タグがnull(
    Some(json!({"title": "t", "amount": 1, "note": "n", "tags": null})),
    "at least one tag is required"
)]
#[tokio::test]
async fn test_欠けた値はバリデータが報告する(#[case] body: Option<Value>, #[case] expected: &str) {
    let repo = MockExpenseRepository::new();

    let response = test_app(&repo)
        .oneshot(authorized(Method::POST, "/expenses", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"message": expected}));
    assert!(repo.expenses().is_empty());
}

// --- 認証 ---

#[rstest]
#[case::作成(Method::POST, "/expenses")]
#[case::一覧(Method::GET, "/expenses")]
#[case::取得(Method::GET, "/expenses/1")]
#[case::更新(Method::PUT, "/expenses/1")]
#[tokio::test]
async fn test_トークンなしの経費apiは401(#[case] method: Method, #[case] uri: &str) {
    let repo = MockExpenseRepository::new();
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(sample().to_string()))
        .unwrap();

    let response = test_app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(response).await, "Unauthorized");
    assert!(repo.expenses().is_empty());
}

#[tokio::test]
async fn test_誤ったトークンは401() {
    let repo = MockExpenseRepository::new();
    let request = Request::builder()
        .uri("/expenses")
        .header(header::AUTHORIZATION, "wrong")
        .body(Body::empty())
        .unwrap();

    let response = test_app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_healthは認証不要() {
    let repo = MockExpenseRepository::new();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = test_app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "healthy");
}

// --- Request ID ---

#[tokio::test]
async fn test_レスポンスにx_request_idが付与される() {
    let repo = MockExpenseRepository::new();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = test_app(&repo).oneshot(request).await.unwrap();

    assert!(
        response.headers().contains_key("x-request-id"),
        "レスポンスに x-request-id ヘッダーが含まれること"
    );
}

#[tokio::test]
async fn test_401でもクライアント提供のx_request_idが返される() {
    let repo = MockExpenseRepository::new();
    let request = Request::builder()
        .uri("/expenses")
        .header("x-request-id", "client-provided-request-id-123")
        .body(Body::empty())
        .unwrap();

    let response = test_app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()["x-request-id"].to_str().unwrap(),
        "client-provided-request-id-123"
    );
}

use actix_web::{test, web, App};
use medpredict_server::{routes, UserRepository};
use serde_json::json;

mod common;

macro_rules! app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.state.clone()))
                .configure(routes)
        )
        .await
    };
}

#[actix_web::test]
async fn test_register_and_login() {
    let ctx = common::test_state();
    let app = app!(ctx);

    let register_response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "username": "alice", "password": "pw123" }))
        .send_request(&app)
        .await;
    assert_eq!(register_response.status(), 201);

    let login_response = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": "alice", "password": "pw123" }))
        .send_request(&app)
        .await;
    assert_eq!(login_response.status(), 200);
    let login_body: serde_json::Value = test::read_body_json(login_response).await;
    assert!(login_body.get("token").is_some());
    assert_eq!(login_body["username"], "alice");
}

#[actix_web::test]
async fn test_duplicate_registration() {
    let ctx = common::test_state();
    let app = app!(ctx);

    for (password, expected) in [("pw123", 201), ("other", 409)] {
        let response = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({ "username": "alice", "password": password }))
            .send_request(&app)
            .await;
        assert_eq!(response.status(), expected);
    }

    // The original password still works, the rejected one does not.
    let ok = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": "alice", "password": "pw123" }))
        .send_request(&app)
        .await;
    assert_eq!(ok.status(), 200);

    let rejected = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": "alice", "password": "other" }))
        .send_request(&app)
        .await;
    assert_eq!(rejected.status(), 401);
}

#[actix_web::test]
async fn test_invalid_login() {
    let ctx = common::test_state();
    let app = app!(ctx);

    let response = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": "nobody", "password": "wrongpassword" }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 401);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["error"]["status"], 401);
}

#[actix_web::test]
async fn test_invalid_registration() {
    let ctx = common::test_state();
    let app = app!(ctx);

    let response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "username": "alice", "password": "" }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);

    let response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "username": "   ", "password": "pw123" }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn test_username_with_surrounding_whitespace_rejected() {
    let ctx = common::test_state();
    let app = app!(ctx);

    let response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "username": "alice", "password": "pw123" }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 201);

    for username in [" alice", "alice ", "\talice"] {
        let response = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({ "username": username, "password": "pw123" }))
            .send_request(&app)
            .await;
        assert_eq!(response.status(), 400, "{:?}", username);
    }

    assert!(ctx.store.find_user(" alice").await.unwrap().is_none());
}

#[actix_web::test]
async fn test_malformed_body_uses_error_envelope() {
    let ctx = common::test_state();
    let app = app!(ctx);

    let response = test::TestRequest::post()
        .uri("/auth/register")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"username\": \"alice\"")
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["error"]["status"], 400);
    assert!(body["error"]["message"].is_string());
}

#[actix_web::test]
async fn test_logout() {
    let ctx = common::test_state();
    let app = app!(ctx);

    test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "username": "alice", "password": "pw123" }))
        .send_request(&app)
        .await;
    let login_response = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": "alice", "password": "pw123" }))
        .send_request(&app)
        .await;
    let login_body: serde_json::Value = test::read_body_json(login_response).await;
    let token = login_body["token"].as_str().unwrap().to_string();

    let session: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/auth/session")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(session["authenticated"], true);
    assert_eq!(session["username"], "alice");

    let logout_response = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .send_request(&app)
        .await;
    assert_eq!(logout_response.status(), 200);

    let protected_response = test::TestRequest::get()
        .uri("/results")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .send_request(&app)
        .await;
    assert_eq!(protected_response.status(), 401);

    let session: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/auth/session")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(session["authenticated"], false);
}

#[actix_web::test]
async fn test_logout_without_token() {
    let ctx = common::test_state();
    let app = app!(ctx);

    let response = test::TestRequest::post()
        .uri("/auth/logout")
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 401);
}

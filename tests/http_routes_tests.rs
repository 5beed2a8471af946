use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use skillharbour::config::{Config, SESSION_COOKIE, StorageConfig};
use skillharbour::router::{AppState, app_router};
use tower::ServiceExt;

async fn app(dir: &tempfile::TempDir) -> Router {
    let mut cfg = Config::default();
    cfg.storage = StorageConfig::csv_in(dir.path());
    cfg.basic.insecure_cookie = true;
    let state = AppState::build(&cfg).await.expect("failed to build state");
    app_router(state)
}

fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("failed to build request")
}

/// `name=value` of the session cookie set by `resp`, if any.
fn session_cookie(resp: &Response) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(SESSION_COOKIE))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

async fn json_body(resp: Response) -> Value {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body).expect("response body was not json")
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.expect("request failed")
}

#[tokio::test]
async fn course_list_is_public() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir).await;

    let resp = send(&app, request("GET", "/courses", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(
        body["courses"],
        json!([
            {"title": "Web Development", "overview": "HTML, CSS, JS basics"},
            {"title": "Data Science", "overview": "Python, ML basics"},
            {"title": "Cloud Computing", "overview": "AWS/Azure/GCP basics"},
        ])
    );
}

#[tokio::test]
async fn first_visit_issues_a_session_cookie() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir).await;

    let resp = send(&app, request("GET", "/session", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp).expect("session cookie");
    assert_eq!(
        json_body(resp).await,
        json!({"username": null, "page": {"kind": "home"}})
    );

}

#[tokio::test]
async fn reused_session_gets_a_refreshed_cookie() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir).await;
    let creds = json!({"username": "dana", "password": "pw"});

    let resp = send(&app, request("POST", "/register", None, Some(creds.clone()))).await;
    let first = session_cookie(&resp).expect("session cookie");
    let resp = send(&app, request("POST", "/login", Some(&first), Some(creds))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, request("GET", "/session", Some(&first), None)).await;
    let attrs = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(SESSION_COOKIE))
        .map(str::to_string)
        .expect("refreshed session cookie");
    assert!(attrs.contains("Max-Age=3600"), "{attrs}");
    let refreshed = session_cookie(&resp).expect("session cookie");

    // the refreshed cookie still names the same signed-in session
    let resp = send(&app, request("GET", "/session", Some(&refreshed), None)).await;
    assert_eq!(json_body(resp).await["username"], "dana");
}

#[tokio::test]
async fn register_login_enroll_over_http() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir).await;
    let creds = json!({"username": "alice", "password": "pw1"});

    let resp = send(&app, request("POST", "/register", None, Some(creds.clone()))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp).expect("session cookie");
    let body = json_body(resp).await;
    assert_eq!(body["session"]["page"], json!({"kind": "login"}));

    let resp = send(&app, request("POST", "/login", Some(&cookie), Some(creds))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["message"], "Welcome, alice!");
    assert_eq!(body["session"]["username"], "alice");
    assert_eq!(body["session"]["page"], json!({"kind": "home"}));

    let resp = send(
        &app,
        request("POST", "/courses/Data%20Science/enroll", Some(&cookie), None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["outcome"], "enrolled");
    assert_eq!(body["message"], "Enrolled in Data Science!");

    let resp = send(
        &app,
        request("POST", "/courses/Data%20Science/enroll", Some(&cookie), None),
    )
    .await;
    assert_eq!(json_body(resp).await["outcome"], "already_enrolled");

    let resp = send(&app, request("GET", "/my/courses", Some(&cookie), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({"username": "alice", "courses": ["Data Science"]})
    );

    let resp = send(&app, request("GET", "/session", Some(&cookie), None)).await;
    assert_eq!(json_body(resp).await["page"], json!({"kind": "my_courses"}));

    let enrollments =
        std::fs::read_to_string(dir.path().join("enrollments.csv")).expect("enrollments.csv");
    assert_eq!(enrollments, "username,title\nalice,Data Science\n");
}

#[tokio::test]
async fn anonymous_enroll_is_unauthorized() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir).await;

    let resp = send(&app, request("POST", "/courses/Web%20Development/enroll", None, None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "NOT_AUTHENTICATED");

    let resp = send(&app, request("GET", "/my/courses", None, None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_errors_map_to_status_codes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir).await;

    let resp = send(
        &app,
        request("POST", "/register", None, Some(json!({"username": "bob", "password": ""}))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(resp).await["error"]["message"],
        "Username and password cannot be empty."
    );

    let creds = json!({"username": "bob", "password": "pw"});
    let resp = send(&app, request("POST", "/register", None, Some(creds.clone()))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&app, request("POST", "/register", None, Some(creds))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["error"]["code"], "DUPLICATE_USER");

    let resp = send(
        &app,
        request("POST", "/login", None, Some(json!({"username": "bob", "password": "nope"}))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(resp).await["error"]["message"],
        "Invalid username or password."
    );
}

#[tokio::test]
async fn course_page_moves_session_and_shows_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir).await;

    let resp = send(&app, request("GET", "/courses/Cloud%20Computing", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp).expect("session cookie");
    let body = json_body(resp).await;
    assert_eq!(body["title"], "Cloud Computing");
    assert_eq!(body["overview"], "AWS/Azure/GCP basics");
    assert_eq!(body["content"]["syllabus"].as_array().map(Vec::len), Some(5));
    assert_eq!(
        body["session"]["page"],
        json!({"kind": "course", "title": "Cloud Computing"})
    );

    let resp = send(
        &app,
        request("POST", "/session/navigate", Some(&cookie), Some(json!({"to": "back_to_home"}))),
    )
    .await;
    assert_eq!(json_body(resp).await["page"], json!({"kind": "home"}));

    let resp = send(&app, request("GET", "/courses/Knitting", None, None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn logout_clears_identity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app(&dir).await;
    let creds = json!({"username": "carol", "password": "pw"});

    let resp = send(&app, request("POST", "/register", None, Some(creds.clone()))).await;
    let cookie = session_cookie(&resp).expect("session cookie");
    send(&app, request("POST", "/login", Some(&cookie), Some(creds))).await;

    let resp = send(
        &app,
        request("POST", "/session/navigate", Some(&cookie), Some(json!({"to": "my_courses"}))),
    )
    .await;
    assert_eq!(json_body(resp).await["page"], json!({"kind": "my_courses"}));

    let resp = send(&app, request("POST", "/logout", Some(&cookie), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["session"], json!({"username": null, "page": {"kind": "home"}}));

    let resp = send(&app, request("POST", "/courses/Data%20Science/enroll", Some(&cookie), None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

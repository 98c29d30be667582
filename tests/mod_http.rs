use rollbook::http::{router, AppState};
use rollbook::types::DocumentId;
use rollbook::Registry;
use serde_json::{json, Value};

const TOKEN: &str = "test-token";

async fn spawn_server() -> (String, Registry) {
    let registry = Registry::new();
    let state =
        AppState::new(registry.query_service(), registry.mutation_service(), vec![TOKEN.into()]);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), registry)
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn student_payload(matric_no: i64) -> Value {
    json!({
        "firstname": "Ada",
        "lastname": "Obi",
        "matric_no": matric_no,
        "level": 200,
        "department": 4,
        "academic_session": DocumentId::new().to_string(),
        "chapel_seat_number": 12,
        "chapel_group_number": 3,
    })
}

#[tokio::test]
async fn health_is_unauthenticated() {
    let (base, _registry) = spawn_server().await;
    let res = client().get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn student_routes_reject_without_token() {
    let (base, _registry) = spawn_server().await;
    let res = client()
        .get(format!("{base}/student/?page=1&per_page=10"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["status"], json!(401));
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn empty_listing_envelope() {
    let (base, _registry) = spawn_server().await;
    let res = client()
        .get(format!("{base}/student/?page=1&per_page=10"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("get students successfully"));
    assert_eq!(body["data"]["students"], json!([]));
    assert_eq!(body["data"]["pagination"]["page_number"], json!(1));
    assert_eq!(body["data"]["pagination"]["per_pages"], json!(10));
    assert_eq!(body["data"]["pagination"]["total_pages"], json!(0));
}

#[tokio::test]
async fn create_then_fetch_by_matric_over_http() {
    let (base, _registry) = spawn_server().await;
    let c = client();

    let res = c
        .post(format!("{base}/student/"))
        .bearer_auth(TOKEN)
        .json(&student_payload(190_441))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["message"], json!("created student successfully"));
    let created_student = &created["data"]["student"];

    let res = c
        .get(format!("{base}/student/matric/190441"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(&fetched["data"]["student"], created_student);
}

#[tokio::test]
async fn missing_student_is_404_envelope() {
    let (base, _registry) = spawn_server().await;
    let res = client()
        .get(format!("{base}/student/id/{}", DocumentId::new()))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("student does not exist"));
}

#[tokio::test]
async fn malformed_student_id_is_400() {
    let (base, _registry) = spawn_server().await;
    let res = client()
        .get(format!("{base}/student/id/not-a-uuid"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], json!("invalid student id"));
}

#[tokio::test]
async fn patch_with_unknown_session_is_400() {
    let (base, registry) = spawn_server().await;
    let c = client();

    let res = c
        .post(format!("{base}/student/"))
        .bearer_auth(TOKEN)
        .json(&student_payload(42))
        .send()
        .await
        .unwrap();
    let created: Value = res.json().await.unwrap();
    let id = created["data"]["student"]["id"].as_str().unwrap().to_string();

    let res = c
        .patch(format!("{base}/student/{id}"))
        .bearer_auth(TOKEN)
        .json(&json!({ "academic_session": DocumentId::new().to_string() }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], json!("academic session does not exist"));

    // The target student is untouched.
    let fetched = registry.query_service().get_student_by_matric_no(42).await.unwrap();
    assert_eq!(fetched.id.to_string(), id);
    assert_eq!(fetched.lastname, "Obi");
}

#[tokio::test]
async fn patch_updates_supplied_fields_over_http() {
    let (base, registry) = spawn_server().await;
    let c = client();
    let session = registry.academic_sessions().create_academic_session("2023/2024").unwrap();

    let res = c
        .post(format!("{base}/student/"))
        .bearer_auth(TOKEN)
        .json(&student_payload(7))
        .send()
        .await
        .unwrap();
    let created: Value = res.json().await.unwrap();
    let id = created["data"]["student"]["id"].as_str().unwrap().to_string();

    let res = c
        .patch(format!("{base}/student/{id}"))
        .bearer_auth(TOKEN)
        .json(&json!({
            "lastname": "Eze",
            "academic_session": session.id.to_string(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], json!("updated student successfully"));
    let student = &body["data"]["student"];
    assert_eq!(student["lastname"], json!("Eze"));
    assert_eq!(student["firstname"], json!("Ada"));
    // The reference id was resolved into the session entity.
    assert_eq!(student["academic_session"]["name"], json!("2023/2024"));
}

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use job_tracker::api::{ApiClient, ScanApi, TrackerApi};
use job_tracker::error::ApiError;
use job_tracker::jobs::JobStatus;

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri()).expect("client build failed")
}

#[tokio::test]
async fn fetch_jobs_parses_the_backend_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "company": "Acme Inc",
                "role": "Frontend Engineer",
                "status": "Applied",
                "date_applied": "2025-11-01",
                "email_subject": "Application - Frontend Engineer",
                "notes": "Referred by Alice"
            },
            {
                "id": 2,
                "company": "Nimbus",
                "role": "Data Analyst",
                "status": "Interview",
                "date_applied": "2025-10-20",
                "email_subject": "Interview Invite"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = client_for(&server).await.fetch_jobs().await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].company, "Acme Inc");
    assert_eq!(jobs[0].status, JobStatus::Applied);
    assert_eq!(jobs[1].status, JobStatus::Interview);
    // Missing notes deserialize as empty
    assert_eq!(jobs[1].notes, "");
}

#[tokio::test]
async fn fetch_stats_parses_the_count_map() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 5,
            "status_counts": {"Applied": 3, "Interview": 1, "Offer": 1}
        })))
        .mount(&server)
        .await;

    let stats = client_for(&server).await.fetch_stats().await.unwrap();

    assert_eq!(stats.total, 5);
    assert_eq!(stats.count(JobStatus::Applied), 3);
    assert_eq!(stats.count(JobStatus::Rejected), 0);
}

#[tokio::test]
async fn start_scan_posts_the_lookback_window() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scan"))
        .and(body_json(json!({"days_back": 30})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Scan started",
            "status": {"running": true, "progress": 0, "message": ""}
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).await.start_scan(30).await.unwrap();
}

#[tokio::test]
async fn start_scan_surfaces_the_busy_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scan"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Scan already running"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .start_scan(60)
        .await
        .expect_err("busy backend accepted the start");

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 400);
            assert!(body.contains("already running"));
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn scan_status_parses_and_ignores_extra_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/scan/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": true,
            "progress": 40,
            "message": "Analyzing 12 emails with AI...",
            "total_emails": 12,
            "processed": 3
        })))
        .mount(&server)
        .await;

    let status = client_for(&server).await.scan_status().await.unwrap();

    assert!(status.running);
    assert_eq!(status.progress, 40);
    assert_eq!(status.message, "Analyzing 12 emails with AI...");
}

#[tokio::test]
async fn scan_status_maps_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/scan/status"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .scan_status()
        .await
        .expect_err("500 accepted");

    assert!(matches!(err, ApiError::Status { status, .. } if status.as_u16() == 500));
}

#[tokio::test]
async fn save_note_posts_id_and_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/note"))
        .and(body_json(json!({"id": 2, "notes": "Prep round 2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Updated successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .await
        .save_note(2, "Prep round 2")
        .await
        .unwrap();
}

//! Integration tests for the SMS/USSD webhook surface.
//!
//! Each test spins up an Axum server on a random port and exercises the
//! real HTTP contract with reqwest.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use cbe_assist::careers::CareerCatalog;
use cbe_assist::channels::{sms_routes, ussd_routes};
use cbe_assist::prompts::TablePromptResolver;
use cbe_assist::session::SessionEngine;
use cbe_assist::store::LibSqlStore;

async fn spawn_server() -> String {
    let store = Arc::new(LibSqlStore::new_memory().await.unwrap());
    let engine = Arc::new(SessionEngine::new(
        store,
        Arc::new(TablePromptResolver::new()),
        Arc::new(CareerCatalog::new()),
        None,
        Duration::from_millis(200),
    ));

    let app = sms_routes(Arc::clone(&engine), None).merge(ussd_routes(engine));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{addr}")
}

async fn post_sms(base: &str, phone: &str, text: &str) -> String {
    reqwest::Client::new()
        .post(format!("{base}/sms"))
        .form(&[("from", phone), ("text", text)])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

async fn post_ussd(base: &str, phone: &str, chain: &str) -> String {
    reqwest::Client::new()
        .post(format!("{base}/ussd"))
        .form(&[
            ("sessionId", "at-session-1"),
            ("serviceCode", "*384*96#"),
            ("phoneNumber", phone),
            ("text", chain),
        ])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

#[tokio::test]
async fn sms_first_contact_greets_with_language_menu() {
    let base = spawn_server().await;
    let body = post_sms(&base, "+254733000001", "hi").await;
    assert!(body.contains("Welcome to Edutena CBE"));
    assert!(body.contains("1. English"));
}

#[tokio::test]
async fn sms_full_grade9_assessment_over_http() {
    let base = spawn_server().await;
    let phone = "+254733000002";

    post_sms(&base, phone, "hello").await;
    let mut last = String::new();
    for input in ["1", "1", "3", "2", "1", "1", "1", "1", "1"] {
        last = post_sms(&base, phone, input).await;
    }
    assert!(last.contains("Recommended Pathway"));
    assert!(last.contains("STEM"));

    // CAREERS now works and lists the STEM page.
    let careers = post_sms(&base, phone, "CAREERS").await;
    assert!(careers.contains("1. Engineering"));
}

#[tokio::test]
async fn ussd_chained_input_uses_latest_segment() {
    let base = spawn_server().await;
    let phone = "+254733000003";

    // Session open: empty text greets and keeps the session open.
    let open = post_ussd(&base, phone, "").await;
    assert!(open.starts_with("CON "));
    assert!(open.contains("Choose your language"));

    // The gateway resends the whole chain; only the tail is the new answer.
    let level = post_ussd(&base, phone, "1").await;
    assert!(level.starts_with("CON "));
    assert!(level.contains("Select your level"));

    let grade = post_ussd(&base, phone, "1*2").await;
    assert!(grade.starts_with("CON "));
    assert!(grade.contains("Grade 10"));
}

#[tokio::test]
async fn ussd_terminates_when_assessment_completes() {
    let base = spawn_server().await;
    let phone = "+254733000004";

    post_ussd(&base, phone, "").await;
    let inputs = ["1", "1*1", "1*1*3", "1*1*3*2"];
    for chain in inputs {
        let body = post_ussd(&base, phone, chain).await;
        assert!(body.starts_with("CON "), "got: {body}");
    }
    // Five ratings; the last one finishes the assessment.
    let mut chain = "1*1*3*2".to_string();
    for i in 0..5 {
        chain.push_str("*1");
        let body = post_ussd(&base, phone, &chain).await;
        if i < 4 {
            assert!(body.starts_with("CON "), "got: {body}");
        } else {
            assert!(body.starts_with("END "), "got: {body}");
            assert!(body.contains("STEM"));
        }
    }
}

#[tokio::test]
async fn sms_and_ussd_sessions_are_independent() {
    let base = spawn_server().await;
    let phone = "+254733000005";

    post_sms(&base, phone, "hi").await;
    post_sms(&base, phone, "2").await; // Kiswahili on SMS

    // USSD session for the same phone starts from scratch, in English.
    let open = post_ussd(&base, phone, "").await;
    assert!(open.contains("Choose your language"));
}

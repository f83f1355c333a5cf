//! tests/api/analyze.rs
//! Exercises POST /api against a mock Gemini backend.

#[path = "../mod.rs"]
mod common;

use reqwest::{multipart, StatusCode};
use serde_json::Value;

use super::support;

#[tokio::test]
async fn answers_questions_with_extracted_json() {
    support::setup_llm_env();
    let base_url: String = common::spawn_app();

    let form: multipart::Form = multipart::Form::new()
        .part(
            "questions.txt",
            multipart::Part::text("What is the answer?").file_name("questions.txt"),
        )
        .part(
            "data.csv",
            multipart::Part::text("a,b\n1,2").file_name("data.csv"),
        );

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/api", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: String = resp.text().await.unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();

    // The JSON embedded in the model's prose reply becomes the payload.
    assert_eq!(json["status"], "OK");
    assert_eq!(json["code"], 200);
    assert_eq!(json["data"]["answer"], 42);
    assert_eq!(json["data"]["confidence"], "high");
}

#[tokio::test]
async fn returns_400_when_questions_file_missing() {
    support::setup_llm_env();
    let base_url: String = common::spawn_app();

    // Only a CSV, no questions.txt field.
    let form: multipart::Form = multipart::Form::new().part(
        "data.csv",
        multipart::Part::text("a,b\n1,2").file_name("data.csv"),
    );

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/api", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: String = resp.text().await.unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(json["status"], "BAD_REQUEST");
    assert_eq!(json["code"], 400);
    assert_eq!(json["data"]["error"], "missing_questions_file");
}

#[tokio::test]
async fn returns_400_for_non_utf8_csv() {
    support::setup_llm_env();
    let base_url: String = common::spawn_app();

    // Valid questions.txt, but data.csv carries invalid UTF-8 bytes.
    let form: multipart::Form = multipart::Form::new()
        .part(
            "questions.txt",
            multipart::Part::text("What is the answer?").file_name("questions.txt"),
        )
        .part(
            "data.csv",
            multipart::Part::bytes(vec![0xff, 0xfe, 0xfd]).file_name("data.csv"),
        );

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/api", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: String = resp.text().await.unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"]["error"], "invalid_csv_file");
}

#[tokio::test]
async fn returns_400_for_non_utf8_questions_file() {
    support::setup_llm_env();
    let base_url: String = common::spawn_app();

    // Invalid UTF-8 bytes in questions.txt.
    let form: multipart::Form = multipart::Form::new().part(
        "questions.txt",
        multipart::Part::bytes(vec![0xff, 0xfe, 0xfd]).file_name("questions.txt"),
    );

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/api", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: String = resp.text().await.unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"]["error"], "invalid_questions_file");
}

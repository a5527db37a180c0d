use std::time::Duration;

use chrono::NaiveDate;
use mockito::Matcher;
use salesbot_api_client::{into_app_error, ApiClient, Auth};
use salesbot_core::models::{UpdateForm, UploadForm};
use salesbot_core::source::fetch_and_present;
use salesbot_core::{AppError, DocumentAction, FixedClock, ListOrder, Validity};

const PDFS: &str = r#"[
    {
        "shop_name": "Lidl",
        "filename": "lidl_kw2.pdf",
        "s3_url": "https://salestelegrambot.s3.amazonaws.com/pdfs/lidl_kw2.pdf",
        "valid_from": "2024-01-08",
        "valid_to": "2024-01-14",
        "upload_date": "2024-01-05 09:12:44",
        "page_split": false,
        "used": false,
        "valid": false
    },
    {
        "shop_name": "Penny",
        "filename": "penny_kw1.pdf",
        "valid_from": "2024-01-01",
        "valid_to": "2024-01-07",
        "upload_date": "2023-12-29 17:40:02",
        "page_split": false,
        "used": true,
        "valid": true
    },
    {
        "shop_name": "Billa",
        "filename": "billa_kw3.pdf",
        "valid_from": "2024-01-15",
        "valid_to": "2024-01-21",
        "upload_date": "2024-01-10 11:00:00",
        "page_split": false,
        "used": false,
        "valid": false
    }
]"#;

fn client_for(server: &mockito::Server, auth: Option<Auth>) -> ApiClient {
    ApiClient::new(server.url(), auth, Duration::from_secs(5)).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_list_documents() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/pdfs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PDFS)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let documents = client.list_documents().await.unwrap();

    mock.assert_async().await;
    assert_eq!(documents.len(), 3);
    assert_eq!(documents[0].filename, "lidl_kw2.pdf");
    assert!(documents[1].used);
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/pdfs")
        .match_header("x-api-key", "secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server, Some(Auth::XApiKey("secret".to_string())));
    assert!(client.list_documents().await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_shops_sorted_by_name() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/shops")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"name": "Zeman"}, {"name": "Albert Supermarket"}, {"name": "Kaufland"}]"#)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let shops = client.list_shops().await.unwrap();
    let names: Vec<&str> = shops.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Albert Supermarket", "Kaufland", "Zeman"]);
}

#[tokio::test]
async fn test_present_from_backend_with_fixed_clock() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/pdfs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PDFS)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let clock = FixedClock(date(2024, 1, 12));
    let rows = fetch_and_present(&client, &clock, ListOrder::Descending)
        .await
        .unwrap();

    let names: Vec<&str> = rows.iter().map(|r| r.document.filename.as_str()).collect();
    assert_eq!(names, vec!["billa_kw3.pdf", "lidl_kw2.pdf", "penny_kw1.pdf"]);

    assert_eq!(rows[0].validity, Validity::NotYetValid);
    assert!(rows[0].trigger_enabled);

    assert_eq!(rows[1].validity, Validity::Valid);
    assert!(rows[1].near_expiry);
    assert!(rows[1].trigger_enabled);

    assert_eq!(rows[2].validity, Validity::Expired);
    assert!(!rows[2].trigger_enabled);
    assert_eq!(rows[2].trigger_label, "Already Processed");
}

#[tokio::test]
async fn test_fetch_error_keeps_backend_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/pdfs")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "DynamoDB unavailable"}"#)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let clock = FixedClock(date(2024, 1, 12));
    let err = fetch_and_present(&client, &clock, ListOrder::Ascending)
        .await
        .unwrap_err();

    match err {
        AppError::Backend { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "DynamoDB unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_upload_from_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="shop_name""#.to_string()),
            Matcher::Regex("Globus".to_string()),
            Matcher::Regex(r#"name="file_url""#.to_string()),
            Matcher::Regex("https://example.com/globus.pdf".to_string()),
            Matcher::Regex("2024-01-14".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"message": "File uploaded successfully", "filename": "globus.pdf", "s3_url": "https://salestelegrambot.s3.amazonaws.com/pdfs/globus.pdf", "valid": true}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server, None);
    let form = UploadForm {
        shop_name: "Globus".to_string(),
        valid_from: "2024-01-08".to_string(),
        valid_to: "2024-01-14".to_string(),
        file: None,
        file_url: Some("https://example.com/globus.pdf".to_string()),
    };
    let response = client.upload_document(&form).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.filename, "globus.pdf");
    assert!(response.valid);
}

#[tokio::test]
async fn test_upload_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ratio_kw2.pdf");
    std::fs::write(&path, b"%PDF-1.4 test").unwrap();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"filename="ratio_kw2.pdf""#.to_string()),
            Matcher::Regex("%PDF-1.4 test".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "File uploaded successfully", "filename": "ratio_kw2.pdf", "valid": false}"#)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let form = UploadForm {
        shop_name: "Ratio".to_string(),
        valid_from: "2024-01-08".to_string(),
        valid_to: "2024-01-14".to_string(),
        file: Some(path),
        file_url: None,
    };
    client.upload_document(&form).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_with_file_and_url_sends_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tesco_kw2.pdf");
    std::fs::write(&path, b"%PDF-1.4 tesco").unwrap();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"filename="tesco_kw2.pdf""#.to_string()),
            Matcher::Regex("%PDF-1.4 tesco".to_string()),
            Matcher::Regex(r#"name="shop_name"\r\n\r\nTesco\r\n"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "File uploaded successfully", "filename": "tesco_kw2.pdf", "valid": true}"#)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let form = UploadForm {
        shop_name: "  Tesco ".to_string(),
        valid_from: "2024-01-08".to_string(),
        valid_to: "2024-01-14".to_string(),
        file: Some(path),
        file_url: Some("https://example.com/tesco.pdf".to_string()),
    };
    let response = client.upload_document(&form).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.filename, "tesco_kw2.pdf");
}

#[tokio::test]
async fn test_invalid_upload_is_not_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let form = UploadForm {
        shop_name: "Ratio".to_string(),
        valid_from: "2024-01-14".to_string(),
        valid_to: "2024-01-08".to_string(),
        file: None,
        file_url: Some("https://example.com/ratio.pdf".to_string()),
    };
    let err = into_app_error(client.upload_document(&form).await.unwrap_err());

    assert!(matches!(err, AppError::InvalidInput(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_document() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/update/lidl_kw2.pdf")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("Lidl Shop".to_string()),
            Matcher::Regex("2024-01-09".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "File lidl_kw2.pdf updated successfully", "valid": true}"#)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let action = DocumentAction::update(UpdateForm {
        filename: "lidl_kw2.pdf".to_string(),
        shop_name: "Lidl Shop".to_string(),
        valid_from: "2024-01-09".to_string(),
        valid_to: "2024-01-15".to_string(),
        file: None,
    })
    .unwrap();
    let message = client.execute(&action).await.unwrap();

    mock.assert_async().await;
    assert_eq!(message, "File lidl_kw2.pdf updated successfully");
}

#[tokio::test]
async fn test_delete_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/delete/missing.pdf")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "File not found"}"#)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let err = into_app_error(client.delete_document("missing.pdf").await.unwrap_err());
    assert!(matches!(err, AppError::NotFound(ref m) if m == "File not found"));
}

#[tokio::test]
async fn test_guarded_trigger() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/pdfs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PDFS)
        .create_async()
        .await;
    let trigger = server
        .mock("POST", "/trigger_pipeline/lidl_kw2.pdf")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Pipeline triggered for lidl_kw2.pdf"}"#)
        .expect(1)
        .create_async()
        .await;
    let refused = server
        .mock("POST", "/trigger_pipeline/penny_kw1.pdf")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let clock = FixedClock(date(2024, 1, 12));
    let rows = fetch_and_present(&client, &clock, ListOrder::Descending)
        .await
        .unwrap();

    let action = DocumentAction::trigger_in(&rows, "lidl_kw2.pdf").unwrap();
    let message = client.execute(&action).await.unwrap();
    assert_eq!(message, "Pipeline triggered for lidl_kw2.pdf");

    assert!(matches!(
        DocumentAction::trigger_in(&rows, "penny_kw1.pdf"),
        Err(AppError::TriggerDisabled { .. })
    ));

    trigger.assert_async().await;
    refused.assert_async().await;
}

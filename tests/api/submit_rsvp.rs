//! tests/api/submit_rsvp.rs
use crate::helpers::{spawn_app, spawn_app_with};
use chrono::DateTime;
use rsvp::domain::SheetLayout;
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn rsvp_appends_one_row_for_a_valid_submission() {
    // Arrange
    let app = spawn_app().await;
    app.given_sheet_with_rows(3).await;
    app.given_appends_succeed().await;

    // Act
    let body = app
        .post_rsvp_json(&json!({
            "name": "Ola Nordmann",
            "email": "ola@transcom.com",
            "phone": "99999999",
            "hasAllergies": true,
            "allergyComment": "nøtter",
            "isELogIT": true,
            "isNegotia": false
        }))
        .await;

    // Assert
    assert_eq!(
        body,
        json!({ "status": "success", "message": "Data saved successfully" })
    );
    let rows = app.appended_rows().await;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(
        row[..7],
        ["Ola Nordmann", "ola@transcom.com", "99999999", "Ja", "nøtter", "Ja", "Nei"]
    );
    assert!(DateTime::parse_from_rfc3339(&row[7]).is_ok());
}

#[tokio::test]
async fn rsvp_writes_the_header_before_the_first_row() {
    let app = spawn_app().await;
    app.given_sheet_with_rows(0).await;
    app.given_appends_succeed().await;

    app.post_rsvp_json(&json!({
        "name": "Kari Nordmann",
        "email": "kari@transcom.com",
        "phone": "88888888"
    }))
    .await;

    let calls = app.append_calls().await;
    assert_eq!(calls.len(), 1, "Header and row must be written in one append.");
    let rows = &calls[0];
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        [
            "Navn",
            "E-post",
            "Telefon",
            "Har allergier",
            "Allergi kommentarer",
            "ELogIT",
            "Negotia",
            "Dato"
        ]
    );
    assert_eq!(rows[1][0], "Kari Nordmann");
    assert_eq!(rows[1][3], "Nei");
}

#[tokio::test]
async fn rsvp_creates_the_sheet_on_first_use() {
    let app = spawn_app().await;
    app.given_missing_sheet().await;
    Mock::given(path(app.batch_update_path.as_str()))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.sheets_server)
        .await;
    app.given_appends_succeed().await;

    let body = app
        .post_rsvp_json(&json!({
            "name": "Kari Nordmann",
            "email": "kari@transcom.com",
            "phone": "88888888"
        }))
        .await;

    assert_eq!(body["status"], "success");
    let rows = app.appended_rows().await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "Navn");
}

#[tokio::test]
async fn rsvp_accepts_the_plural_allergy_comment_key() {
    let app = spawn_app().await;
    app.given_sheet_with_rows(1).await;
    app.given_appends_succeed().await;

    app.post_rsvp_json(&json!({
        "name": "Ola",
        "email": "ola@transcom.com",
        "phone": "99999999",
        "hasAllergies": true,
        "allergyComments": "gluten"
    }))
    .await;

    let rows = app.appended_rows().await;
    assert_eq!(rows[0][4], "gluten");
}

#[tokio::test]
async fn rsvp_returns_an_error_for_missing_required_fields() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.sheets_server)
        .await;

    let test_cases = vec![
        (json!({ "name": "", "email": "x@x.com", "phone": "123" }), "empty name"),
        (json!({ "name": "Ola", "phone": "123" }), "missing the email"),
        (json!({ "name": "Ola", "email": "x@x.com" }), "missing the phone"),
        (json!({ "name": "Ola", "email": "x@x.com", "phone": "   " }), "blank phone"),
        (json!({}), "missing all of them"),
    ];

    for (invalid_body, description) in test_cases {
        // Act
        let response = app.post_rsvp(invalid_body.to_string()).await;

        // Assert
        assert_eq!(
            200,
            response.status().as_u16(),
            "The API did not answer 200 when the payload was {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({ "status": "error", "message": "Missing required fields." }),
            "The API did not report missing fields when the payload was {}.",
            description
        );
    }
}

#[tokio::test]
async fn rsvp_returns_an_error_for_malformed_bodies() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.sheets_server)
        .await;

    let test_cases = vec![
        ("", "an empty body"),
        ("name=Ola&email=ola%40transcom.com", "a form-encoded body"),
        ("{\"name\": \"Ola\"", "truncated JSON"),
        ("{\"name\": \"Ola\", \"hasAllergies\": \"kanskje\"}", "a non-boolean flag"),
    ];

    for (invalid_body, description) in test_cases {
        let response = app.post_rsvp(invalid_body.into()).await;

        assert_eq!(200, response.status().as_u16());
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body["status"], "error",
            "The API did not fail when the payload was {}.",
            description
        );
    }
}

#[tokio::test]
async fn rsvp_reports_store_failures_in_the_message() {
    let app = spawn_app().await;
    app.given_sheet_with_rows(5).await;
    Mock::given(path(app.append_path.as_str()))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.sheets_server)
        .await;

    let body = app
        .post_rsvp_json(&json!({
            "name": "Ola",
            "email": "ola@transcom.com",
            "phone": "99999999"
        }))
        .await;

    assert_eq!(body["status"], "error");
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to save data"));
    assert!(!message.contains("rsvp-spreadsheet"), "{}", message);
    assert!(!message.contains(&app.sheets_server.uri()), "{}", message);
}

#[tokio::test]
async fn rsvp_answers_json_for_an_oversized_body() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.sheets_server)
        .await;

    let response = app
        .post_rsvp(
            json!({
                "name": "Ola",
                "email": "ola@transcom.com",
                "phone": "99999999",
                "hasAllergies": true,
                "allergyComment": "x".repeat(300_000)
            })
            .to_string(),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(app.appended_rows().await.is_empty());
}

#[tokio::test]
async fn rsvp_writes_the_team_leader_column_when_configured() {
    let app = spawn_app_with(|c| c.sheets.layout = SheetLayout::WithTeamLeader).await;
    app.given_sheet_with_rows(0).await;
    app.given_appends_succeed().await;

    let body = app
        .post_rsvp_json(&json!({
            "name": "Kari Nordmann",
            "email": "kari@transcom.com",
            "phone": "88888888",
            "isNegotia": true,
            "teamleder": "Per Hansen"
        }))
        .await;

    assert_eq!(body["status"], "success");
    let rows = app.appended_rows().await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][7], "Teamleder");
    assert_eq!(rows[0][8], "Dato");
    assert_eq!(
        rows[1][..8],
        ["Kari Nordmann", "kari@transcom.com", "88888888", "Nei", "", "Nei", "Ja", "Per Hansen"]
    );
    assert!(DateTime::parse_from_rfc3339(&rows[1][8]).is_ok());
}

#[tokio::test]
async fn repeated_submissions_each_append_a_row() {
    let app = spawn_app().await;
    app.given_sheet_with_rows(1).await;
    app.given_appends_succeed().await;
    let rsvp = json!({ "name": "Ola", "email": "ola@transcom.com", "phone": "99999999" });

    app.post_rsvp_json(&rsvp).await;
    app.post_rsvp_json(&rsvp).await;

    assert_eq!(app.appended_rows().await.len(), 2);
}

//! End-to-end message stream contract for the random photo tool.

use lenz_core::message::ToolMessage;
use lenz_core::params::Credentials;
use lenz_tools::{RandomTool, Tool};
use serde_json::{json, Value};
use unsplash_provider::{UnsplashClient, UnsplashConfig};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> UnsplashClient {
    let config = UnsplashConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    UnsplashClient::new(&config).unwrap()
}

fn photo_json(server: &MockServer, id: &str) -> Value {
    json!({
        "id": id,
        "alt_description": "Misty forest",
        "width": 2400,
        "height": 1600,
        "urls": { "regular": format!("{}/img/{id}.jpg", server.uri()) },
        "user": { "name": "Sam Lee", "username": "samlee" },
        "links": { "html": format!("https://unsplash.com/photos/{id}") }
    })
}

async fn mount_image(server: &MockServer, id: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/img/{id}.jpg")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(bytes.to_vec()),
        )
        .mount(server)
        .await;
}

fn kinds(messages: &[ToolMessage]) -> Vec<&'static str> {
    messages
        .iter()
        .map(|message| match message {
            ToolMessage::Text { .. } => "text",
            ToolMessage::Json { .. } => "json",
            ToolMessage::Blob { .. } => "blob",
            ToolMessage::Variable { .. } => "variable",
        })
        .collect()
}

fn json_payload(message: &ToolMessage) -> &Value {
    match message {
        ToolMessage::Json { payload } => payload,
        other => panic!("expected json message, got {other:?}"),
    }
}

fn variable<'a>(message: &'a ToolMessage, expected_name: &str) -> &'a Value {
    match message {
        ToolMessage::Variable { name, value } => {
            assert_eq!(name, expected_name);
            value
        }
        other => panic!("expected variable message, got {other:?}"),
    }
}

#[tokio::test]
async fn single_objects_coerce_into_one_photo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/random"))
        .and(header("Authorization", "Client-ID test-key"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photo_json(&server, "xyz")))
        .expect(1)
        .mount(&server)
        .await;
    mount_image(&server, "xyz", &[0xFF, 0xD8]).await;

    let tool = RandomTool::new(client_for(&server));
    let mut messages: Vec<ToolMessage> = Vec::new();
    tool.invoke(&json!({}), &Credentials::new("test-key"), &mut messages)
        .await;

    assert_eq!(
        kinds(&messages),
        ["text", "blob", "json", "variable", "variable"]
    );
    assert_eq!(
        messages[0],
        ToolMessage::text("Retrieved 1 random photos (no filters applied)")
    );

    match &messages[1] {
        ToolMessage::Blob { data, meta } => {
            assert_eq!(data, &vec![0xFF, 0xD8]);
            assert_eq!(meta.filename, "unsplash_random_xyz.jpg");
            // No description on the photo, so the alt text stands in.
            assert_eq!(meta.description, "Misty forest");
        }
        other => panic!("expected blob message, got {other:?}"),
    }

    let payload = json_payload(&messages[2]);
    assert_eq!(payload["photos"].as_array().unwrap().len(), 1);
    assert_eq!(payload["photos"][0]["id"], "xyz");
    assert!(payload["error"].is_null());
    assert_eq!(payload["parameters"]["count"], 1);
    assert_eq!(payload["photo_details"].as_array().unwrap().len(), 1);
    assert_eq!(payload["photo_details"][0]["dimensions"], "2400x1600");

    let photos = variable(&messages[3], "random_photos");
    assert_eq!(photos.as_array().unwrap().len(), 1);
    let details = variable(&messages[4], "photo_details");
    assert_eq!(details[0]["author"], "Sam Lee");
}

#[tokio::test]
async fn filters_appear_in_the_summary_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/random"))
        .and(query_param("count", "2"))
        .and(query_param("query", "forest"))
        .and(query_param("orientation", "landscape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            photo_json(&server, "one"),
            photo_json(&server, "two"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_image(&server, "one", &[0x01]).await;
    mount_image(&server, "two", &[0x02]).await;

    let tool = RandomTool::new(client_for(&server));
    let mut messages: Vec<ToolMessage> = Vec::new();
    tool.invoke(
        &json!({ "count": 2, "query": "forest", "orientation": "landscape" }),
        &Credentials::new("test-key"),
        &mut messages,
    )
    .await;

    assert_eq!(
        kinds(&messages),
        ["text", "blob", "blob", "json", "variable", "variable"]
    );
    assert_eq!(
        messages[0],
        ToolMessage::text("Retrieved 2 random photos (query='forest', orientation='landscape')")
    );

    let payload = json_payload(&messages[3]);
    assert_eq!(payload["parameters"]["query"], "forest");
    assert_eq!(payload["parameters"]["orientation"], "landscape");
    assert_eq!(
        variable(&messages[4], "random_photos")
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn empty_responses_produce_an_empty_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let tool = RandomTool::new(client_for(&server));
    let mut messages: Vec<ToolMessage> = Vec::new();
    tool.invoke(&json!({}), &Credentials::new("test-key"), &mut messages)
        .await;

    assert_eq!(kinds(&messages), ["text", "json", "variable"]);
    assert_eq!(
        messages[0],
        ToolMessage::text("Retrieved 0 random photos (no filters applied)")
    );

    let payload = json_payload(&messages[1]);
    assert_eq!(payload["photos"], json!([]));
    assert!(payload["error"].is_null());
    assert_eq!(payload["parameters"]["count"], 1);

    assert_eq!(variable(&messages[2], "random_photos"), &json!([]));
}

#[tokio::test]
async fn invalid_count_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/random"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tool = RandomTool::new(client_for(&server));
    let mut messages: Vec<ToolMessage> = Vec::new();
    tool.invoke(
        &json!({ "count": 31 }),
        &Credentials::new("test-key"),
        &mut messages,
    )
    .await;

    assert_eq!(kinds(&messages), ["text", "json", "variable"]);
    assert_eq!(
        messages[0],
        ToolMessage::text("Parameter error: Photo count must be an integer between 1 and 30")
    );

    let payload = json_payload(&messages[1]);
    assert_eq!(
        payload["error"],
        "Parameter error: Photo count must be an integer between 1 and 30"
    );
    assert!(payload["parameters"].is_null());
    assert_eq!(variable(&messages[2], "random_photos"), &json!([]));
}

#[tokio::test]
async fn upstream_failures_report_an_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/random"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let tool = RandomTool::new(client_for(&server));
    let mut messages: Vec<ToolMessage> = Vec::new();
    tool.invoke(&json!({}), &Credentials::new("test-key"), &mut messages)
        .await;

    assert_eq!(kinds(&messages), ["text", "json", "variable"]);
    assert_eq!(
        messages[0],
        ToolMessage::text(
            "Unsplash API request error: API request failed, status code: 500, error: Internal Server Error"
        )
    );

    let payload = json_payload(&messages[1]);
    assert_eq!(payload["parameters"]["count"], 1);
    assert_eq!(variable(&messages[2], "random_photos"), &json!([]));
}

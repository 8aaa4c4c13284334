use brandforge::chat::{
    ConversationClient, LOGO_FAILED_MESSAGE, LOGO_REQUEST_FAILED_MESSAGE, LOGO_SUCCESS_MESSAGE,
    NOTHING_TO_SAVE_MESSAGE,
};
use brandforge::service::BrandService;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ConversationClient {
    ConversationClient::new(BrandService::new(server.uri()))
}

#[test_log::test(tokio::test)]
async fn success_with_path_shows_the_preview() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_logo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logo_path": "static/logos/acme.png",
            "prompt_used": "a minimalist logo for Acme",
        })))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    assert!(!client.preview().is_visible());
    client.generate_logo().await;

    assert!(client.preview().is_visible());
    assert_eq!(client.preview().path(), Some("static/logos/acme.png"));

    let texts: Vec<&str> = client.log().messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            LOGO_SUCCESS_MESSAGE,
            "Logo Generation Prompt: a minimalist logo for Acme",
        ]
    );
}

#[tokio::test]
async fn success_without_prompt_used_omits_the_prompt_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_logo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logo_path": "static/logos/acme.png",
        })))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.generate_logo().await;

    assert_eq!(client.log().len(), 1);
    assert_eq!(client.log().messages()[0].text, LOGO_SUCCESS_MESSAGE);
}

#[tokio::test]
async fn missing_path_is_a_failure_and_error_detail_stays_out_of_the_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_logo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "CUDA out of memory",
            "prompt_used": "a minimalist logo",
        })))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.generate_logo().await;

    assert!(!client.preview().is_visible());
    let messages = client.log().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, LOGO_FAILED_MESSAGE);
    assert!(!messages.iter().any(|m| m.text.contains("CUDA")));
}

#[tokio::test]
async fn transport_failure_renders_the_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_logo"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.generate_logo().await;

    assert!(!client.preview().is_visible());
    assert_eq!(client.log().messages()[0].text, LOGO_REQUEST_FAILED_MESSAGE);
}

#[tokio::test]
async fn save_with_hidden_preview_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut client = client_for(&server);
    client.save_logo(dir.path()).await;

    assert_eq!(client.log().messages()[0].text, NOTHING_TO_SAVE_MESSAGE);
    assert!(!dir.path().join("brand_logo.png").exists());
}

#[tokio::test]
async fn save_downloads_the_previewed_image_as_brand_logo_png() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_logo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logo_path": "static/logos/acme.png",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/static/logos/acme.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut client = client_for(&server);
    client.generate_logo().await;
    client.save_logo(dir.path()).await;

    let saved = dir.path().join("brand_logo.png");
    assert_eq!(std::fs::read(&saved).unwrap(), b"png-bytes");

    let last = client.log().messages().last().unwrap();
    assert!(last.text.contains("brand_logo.png"));

    server.verify().await;
}

//! End-to-end submissions against a local tiny_http backend
#![cfg(feature = "http")]

use creativefuse::{BoostRequest, ClientConfig, Error, HttpBackend, IdeaForm, Studio, Style};
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Response, Server};

/// A recorded request: (method, url, body)
type Seen = Arc<Mutex<Vec<(String, String, String)>>>;

/// Serve `count` requests with a fixed status and JSON body, recording what
/// arrived. Returns the base URL.
fn start_backend(status: u16, body: &'static str, count: usize) -> (String, Seen) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();

    std::thread::spawn(move || {
        for _ in 0..count {
            let Ok(mut request) = server.recv() else { return };
            let mut content = String::new();
            let _ = request.as_reader().read_to_string(&mut content);
            sink.lock().unwrap().push((
                request.method().to_string(),
                request.url().to_string(),
                content,
            ));
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header("Content-Type: application/json".parse::<Header>().unwrap());
            let _ = request.respond(response);
        }
    });

    (format!("http://{}", addr), seen)
}

fn form_for(base_url: &str) -> IdeaForm<HttpBackend> {
    let backend = HttpBackend::new(ClientConfig {
        base_url: base_url.to_string(),
        timeout_ms: 5000,
        ..Default::default()
    })
    .expect("Failed to create backend");
    IdeaForm::new(backend)
}

#[test]
fn generate_success_shows_idea() {
    let (base, seen) = start_backend(200, r#"{"idea":"A telehealth triage bot."}"#, 1);
    let mut form = form_for(&base);
    form.set_domain("healthcare");
    form.set_keywords("AI");
    form.set_style(Style::Creative);

    let text = form.submit_generate().expect("generate failed");
    assert_eq!(text, "A telehealth triage bot.");

    let view = form.view();
    assert_eq!(view.error, None);
    assert!(!view.busy);
    assert_eq!(view.html, "<p>A telehealth triage bot.</p>");

    let seen = seen.lock().unwrap();
    let (method, url, body) = &seen[0];
    assert_eq!(method, "POST");
    assert_eq!(url, "/generate");
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "domain": "healthcare", "keywords": "AI", "style": "creative" })
    );
}

#[test]
fn server_error_detail_is_shown_verbatim() {
    let (base, _) = start_backend(500, r#"{"detail":"model unavailable"}"#, 1);
    let mut form = form_for(&base);
    form.set_domain("healthcare");

    let err = form.submit_generate().unwrap_err();
    assert_eq!(
        err,
        Error::Server {
            status: 500,
            detail: "model unavailable".into()
        }
    );

    let view = form.view();
    assert_eq!(view.error.as_deref(), Some("model unavailable"));
    assert_eq!(form.result(), None);
    assert!(view.html.is_empty());
    assert!(!view.busy);
}

#[test]
fn server_error_without_detail_uses_fallback() {
    let (base, _) = start_backend(502, "{}", 1);
    let mut form = form_for(&base);
    form.set_idea("solar kiosks");

    form.submit_boost().unwrap_err();
    assert_eq!(form.error(), Some("Failed to enhance idea"));
}

#[test]
fn boost_result_is_rendered() {
    let (base, seen) = start_backend(
        200,
        r###"{"boosted_idea":"## Plan\n- **test** it\n- ship it"}"###,
        1,
    );
    let mut form = form_for(&base);
    form.set_idea("solar kiosks");
    form.submit_boost().expect("boost failed");

    assert_eq!(
        form.view().html,
        "<h2>Plan</h2><ul><li><strong>test</strong> it</li><li>ship it</li></ul>"
    );
    assert_eq!(seen.lock().unwrap()[0].1, "/boost");
}

#[test]
fn refused_connection_is_a_network_error() {
    // Bind then drop to find a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut form = form_for(&format!("http://127.0.0.1:{}", port));
    form.set_idea("anything");

    let err = form.submit_boost().unwrap_err();
    assert!(matches!(err, Error::Network(_)), "unexpected error: {:?}", err);
    assert!(form.error().unwrap().starts_with("Network error: "));
    assert!(!form.is_busy());
}

#[test]
fn ping_reads_welcome_message() {
    let (base, seen) = start_backend(200, r#"{"message":"Welcome to CreativeFuse Backend API"}"#, 1);
    let backend = HttpBackend::new(ClientConfig {
        base_url: base,
        ..Default::default()
    })
    .unwrap();

    use creativefuse::Backend;
    assert_eq!(backend.ping().unwrap(), "Welcome to CreativeFuse Backend API");
    assert_eq!(seen.lock().unwrap()[0].0, "GET");
}

#[tokio::test]
async fn studio_boosts_over_http() {
    let (base, _) = start_backend(200, r#"{"boosted_idea":"*ready*"}"#, 1);
    let studio = Studio::new(Some(ClientConfig {
        base_url: base,
        ..Default::default()
    }))
    .await
    .expect("Failed to start studio");

    let text = studio.boost(BoostRequest::new("idea"), None).await.unwrap();
    assert_eq!(creativefuse::render(text.as_str()), "<p><em>ready</em></p>");
    studio.close().await.unwrap();
}

use std::time::Duration;

use playground_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\"><rect width=\"1\"/></svg>";

#[tokio::test]
async fn fetcher_returns_svg_text() {
    playground_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logo.svg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SVG, "image/svg+xml"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/logo.svg", server.uri());

    let output = fetcher.fetch(&url).await.expect("fetch ok");
    assert_eq!(output.text, SVG);
    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, url);
    assert_eq!(output.metadata.redirect_count, 0);
    assert_eq!(output.metadata.byte_len, SVG.len() as u64);
    assert_eq!(output.metadata.content_type.as_deref(), Some("image/svg+xml"));
}

#[tokio::test]
async fn fetcher_decodes_latin1_charset() {
    let server = MockServer::start().await;
    let mut body = b"<svg><text>caf".to_vec();
    body.push(0xE9);
    body.extend_from_slice(b"</text></svg>");
    Mock::given(method("GET"))
        .and(path("/latin1.svg"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "image/svg+xml; charset=iso-8859-1"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let output = fetcher
        .fetch(&format!("{}/latin1.svg", server.uri()))
        .await
        .expect("fetch ok");
    assert_eq!(output.text, "<svg><text>caf\u{e9}</text></svg>");
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.svg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = fetcher
        .fetch(&format!("{}/missing.svg", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_accepts_any_content_type_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/logo.svg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SVG, "application/octet-stream"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let output = fetcher
        .fetch(&format!("{}/raw/logo.svg", server.uri()))
        .await
        .expect("fetch ok");
    assert_eq!(output.text, SVG);
    assert_eq!(
        output.metadata.content_type.as_deref(),
        Some("application/octet-stream")
    );
}

#[tokio::test]
async fn fetcher_rejects_types_outside_configured_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings {
        allowed_content_types: vec!["image/svg+xml".to_string(), "text/xml".to_string()],
        ..FetchSettings::default()
    });
    let err = fetcher
        .fetch(&format!("{}/page", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large.svg"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/svg+xml")
                .insert_header("Content-Length", "11")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher
        .fetch(&format!("{}/large.svg", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.svg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(SVG, "image/svg+xml"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher
        .fetch(&format!("{}/slow.svg", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_non_http_urls() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());

    let err = fetcher.fetch("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);

    let err = fetcher.fetch("file:///etc/passwd").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

//! Integration tests for redirect chain walking against mock servers.

mod helpers;

use std::time::Duration;

use redirect_audit::{walk_url, Config, ErrorType, InfoType, ResultStatus};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use helpers::{test_config, test_context};

#[tokio::test]
async fn test_plain_ok_is_single_hop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("Server", "nginx"))
        .mount(&server)
        .await;

    let ctx = test_context(&test_config());
    let url = format!("{}/", server.uri());
    let result = walk_url(&url, &ctx).await;

    assert_eq!(result.url, url);
    assert_eq!(result.status, ResultStatus::Code(200));
    assert_eq!(result.comment, "OK");
    assert_eq!(result.server_name, "Nginx");
    assert_eq!(result.redirect_chain.len(), 1);
    assert_eq!(result.redirect_chain[0].url, url);
    assert_eq!(ctx.stats.succeeded(), 1);
    assert_eq!(ctx.stats.get_info_count(InfoType::RedirectChain), 0);
}

#[tokio::test]
async fn test_redirect_chain_is_recorded_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", "/middle")
                .insert_header("Server", "AkamaiGHost"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/middle"))
        .respond_with(ResponseTemplate::new(302).insert_header(
            "Location",
            format!("{}/end", server.uri()).as_str(),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/end"))
        .respond_with(ResponseTemplate::new(200).insert_header("Server", "Apache"))
        .mount(&server)
        .await;

    let ctx = test_context(&test_config());
    let result = walk_url(&format!("{}/start", server.uri()), &ctx).await;

    assert_eq!(result.comment, "Redirect Chain");
    assert_eq!(result.status, ResultStatus::Code(301));
    assert_eq!(result.server_name, "Akamai");

    let hops: Vec<(String, u16, String)> = result
        .redirect_chain
        .iter()
        .map(|hop| (hop.url.clone(), hop.status, hop.server_name.clone()))
        .collect();
    assert_eq!(
        hops,
        vec![
            (format!("{}/start", server.uri()), 301, "Akamai".to_string()),
            (format!("{}/middle", server.uri()), 302, "Unknown".to_string()),
            (format!("{}/end", server.uri()), 200, "Apache (AEM)".to_string()),
        ]
    );
    assert_eq!(ctx.stats.get_info_count(InfoType::RedirectChain), 1);
}

#[tokio::test]
async fn test_every_redirect_status_is_followed() {
    for code in [301u16, 302, 303, 307, 308] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/from"))
            .respond_with(ResponseTemplate::new(code).insert_header("Location", "/to"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/to"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let ctx = test_context(&test_config());
        let result = walk_url(&format!("{}/from", server.uri()), &ctx).await;
        assert_eq!(result.comment, "Redirect Chain", "status {code}");
        assert_eq!(result.redirect_chain.len(), 2, "status {code}");
    }
}

#[tokio::test]
async fn test_self_redirect_loop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&server)
        .await;

    let ctx = test_context(&test_config());
    let result = walk_url(&format!("{}/loop", server.uri()), &ctx).await;

    assert_eq!(result.comment, "URL redirects to itself in a loop");
    assert_eq!(result.status, ResultStatus::Code(302));
    assert_eq!(result.redirect_chain.len(), 1);
    assert_eq!(ctx.stats.get_error_count(ErrorType::SelfRedirectLoop), 1);
}

#[tokio::test]
async fn test_http_error_hop_recorded_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ctx = test_context(&test_config());
    let result = walk_url(&format!("{}/missing", server.uri()), &ctx).await;

    assert_eq!(result.comment, "HTTP Error: 404");
    assert_eq!(result.status, ResultStatus::Code(404));
    assert_eq!(result.redirect_chain.len(), 1);
    assert_eq!(result.redirect_chain[0].status, 404);
    assert_eq!(ctx.stats.get_error_count(ErrorType::HttpStatus), 1);
}

#[tokio::test]
async fn test_http_error_after_redirect_keeps_first_hop_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/broken"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let ctx = test_context(&test_config());
    let result = walk_url(&format!("{}/old", server.uri()), &ctx).await;

    assert_eq!(result.comment, "HTTP Error: 500");
    assert_eq!(result.status, ResultStatus::Code(301));
    let statuses: Vec<u16> = result.redirect_chain.iter().map(|hop| hop.status).collect();
    assert_eq!(statuses, vec![301, 500]);
}

#[tokio::test]
async fn test_redirect_without_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nowhere"))
        .respond_with(ResponseTemplate::new(301))
        .mount(&server)
        .await;

    let ctx = test_context(&test_config());
    let result = walk_url(&format!("{}/nowhere", server.uri()), &ctx).await;

    assert_eq!(result.comment, "Redirect missing location header");
    assert_eq!(result.status, ResultStatus::Code(301));
    assert_eq!(result.redirect_chain.len(), 1);
}

/// Redirects `/hop/N` to `/hop/N+1` until `last`, which answers 200.
fn hop_responder(last: Option<u32>) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync {
    move |request: &Request| {
        let n: u32 = request
            .url
            .path()
            .trim_start_matches("/hop/")
            .parse()
            .expect("numeric hop");
        match last {
            Some(last) if n >= last => ResponseTemplate::new(200),
            _ => ResponseTemplate::new(302)
                .insert_header("Location", format!("/hop/{}", n + 1).as_str()),
        }
    }
}

#[tokio::test]
async fn test_too_many_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/hop/\d+$"))
        .respond_with(hop_responder(None))
        .mount(&server)
        .await;

    let ctx = test_context(&test_config());
    let result = walk_url(&format!("{}/hop/1", server.uri()), &ctx).await;

    assert_eq!(result.comment, "Too many redirects");
    assert_eq!(result.redirect_chain.len(), 15);
    assert!(result.redirect_chain.iter().all(|hop| hop.status == 302));
    assert_eq!(
        result.redirect_chain.last().map(|hop| hop.url.clone()),
        Some(format!("{}/hop/15", server.uri()))
    );
    assert_eq!(ctx.stats.get_error_count(ErrorType::TooManyRedirects), 1);
}

#[tokio::test]
async fn test_success_on_fifteenth_hop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/hop/\d+$"))
        .respond_with(hop_responder(Some(15)))
        .mount(&server)
        .await;

    let ctx = test_context(&test_config());
    let result = walk_url(&format!("{}/hop/1", server.uri()), &ctx).await;

    assert_eq!(result.comment, "Redirect Chain");
    assert_eq!(result.redirect_chain.len(), 15);
    assert_eq!(result.redirect_chain.last().map(|hop| hop.status), Some(200));
}

#[tokio::test]
async fn test_timeout_reports_configured_seconds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = Config {
        timeout_seconds: 1,
        ..test_config()
    };
    let ctx = test_context(&config);
    let result = walk_url(&format!("{}/slow", server.uri()), &ctx).await;

    assert_eq!(result.comment, "Request timed out after 1s");
    assert_eq!(result.status, ResultStatus::Error);
    assert_eq!(result.server_name, "N/A");
    assert!(result.redirect_chain.is_empty());
    assert_eq!(ctx.stats.get_error_count(ErrorType::Timeout), 1);
}

#[tokio::test]
async fn test_timeout_after_redirect_keeps_chain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/slow"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = Config {
        timeout_seconds: 1,
        ..test_config()
    };
    let ctx = test_context(&config);
    let result = walk_url(&format!("{}/first", server.uri()), &ctx).await;

    assert_eq!(result.comment, "Request timed out after 1s");
    assert_eq!(result.status, ResultStatus::Code(301));
    assert_eq!(result.redirect_chain.len(), 1);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let ctx = test_context(&test_config());
    let result = walk_url(&format!("http://127.0.0.1:{port}/"), &ctx).await;

    assert_eq!(result.comment, "Request failed (Network/DNS error)");
    assert_eq!(result.status, ResultStatus::Error);
    assert_eq!(result.server_name, "N/A");
    assert_eq!(ctx.stats.get_error_count(ErrorType::Network), 1);
}

#[tokio::test]
async fn test_unparseable_and_overlong_urls_are_unexpected() {
    let ctx = test_context(&test_config());

    let result = walk_url("https://exa mple.com", &ctx).await;
    assert_eq!(result.comment, "An unexpected error occurred");
    assert_eq!(result.status, ResultStatus::Error);

    let long = format!("https://{}.com", "a".repeat(3000));
    let result = walk_url(&long, &ctx).await;
    assert_eq!(result.comment, "An unexpected error occurred");
    assert_eq!(result.url, long);

    assert_eq!(ctx.stats.get_error_count(ErrorType::Unexpected), 2);
}

#[tokio::test]
async fn test_browser_headers_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(wiremock::matchers::header("user-agent", "redirect_audit_test/1.0"))
        .and(wiremock::matchers::header("accept-language", "en-US,en;q=0.9"))
        .and(wiremock::matchers::header("sec-fetch-mode", "navigate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = test_context(&test_config());
    let result = walk_url(&format!("{}/", server.uri()), &ctx).await;
    assert_eq!(result.comment, "OK");
}

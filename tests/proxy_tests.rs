use reqwest::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use reqwest::StatusCode;
use seasideevents::proxy::{serve, ProxyState, NETLIFY_FUNCTION_PATH, PROXY_PATH};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:Kite Day\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

async fn start_proxy(upstream_url: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(serve(listener, ProxyState::new(upstream_url, 0)));

    format!("http://{}", address)
}

async fn upstream(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/basic.ics"))
        .respond_with(response)
        .mount(&server)
        .await;

    server
}

#[test_log::test(tokio::test)]
async fn should_relay_feed_verbatim_with_cors_headers() {
    let upstream = upstream(ResponseTemplate::new(200).set_body_string(FEED)).await;
    let proxy = start_proxy(format!("{}/basic.ics", upstream.uri())).await;

    for route in [PROXY_PATH, NETLIFY_FUNCTION_PATH] {
        let response = reqwest::get(format!("{}{}", proxy, route)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_HEADERS], "*");
        assert_eq!(response.text().await.unwrap(), FEED);
    }
}

#[test_log::test(tokio::test)]
async fn should_forward_upstream_failure_status() {
    let upstream = upstream(ResponseTemplate::new(404)).await;
    let proxy = start_proxy(format!("{}/basic.ics", upstream.uri())).await;

    let response = reqwest::get(format!("{}{}", proxy, PROXY_PATH)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "ICS fetch failed: Not Found");
}

#[test_log::test(tokio::test)]
async fn unreachable_upstream_should_be_a_server_error() {
    let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let upstream_url = format!("http://{}/basic.ics", closed.local_addr().unwrap());
    drop(closed);

    let proxy = start_proxy(upstream_url).await;

    let response = reqwest::get(format!("{}{}", proxy, PROXY_PATH)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response
        .text()
        .await
        .unwrap()
        .starts_with("Server error: "));
}

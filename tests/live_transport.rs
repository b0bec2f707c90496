use chrono::NaiveDate;
use fare_watcher::{
    FareWatcher, WatchError, WatcherConfig,
    requests::{HttpTransport, RequestClient},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const AGENTS_PAGE: &str = r#"<html><body>
<table class="make-html-table most-common-user-agents">
  <tr><td class="useragent">Mozilla/5.0 (Test 1)</td><td>12%</td></tr>
  <tr><td class="useragent">Mozilla/5.0 (Test 2)</td><td>9%</td></tr>
</table>
</body></html>"#;

fn fare_page(fares: &[(&str, &str)]) -> String {
    let cells: String = fares
        .iter()
        .map(|(date, price)| {
            format!("<div class=\"col-cell valid\"><a data-x-filter-code=\"{date}\">{price}</a></div>")
        })
        .collect();
    format!(
        "<html><body><div class=\"keel-grid row headerRow\"><div class=\"col-cell valid\">\
         <a data-x-filter-code=\"1999-01-01\">$1</a></div></div>\
         <div class=\"keel-grid row\">{cells}</div></body></html>"
    )
}

fn config_for(server: &MockServer) -> WatcherConfig {
    WatcherConfig {
        fare_url_template: format!("{}/flights/{{origin}}-{{destination}}/{{date}}-flexible", server.uri()),
        user_agents_url: format!("{}/most-common-user-agents/", server.uri()),
        max_pause_secs: 0,
        request_timeout_secs: Some(5),
        ..WatcherConfig::default()
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn request_client_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", "Agent/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::new(None).unwrap();
    let page = client
        .get(&format!("{}/page", server.uri()), Some("Agent/7"))
        .await
        .unwrap();
    assert_eq!(page.status, 200);
    assert_eq!(page.body, "hello");
}

#[tokio::test]
async fn blocked_error_carries_resolved_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/captcha"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/captcha"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = RequestClient::new(None).unwrap();
    let page = client
        .get(&format!("{}/start", server.uri()), None)
        .await
        .unwrap();
    match page.into_success_body() {
        Err(WatchError::Blocked { url }) => assert_eq!(url, format!("{}/captcha", server.uri())),
        other => panic!("expected Blocked, got {other:?}"),
    }
}

#[tokio::test]
async fn watcher_collects_prices_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/most-common-user-agents/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(AGENTS_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flights/BOS-SEA/2024-03-04-flexible"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(fare_page(&[("2024-03-03", "$ 219"), ("2024-03-04", "$1,204")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flights/BOS-SEA/2024-03-11-flexible"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fare_page(&[("2024-03-04", "$199")])))
        .expect(1)
        .mount(&server)
        .await;

    let mut watcher = FareWatcher::from_config(config_for(&server))
        .await
        .unwrap()
        .with_seed(3);
    assert_eq!(watcher.user_agents().len(), 2);

    let summary = watcher
        .start("bos", "sea", "2024-03-01", "2024-03-15")
        .await
        .unwrap();
    assert_eq!(summary.pages_fetched, 2);

    let prices = watcher.daily_prices();
    assert_eq!(prices.len(), 2);
    assert_eq!(prices.get(ymd(2024, 3, 3)), Some(219));
    assert_eq!(prices.get(ymd(2024, 3, 4)), Some(199));
    assert_eq!(prices.get(ymd(1999, 1, 1)), None);
}

#[tokio::test]
async fn blocked_user_agent_page_stops_setup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/most-common-user-agents/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = FareWatcher::from_config(config_for(&server)).await;
    assert!(matches!(result, Err(WatchError::Blocked { .. })));
}

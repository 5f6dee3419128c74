//! Integration tests for ito-iplist
//!
//! These tests run the whole pipeline, token to file, against a local HTTP responder.

use ito_iplist::{run_with_client, Config, ListError};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const SEARCH_PAGE: &str = include_str!("../src/tests/test_data/search_page.html");
const SEARCH_PAGE_NO_TOKEN: &str = include_str!("../src/tests/test_data/search_page_no_token.html");
const EXPORT_TABLE: &str = include_str!("../src/tests/test_data/export_table.html");
const EXPORT_TWO_TABLES: &str = include_str!("../src/tests/test_data/export_two_tables.html");

const EXPECTED: &str = "10.0.0.5\n10.0.0.6\n172.16.5.9\n192.168.1.1\n192.168.1.2\n\
                        fd00::1\nfd00::2\nfd00::3\n";

const SESSION_COOKIE: &str =
    "Set-Cookie: __RequestVerificationToken_L2=sess1; path=/; HttpOnly\r\n";

fn http_response(status: &str, extra_headers: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n{extra_headers}\r\n{body}",
        body.len()
    )
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

/// Read one request: headers plus `Content-Length` bytes of body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            if buf.len() >= end + 4 + content_length(&head) {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Answer one connection per canned response, in order. Yields the raw requests.
async fn serve(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
        requests
    });
    (format!("http://{addr}"), handle)
}

fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .no_proxy()
        .build()
        .unwrap()
}

fn test_config(base_url: &str, dir: &Path) -> Config {
    Config {
        output_path: dir.join("ips.txt"),
        ..Config::default()
    }
    .with_base_url(base_url)
}

#[tokio::test]
async fn test_full_run_writes_sorted_list() {
    let (base_url, server) = serve(vec![
        http_response("200 OK", SESSION_COOKIE, SEARCH_PAGE),
        http_response("200 OK", "", EXPORT_TABLE),
    ])
    .await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&base_url, dir.path());

    let summary = run_with_client(&test_client(), &config)
        .await
        .expect("run succeeds");

    assert_eq!(std::fs::read_to_string(&config.output_path).unwrap(), EXPECTED);
    assert_eq!(summary.v4, 5);
    assert_eq!(summary.v6, 3);
    assert_eq!(summary.report.invalid, 1);

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("GET /Page/IPListSearch "));
    assert!(requests[1].starts_with("POST /Page/GetAllIPListSearch "));
    assert!(requests[1].ends_with(
        "__RequestVerificationToken=CfDJ8Nq2-tok3n_Value-x9&ExportExcel=true&WebsiteURL=&IPSubnet="
    ));
    assert!(requests[1]
        .to_ascii_lowercase()
        .contains("cookie: __requestverificationtoken_l2=sess1"));
}

#[tokio::test]
async fn test_missing_token_stops_before_export() {
    let (base_url, _server) =
        serve(vec![http_response("200 OK", "", SEARCH_PAGE_NO_TOKEN)]).await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&base_url, dir.path());

    let err = run_with_client(&test_client(), &config).await.unwrap_err();

    assert!(matches!(err, ListError::MissingToken { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn test_search_page_error_status() {
    let (base_url, _server) =
        serve(vec![http_response("500 Internal Server Error", "", "oops")]).await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&base_url, dir.path());

    let err = run_with_client(&test_client(), &config).await.unwrap_err();

    assert!(matches!(err, ListError::HttpStatus { status: 500, .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn test_export_error_status_keeps_stale_file() {
    let (base_url, _server) = serve(vec![
        http_response("200 OK", SESSION_COOKIE, SEARCH_PAGE),
        http_response("403 Forbidden", "", ""),
    ])
    .await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&base_url, dir.path());
    std::fs::write(&config.output_path, "1.1.1.1\n").unwrap();

    let err = run_with_client(&test_client(), &config).await.unwrap_err();

    assert!(matches!(err, ListError::HttpStatus { status: 403, .. }));
    assert_eq!(
        std::fs::read_to_string(&config.output_path).unwrap(),
        "1.1.1.1\n"
    );
}

#[tokio::test]
async fn test_two_tables_is_shape_error() {
    let (base_url, _server) = serve(vec![
        http_response("200 OK", SESSION_COOKIE, SEARCH_PAGE),
        http_response("200 OK", "", EXPORT_TWO_TABLES),
    ])
    .await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&base_url, dir.path());

    let err = run_with_client(&test_client(), &config).await.unwrap_err();

    assert!(matches!(err, ListError::TableShape(_)));
    assert_eq!(err.exit_code(), 4);
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&format!("http://{addr}"), dir.path());

    let err = run_with_client(&test_client(), &config).await.unwrap_err();

    assert!(matches!(err, ListError::Network(_)));
    assert_eq!(err.exit_code(), 2);
}

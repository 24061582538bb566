use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SEARCH_BODY: &str = r#"{"photos":{"page":1,"pages":"1","perpage":50,"total":"1",
"photo":[{"id":"1","owner":"x","server":"65535","secret":"124a8612b0","title":"Moon"}]},"stat":"ok"}"#;

/// Answer one HTTP request on a local port; the handle yields the request line
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = std::thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).unwrap();

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{}/", addr), handle)
}

/// Command with an isolated config file and no ambient key or proxy
fn gallery_cmd(dir: &TempDir, config: &str) -> Command {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, config).unwrap();

    let mut cmd = Command::cargo_bin("playbox-gallery").unwrap();
    cmd.env("PLAYBOX_CONFIG", &path)
        .env_remove("PLAYBOX_FLICKR_API_KEY")
        .env_remove("PLAYBOX_LOG_LEVEL")
        .env_remove("PLAYBOX_LOG_FORMAT")
        .env("NO_PROXY", "127.0.0.1")
        .env("no_proxy", "127.0.0.1");
    for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
        cmd.env_remove(var);
    }
    cmd
}

fn config_for(base_url: &str) -> String {
    format!("[flickr]\napi_key = \"test-key\"\nbase_url = \"{}\"\n", base_url)
}

#[test]
fn test_help_flag() {
    let mut cmd = Command::cargo_bin("playbox-gallery").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search Flickr photos by tag"))
        .stdout(predicate::str::contains("EXIT CODES"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("playbox-gallery").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("playbox-gallery"));
}

#[test]
fn test_invalid_format() {
    let dir = TempDir::new().unwrap();
    gallery_cmd(&dir, "")
        .args(["moon", "--format", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_empty_tag_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    gallery_cmd(&dir, "")
        .arg("   ")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Search tag cannot be empty"));
}

#[test]
fn test_page_zero_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    gallery_cmd(&dir, "")
        .args(["moon", "--page", "0"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Page must be at least 1"));
}

#[test]
fn test_unknown_size_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    gallery_cmd(&dir, "")
        .args(["moon", "--size", "q"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_missing_api_key() {
    let dir = TempDir::new().unwrap();
    gallery_cmd(&dir, "")
        .arg("moon")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("flickr.api_key"));
}

#[test]
fn test_prints_photo_records() {
    let dir = TempDir::new().unwrap();
    let (base_url, server) = serve_once("200 OK", SEARCH_BODY);

    gallery_cmd(&dir, &config_for(&base_url))
        .args(["moon", "--per-page", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1 | Moon | https://live.staticflickr.com/65535/1_124a8612b0_z.jpg",
        ));

    let request_line = server.join().unwrap();
    assert!(request_line.contains("tags=moon"));
    assert!(request_line.contains("per_page=10"));
}

#[test]
fn test_jsonl_output_with_size() {
    let dir = TempDir::new().unwrap();
    let (base_url, _server) = serve_once("200 OK", SEARCH_BODY);

    let output = gallery_cmd(&dir, &config_for(&base_url))
        .args(["moon", "--size", "b", "--format", "jsonl"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let photo: serde_json::Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(photo["url"], "https://live.staticflickr.com/65535/1_124a8612b0_b.jpg");
}

#[test]
fn test_rejected_key_exit_code() {
    let dir = TempDir::new().unwrap();
    let (base_url, _server) = serve_once("401 Unauthorized", "");

    gallery_cmd(&dir, &config_for(&base_url))
        .arg("moon")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Api error with errorCode: 401"));
}

#[test]
fn test_server_error_exit_code() {
    let dir = TempDir::new().unwrap();
    let (base_url, _server) = serve_once("500 Internal Server Error", "");

    gallery_cmd(&dir, &config_for(&base_url))
        .arg("moon")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Api error with errorCode: 500"));
}

#[test]
fn test_empty_body_exit_code() {
    let dir = TempDir::new().unwrap();
    let (base_url, _server) = serve_once("200 OK", "");

    gallery_cmd(&dir, &config_for(&base_url))
        .arg("moon")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Body cannot be null on a successful response",
        ));
}

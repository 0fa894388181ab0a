#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};

pub fn free_local_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("address should be available");
    drop(listener);
    addr
}

pub fn closed_endpoint() -> String {
    format!("http://{}/v1/grok", free_local_addr())
}

/// Serves one request with `body` and returns the raw request text.
pub fn serve_once(body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("address should be available");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept should succeed");
        let mut buf = Vec::new();
        let mut chunk = [0_u8; 1024];
        loop {
            let read = stream.read(&mut chunk).expect("request should be readable");
            if read == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..read]);
            if request_complete(&buf) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .expect("response should be written");
        String::from_utf8_lossy(&buf).into_owned()
    });

    (format!("http://{addr}/v1/grok"), handle)
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(head_end) = buf.windows(4).position(|window| window == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    buf.len() >= head_end + 4 + content_length
}

/// Body of a captured request, parsed as JSON.
pub fn request_json(raw: &str) -> serde_json::Value {
    let (_, body) = raw
        .split_once("\r\n\r\n")
        .expect("request should have a body");
    serde_json::from_str(body).expect("request body should be JSON")
}

pub fn grok_light(endpoint_url: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_grok-light"));
    cmd.env("AI_ENDPOINT_URL", endpoint_url)
        .env("AI_TIMEOUT_SECS", "5")
        .env("NO_COLOR", "1")
        .env_remove("AI_API_KEY")
        .env_remove("AI_PROVIDER")
        .env_remove("AI_MODEL")
        .env_remove("RUST_LOG")
        .env_remove("LOG_OUTPUT")
        .env_remove("LOG_FORMAT")
        .env_remove("LOG_FILE_PATH");
    cmd
}

pub fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn grok-light");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for grok-light")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn find_rotated_log_file(dir: &Path, base_file_name: &str) -> std::path::PathBuf {
    let expected_prefix = format!("{base_file_name}.");
    let mut matches: Vec<_> = std::fs::read_dir(dir)
        .expect("failed to read log directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&expected_prefix))
        })
        .collect();

    matches.sort();
    matches
        .pop()
        .expect("expected a rotated log file to be created")
}

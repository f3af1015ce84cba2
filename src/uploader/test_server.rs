//! One-shot HTTP responder used to observe what the upload client sends

use std::collections::HashMap;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    /// Header names are lowercased
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

pub struct TestServer {
    pub base_url: String,
    handle: JoinHandle<RecordedRequest>,
}

impl TestServer {
    /// Answer the first request with `status` and `body`
    pub async fn respond_with(status: &str, body: &str) -> Self {
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        Self::respond_raw(&response).await
    }

    /// Write `response` as is and close the connection, even if it is incomplete
    pub async fn respond_raw(response: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let response = response.to_string();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        });

        Self { base_url, handle }
    }

    pub async fn received(self) -> RecordedRequest {
        self.handle.await.unwrap()
    }
}

/// URL of a port nobody listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> RecordedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 8192];

    let header_end = loop {
        if let Some(position) = find(&buffer, b"\r\n\r\n") {
            break position + 4;
        }
        let read = stream.read(&mut chunk).await.unwrap();
        assert!(read > 0, "connection closed before the end of the headers");
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap().split(' ');
    let method = request_line.next().unwrap().to_string();
    let target = request_line.next().unwrap().to_string();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_lowercase(), value.trim().to_string()))
        .collect::<HashMap<_, _>>();

    let mut body = buffer[header_end..].to_vec();
    if let Some(length) = headers.get("content-length") {
        let length: usize = length.parse().unwrap();
        while body.len() < length {
            let read = stream.read(&mut chunk).await.unwrap();
            assert!(read > 0, "connection closed before the end of the body");
            body.extend_from_slice(&chunk[..read]);
        }
    } else if headers.get("transfer-encoding").map(String::as_str) == Some("chunked") {
        while find(&body, b"0\r\n\r\n").is_none() {
            let read = stream.read(&mut chunk).await.unwrap();
            assert!(read > 0, "connection closed before the last chunk");
            body.extend_from_slice(&chunk[..read]);
        }
    }

    RecordedRequest {
        method,
        target,
        headers,
        body,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

//! Minimal in-process DependencyTrack stand-in speaking plain HTTP/1.1.
//!
//! Serves `PUT /api/v1/bom` and `GET /api/v1/event/token/{token}` from a
//! script and records every request it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn token(token: &str) -> Self {
        Self::json(200, serde_json::json!({ "token": token }))
    }

    pub fn processing(processing: bool) -> Self {
        Self::json(200, serde_json::json!({ "processing": processing }))
    }
}

/// Responses the stub hands out
///
/// Status responses are used in order; the last one repeats once the list
/// is exhausted.
#[derive(Debug, Clone)]
pub struct StubScript {
    pub upload: StubResponse,
    pub statuses: Vec<StubResponse>,
}

impl StubScript {
    /// Accepts the upload and reports processing `busy_polls` times before finishing
    pub fn completes_after(token: &str, busy_polls: usize) -> Self {
        let mut statuses = vec![StubResponse::processing(true); busy_polls];
        statuses.push(StubResponse::processing(false));
        Self {
            upload: StubResponse::token(token),
            statuses,
        }
    }

    pub fn never_finishes(token: &str) -> Self {
        Self {
            upload: StubResponse::token(token),
            statuses: vec![StubResponse::processing(true)],
        }
    }

    pub fn rejects_upload(response: StubResponse) -> Self {
        Self {
            upload: response,
            statuses: vec![StubResponse::processing(false)],
        }
    }
}

pub struct StubDependencyTrack {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubDependencyTrack {
    pub async fn start(script: StubScript) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shared = Arc::clone(&requests);
        let script = Arc::new(script);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let requests = Arc::clone(&shared);
                let script = Arc::clone(&script);
                tokio::spawn(async move {
                    let _ = serve_connection(stream, &requests, &script).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn status_queries(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "GET")
            .collect()
    }
}

async fn serve_connection(
    mut stream: TcpStream,
    requests: &Mutex<Vec<RecordedRequest>>,
    script: &StubScript,
) -> std::io::Result<()> {
    let Some(request) = read_request(&mut stream).await? else {
        return Ok(());
    };

    let response = {
        let mut recorded = requests.lock().unwrap();
        let earlier_queries = recorded.iter().filter(|r| r.method == "GET").count();
        let response = route(&request, earlier_queries, script);
        recorded.push(request);
        response
    };

    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason_phrase(response.status),
        response.body.len(),
        response.body
    );
    stream.write_all(reply.as_bytes()).await?;
    stream.shutdown().await
}

fn route(request: &RecordedRequest, earlier_queries: usize, script: &StubScript) -> StubResponse {
    match (request.method.as_str(), request.path.as_str()) {
        ("PUT", "/api/v1/bom") => script.upload.clone(),
        ("GET", path) if path.starts_with("/api/v1/event/token/") => script
            .statuses
            .get(earlier_queries)
            .or_else(|| script.statuses.last())
            .cloned()
            .unwrap_or_else(|| StubResponse::processing(false)),
        _ => StubResponse::text(404, "not found"),
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<Option<RecordedRequest>> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(None);
        }
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);

    let mut body = buffer[header_end + 4..].to_vec();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    }))
}

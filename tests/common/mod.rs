#![allow(dead_code)]

use ghprofile::{Diagnostics, FetchError, Loader};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// One request as the fixture server saw it. Header names are lowercase.
#[derive(Debug, Clone)]
pub struct Seen {
    pub path: String,
    pub headers: HashMap<String, String>,
}

/// Minimal HTTP/1.1 server answering GETs from a fixed route table.
/// Unknown paths get a 404.
pub struct FixtureServer {
    pub base: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl FixtureServer {
    pub async fn start(routes: Vec<(String, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let routes: Arc<HashMap<String, Reply>> = Arc::new(routes.into_iter().collect());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let accepted = seen.clone();
        tokio::spawn(async move {
            while let Ok((sock, _)) = listener.accept().await {
                let routes = routes.clone();
                let seen = accepted.clone();
                tokio::spawn(async move { serve(sock, &routes, &seen).await });
            }
        });

        Self { base, seen }
    }

    pub fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|s| s.path).collect()
    }
}

async fn serve(mut sock: TcpStream, routes: &HashMap<String, Reply>, seen: &Mutex<Vec<Seen>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match sock.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf).into_owned();
    let mut lines = head.split("\r\n");
    let path = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    seen.lock().unwrap().push(Seen {
        path: path.clone(),
        headers,
    });

    let reply = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| Reply::json(404, serde_json::json!({ "message": "Not Found" })));

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reason(reply.status),
        reply.content_type,
        reply.body.len(),
        reply.body
    );
    let _ = sock.write_all(response.as_bytes()).await;
    let _ = sock.shutdown().await;
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// A base URL nothing is listening on.
pub async fn refused_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Failed {
        loader: Loader,
        status: Option<u16>,
    },
    Degraded {
        loader: Loader,
        field: &'static str,
        status: Option<u16>,
    },
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    reports: Mutex<Vec<Report>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn fetch_failed(&self, loader: Loader, failure: &FetchError) {
        self.reports.lock().unwrap().push(Report::Failed {
            loader,
            status: failure.status(),
        });
    }

    fn fetch_degraded(&self, loader: Loader, field: &'static str, failure: &FetchError) {
        self.reports.lock().unwrap().push(Report::Degraded {
            loader,
            field,
            status: failure.status(),
        });
    }
}

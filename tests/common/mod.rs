//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use push_gateway::config::GatewayConfig;
use push_gateway::lifecycle::Shutdown;
use push_gateway::notification::{
    NotificationOptions, NotificationRef, Platform, PlatformError, ViewHandle, ViewQuery,
};
use push_gateway::HttpServer;

/// A request as seen by the mock origin.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Request target, path plus query.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

/// Start a mock origin that always answers `status` with `body`.
pub async fn start_mock_origin(status: u16, body: &'static str) -> (SocketAddr, Captured) {
    start_programmable_origin(move || async move { (status, body.to_string()) }).await
}

/// Start a programmable mock origin with async support.
pub async fn start_programmable_origin<F, Fut>(f: F) -> (SocketAddr, Captured)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let log = captured.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        if let Some(request) = read_request(&mut socket).await {
                            log.lock().unwrap().push(request);
                        }
                        let (status, body) = f().await;
                        let reason = StatusCode::from_u16(status)
                            .ok()
                            .and_then(|s| s.canonical_reason())
                            .unwrap_or("Unknown");
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, captured)
}

async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(CapturedRequest {
        method,
        target,
        headers,
        body,
    })
}

/// An address nothing listens on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Default config pointed at `origin`.
pub fn gateway_config(origin: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.origin.base_url = format!("http://{}", origin);
    config
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Capability calls, in the order the platform saw them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Display(String),
    Dismiss(String),
    Enumerate { include_uncontrolled: bool },
    Focus(String),
    Open(String),
}

/// Capabilities a [`RecordingPlatform`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Display,
    Dismiss,
    Enumerate,
    Focus,
    Open,
}

/// In-memory platform recording every capability call.
///
/// Failing capabilities still record the attempted call.
pub struct RecordingPlatform {
    pub views: Mutex<Vec<ViewHandle>>,
    pub can_open: bool,
    pub failing: Mutex<Vec<Capability>>,
    pub calls: Mutex<Vec<PlatformCall>>,
    pub displayed: Mutex<Vec<NotificationOptions>>,
}

impl RecordingPlatform {
    pub fn new(views: Vec<ViewHandle>, can_open: bool) -> Arc<Self> {
        Arc::new(Self {
            views: Mutex::new(views),
            can_open,
            failing: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            displayed: Mutex::new(Vec::new()),
        })
    }

    pub fn failing_display() -> Arc<Self> {
        let platform = Self::new(Vec::new(), true);
        platform.fail(Capability::Display);
        platform
    }

    /// Make every later call to `capability` return an error.
    pub fn fail(&self, capability: Capability) {
        self.failing.lock().unwrap().push(capability);
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, capability: Capability) -> Result<(), PlatformError> {
        if self.failing.lock().unwrap().contains(&capability) {
            return Err(PlatformError::Capability(format!("{:?} unavailable", capability)));
        }
        Ok(())
    }
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn enumerate_views(&self, query: ViewQuery) -> Result<Vec<ViewHandle>, PlatformError> {
        self.record(PlatformCall::Enumerate {
            include_uncontrolled: query.include_uncontrolled,
        });
        self.check(Capability::Enumerate)?;
        Ok(self.views.lock().unwrap().clone())
    }

    async fn focus(&self, view: &ViewHandle) -> Result<(), PlatformError> {
        self.record(PlatformCall::Focus(view.id.clone()));
        self.check(Capability::Focus)
    }

    fn can_open_views(&self) -> bool {
        self.can_open
    }

    async fn open_new(&self, url: &str) -> Result<Option<ViewHandle>, PlatformError> {
        self.record(PlatformCall::Open(url.to_string()));
        self.check(Capability::Open)?;
        let view = ViewHandle::new(format!("opened-{}", url.len()), url);
        self.views.lock().unwrap().push(view.clone());
        Ok(Some(view))
    }

    async fn dismiss(&self, notification: &NotificationRef) -> Result<(), PlatformError> {
        self.record(PlatformCall::Dismiss(notification.0.clone()));
        self.check(Capability::Dismiss)
    }

    async fn display(&self, options: NotificationOptions) -> Result<NotificationRef, PlatformError> {
        self.check(Capability::Display)?;
        self.record(PlatformCall::Display(options.title.clone()));
        let mut displayed = self.displayed.lock().unwrap();
        displayed.push(options);
        Ok(NotificationRef(format!("n{}", displayed.len())))
    }
}

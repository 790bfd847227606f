//! Common test utilities for integration tests: a scripted loopback HTTP
//! stub plus helpers for building sessions and shrunk timing configs.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use secrecy::SecretString;
use wilma_schedules::config::FetchConfig;
use wilma_schedules::wilma::{login, normalize_base_url, Credentials, Session};

/// One scripted step of the stub server. Each step handles exactly one
/// connection; responses carry `Connection: close` so the client opens a
/// fresh connection per request.
#[allow(dead_code)]
pub enum StubStep {
    /// Serve a canned HTTP/1.1 response.
    Respond { status: u16, body: String },
    /// Read the request, then close the connection without answering,
    /// simulating a transport failure.
    Drop,
}

#[allow(dead_code)]
impl StubStep {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::Respond {
            status,
            body: body.to_string(),
        }
    }
}

/// A request as the stub saw it on the wire.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Request line plus all header lines, verbatim.
    pub head: String,
    pub body: String,
}

/// Scripted HTTP stub bound to a loopback port. Serves its steps in order
/// and records every request it reads.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl StubServer {
    pub async fn spawn(steps: Vec<StubStep>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            for step in steps {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut socket).await;
                recorded.lock().unwrap().push(request);

                match step {
                    StubStep::Respond { status, body } => {
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    }
                    StubStep::Drop => drop(socket),
                }
            }
        });

        Self { addr, requests }
    }

    /// Base address of the stub, scheme included, no trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Snapshot of every request read so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

async fn read_request(socket: &mut TcpStream) -> RecordedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end;
    loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            header_end = pos;
            break;
        }
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            header_end = buf.len();
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .to_ascii_lowercase()
        .lines()
        .find_map(|line| line.strip_prefix("content-length:")?.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = (header_end + 4).min(buf.len());
    let mut body = buf[body_start..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next().unwrap_or("").split_whitespace();
    RecordedRequest {
        method: request_line.next().unwrap_or("").to_string(),
        path: request_line.next().unwrap_or("").to_string(),
        head,
        body: String::from_utf8_lossy(&body).to_string(),
    }
}

/// Timing config with shrunk delays so retry tests finish quickly.
#[allow(dead_code)]
pub fn fast_config() -> FetchConfig {
    FetchConfig {
        retry_delay: Duration::from_millis(25),
        request_delay: Duration::from_millis(1),
        max_attempts: None,
        http_timeout: Duration::from_secs(5),
    }
}

#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Credentials {
        username: "alice".to_string(),
        password: SecretString::new("hunter2".to_string()),
        api_key: SecretString::new("s3cret".to_string()),
    }
}

/// The two stub steps every login consumes: discovery, then a 200 login.
#[allow(dead_code)]
pub fn login_steps() -> Vec<StubStep> {
    vec![
        StubStep::ok(r#"{"SessionID":"XYZ"}"#),
        StubStep::ok("{}"),
    ]
}

/// Logs in against the stub (which must start with [`login_steps`]).
#[allow(dead_code)]
pub async fn authenticated_session(server: &StubServer, config: &FetchConfig) -> Session {
    let base = normalize_base_url(&server.base_url()).unwrap();
    login(base, &test_credentials(), config).await.unwrap()
}

//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use resilient_login::config::EndpointConfig;
use resilient_login::{LoginService, RetryPolicy};
use resilient_login::auth::LoginClient;

/// Start a programmable mock login endpoint on an ephemeral port.
///
/// `f` receives the 1-based call number and returns the status and JSON body.
/// Returns the bound address and a counter of requests served.
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Arc<AtomicU32>)
where
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
                        let (status, body) = f(call).await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            504 => "504 Gateway Timeout",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, calls)
}

/// Start a backend that writes `response` verbatim and closes the connection.
///
/// Lets tests send responses a well-behaved server never would, such as a
/// body shorter than its Content-Length.
pub async fn start_raw_backend(response: &'static str) -> (SocketAddr, Arc<AtomicU32>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        counter.fetch_add(1, Ordering::SeqCst);
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, calls)
}

/// Consume the request head and body so the client sees a clean exchange.
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                return;
            }
        }
    }
}

/// An address nothing listens on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn endpoint(addr: SocketAddr, request_timeout: Duration) -> EndpointConfig {
    EndpointConfig {
        url: format!("http://{}/auth/login", addr),
        connect_timeout_ms: 1000,
        request_timeout_ms: request_timeout.as_millis() as u64,
        use_system_proxy: false,
    }
}

pub fn service(addr: SocketAddr, policy: RetryPolicy) -> LoginService {
    let client = LoginClient::new(&endpoint(addr, Duration::from_secs(5))).unwrap();
    LoginService::new(client, policy)
}

/// Short-interval policy so retry tests run quickly.
pub fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::from_millis(10), 1.5).unwrap()
}

//! Local HTTP stubs for exercising the upstream clients without network access.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone, Copy)]
pub enum StubReply {
    /// Accepts the request and never answers.
    Hang,
    Respond {
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    },
}

/// Serves `reply` to every connection; returns the base URL (`http://127.0.0.1:<port>`).
pub async fn spawn_stub(reply: StubReply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request_head(&mut socket).await;
                match reply {
                    StubReply::Hang => tokio::time::sleep(Duration::from_secs(60)).await,
                    StubReply::Respond {
                        status,
                        content_type,
                        body,
                    } => {
                        let response = format!(
                            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                            body.len()
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    }
                }
            });
        }
    });

    format!("http://{addr}")
}

async fn read_request_head(socket: &mut TcpStream) {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                head.extend_from_slice(&chunk[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    return;
                }
            }
        }
    }
}

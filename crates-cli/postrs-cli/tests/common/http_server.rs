use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

pub struct TestHttpServer {
    pub url: String,
    requests: mpsc::Receiver<String>,
    handle: Option<thread::JoinHandle<()>>,
}

impl TestHttpServer {
    /// Answer a single request with 200 and `body`.
    pub fn spawn_ok(body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test HTTP server");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let url = format!("http://{addr}");
        let body_bytes = body.as_bytes().to_vec();
        let (tx, requests) = mpsc::channel();

        let handle = thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request_buf = [0u8; 8192];
                let n = stream.read(&mut request_buf).unwrap_or(0);
                let _ = tx.send(String::from_utf8_lossy(&request_buf[..n]).to_string());

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body_bytes.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.write_all(&body_bytes);
                let _ = stream.flush();
            }
        });

        Self { url, requests, handle: Some(handle) }
    }

    /// Head and start of the request the server received.
    pub fn received(&self) -> String {
        self.requests.recv().expect("Server did not receive a request")
    }
}

impl Drop for TestHttpServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

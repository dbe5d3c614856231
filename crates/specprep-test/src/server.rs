use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::JoinHandle;

/// Serves one HTTP response on a random local port, then exits.
pub struct SpecServer {
    addr: SocketAddr,
    handle: Option<JoinHandle<()>>,
}

impl SpecServer {
    /// Start a server that answers the first request with `status` and `body`.
    pub fn start(body: Vec<u8>, status: u16) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;

        let handle = std::thread::spawn(move || {
            if let Ok((mut socket, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf);

                let head = format!(
                    "HTTP/1.1 {} OK\r\nContent-Type: application/yaml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = socket.write_all(head.as_bytes());
                let _ = socket.write_all(&body);
            }
        });

        Ok(Self {
            addr,
            handle: Some(handle),
        })
    }

    /// URL of the served spec.
    pub fn url(&self) -> String {
        format!("http://{}/openapi.yml", self.addr)
    }

    /// Wait for the single request to be answered.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#![allow(dead_code, reason = "each test crate uses a different part")]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reachard::Server;
use reachard::storage::{StorageError, Target, TargetStore};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Store double keeping targets in memory, ids start at 1.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Targets>,
}

#[derive(Debug, Default)]
struct Targets {
    last_id: i64,
    by_id: BTreeMap<i64, String>,
}

impl MemoryStore {
    pub fn snapshot(&self) -> Vec<Target> {
        let targets = self.inner.lock().unwrap();
        targets.by_id.iter().map(|(id, name)| Target::new(*id, name.clone())).collect()
    }
}

#[async_trait]
impl TargetStore for MemoryStore {
    async fn add(&self, name: &str) -> Result<i64, StorageError> {
        let mut targets = self.inner.lock().unwrap();
        targets.last_id += 1;
        let id = targets.last_id;
        targets.by_id.insert(id, name.to_owned());
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Target>, StorageError> {
        Ok(self.snapshot())
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        Ok(self.inner.lock().unwrap().by_id.remove(&id).is_some())
    }
}

/// A server on an ephemeral loopback port, stopped on drop.
pub struct TestServer {
    pub address: SocketAddr,
    pub store: Arc<MemoryStore>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let store = Arc::new(MemoryStore::default());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let server = Server::builder().address(address).store(Arc::clone(&store) as Arc<dyn TargetStore>).build().unwrap();
        let (shutdown, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(server.serve(listener, async move {
            let _ = stopped.await;
        }));

        Self { address, store, shutdown: Some(shutdown), task }
    }

    /// Sends `request` as is and reads until the server closes the connection.
    pub async fn send(&self, request: &str) -> Reply {
        let mut stream = TcpStream::connect(self.address).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        Reply::parse(&raw)
    }

    pub async fn post(&self, content_type: &str, body: &str) -> Reply {
        self.send(&with_body("POST", content_type, body)).await
    }

    pub async fn delete(&self, content_type: &str, body: &str) -> Reply {
        self.send(&with_body("DELETE", content_type, body)).await
    }

    pub async fn list(&self) -> Reply {
        self.send("GET /targets/ HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").await
    }

    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        (&mut self.task).await.unwrap();
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn with_body(method: &str, content_type: &str, body: &str) -> String {
    format!(
        "{method} /targets/ HTTP/1.1\r\nHost: localhost\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Reply {
    fn parse(raw: &str) -> Self {
        let (head, body) = raw.split_once("\r\n\r\n").unwrap_or_else(|| panic!("incomplete response: {raw:?}"));
        let mut lines = head.split("\r\n");

        let status_line = lines.next().unwrap();
        let status = status_line.split(' ').nth(1).and_then(|code| code.parse().ok()).unwrap();
        let headers = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_owned()))
            .collect();

        Self { status, headers, body: body.to_owned() }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(header, _)| header == name).map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or_else(|e| panic!("{e}: {:?}", self.body))
    }
}

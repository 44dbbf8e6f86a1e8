#![allow(dead_code)]

use async_trait::async_trait;
use gitrank_viewer::error::{Result, ViewerError};
use gitrank_viewer::source::DataSource;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory data root. Paths that were never added answer with HTTP 404.
#[derive(Default)]
pub struct MemorySource {
    files: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: &str, body: impl Into<String>) -> Self {
        self.set(path, body);
        self
    }

    pub fn set(&self, path: &str, body: impl Into<String>) {
        self.files.lock().unwrap().insert(path.to_string(), body.into());
    }

    pub fn remove(&self, path: &str) {
        self.files.lock().unwrap().remove(path);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        self.requests.lock().unwrap().push(path.to_string());
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ViewerError::HttpStatus {
                status: 404,
                url: self.locate(path),
            })
    }

    fn locate(&self, path: &str) -> String {
        format!("./{}", path)
    }
}

/// Wraps a [`MemorySource`]; reads of one path never complete.
pub struct StallingSource {
    inner: MemorySource,
    stalled: String,
}

impl StallingSource {
    pub fn new(inner: MemorySource, stalled: &str) -> Self {
        Self {
            inner,
            stalled: stalled.to_string(),
        }
    }
}

#[async_trait]
impl DataSource for StallingSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        if path == self.stalled {
            std::future::pending::<()>().await;
        }
        self.inner.fetch_text(path).await
    }

    fn locate(&self, path: &str) -> String {
        self.inner.locate(path)
    }
}

pub fn repos_payload() -> String {
    r#"{
        "top_repos": [
            {"name": "A", "url": "u", "accumulatedStars": 500},
            {"name": "B", "url": "u2", "accumulatedStars": 10}
        ],
        "meta": {"user_total_count": 42}
    }"#
    .to_string()
}

/// `n` repositories named `repo-1` .. `repo-n`.
pub fn many_repos(n: usize) -> String {
    let repos: Vec<_> = (1..=n)
        .map(|i| {
            serde_json::json!({
                "name": format!("repo-{i}"),
                "url": format!("https://github.com/o/repo-{i}"),
                "accumulatedStars": 100_000 - i as u64,
            })
        })
        .collect();
    serde_json::json!({ "top_repos": repos }).to_string()
}

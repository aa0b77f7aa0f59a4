use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::ArenaError;
use crate::state::{ImageResult, QueryKind, SearchResults, TargetVector};
use crate::weaviate::QueryClient;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Text(String, usize),
    Image(String, usize),
    Similar(String, usize),
    Fetch(Vec<i64>),
}

/// Recording stand-in for the Weaviate client. Searches whose seed has a
/// gate block until the gate is notified.
pub struct FakeClient {
    connected: AtomicBool,
    refuse_connect: AtomicBool,
    fail_searches: AtomicBool,
    fetch_empty: AtomicBool,
    column_sizes: Mutex<[usize; 4]>,
    calls: Mutex<Vec<Call>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    pub started: Notify,
}

impl FakeClient {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            refuse_connect: AtomicBool::new(false),
            fail_searches: AtomicBool::new(false),
            fetch_empty: AtomicBool::new(false),
            column_sizes: Mutex::new([10; 4]),
            calls: Mutex::new(Vec::new()),
            gates: Mutex::new(HashMap::new()),
            started: Notify::new(),
        }
    }

    pub fn connected() -> Self {
        let client = Self::new();
        client.connected.store(true, Ordering::SeqCst);
        client
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Fetch(_)))
            .collect()
    }

    pub fn set_column_sizes(&self, sizes: [usize; 4]) {
        *self.column_sizes.lock().unwrap() = sizes;
    }

    pub fn set_fail_searches(&self, fail: bool) {
        self.fail_searches.store(fail, Ordering::SeqCst);
    }

    pub fn set_refuse_connect(&self, refuse: bool) {
        self.refuse_connect.store(refuse, Ordering::SeqCst);
    }

    pub fn set_fetch_empty(&self, empty: bool) {
        self.fetch_empty.store(empty, Ordering::SeqCst);
    }

    pub fn gate(&self, seed: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(seed.to_string(), gate.clone());
        gate
    }

    async fn respond(
        &self,
        kind: QueryKind,
        call: Call,
        seed: &str,
        limit: usize,
    ) -> Result<SearchResults, ArenaError> {
        self.calls.lock().unwrap().push(call);
        if !self.connected.load(Ordering::SeqCst) {
            return Err(ArenaError::NotConnected);
        }

        let gate = self.gates.lock().unwrap().get(seed).cloned();
        if let Some(gate) = gate {
            self.started.notify_one();
            gate.notified().await;
        }

        if self.fail_searches.load(Ordering::SeqCst) {
            return Err(ArenaError::query(kind, "backend exploded"));
        }

        let sizes = *self.column_sizes.lock().unwrap();
        let mut results = SearchResults::new();
        for target in TargetVector::ALL {
            let n = sizes[target.position()].min(limit);
            let images = (0..n)
                .map(|i| ImageResult {
                    id: format!("{}:{}:{}", seed, target.vector_name(), i),
                    index: i as i64,
                    base64_image: "aGVsbG8=".into(),
                    dataset_name: "photos".into(),
                    distance: Some(i as f64 * 0.01),
                })
                .collect();
            results.set_column(target, images);
        }
        Ok(results)
    }
}

#[async_trait]
impl QueryClient for FakeClient {
    async fn connect(&self) -> Result<(), ArenaError> {
        if self.refuse_connect.load(Ordering::SeqCst) {
            return Err(ArenaError::Connection("refused".into()));
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn search_by_text(&self, query: &str, limit: usize) -> Result<SearchResults, ArenaError> {
        self.respond(QueryKind::Text, Call::Text(query.into(), limit), query, limit)
            .await
    }

    async fn search_by_image(
        &self,
        base64_image: &str,
        limit: usize,
    ) -> Result<SearchResults, ArenaError> {
        self.respond(
            QueryKind::Image,
            Call::Image(base64_image.into(), limit),
            base64_image,
            limit,
        )
        .await
    }

    async fn search_by_similar_id(
        &self,
        object_id: &str,
        limit: usize,
    ) -> Result<SearchResults, ArenaError> {
        self.respond(
            QueryKind::Similar,
            Call::Similar(object_id.into(), limit),
            object_id,
            limit,
        )
        .await
    }

    async fn fetch_by_indexes(&self, indexes: &[i64]) -> Result<Vec<ImageResult>, ArenaError> {
        self.calls.lock().unwrap().push(Call::Fetch(indexes.to_vec()));
        if !self.connected.load(Ordering::SeqCst) {
            return Err(ArenaError::NotConnected);
        }
        if self.fetch_empty.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        Ok(indexes
            .iter()
            .map(|&index| ImageResult {
                id: format!("img-{}", index),
                index,
                base64_image: "aGVsbG8=".into(),
                dataset_name: "photos".into(),
                distance: None,
            })
            .collect())
    }
}

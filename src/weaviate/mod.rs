pub mod client;
pub mod graphql;

use std::future::Future;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};

use crate::error::ArenaError;
use crate::state::{ImageResult, QueryKind, SearchResults, TargetVector};

pub use client::WeaviateClient;

/// Lifecycle: construct, `connect`, query, `disconnect`. Search methods only
/// fail as a whole when the client is not connected; a failing target vector
/// comes back as an empty column.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn connect(&self) -> Result<(), ArenaError>;
    async fn disconnect(&self);
    async fn is_connected(&self) -> bool;
    async fn search_by_text(&self, query: &str, limit: usize) -> Result<SearchResults, ArenaError>;
    async fn search_by_image(
        &self,
        base64_image: &str,
        limit: usize,
    ) -> Result<SearchResults, ArenaError>;
    async fn search_by_similar_id(
        &self,
        object_id: &str,
        limit: usize,
    ) -> Result<SearchResults, ArenaError>;
    async fn fetch_by_indexes(&self, indexes: &[i64]) -> Result<Vec<ImageResult>, ArenaError>;
}

/// Runs one lookup per target vector and waits for all four to settle.
pub async fn fan_out<F, Fut>(kind: QueryKind, run: F) -> SearchResults
where
    F: Fn(TargetVector) -> Fut,
    Fut: Future<Output = anyhow::Result<Vec<ImageResult>>>,
{
    let settled = join_all(TargetVector::ALL.map(|target| {
        let fut = run(target);
        async move { (target, fut.await) }
    }))
    .await;

    let mut results = SearchResults::new();
    for (target, outcome) in settled {
        match outcome {
            Ok(images) => {
                debug!(
                    "{} search on {}: {} results",
                    kind,
                    target.vector_name(),
                    images.len()
                );
                results.set_column(target, images);
            }
            Err(e) => {
                warn!(
                    "{} search failed for target vector {}: {:#}",
                    kind,
                    target.vector_name(),
                    e
                );
            }
        }
    }
    results
}

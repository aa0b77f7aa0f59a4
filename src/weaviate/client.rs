use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;

use super::graphql::{self, NearClause};
use super::{fan_out, QueryClient};
use crate::config::Config;
use crate::error::ArenaError;
use crate::state::{ImageResult, QueryKind, SearchResults};

#[derive(Serialize)]
struct GraphQlRequest {
    query: String,
}

struct Handle {
    http: reqwest::Client,
    url: reqwest::Url,
    api_key: Option<String>,
    collection: String,
}

impl Handle {
    async fn get_objects(&self, query: String, id_prefix: &str) -> Result<Vec<ImageResult>> {
        let mut req = self.http.post(self.url.clone()).json(&GraphQlRequest { query });

        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                req = req.bearer_auth(key);
            }
        }

        let response = req
            .send()
            .await
            .map_err(|e| anyhow!("Weaviate request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Weaviate returned {}: {}", status, body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("failed to read Weaviate response: {}", e))?;

        graphql::parse_get_response(&self.collection, &body, id_prefix)
    }
}

pub struct WeaviateClient {
    config: Config,
    handle: RwLock<Option<Arc<Handle>>>,
}

impl WeaviateClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            handle: RwLock::new(None),
        }
    }

    fn handle(&self) -> Result<Arc<Handle>, ArenaError> {
        self.handle
            .read()
            .map_err(|_| ArenaError::Connection("client handle lock poisoned".into()))?
            .clone()
            .ok_or(ArenaError::NotConnected)
    }

    fn build_handle(&self) -> Result<Handle, ArenaError> {
        let scheme = self.config.scheme.trim();
        if scheme != "http" && scheme != "https" {
            return Err(ArenaError::Connection(format!(
                "unsupported scheme '{}'",
                self.config.scheme
            )));
        }
        if self.config.host.trim().is_empty() {
            return Err(ArenaError::Connection("host is empty".into()));
        }
        let url = reqwest::Url::parse(&self.config.graphql_url())
            .map_err(|e| ArenaError::Connection(format!("invalid endpoint: {}", e)))?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ArenaError::Connection(e.to_string()))?;
        Ok(Handle {
            http,
            url,
            api_key: self.config.api_key.clone(),
            collection: self.config.collection.clone(),
        })
    }

    async fn near_search(
        &self,
        kind: QueryKind,
        clause: NearClause<'_>,
        limit: usize,
    ) -> Result<SearchResults, ArenaError> {
        let handle = self.handle()?;
        let results = fan_out(kind, |target| {
            let handle = handle.clone();
            let query = graphql::near_query(&handle.collection, clause, target, limit);
            async move { handle.get_objects(query, target.vector_name()).await }
        })
        .await;
        debug!(
            "{} search finished, column sizes {:?}",
            kind,
            results.column_lengths()
        );
        Ok(results)
    }
}

#[async_trait]
impl QueryClient for WeaviateClient {
    async fn connect(&self) -> Result<(), ArenaError> {
        let handle = self.build_handle()?;
        let endpoint = handle.url.to_string();
        let mut guard = self
            .handle
            .write()
            .map_err(|_| ArenaError::Connection("client handle lock poisoned".into()))?;
        *guard = Some(Arc::new(handle));
        info!("Connected to Weaviate at {}", endpoint);
        Ok(())
    }

    async fn disconnect(&self) {
        if let Ok(mut guard) = self.handle.write() {
            *guard = None;
        }
        info!("Disconnected from Weaviate");
    }

    async fn is_connected(&self) -> bool {
        self.handle().is_ok()
    }

    async fn search_by_text(&self, query: &str, limit: usize) -> Result<SearchResults, ArenaError> {
        self.near_search(QueryKind::Text, NearClause::Text(query), limit)
            .await
    }

    async fn search_by_image(
        &self,
        base64_image: &str,
        limit: usize,
    ) -> Result<SearchResults, ArenaError> {
        self.near_search(QueryKind::Image, NearClause::Image(base64_image), limit)
            .await
    }

    async fn search_by_similar_id(
        &self,
        object_id: &str,
        limit: usize,
    ) -> Result<SearchResults, ArenaError> {
        self.near_search(QueryKind::Similar, NearClause::Object(object_id), limit)
            .await
    }

    async fn fetch_by_indexes(&self, indexes: &[i64]) -> Result<Vec<ImageResult>, ArenaError> {
        let handle = self.handle()?;
        if indexes.is_empty() {
            return Ok(Vec::new());
        }
        let query = graphql::index_filter_query(&handle.collection, indexes);
        let images = handle
            .get_objects(query, "index")
            .await
            .map_err(|e| ArenaError::query(QueryKind::FetchByIndex, format!("{:#}", e)))?;
        debug!("Fetched {} of {} predefined images", images.len(), indexes.len());
        Ok(images)
    }
}

use std::path::Path;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::Mutex;

use crate::cache;
use crate::error::ArenaError;
use crate::i18n::{self, Language};
use crate::image_input;
use crate::state::{
    ConnectionState, ImageResult, LastSearch, Phase, QueryKind, SearchMode, SearchResults,
    Snapshot,
};
use crate::store::KeyValueStore;
use crate::weaviate::QueryClient;

pub const PAGE_SIZE: usize = 10;

struct ArenaState {
    phase: Phase,
    mode: SearchMode,
    connection: ConnectionState,
    results: Option<SearchResults>,
    error: Option<String>,
    page_size: usize,
    last_search: Option<LastSearch>,
    predefined: Vec<ImageResult>,
    generation: u64,
}

impl ArenaState {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            mode: SearchMode::default(),
            connection: ConnectionState::Disconnected,
            results: None,
            error: None,
            page_size: PAGE_SIZE,
            last_search: None,
            predefined: Vec::new(),
            generation: 0,
        }
    }

    fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.error = None;
        Ticket {
            generation: self.generation,
            limit: self.page_size,
        }
    }
}

/// Issued per search; only the newest ticket may write results.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    generation: u64,
    limit: usize,
}

/// Owns the search state machine. The state lock is never held while a
/// query is in flight, so overlapping searches are possible and resolved by
/// generation: the last search issued wins, not the last one to finish.
pub struct SearchOrchestrator {
    client: Arc<dyn QueryClient>,
    store: Arc<dyn KeyValueStore>,
    predefined_indexes: Vec<i64>,
    locale: Language,
    state: Mutex<ArenaState>,
}

impl SearchOrchestrator {
    pub fn new(
        client: Arc<dyn QueryClient>,
        store: Arc<dyn KeyValueStore>,
        predefined_indexes: Vec<i64>,
        locale: Language,
    ) -> Self {
        Self {
            client,
            store,
            predefined_indexes,
            locale,
            state: Mutex::new(ArenaState::new()),
        }
    }

    pub fn locale(&self) -> Language {
        self.locale
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub async fn connect(&self) -> Result<(), ArenaError> {
        let outcome = if self.client.is_connected().await {
            debug!("Client already connected, reusing it");
            Ok(())
        } else {
            self.client.connect().await
        };
        match outcome {
            Ok(()) => {
                self.state.lock().await.connection = ConnectionState::Connected;
                info!("Orchestrator connected");
                self.load_predefined().await;
                Ok(())
            }
            Err(e) => {
                error!("Failed to connect to Weaviate: {}", e);
                let mut state = self.state.lock().await;
                state.connection = ConnectionState::Disconnected;
                state.error = Some(i18n::ts(self.locale, "error_connect_failed"));
                Err(e)
            }
        }
    }

    pub async fn disconnect(&self) {
        self.client.disconnect().await;
        self.state.lock().await.connection = ConnectionState::Disconnected;
    }

    /// Fills the sample gallery, unless a search already happened.
    pub async fn load_predefined(&self) {
        {
            let state = self.state.lock().await;
            if state.connection != ConnectionState::Connected || state.last_search.is_some() {
                return;
            }
        }

        match cache::load_predefined_images(
            self.client.as_ref(),
            self.store.as_ref(),
            &self.predefined_indexes,
        )
        .await
        {
            Ok(images) => {
                let mut state = self.state.lock().await;
                if state.last_search.is_none() {
                    debug!("Loaded {} predefined images", images.len());
                    state.predefined = images;
                }
            }
            Err(e) => warn!("Failed to load predefined images: {}", e),
        }
    }

    pub async fn set_mode(&self, mode: SearchMode) {
        self.state.lock().await.mode = mode;
    }

    pub async fn submit_text(&self, query: &str) -> Result<(), ArenaError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring empty text query");
            return Ok(());
        }
        self.start(LastSearch::Text(query.to_string())).await
    }

    pub async fn submit_image_file(&self, path: &Path) -> Result<(), ArenaError> {
        match image_input::read_image_file(path) {
            Ok(bytes) => self.start(LastSearch::Image(bytes)).await,
            Err(e) => self.reject_image(e).await,
        }
    }

    pub async fn submit_image_bytes(&self, bytes: Vec<u8>) -> Result<(), ArenaError> {
        match image_input::sniff_format(&bytes) {
            Ok(_) => self.start(LastSearch::Image(bytes)).await,
            Err(e) => self.reject_image(e).await,
        }
    }

    pub async fn find_similar(&self, object_id: &str) -> Result<(), ArenaError> {
        let object_id = object_id.trim();
        if object_id.is_empty() {
            debug!("Ignoring empty object id");
            return Ok(());
        }
        self.start(LastSearch::SimilarTo(object_id.to_string())).await
    }

    /// Re-runs the last search with ten more results per model. The remote
    /// query is repeated in full and replaces the current results. Only
    /// valid once results are on screen.
    pub async fn show_more(&self) -> Result<(), ArenaError> {
        let (ticket, search) = {
            let mut state = self.state.lock().await;
            let Some(search) = state.last_search.clone() else {
                debug!("show_more with no previous search, ignoring");
                return Ok(());
            };
            if state.phase != Phase::Loaded {
                debug!("show_more while {:?}, ignoring", state.phase);
                return Ok(());
            }
            self.ensure_connected(&mut state)?;
            state.page_size += PAGE_SIZE;
            (state.begin(), search)
        };
        self.run(ticket, search).await
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.lock().await;
        Snapshot {
            phase: state.phase,
            mode: state.mode,
            connection: state.connection,
            results: state.results.clone(),
            error: state.error.clone(),
            page_size: state.page_size,
            has_last_search: state.last_search.is_some(),
            predefined: state.predefined.clone(),
        }
    }

    async fn reject_image(&self, err: ArenaError) -> Result<(), ArenaError> {
        warn!("Rejected image input: {}", err);
        self.state.lock().await.error = Some(i18n::ts(self.locale, "error_not_an_image"));
        Err(err)
    }

    fn ensure_connected(&self, state: &mut ArenaState) -> Result<(), ArenaError> {
        if state.connection != ConnectionState::Connected {
            warn!("Search attempted while disconnected");
            state.error = Some(i18n::ts(self.locale, "error_not_connected"));
            return Err(ArenaError::NotConnected);
        }
        Ok(())
    }

    async fn start(&self, search: LastSearch) -> Result<(), ArenaError> {
        let ticket = {
            let mut state = self.state.lock().await;
            self.ensure_connected(&mut state)?;
            state.page_size = PAGE_SIZE;
            state.last_search = Some(search.clone());
            state.begin()
        };
        self.run(ticket, search).await
    }

    async fn run(&self, ticket: Ticket, search: LastSearch) -> Result<(), ArenaError> {
        let kind = search.kind();
        debug!(
            "Starting {} search #{} with limit {}",
            kind, ticket.generation, ticket.limit
        );

        let outcome = match &search {
            LastSearch::Text(query) => self.client.search_by_text(query, ticket.limit).await,
            LastSearch::Image(bytes) => {
                let encoded = image_input::encode_base64(bytes);
                self.client.search_by_image(&encoded, ticket.limit).await
            }
            LastSearch::SimilarTo(id) => {
                self.client.search_by_similar_id(id, ticket.limit).await
            }
        };

        let mut state = self.state.lock().await;
        if state.generation != ticket.generation {
            debug!(
                "Discarding stale {} search #{} (latest is #{})",
                kind, ticket.generation, state.generation
            );
            return Ok(());
        }

        match outcome {
            Ok(results) => {
                debug!("{} search #{} loaded {:?}", kind, ticket.generation, results.column_lengths());
                state.phase = Phase::Loaded;
                state.results = Some(results);
                Ok(())
            }
            Err(e) => {
                error!("{} search failed: {}", kind, e);
                state.phase = Phase::Error;
                state.results = None;
                state.error = Some(i18n::ts(self.locale, failure_key(kind)));
                Err(e)
            }
        }
    }
}

fn failure_key(kind: QueryKind) -> &'static str {
    match kind {
        QueryKind::Text => "error_text_search",
        QueryKind::Image => "error_image_search",
        QueryKind::Similar | QueryKind::FetchByIndex => "error_similar_search",
    }
}

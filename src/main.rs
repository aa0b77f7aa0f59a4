use std::sync::Arc;

use log::{debug, info, warn};
use mimalloc::MiMalloc;

use clip_arena_lib::cache;
use clip_arena_lib::commands;
use clip_arena_lib::config;
use clip_arena_lib::i18n::Language;
use clip_arena_lib::orchestrator::SearchOrchestrator;
use clip_arena_lib::store::FileStore;
use clip_arena_lib::weaviate::WeaviateClient;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    clip_arena_lib::init_logging();

    // ── Config ──
    let data_dir = clip_arena_lib::get_app_data_dir();
    std::fs::create_dir_all(&data_dir).ok();
    let config = config::load_effective_config(&data_dir.join("config.json"));
    let locale = Language::from_setting(&config.locale);
    info!(
        "Starting CLIP Arena against {} (locale {})",
        config.graphql_url(),
        locale.code()
    );

    debug!("Predefined images cached under {}", config.predefined_cache_key());

    // ── Storage ──
    let store = Arc::new(FileStore::open(data_dir.join("store.json")));
    info!("Using store at {}", store.path().display());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let predefined = config.predefined_indexes.clone();
        let client = Arc::new(WeaviateClient::new(config));
        let orch = SearchOrchestrator::new(client, store, predefined, locale);
        let dark_mode = cache::load_dark_mode(orch.store());

        if let Err(e) = orch.connect().await {
            warn!("Starting without a database connection: {}", e);
        }

        let result = commands::run_repl(&orch, dark_mode).await;
        orch.disconnect().await;
        result
    })
}

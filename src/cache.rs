use log::{debug, info, warn};

use crate::config::predefined_cache_key;
use crate::error::ArenaError;
use crate::state::ImageResult;
use crate::store::KeyValueStore;
use crate::weaviate::QueryClient;

pub const DARK_MODE_KEY: &str = "darkMode";

fn read_cached(store: &dyn KeyValueStore, key: &str) -> Result<Option<Vec<ImageResult>>, ArenaError> {
    let raw = store
        .get(key)
        .map_err(|e| ArenaError::Cache(format!("read {}: {:#}", key, e)))?;
    match raw {
        Some(json) => serde_json::from_str::<Vec<ImageResult>>(&json)
            .map(Some)
            .map_err(|e| ArenaError::Cache(format!("decode {}: {}", key, e))),
        None => Ok(None),
    }
}

fn write_cached(store: &dyn KeyValueStore, key: &str, images: &[ImageResult]) -> Result<(), ArenaError> {
    let json = serde_json::to_string(images)
        .map_err(|e| ArenaError::Cache(format!("encode {}: {}", key, e)))?;
    store
        .set(key, &json)
        .map_err(|e| ArenaError::Cache(format!("write {}: {:#}", key, e)))
}

/// Cache-first load of the predefined sample images. Entries never expire;
/// a new index list simply maps to a new key.
pub async fn load_predefined_images(
    client: &dyn QueryClient,
    store: &dyn KeyValueStore,
    indexes: &[i64],
) -> Result<Vec<ImageResult>, ArenaError> {
    let key = predefined_cache_key(indexes);

    match read_cached(store, &key) {
        Ok(Some(images)) => {
            debug!("Predefined images served from cache ({} entries)", images.len());
            return Ok(images);
        }
        Ok(None) => debug!("Predefined image cache miss for {}", key),
        Err(e) => warn!("Predefined image cache unreadable, fetching remotely: {}", e),
    }

    let images = client.fetch_by_indexes(indexes).await?;

    if images.is_empty() {
        info!("No predefined images returned for {}, not caching", key);
        return Ok(images);
    }
    if let Err(e) = write_cached(store, &key, &images) {
        warn!("Failed to cache predefined images: {}", e);
    }
    Ok(images)
}

pub fn load_dark_mode(store: &dyn KeyValueStore) -> bool {
    match store.get(DARK_MODE_KEY) {
        Ok(Some(value)) => value.trim() == "true",
        Ok(None) => false,
        Err(e) => {
            warn!("Failed to read dark mode preference: {:#}", e);
            false
        }
    }
}

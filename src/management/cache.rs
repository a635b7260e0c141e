use dashmap::DashMap;
use tracing::debug;

use crate::{error::Result, types::AlbumData};

/// In-memory cache of new release lists.
///
/// Keys are either the curated feed key (see
/// [`curated_cache_key`](crate::utils::curated_cache_key)) or a genre id.
/// Entries are never evicted; a later successful fetch overwrites them.
#[derive(Debug, Default)]
pub struct ResponseCache {
    new_releases: DashMap<String, Vec<AlbumData>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<AlbumData>> {
        self.new_releases.get(key).map(|entry| entry.value().clone())
    }

    pub fn put(&self, key: &str, albums: Vec<AlbumData>) {
        debug!("Caching {} albums under {}", albums.len(), key);
        self.new_releases.insert(key.to_string(), albums);
    }

    /// Stores a successful result under `key` and hands it back; errors pass
    /// through and leave the cache untouched.
    pub fn put_and_forward(
        &self,
        key: &str,
        result: Result<Vec<AlbumData>>,
    ) -> Result<Vec<AlbumData>> {
        let albums = result?;
        self.put(key, albums.clone());
        Ok(albums)
    }

    pub fn len(&self) -> usize {
        self.new_releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.new_releases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;

    fn album(id: &str) -> AlbumData {
        AlbumData {
            id: id.to_string(),
            name: format!("Album {id}"),
            ..Default::default()
        }
    }

    #[test]
    fn success_is_stored_before_it_is_returned() {
        let cache = ResponseCache::new();
        let albums = cache
            .put_and_forward("g.115", Ok(vec![album("Alb.1"), album("Alb.2")]))
            .unwrap();

        assert_eq!(albums.len(), 2);
        assert_eq!(cache.get("g.115"), Some(albums));
    }

    #[test]
    fn failure_leaves_cache_untouched() {
        let cache = ResponseCache::new();
        cache.put("g.115", vec![album("Alb.1")]);

        let result = cache.put_and_forward("g.115", Err(SdkError::from_response(500, "")));
        assert_eq!(result.unwrap_err().status(), Some(500));
        assert_eq!(cache.get("g.115"), Some(vec![album("Alb.1")]));

        let result = cache.put_and_forward("g.999", Err(SdkError::NotAuthorized));
        assert!(result.is_err());
        assert_eq!(cache.get("g.999"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn later_fetch_overwrites_entry() {
        let cache = ResponseCache::new();
        cache.put("rhapsody", vec![album("Alb.1")]);
        cache.put("rhapsody", vec![album("Alb.2")]);
        assert_eq!(cache.get("rhapsody"), Some(vec![album("Alb.2")]));
    }

    #[test]
    fn empty_list_is_a_valid_entry() {
        let cache = ResponseCache::new();
        assert!(cache.is_empty());
        cache.put_and_forward("g.1", Ok(Vec::new())).unwrap();
        assert_eq!(cache.get("g.1"), Some(Vec::new()));
    }
}

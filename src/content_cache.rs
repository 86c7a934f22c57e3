use std::collections::HashMap;
use std::sync::Arc;

/// Rendered content keyed by link. Posts never change while the process runs,
/// so entries never expire.
pub struct ContentCache<T> {
    cache: Option<HashMap<String, Arc<T>>>,
}

impl<T> ContentCache<T> {
    pub fn new() -> Self {
        ContentCache {
            cache: Some(HashMap::new()),
        }
    }

    pub fn non_caching() -> Self {
        ContentCache {
            cache: None,
        }
    }

    pub fn add(&mut self, key: &str, content: T) -> Arc<T> {
        let value = Arc::new(content);
        if let Some(ref mut cache) = self.cache {
            cache.insert(key.to_string(), value.clone());
        }
        value
    }

    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.cache.as_ref()
            .and_then(|cache| cache.get(key))
            .cloned()
    }

    /// Cached value for `key`, or the result of `render` stored for next time.
    pub fn get_or_try_add<E>(&mut self, key: &str, render: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        Ok(self.add(key, render()?))
    }
}

impl<T> Default for ContentCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut cache = ContentCache::new();
        let cached = cache.add("article-1", "<h1>Hello</h1>".to_string());
        assert_eq!(Arc::strong_count(&cached), 2);

        let retrieved = cache.get("article-1").unwrap();
        assert_eq!(retrieved.as_str(), "<h1>Hello</h1>");
        assert!(cache.get("article-2").is_none());
    }

    #[test]
    fn test_non_caching() {
        let mut cache: ContentCache<String> = ContentCache::non_caching();
        let cached = cache.add("article-1", "content".to_string());
        assert_eq!(Arc::strong_count(&cached), 1);
        assert!(cache.get("article-1").is_none());
    }

    #[test]
    fn test_get_or_try_add_renders_once() -> io::Result<()> {
        let mut cache = ContentCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            let value = cache.get_or_try_add("article-1", || {
                calls += 1;
                Ok::<_, io::Error>("rendered".to_string())
            })?;
            assert_eq!(value.as_str(), "rendered");
        }
        assert_eq!(calls, 1);
        Ok(())
    }

    #[test]
    fn test_get_or_try_add_error_is_not_cached() {
        let mut cache: ContentCache<String> = ContentCache::new();
        let res = cache.get_or_try_add("article-1", || Err(io::Error::new(io::ErrorKind::InvalidData, "boom")));
        assert!(res.is_err());
        assert!(cache.get("article-1").is_none());
    }
}

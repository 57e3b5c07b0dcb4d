#[cfg(test)]
mod tests {
    use donelog::libs::cache::Cache;
    use std::time::{Duration, Instant};

    #[test]
    fn test_fresh_entry_is_returned() {
        let mut cache: Cache<&str, u32> = Cache::new(Duration::from_secs(300));
        cache.insert("w11", 3);
        assert_eq!(cache.get(&"w11"), Some(3));
        assert_eq!(cache.get(&"w12"), None);
    }

    #[test]
    fn test_entry_goes_stale_after_ttl() {
        let ttl = Duration::from_secs(300);
        let mut cache: Cache<&str, u32> = Cache::new(ttl);
        let stored = Instant::now();
        cache.insert_at("w11", 3, stored);

        assert_eq!(cache.get_at(&"w11", stored + Duration::from_secs(299)), Some(3));
        assert_eq!(cache.get_at(&"w11", stored + ttl), None);
        // Stale entries are ignored, not removed
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_reinsert_refreshes_entry() {
        let ttl = Duration::from_secs(10);
        let mut cache: Cache<&str, u32> = Cache::new(ttl);
        let start = Instant::now();
        cache.insert_at("w11", 1, start);
        cache.insert_at("w11", 2, start + Duration::from_secs(8));

        assert_eq!(cache.get_at(&"w11", start + Duration::from_secs(12)), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut cache: Cache<u8, u8> = Cache::new(Duration::from_secs(60));
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn test_value_computed_before_clear_is_refused() {
        let mut cache: Cache<&str, u32> = Cache::new(Duration::from_secs(300));
        let generation = cache.generation();
        cache.clear();

        assert!(!cache.insert_if_current(generation, "w11", 1));
        assert_eq!(cache.get(&"w11"), None);

        assert!(cache.insert_if_current(cache.generation(), "w11", 2));
        assert_eq!(cache.get(&"w11"), Some(2));
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let mut cache: Cache<u8, u8> = Cache::new(Duration::ZERO);
        cache.insert(1, 1);
        assert_eq!(cache.get(&1), None);
    }
}

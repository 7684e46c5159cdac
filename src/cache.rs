use crate::models::SpotForecast;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// In-memory forecast cache keyed by spot id. Entries expire after the TTL;
/// there is no other invalidation and no cross-process sharing.
pub struct ForecastCache {
    ttl: Duration,
    entries: HashMap<u32, CacheEntry>,
}

struct CacheEntry {
    stored_at: Instant,
    forecast: SpotForecast,
}

impl ForecastCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// A cached forecast for the spot, unless the entry has expired.
    pub fn get(&self, spot_id: u32) -> Option<&SpotForecast> {
        self.entries.get(&spot_id).and_then(|entry| {
            if entry.stored_at.elapsed() < self.ttl {
                Some(&entry.forecast)
            } else {
                None
            }
        })
    }

    pub fn insert(&mut self, spot_id: u32, forecast: SpotForecast) {
        self.entries.insert(
            spot_id,
            CacheEntry {
                stored_at: Instant::now(),
                forecast,
            },
        );
    }

    /// Drop expired entries.
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn forecast(spot_id: u32) -> SpotForecast {
        SpotForecast {
            spot_id,
            spot_name: format!("spot-{}", spot_id),
            generated_at: Utc::now(),
            days: BTreeMap::new(),
        }
    }

    #[test]
    fn test_hit_within_ttl() {
        let mut cache = ForecastCache::new(Duration::from_secs(60));
        cache.insert(1, forecast(1));

        let hit = cache.get(1).expect("entry should still be fresh");
        assert_eq!(hit.spot_id, 1);
        assert!(cache.get(2).is_none());
    }

    #[test]
    fn test_expired_entry_misses() {
        let mut cache = ForecastCache::new(Duration::ZERO);
        cache.insert(1, forecast(1));

        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_purge_expired() {
        let mut cache = ForecastCache::new(Duration::ZERO);
        cache.insert(1, forecast(1));
        cache.insert(2, forecast(2));
        assert_eq!(cache.len(), 2);

        cache.purge_expired();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_replaces_entry() {
        let mut cache = ForecastCache::new(Duration::from_secs(60));
        cache.insert(1, forecast(1));
        let mut updated = forecast(1);
        updated.spot_name = "renamed".to_string();
        cache.insert(1, updated);

        assert_eq!(cache.get(1).unwrap().spot_name, "renamed");
        assert_eq!(cache.len(), 1);
    }
}

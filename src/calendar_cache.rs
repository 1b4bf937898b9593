// Month-grid cache. Listing pages re-request the same calendar months far
// more often than calendars change, so resolved grids are memoized with a
// TTL and invalidated whenever the owning property is written.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::availability::CalendarMonth;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 512,
            ttl: Duration::from_secs(300),
        }
    }
}

// Counters kept as atomics so readers never block each other
#[derive(Debug, Default)]
struct CacheStats {
    hit_count: AtomicUsize,
    miss_count: AtomicUsize,
    eviction_count: AtomicUsize,
    expired_count: AtomicUsize,
}

// Cloneable snapshot of the counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStatsReport {
    pub items_count: usize,
    pub hit_count: usize,
    pub miss_count: usize,
    pub eviction_count: usize,
    pub expired_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MonthKey {
    property_id: String,
    year: i32,
    month: u32,
}

struct CacheEntry {
    grid: CalendarMonth,
    stored_at: Instant,
    last_accessed: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() > ttl
    }
}

pub struct CalendarCache {
    entries: DashMap<MonthKey, CacheEntry>,
    config: CacheConfig,
    stats: CacheStats,
}

impl CalendarCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            stats: CacheStats::default(),
        }
    }

    // Fetch a cached grid if present and fresh
    pub fn get(&self, property_id: &str, year: i32, month: u32) -> Option<CalendarMonth> {
        let key = MonthKey {
            property_id: property_id.to_string(),
            year,
            month,
        };

        let expired = match self.entries.get_mut(&key) {
            Some(mut entry) => {
                if entry.is_expired(self.config.ttl) {
                    true
                } else {
                    entry.last_accessed = Instant::now();
                    self.stats.hit_count.fetch_add(1, Ordering::SeqCst);
                    return Some(entry.grid.clone());
                }
            }
            None => {
                self.stats.miss_count.fetch_add(1, Ordering::SeqCst);
                return None;
            }
        };

        if expired {
            // Drop the stale entry outside the get_mut borrow
            self.entries.remove(&key);
            self.stats.expired_count.fetch_add(1, Ordering::SeqCst);
            self.stats.miss_count.fetch_add(1, Ordering::SeqCst);
        }
        None
    }

    pub fn store(&self, property_id: &str, year: i32, month: u32, grid: CalendarMonth) {
        let key = MonthKey {
            property_id: property_id.to_string(),
            year,
            month,
        };

        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.max_entries {
            self.evict_least_recently_used();
        }

        let now = Instant::now();
        self.entries.insert(
            key,
            CacheEntry {
                grid,
                stored_at: now,
                last_accessed: now,
            },
        );
    }

    // Drop every cached month for one property. Called after any write that
    // can change that property's derived calendar.
    pub fn invalidate_property(&self, property_id: &str) -> usize {
        let keys: Vec<MonthKey> = self
            .entries
            .iter()
            .filter(|entry| entry.key().property_id == property_id)
            .map(|entry| entry.key().clone())
            .collect();

        let mut removed = 0;
        for key in keys {
            if self.entries.remove(&key).is_some() {
                removed += 1;
            }
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStatsReport {
        CacheStatsReport {
            items_count: self.entries.len(),
            hit_count: self.stats.hit_count.load(Ordering::SeqCst),
            miss_count: self.stats.miss_count.load(Ordering::SeqCst),
            eviction_count: self.stats.eviction_count.load(Ordering::SeqCst),
            expired_count: self.stats.expired_count.load(Ordering::SeqCst),
        }
    }

    fn evict_least_recently_used(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().last_accessed)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            if self.entries.remove(&key).is_some() {
                self.stats.eviction_count.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}

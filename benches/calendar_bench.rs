use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{thread_rng, Rng};
use stay_marketplace::availability::{month_grid, OccupancyPolicy};
use stay_marketplace::calendar_cache::{CacheConfig, CalendarCache};
use stay_marketplace::model::{Booking, BookingStatus, ContactDetails};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_bookings(count: usize) -> Vec<Booking> {
    let mut rng = thread_rng();
    (0..count)
        .map(|i| {
            let start_day = rng.gen_range(1..=25);
            let span = rng.gen_range(1..=4);
            let check_in = date(2025, 6, start_day);
            Booking {
                id: format!("booking-{i}"),
                property_id: "prop-1".to_string(),
                host_id: "host-1".to_string(),
                guest_id: format!("guest-{i}"),
                contact: ContactDetails {
                    name: "Guest".to_string(),
                    email: "guest@example.com".to_string(),
                    phone: "555 0100".to_string(),
                },
                check_in,
                check_out: check_in + chrono::Duration::days(span),
                guests: 2,
                total_amount: 100.0 * span as f64,
                nights: span as u32,
                status: if i % 3 == 0 {
                    BookingStatus::Pending
                } else {
                    BookingStatus::Confirmed
                },
            }
        })
        .collect()
}

// Resolving one display month against booking sets of increasing size
pub fn month_resolution_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("calendar_month_resolution");

    let mut blocked = HashMap::new();
    for day in [4, 12, 18] {
        blocked.insert(date(2025, 6, day), true);
    }

    for booking_count in [10, 100, 1000].iter() {
        let bookings = sample_bookings(*booking_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(booking_count),
            booking_count,
            |b, _| {
                b.iter(|| {
                    let grid = month_grid(
                        2025,
                        6,
                        black_box(&blocked),
                        black_box(&bookings),
                        OccupancyPolicy::ConfirmedOnly,
                    )
                    .unwrap();
                    black_box(grid)
                });
            },
        );
    }

    group.finish();
}

// Mixed cache traffic across many properties and months
pub fn cache_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("calendar_cache");

    for max_entries in [64, 512].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(max_entries),
            max_entries,
            |b, &max_entries| {
                let bookings = sample_bookings(50);
                let blocked = HashMap::new();
                let grid = month_grid(2025, 6, &blocked, &bookings, OccupancyPolicy::ConfirmedOnly)
                    .unwrap();

                b.iter(|| {
                    let cache = CalendarCache::new(CacheConfig {
                        max_entries,
                        ttl: Duration::from_secs(300),
                    });
                    let mut rng = thread_rng();

                    for _ in 0..1000 {
                        let property = format!("prop-{}", rng.gen_range(0..100));
                        let month = rng.gen_range(1..=12);
                        if rng.gen_bool(0.3) {
                            // 30% writes
                            cache.store(&property, 2025, month, grid.clone());
                        } else {
                            // 70% reads
                            let _ = cache.get(&property, 2025, month);
                        }
                    }

                    black_box(cache.stats())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, month_resolution_benchmark, cache_benchmark);
criterion_main!(benches);

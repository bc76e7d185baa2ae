use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use exercise_tracker::db::{ExerciseStore, MemoryDb};
use exercise_tracker::models::{Exercise, LogQuery};
use exercise_tracker::services::ExerciseService;
use std::hint::black_box;
use std::sync::Arc;

fn benchmark_log_queries(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();

    // Ten users with a year of daily exercises each
    let store = Arc::new(MemoryDb::new());
    let user_ids: Vec<u64> = runtime.block_on(async {
        let mut ids = Vec::new();
        for n in 0..10 {
            let user = store
                .create_user(&format!("athlete_{}", n))
                .await
                .expect("Failed to create user");
            for day in 0..365 {
                store
                    .insert_exercise(&Exercise {
                        user_id: user.id,
                        description: format!("Session {}", day),
                        duration: 30 + (day % 60) as u32,
                        date: start + Duration::days(day),
                    })
                    .await
                    .expect("Failed to insert exercise");
            }
            ids.push(user.id);
        }
        ids
    });

    let service = ExerciseService::new(store);
    let month = LogQuery {
        user_id: user_ids[5],
        from: Some(start + Duration::days(120)),
        to: Some(start + Duration::days(150)),
        limit: Some(100),
    };
    let year = LogQuery {
        from: Some(start),
        to: Some(start + Duration::days(365)),
        limit: Some(1000),
        ..month
    };

    let mut group = c.benchmark_group("exercise_log");

    group.bench_function("one_month_window", |b| {
        b.iter(|| runtime.block_on(service.get_log(black_box(month))))
    });

    group.bench_function("full_year_window", |b| {
        b.iter(|| runtime.block_on(service.get_log(black_box(year))))
    });

    group.finish();
}

criterion_group!(benches, benchmark_log_queries);
criterion_main!(benches);

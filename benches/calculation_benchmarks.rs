//! Performance benchmarks for the Freelance Rate Engine.
//!
//! Covers the pure calculators and the full `/calculate` round trip:
//! - Base rate computation
//! - Location adjustment
//! - Quote through the router, with and without a client location
//! - Batches of 100 quotes across every known city
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use freelance_rate_engine::api::{AppState, create_router};
use freelance_rate_engine::calculation::{adjust_for_location, compute_base_rate};
use freelance_rate_engine::config::ReferenceDataLoader;
use freelance_rate_engine::models::{ExpenseConfig, ScheduleConfig};

use axum::{Router, body::Body, http::Request};
use tower::ServiceExt;

/// Loads the bundled reference data.
fn load_reference() -> ReferenceDataLoader {
    ReferenceDataLoader::load("./config/reference").expect("Failed to load config")
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sample_inputs() -> (ExpenseConfig, ScheduleConfig) {
    (
        ExpenseConfig {
            monthly_expenses: decimal("2000"),
            savings_percent: decimal("20"),
            extra_percent: decimal("10"),
            tax_percent: decimal("15"),
        },
        ScheduleConfig {
            work_hours_per_day: decimal("8"),
            work_days_per_week: decimal("5"),
            vacation_days_per_year: decimal("30"),
        },
    )
}

/// Creates a quote request body, optionally for a client city.
fn create_request_body(client: Option<(&str, &str)>) -> String {
    let mut request = serde_json::json!({
        "profession": "backend",
        "experience_level": "senior",
        "state": "sp",
        "expenses": {
            "monthly_expenses": "2000",
            "savings_percent": "20",
            "extra_percent": "10",
            "tax_percent": "15"
        },
        "schedule": {
            "work_hours_per_day": "8",
            "work_days_per_week": "5",
            "vacation_days_per_year": "30"
        }
    });
    if let Some((city, country)) = client {
        request["client_location"] = serde_json::json!({ "city": city, "country": country });
    }
    request.to_string()
}

async fn post_quote(router: Router, body: String) -> axum::response::Response {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

fn bench_base_rate(c: &mut Criterion) {
    let (expenses, schedule) = sample_inputs();

    c.bench_function("base_rate", |b| {
        b.iter(|| compute_base_rate(black_box(&expenses), Decimal::ONE_HUNDRED, &schedule))
    });
}

fn bench_location_adjustment(c: &mut Criterion) {
    let reference = load_reference();
    let location = reference
        .find_location("San Francisco", "United States")
        .unwrap()
        .clone();
    let base_rate = decimal("19.95");
    let exchange_rate = decimal("5.57");

    c.bench_function("location_adjustment", |b| {
        b.iter(|| adjust_for_location(black_box(base_rate), &location, exchange_rate))
    });
}

fn bench_quote(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_reference()));

    let mut group = c.benchmark_group("quote");
    for (name, client) in [
        ("home", None),
        ("client_location", Some(("Berlin", "Germany"))),
    ] {
        let body = create_request_body(client);
        group.bench_with_input(BenchmarkId::new("calculate", name), &body, |b, body| {
            b.to_async(&rt).iter(|| async {
                let response = post_quote(router.clone(), body.clone()).await;
                black_box(response)
            })
        });
    }
    group.finish();
}

fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let reference = load_reference();

    let requests: Vec<String> = reference
        .all_cities()
        .iter()
        .cycle()
        .take(100)
        .map(|l| create_request_body(Some((&l.city, &l.country))))
        .collect();
    let router = create_router(AppState::new(reference));

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(requests.len());
            for body in &requests {
                results.push(post_quote(router.clone(), body.clone()).await);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_base_rate,
    bench_location_adjustment,
    bench_quote,
    bench_batch_100,
);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use library_manager::{FeePolicy, LibraryManager, LogNotifier, UserDirectory};
use rand::Rng;
use std::hint::black_box;

fn bench_late_fee(c: &mut Criterion) {
    let policy = FeePolicy::default();
    let mut rng = rand::rng();
    let days: Vec<i64> = (0..1024).map(|_| rng.random_range(0..365)).collect();

    let mut group = c.benchmark_group("late_fee");
    group.bench_function("default_policy", |b| {
        b.iter(|| {
            for &d in &days {
                drop(black_box(policy.late_fee(black_box(d), true, true)));
            }
        });
    });
    group.finish();
}

fn bench_circulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("circulation");

    for titles in [10_usize, 1_000] {
        group.bench_with_input(BenchmarkId::new("borrow_return", titles), &titles, |b, &titles| {
            let directory: UserDirectory = ["reader"].into_iter().collect();
            let mut library = LibraryManager::new(Box::new(directory), Box::new(LogNotifier));
            let books: Vec<String> = (0..titles).map(|i| format!("book-{i}")).collect();
            for book in &books {
                library.add_book(book, 1);
            }

            b.iter(|| {
                for book in &books {
                    black_box(library.borrow_book(book, "reader"));
                    black_box(library.return_book(book, "reader"));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_late_fee, bench_circulation);
criterion_main!(benches);

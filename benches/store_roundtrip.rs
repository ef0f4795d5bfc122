//! Benchmark suite for account store persistence
//!
//! Measures how long it takes to save and load stores of different sizes
//! through the JSON file storage, using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use rust_atm_terminal::{Account, AccountMap, AccountStorage, AccountStore, JsonFileStorage, Pin};
use tempfile::TempDir;

fn main() {
    divan::main();
}

const SIZES: &[usize] = &[10, 1_000, 100_000];

/// Build `count` funded accounts
fn accounts(count: usize) -> AccountMap {
    let pin = Pin::parse("1234").expect("valid PIN");
    (0..count)
        .map(|i| {
            let username = format!("user{:06}", i);
            let balance = ((i % 100) as u64 + 1) * 10;
            let account =
                Account::restore(username.clone(), pin.clone(), balance).expect("valid balance");
            (username, account)
        })
        .collect()
}

/// Benchmark saving a full store to disk
#[divan::bench(args = SIZES, sample_count = 20)]
fn save_to_file(bencher: divan::Bencher, count: usize) {
    let accounts = accounts(count);
    let dir = TempDir::new().expect("temp dir");
    let mut storage = JsonFileStorage::open(dir.path().join("users.json")).expect("open");

    bencher.bench_local(|| storage.save(&accounts).expect("save"));
}

/// Benchmark loading a full store from disk
#[divan::bench(args = SIZES, sample_count = 20)]
fn load_from_file(bencher: divan::Bencher, count: usize) {
    let dir = TempDir::new().expect("temp dir");
    let mut storage = JsonFileStorage::open(dir.path().join("users.json")).expect("open");
    storage.save(&accounts(count)).expect("save");

    bencher.bench_local(|| storage.load().expect("load"));
}

/// Benchmark the user-creation path, which persists on every call
#[divan::bench(args = [10, 100], sample_count = 20)]
fn create_users(bencher: divan::Bencher, count: usize) {
    bencher
        .with_inputs(|| {
            let dir = TempDir::new().expect("temp dir");
            let storage = JsonFileStorage::open(dir.path().join("users.json")).expect("open");
            (dir, AccountStore::load(storage).expect("load"))
        })
        .bench_local_values(|(_dir, mut store)| {
            let pin = Pin::parse("1234").expect("valid PIN");
            for i in 0..count {
                store
                    .create(&format!("user{:06}", i), pin.clone())
                    .expect("create");
            }
        });
}

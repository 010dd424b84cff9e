use criterion::{black_box, criterion_group, criterion_main, Criterion};

use std::path::PathBuf;

use anyhow::Result;
use spelt::{HunspellDict, Speller};

fn load_speller(dir: &str, name: &str) -> Result<HunspellDict> {
    let dictpath = PathBuf::from(format!("{}/{}.dic", dir, name));
    let affpath = PathBuf::from(format!("{}/{}.aff", dir, name));
    HunspellDict::new(&dictpath, &affpath)
}

fn criterion_benchmark(c: &mut Criterion) {
    // Relative path of the files depends on whether we are called by
    // cargo bench or cargo flamegraph
    let speller = load_speller("tests/fixtures", "mini")
        .or_else(|_| load_speller("spelt/tests/fixtures", "mini"))
        .unwrap();

    c.bench_function("suggest_mini_typo", |b| {
        b.iter(|| speller.suggestions(black_box("cta"), 5))
    });

    c.bench_function("suggest_mini_rep", |b| {
        b.iter(|| speller.suggestions(black_box("teh"), 5))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

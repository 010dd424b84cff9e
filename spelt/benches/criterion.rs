use criterion::{black_box, criterion_group, criterion_main, Criterion};

use std::path::PathBuf;

use spelt::{HunspellDict, Speller};

fn find_dict(name: &str) -> (PathBuf, PathBuf) {
    // Relative path of the files depends on whether we are called by
    // cargo bench or cargo flamegraph
    for dir in ["benches/files", "spelt/benches/files", "tests/fixtures", "spelt/tests/fixtures"].iter() {
        let dictpath = PathBuf::from(&format!("{}/{}.dic", dir, name));
        let affpath = PathBuf::from(&format!("{}/{}.aff", dir, name));
        if !dictpath.exists() || !affpath.exists() {
            continue;
        }
        match HunspellDict::new(&dictpath, &affpath) {
            Ok(_) => return (dictpath, affpath),
            Err(e) => eprintln!("{:#}", e),
        }
    }
    panic!("Could not find dictionary for {}", name);
}

fn load_speller(name: &str) -> impl Speller {
    let (dictpath, affpath) = find_dict(name);
    HunspellDict::new(&dictpath, &affpath).unwrap()
}

fn load_mini(c: &mut Criterion) {
    let (dictpath, affpath) = find_dict("mini");

    c.bench_function("load_mini", |b| {
        b.iter(|| HunspellDict::new(&dictpath, &affpath))
    });
}

fn spellcheck_mini(c: &mut Criterion) {
    let speller = load_speller("mini");
    let words = ["cat", "cats", "ponies", "unhappy", "sunset", "zorblax"];

    c.bench_function("spellcheck_mini", |b| {
        b.iter(|| {
            for word in &words {
                black_box(speller.spellcheck(word));
            }
        })
    });
}

criterion_group!(load, load_mini);
criterion_group!(spellcheck, spellcheck_mini);
criterion_main!(load, spellcheck);

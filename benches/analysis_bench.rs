use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crypto_wp::{analyze_crypto_algorithm, AnalyzerOptions, SecurityAnalyzer};

const CAESAR_LISTING: &str = r#"function encrypt(text, key) {
    shift := key % 32;
    result := "";
    foreach char in text {
        if (char in alphabet) {
            idx := alphabet.indexOf(char);
            new_idx := (idx + shift) % alphabet.length;
            result := result + alphabet[new_idx];
        }
    }
    return result;
}"#;

fn placeholder_benchmark(c: &mut Criterion) {
    c.bench_function("analyze caesar listing", |b| {
        b.iter(|| {
            analyze_crypto_algorithm(
                black_box("caesar"),
                black_box(CAESAR_LISTING),
                black_box("decrypt(encrypt(text, key), key) == text"),
            )
        })
    });
}

fn structured_benchmark(c: &mut Criterion) {
    let analyzer = SecurityAnalyzer::new(AnalyzerOptions::structured());

    c.bench_function("analyze caesar listing (structured)", |b| {
        b.iter(|| {
            analyzer.analyze(
                black_box("caesar"),
                black_box(CAESAR_LISTING),
                black_box("decrypt(encrypt(text, key), key) == text"),
            )
        })
    });
}

fn long_program_benchmark(c: &mut Criterion) {
    let program: String = (0..200)
        .map(|i| format!("x{} := x{} + {}\n", i + 1, i, i))
        .collect();

    c.bench_function("analyze 200 chained assignments", |b| {
        b.iter(|| {
            analyze_crypto_algorithm(
                black_box("rsa"),
                black_box(&program),
                black_box("x200 > 1"),
            )
        })
    });
}

criterion_group!(
    benches,
    placeholder_benchmark,
    structured_benchmark,
    long_program_benchmark
);
criterion_main!(benches);

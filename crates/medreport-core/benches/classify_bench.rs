use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

use medreport_core::{extract_kind, DocumentKind, ReportClassifier};

const SAMPLE: &str = "Patient presents with acute cough and fever. History of asthma and \
hypertension. Reports mild fatigue over the past week; no headache. Condition is stable \
but will be reviewed if symptoms become severe.";

fn report_of_size(paragraphs: usize) -> String {
    let mut text = String::with_capacity(SAMPLE.len() * paragraphs + paragraphs);
    for _ in 0..paragraphs {
        text.push_str(SAMPLE);
        text.push('\n');
    }
    text
}

fn classify_benchmark(c: &mut Criterion) {
    let classifier = ReportClassifier::default();

    c.bench_function("classify_sample", |b| {
        b.iter(|| classifier.classify(black_box(SAMPLE)));
    });
}

fn classify_sizes_benchmark(c: &mut Criterion) {
    let classifier = ReportClassifier::default();
    let mut group = c.benchmark_group("classify_sizes");

    for paragraphs in [1, 10, 100, 1000].iter() {
        let text = report_of_size(*paragraphs);
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &text, |b, text| {
            b.iter(|| classifier.classify(black_box(text)));
        });
    }

    group.finish();
}

fn extract_txt_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let content = report_of_size(100).into_bytes();

    c.bench_function("extract_txt_100_paragraphs", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = extract_kind(black_box(&content), DocumentKind::Txt)
                .await
                .unwrap();
        });
    });
}

criterion_group!(
    benches,
    classify_benchmark,
    classify_sizes_benchmark,
    extract_txt_benchmark
);
criterion_main!(benches);

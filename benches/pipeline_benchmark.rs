//! Benchmarks for the record pipeline.
//!
//! Measures splitting and classifying for different chunk sizes.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tutor::stream::{classify_record, RecordSplitter, TrailingRecordPolicy, Utf8Decoder};

/// A lesson-shaped body: text records with an audio record every few lines.
fn generate_body(records: usize) -> Vec<u8> {
    (0..records)
        .map(|i| {
            if i % 5 == 4 {
                format!(
                    "{{\"type\":\"audio\",\"audio_url\":\"http://cdn/unit{}/part{}.mp3\",\"unit\":\"Unit {}\",\"chunk_index\":{}}}\n",
                    i / 20,
                    i,
                    i / 20 + 1,
                    i % 20
                )
            } else {
                format!(
                    "{{\"type\":\"text\",\"content\":\"Sentence {} about the water cycle, evaporation and rain. \"}}\n",
                    i
                )
            }
        })
        .collect::<String>()
        .into_bytes()
}

fn bench_split(c: &mut Criterion) {
    let body = generate_body(1_000);
    let mut group = c.benchmark_group("split_records");
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [16usize, 256, 4096].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut decoder = Utf8Decoder::new();
                    let mut splitter = RecordSplitter::new(TrailingRecordPolicy::Discard);
                    let mut count = 0;
                    for chunk in body.chunks(chunk_size) {
                        count += splitter.push(&decoder.decode(black_box(chunk))).len();
                    }
                    count
                });
            },
        );
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let text = r#"{"type":"text","content":"Plants turn light into chemical energy."}"#;
    let audio = r#"{"type":"audio","audio_url":"http://cdn/u1/p3.mp3","unit":"Unit 1","chunk_index":3}"#;
    let raw = "not json at all, just prose";

    let mut group = c.benchmark_group("classify_record");
    group.bench_function("text", |b| b.iter(|| classify_record(black_box(text))));
    group.bench_function("audio", |b| b.iter(|| classify_record(black_box(audio))));
    group.bench_function("raw_fallback", |b| b.iter(|| classify_record(black_box(raw))));
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let body = generate_body(1_000);
    c.bench_function("pipeline_1000_records", |b| {
        b.iter(|| {
            let mut decoder = Utf8Decoder::new();
            let mut splitter = RecordSplitter::new(TrailingRecordPolicy::Discard);
            let mut events = Vec::new();
            for chunk in body.chunks(1024) {
                for record in splitter.push(&decoder.decode(chunk)) {
                    events.push(classify_record(&record));
                }
            }
            black_box(events)
        });
    });
}

criterion_group!(benches, bench_split, bench_classify, bench_pipeline);
criterion_main!(benches);

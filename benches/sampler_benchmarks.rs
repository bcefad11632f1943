use criterion::{black_box, criterion_group, criterion_main, Criterion};
use npu_exporter::{
    metrics::sink::encode_registry, PrometheusSink, SampleReader, SysfsReader,
    UtilizationSampler,
};
use std::cell::Cell;
use std::io::Write;

/// Reader producing a steadily increasing counter without touching the filesystem.
struct SteadyReader {
    value: Cell<f64>,
}

impl SampleReader for SteadyReader {
    fn read(&self) -> Option<f64> {
        let next = self.value.get() + 10.0;
        self.value.set(next);
        Some(next)
    }
}

/// Benchmark the derivation logic in isolation
fn bench_tick(c: &mut Criterion) {
    let reader = SteadyReader { value: Cell::new(0.0) };
    let sink = PrometheusSink::new().expect("Should create sink");
    let mut sampler = UtilizationSampler::new(reader, sink, 0.0);
    let mut now = 0.0;

    c.bench_function("sampler_tick", |b| {
        b.iter(|| {
            now += 0.01;
            black_box(sampler.tick(black_box(now)))
        })
    });
}

/// Benchmark reading and parsing a sysfs-style file
fn bench_sysfs_read(c: &mut Criterion) {
    let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
    writeln!(file, "123456789").expect("Should write runtime");
    let reader = SysfsReader::new(file.path());

    c.bench_function("sysfs_read", |b| b.iter(|| black_box(reader.read())));
}

/// Benchmark rendering the registry for a scrape
fn bench_encode(c: &mut Criterion) {
    let sink = PrometheusSink::new().expect("Should create sink");
    let registry = sink.registry();

    c.bench_function("encode_registry", |b| {
        b.iter(|| encode_registry(black_box(&registry)).expect("Should encode"))
    });
}

criterion_group!(benches, bench_tick, bench_sysfs_read, bench_encode);
criterion_main!(benches);

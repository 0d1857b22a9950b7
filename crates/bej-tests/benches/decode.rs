use std::io;

use bej_decoder::BejDecoder;
use bej_dictionary::Dictionary;
use bej_tests::{PayloadBuilder, Value, member, thermal};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn bench_dictionary_load(c: &mut Criterion) {
    let bytes = thermal::schema().build();

    c.bench_function("dictionary_load", |b| {
        b.iter(|| Dictionary::load(bytes.as_slice()).unwrap());
    });
}

fn bench_decode_thermal(c: &mut Criterion) {
    let dict = thermal::schema().load();
    let payload = thermal::payload().build();
    let decoder = BejDecoder::new(&dict);

    c.bench_function("decode_thermal", |b| {
        b.iter(|| decoder.decode_to_string(&payload).unwrap());
    });
}

fn bench_decode_sink_vs_string(c: &mut Criterion) {
    let dict = thermal::schema().load();
    let payload = thermal::payload().build();
    let decoder = BejDecoder::new(&dict);

    let mut group = c.benchmark_group("decode_output");
    group.bench_function("string", |b| {
        b.iter(|| decoder.decode_to_string(&payload).unwrap());
    });
    group.bench_function("sink", |b| {
        b.iter(|| decoder.decode_to_writer(&payload, io::sink()).unwrap());
    });
    group.finish();
}

fn bench_decode_throughput(c: &mut Criterion) {
    let dict = thermal::schema().load();
    let decoder = BejDecoder::new(&dict);
    let mut group = c.benchmark_group("decode_throughput");

    for fans in [10, 100, 1_000] {
        let elements = (0..fans).map(|i| thermal::fan(&i.to_string(), 4000 + i, (i % 3) as u64));
        let payload = PayloadBuilder::new(Value::set([member(0, Value::array(elements))])).build();

        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("fans", fans),
            &payload,
            |b, p| b.iter(|| decoder.decode_to_string(p).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_dictionary_load,
    bench_decode_thermal,
    bench_decode_sink_vs_string,
    bench_decode_throughput
);
criterion_main!(benches);

use bloomlink::config::{default_schema, default_thresholds};
use bloomlink::{relink_segmented, sorenson_dice, SegmentLayout};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_encode_record(c: &mut Criterion) {
    let schema = default_schema();
    c.bench_function("encode_record", |b| {
        b.iter(|| {
            schema
                .encode_record(black_box(&["Maximilian", "Huber", "1984-02-29", "m"]))
                .unwrap()
        })
    });
}

fn bench_sorenson_dice(c: &mut Criterion) {
    let schema = default_schema();
    let a = schema.encode_record(&["Anna", "Maier", "12.05.1990", "f"]).unwrap();
    let b = schema.encode_record(&["Anne", "Mayer", "12.05.1990", "f"]).unwrap();
    c.bench_function("sorenson_dice_2016_bits", |bench| {
        bench.iter(|| sorenson_dice(black_box(&a), black_box(&b)).unwrap())
    });
}

fn bench_relink_1000_rows(c: &mut Criterion) {
    let schema = default_schema();
    let layout = SegmentLayout::from_schema(&schema).unwrap();
    let thresholds = default_thresholds();

    let rows: Vec<(u64, Vec<u8>)> = (0..1000)
        .map(|i| {
            let first = format!("Person{i}");
            let last = format!("Family{}", i % 97);
            let dob = format!("{:02}.{:02}.19{:02}", 1 + i % 28, 1 + i % 12, 40 + i % 60);
            let bytes = schema
                .encode_record_bytes(&[&first, &last, &dob, "other"])
                .unwrap();
            (i as u64, bytes)
        })
        .collect();
    let query = schema.encode_record(&["Person500", "Family15", "13.05.1980", "other"]).unwrap();

    c.bench_function("relink_segmented_1000_rows", |bench| {
        bench.iter(|| {
            relink_segmented(
                black_box(&query),
                black_box(&rows),
                &layout,
                &thresholds,
                true,
                false,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_encode_record, bench_sorenson_dice, bench_relink_1000_rows);
criterion_main!(benches);

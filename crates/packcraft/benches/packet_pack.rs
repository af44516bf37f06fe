use criterion::{Criterion, criterion_group, criterion_main};
use packcraft::{
    BitPacker, BitValues, NumericField, NumericType, PacketComposer, PacketValue, Value,
};

fn gen_composer(field_count: usize) -> PacketComposer {
    let mut builder = PacketComposer::builder();

    for i in 0..field_count {
        builder = if i % 2 == 0 {
            builder.field(format!("n{}", i), NumericField::big_endian(NumericType::U32))
        } else {
            builder.field(
                format!("b{}", i),
                BitPacker::big_endian(NumericType::U16, [("hi", 3), ("mid", 6), ("lo", 7)])
                    .unwrap(),
            )
        };
    }

    builder.build().unwrap()
}

fn gen_values(field_count: usize) -> PacketValue {
    let mut values = PacketValue::with_capacity(field_count);

    // Deterministic but non-trivial pattern
    for i in 0..field_count {
        if i % 2 == 0 {
            values.insert(format!("n{}", i), Value::U64((i * 31 % 256) as u64));
        } else {
            values.insert(
                format!("b{}", i),
                Value::Bits(BitValues::from([
                    ("hi", (i % 8) as u64),
                    ("mid", (i % 64) as u64),
                    ("lo", (i % 128) as u64),
                ])),
            );
        }
    }

    values
}

fn bench_packet(c: &mut Criterion) {
    for &field_count in &[1usize, 10, 50, 100] {
        let composer = gen_composer(field_count);
        let values = gen_values(field_count);
        let packet = composer.pack(&values).unwrap();

        c.bench_function(&format!("pack_{}_fields", field_count), |b| {
            b.iter(|| {
                let _ = composer.pack(&values).unwrap();
            })
        });

        c.bench_function(&format!("unpack_{}_fields", field_count), |b| {
            b.iter(|| {
                let _ = composer.unpack(&packet).unwrap();
            })
        });
    }
}

criterion_group!(benches, bench_packet);
criterion_main!(benches);

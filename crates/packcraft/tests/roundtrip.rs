use packcraft::{
    BitPacker, BitValues, CodecError, ConfigError, Endianness, NumericField, NumericType,
    PacketComposer, PacketValue, RawField, Value,
};
use proptest::prelude::*;

const CONTAINERS: [NumericType; 4] = [
    NumericType::U8,
    NumericType::U16,
    NumericType::U32,
    NumericType::U64,
];

fn endianness() -> impl Strategy<Value = Endianness> {
    prop_oneof![Just(Endianness::Big), Just(Endianness::Little)]
}

/// Splits the container width into 1..=8 subfields of at least one bit each.
fn bit_layout() -> impl Strategy<Value = (NumericType, Vec<u32>)> {
    (0..CONTAINERS.len(), 1usize..=8).prop_flat_map(|(index, parts)| {
        let container = CONTAINERS[index];
        let total = container.bits();
        let parts = parts.min(total as usize);

        proptest::sample::subsequence((1..total).collect::<Vec<_>>(), parts - 1).prop_map(
            move |cuts| {
                let mut widths = Vec::with_capacity(parts);
                let mut last = 0;
                for cut in cuts.into_iter().chain(std::iter::once(total)) {
                    widths.push(cut - last);
                    last = cut;
                }
                (container, widths)
            },
        )
    })
}

fn packer_and_values() -> impl Strategy<Value = (BitPacker, BitValues)> {
    (bit_layout(), endianness()).prop_flat_map(|((container, widths), endianness)| {
        let values = widths
            .iter()
            .map(|&bits| {
                if bits == 64 {
                    any::<u64>().boxed()
                } else {
                    (0..(1u64 << bits)).boxed()
                }
            })
            .collect::<Vec<_>>();

        (values, Just((container, widths, endianness))).prop_map(
            |(values, (container, widths, endianness))| {
                let names: Vec<String> = (0..widths.len()).map(|i| format!("f{i}")).collect();
                let packer = BitPacker::new(
                    container,
                    names.iter().cloned().zip(widths.iter().copied()),
                    endianness,
                )
                .unwrap();
                let values = names.into_iter().zip(values).collect::<BitValues>();
                (packer, values)
            },
        )
    })
}

proptest! {
    #[test]
    fn bit_fields_round_trip((packer, values) in packer_and_values()) {
        let packed = packer.pack_fields(&values).unwrap();
        prop_assert_eq!(packed.len(), packer.container().size());
        prop_assert_eq!(packer.unpack_fields(&packed).unwrap(), values);
    }

    #[test]
    fn bit_integer_round_trip(
        index in 0..CONTAINERS.len(),
        raw in any::<u64>(),
        endianness in endianness(),
    ) {
        let container = CONTAINERS[index];
        let value = raw & packcraft::bits::low_mask(container.bits());
        let packer = BitPacker::new(container, [("all", container.bits())], endianness).unwrap();

        let packed = packer.pack_integer(value).unwrap();
        prop_assert_eq!(packer.unpack_integer(&packed).unwrap(), value);
        prop_assert_eq!(packer.unpack_with(&packed, true).unwrap(), Value::U64(value));
    }

    #[test]
    fn subfield_out_of_range_is_rejected(extra in 0u64..1000) {
        let packer = BitPacker::big_endian(NumericType::U16, [("a", 3), ("b", 13)]).unwrap();
        let values = BitValues::from([("a", 8 + extra), ("b", 0)]);
        let is_range_error = matches!(packer.pack_fields(&values), Err(CodecError::Range { .. }));
        prop_assert!(is_range_error);
    }

    #[test]
    fn width_mismatch_is_rejected(index in 0..CONTAINERS.len(), a in 1u32..40, b in 1u32..40) {
        let container = CONTAINERS[index];
        prop_assume!(a + b != container.bits());
        let is_width_mismatch = matches!(
            BitPacker::big_endian(container, [("a", a), ("b", b)]),
            Err(ConfigError::WidthMismatch { .. })
        );
        prop_assert!(is_width_mismatch);
    }

    #[test]
    fn composer_round_trip(
        a in any::<u8>(),
        b in any::<i32>(),
        c in any::<f64>().prop_filter("NaN never compares equal", |v| !v.is_nan()),
        raw in proptest::collection::vec(any::<u8>(), 3),
        mode in 0u64..8,
        level in 0u64..8192,
        endianness in endianness(),
    ) {
        let composer = PacketComposer::builder()
            .field("a", NumericField::new(NumericType::U8, endianness))
            .field("b", NumericField::new(NumericType::I32, endianness))
            .field("c", NumericField::new(NumericType::F64, endianness))
            .field("raw", RawField::new(3).unwrap())
            .field(
                "flags",
                BitPacker::new(NumericType::U16, [("mode", 3), ("level", 13)], endianness)
                    .unwrap(),
            )
            .build()
            .unwrap();

        let values = PacketValue::new()
            .with("a", Value::U64(a.into()))
            .with("b", Value::I64(b.into()))
            .with("c", Value::F64(c))
            .with("raw", Value::Bytes(raw))
            .with("flags", Value::Bits(BitValues::from([("mode", mode), ("level", level)])));

        let packed = composer.pack(&values).unwrap();
        prop_assert_eq!(packed.len(), composer.length());
        prop_assert_eq!(composer.unpack(&packed).unwrap(), values);
    }

    #[test]
    fn composer_rejects_reordered_keys(a in any::<u8>(), b in any::<u16>()) {
        let composer = PacketComposer::builder()
            .field("a", NumericField::big_endian(NumericType::U8))
            .field("b", NumericField::big_endian(NumericType::U16))
            .build()
            .unwrap();
        let values = PacketValue::from([("b", Value::U64(b.into())), ("a", Value::U64(a.into()))]);
        let is_shape_error = matches!(composer.pack(&values), Err(CodecError::Shape { .. }));
        prop_assert!(is_shape_error);
    }
}

#[test]
fn scenario_bit_packer_endianness() {
    let values = BitValues::from([("f1", 7), ("f2", 20), ("f3", 30)]);
    let layout = [("f1", 3), ("f2", 6), ("f3", 7)];

    let big = BitPacker::new(NumericType::U16, layout, Endianness::Big).unwrap();
    let little = BitPacker::new(NumericType::U16, layout, Endianness::Little).unwrap();

    assert_eq!(big.pack_fields(&values).unwrap(), vec![0xEA, 0x1E]);
    assert_eq!(little.pack_fields(&values).unwrap(), vec![0x1E, 0xEA]);
}

#[test]
fn scenario_composer_length_and_pack() {
    let composer = PacketComposer::builder()
        .field("a", NumericField::big_endian(NumericType::U8))
        .field("b", NumericField::big_endian(NumericType::U32))
        .build()
        .unwrap();
    assert_eq!(composer.length(), 5);

    let values = PacketValue::from([("a", Value::U64(1)), ("b", Value::U64(0x01020304))]);
    assert_eq!(
        composer.pack(&values).unwrap(),
        vec![0x01, 0x01, 0x02, 0x03, 0x04]
    );
    assert_eq!(
        composer.unpack(&[0; 6]),
        Err(CodecError::Length {
            expected: 5,
            actual: 6
        })
    );
}

#[test]
fn composer_is_shareable_across_threads() {
    let composer = std::sync::Arc::new(
        PacketComposer::builder()
            .field("n", NumericField::big_endian(NumericType::U32))
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            let composer = composer.clone();
            std::thread::spawn(move || {
                let values = PacketValue::from([("n", Value::U64(i))]);
                composer.unpack(&composer.pack(&values).unwrap()).unwrap() == values
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

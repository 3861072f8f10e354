use assert_matches::assert_matches;

use cbor_det::{self as cbor, Config, Decoder, Encode, Encoder, Error, SliceSink, SliceSource};

fn encode_bytes<T: cbor::Encode>(value: &T, config: Config) -> Vec<u8> {
    let mut buf = [0u8; 512];
    let mut enc = Encoder::new(SliceSink::new(&mut buf), config);
    enc.encode(value).unwrap();
    let written = enc.finish().unwrap().position();
    buf[..written].to_vec()
}

fn decode_value<T: cbor::Decode>(bytes: &[u8], config: Config) -> cbor::Result<T> {
    let mut dec = Decoder::new(SliceSource::new(bytes), config);
    dec.decode()
}

cbor_det::cbor_record! {
    #[derive(PartialEq)]
    pub struct Person {
        required name: String,
        required age: u32,
        required active: bool,
    }
}

// Concrete scenario 1: `encode(u8 = 0)` is the single byte `00`.
#[test]
fn scenario_uint_zero_is_single_byte() {
    let encoded = encode_bytes(&0u8, Config::default());
    assert_eq!(encoded, vec![0x00]);
    let back: u8 = decode_value(&encoded, Config::default()).unwrap();
    assert_eq!(back, 0);
}

// Concrete scenario 2: small negative integers round-trip through the `-(n+1)` transform and
// switch argument class at the same boundaries as their unsigned counterparts.
#[test]
fn scenario_negative_integers_match_concrete_bytes() {
    assert_eq!(encode_bytes(&-1i8, Config::default()), vec![0x20]);
    assert_eq!(encode_bytes(&-24i8, Config::default()), vec![0x37]);
    assert_eq!(encode_bytes(&-25i8, Config::default()), vec![0x38, 0x18]);

    for &v in &[-1i64, -24, -25, -256, -257, -65_536, -65_537] {
        let encoded = encode_bytes(&v, Config::default());
        let back: i64 = decode_value(&encoded, Config::default()).unwrap();
        assert_eq!(back, v);
    }
}

// Concrete scenario 3.
#[test]
fn scenario_u32_one_million_matches_concrete_bytes() {
    let encoded = encode_bytes(&1_000_000u32, Config::default());
    assert_eq!(encoded, vec![0x1A, 0x00, 0x0F, 0x42, 0x40]);
    let back: u32 = decode_value(&encoded, Config::default()).unwrap();
    assert_eq!(back, 1_000_000);
}

// Concrete scenario 4.
#[test]
fn scenario_text_string_hello_matches_concrete_bytes() {
    let encoded = encode_bytes(&"hello".to_string(), Config::default());
    assert_eq!(encoded, vec![0x65, 0x68, 0x65, 0x6C, 0x6C, 0x6F]);
    let mut dec = Decoder::new(SliceSource::new(&encoded), Config::default());
    let back = dec.decode_str_ref().unwrap();
    assert_eq!(back, "hello");
}

// Concrete scenario 5.
#[test]
fn scenario_array_of_five_matches_concrete_bytes() {
    let encoded = encode_bytes(&vec![1u32, 2, 3, 4, 5], Config::default());
    assert_eq!(encoded, vec![0x85, 0x01, 0x02, 0x03, 0x04, 0x05]);
}

// Concrete scenario 6: a record round-trips to the documented bytes, and extracting one field
// does not require decoding the others.
#[test]
fn scenario_record_matches_concrete_bytes_and_extracts_one_field() {
    let person = Person {
        name: "Alice".to_string(),
        age: 30,
        active: true,
    };
    let encoded = encode_bytes(&person, Config::default());
    let expected: Vec<u8> = vec![
        0xA3, 0x64, 0x6E, 0x61, 0x6D, 0x65, 0x65, 0x41, 0x6C, 0x69, 0x63, 0x65, 0x63, 0x61, 0x67,
        0x65, 0x18, 0x1E, 0x66, 0x61, 0x63, 0x74, 0x69, 0x76, 0x65, 0xF5,
    ];
    assert_eq!(encoded, expected);

    let mut dec = Decoder::new(SliceSource::new(&encoded), Config::default());
    let age: Option<u32> = dec.extract_field("age").unwrap();
    assert_eq!(age, Some(30));
}

// Concrete scenario 7: an indefinite-length array round-trips when enabled, and is rejected
// outright when the configuration disables indefinite length.
#[test]
fn scenario_indefinite_array_roundtrips_or_is_rejected_by_config() {
    let buf: Vec<u8> = vec![0x9F, 0x01, 0x02, 0x03, 0xFF];
    let back: Vec<u32> = decode_value(&buf, Config::default()).unwrap();
    assert_eq!(back, vec![1, 2, 3]);

    let strict = Config::default().with_enable_indefinite_length(false);
    assert_matches!(
        decode_value::<Vec<u32>>(&buf, strict),
        Err(Error::InvalidIndefiniteLength)
    );
}

// Concrete scenario 8: a truncated argument-class-24 head fails with BufferUnderflow, not a
// panic or a silently wrong value.
#[test]
fn scenario_truncated_head_is_buffer_underflow() {
    let buf = [0x18u8];
    assert_matches!(
        decode_value::<u32>(&buf, Config::default()),
        Err(Error::BufferUnderflow)
    );
}

// Concrete scenario 9.
#[test]
fn scenario_oversized_argument_into_u8_is_integer_overflow() {
    let buf = [0x1Bu8, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    assert_matches!(
        decode_value::<u8>(&buf, Config::default()),
        Err(Error::IntegerOverflow)
    );
}

// Concrete scenario 10.
#[test]
fn scenario_boolean_rejects_unsupported_simple_value_and_wrong_major_type() {
    assert_matches!(decode_value::<bool>(&[0xF8], Config::default()), Err(Error::InvalidBool));
    assert_matches!(
        decode_value::<bool>(&[0x18, 0x2A], Config::default()),
        Err(Error::TypeMismatch(_))
    );
}

// Universal round-trip across the built-in shapes, plus a record and a nested collection.
#[test]
fn universal_roundtrip_across_shapes() {
    let encoded = encode_bytes(&42u32, Config::default());
    assert_eq!(decode_value::<u32>(&encoded, Config::default()).unwrap(), 42);

    let encoded = encode_bytes(&(-17i32), Config::default());
    assert_eq!(decode_value::<i32>(&encoded, Config::default()).unwrap(), -17);

    let encoded = encode_bytes(&f64::NAN, Config::default());
    assert!(decode_value::<f64>(&encoded, Config::default()).unwrap().is_nan());

    let encoded = encode_bytes(&1.5f64, Config::default());
    assert_eq!(decode_value::<f64>(&encoded, Config::default()).unwrap(), 1.5);

    let encoded = encode_bytes(&true, Config::default());
    assert!(decode_value::<bool>(&encoded, Config::default()).unwrap());

    let encoded = encode_bytes(&"héllo wörld".to_string(), Config::default());
    assert_eq!(
        decode_value::<String>(&encoded, Config::default()).unwrap(),
        "héllo wörld"
    );

    let nested = vec![vec![1u32, 2], vec![3, 4, 5], vec![]];
    let encoded = encode_bytes(&nested, Config::default());
    assert_eq!(decode_value::<Vec<Vec<u32>>>(&encoded, Config::default()).unwrap(), nested);

    let person = Person {
        name: "Dana".to_string(),
        age: 52,
        active: false,
    };
    let encoded = encode_bytes(&person, Config::default());
    assert_eq!(decode_value::<Person>(&encoded, Config::default()).unwrap(), person);
}

// Head-encoding minimality at every argument-class boundary.
#[test]
fn boundary_argument_classes_use_minimal_length() {
    let cases: &[(u64, usize)] = &[
        (23, 1),
        (24, 2),
        (255, 2),
        (256, 3),
        (65_535, 3),
        (65_536, 5),
        (0xFFFF_FFFF, 5),
        (0x1_0000_0000, 9),
    ];
    for &(u, expected_len) in cases {
        let encoded = encode_bytes(&u, Config::default());
        assert_eq!(encoded.len(), expected_len, "u = {u}");
    }
}

// Skip invariant: skipping a complete item advances the position exactly as far as decoding it.
#[test]
fn skip_matches_decode_position_across_shapes() {
    let values = vec![vec![1u32, 2], vec![3, 4, 5]];
    let encoded = encode_bytes(&values, Config::default());

    let mut skipper = Decoder::new(SliceSource::new(&encoded), Config::default());
    skipper.skip().unwrap();

    let mut decoder = Decoder::new(SliceSource::new(&encoded), Config::default());
    let _: Vec<Vec<u32>> = decoder.decode().unwrap();

    assert_eq!(skipper.position(), encoded.len());
    assert_eq!(skipper.position(), decoder.position());
}

// Field-extraction idempotence: extraction restores the source position on its own, so repeated
// calls against the same encoded map return equal values every time with no caller bookkeeping.
#[test]
fn extract_field_is_idempotent_with_position_reset() {
    let person = Person {
        name: "Eve".to_string(),
        age: 19,
        active: true,
    };
    let encoded = encode_bytes(&person, Config::default());
    let mut dec = Decoder::new(SliceSource::new(&encoded), Config::default());
    let start = dec.position();

    let first: Option<String> = dec.extract_field("name").unwrap();
    assert_eq!(dec.position(), start);
    let second: Option<String> = dec.extract_field("name").unwrap();
    assert_eq!(dec.position(), start);

    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("Eve"));
}

// The same idempotence guarantee holds over a stream substrate, which cannot seek its underlying
// reader backwards and so relies on extract_field's mark/rewind replay rather than a saved offset.
#[test]
fn extract_field_is_idempotent_over_a_stream_substrate() {
    use cbor::ReaderSource;

    let person = Person {
        name: "Eve".to_string(),
        age: 19,
        active: true,
    };
    let encoded = encode_bytes(&person, Config::default());
    let mut dec = Decoder::new(ReaderSource::new(encoded.as_slice(), 8), Config::default());

    let first: Option<String> = dec.extract_field("name").unwrap();
    let second: Option<String> = dec.extract_field("name").unwrap();

    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("Eve"));
}

// Depth budget boundary: nesting exactly at the configured limit succeeds, one level deeper
// fails with DepthExceeded.
#[test]
fn depth_limit_boundary_exact_and_one_over() {
    fn nested_array_bytes(depth: usize) -> Vec<u8> {
        let mut buf = vec![0u8; 4096];
        let mut enc = Encoder::new(SliceSink::new(&mut buf), Config::default());
        for _ in 0..depth {
            cbor::head::encode_head(enc.sink(), cbor::constants::MT_ARRAY, 1).unwrap();
        }
        0u32.encode(&mut enc).unwrap();
        let written = enc.finish().unwrap().position();
        buf[..written].to_vec()
    }

    let at_limit = Config::default().with_max_depth(4);
    let encoded = nested_array_bytes(4);
    assert!(decode_value::<Vec<Vec<Vec<Vec<u32>>>>>(&encoded, at_limit.clone()).is_ok());

    let one_over = Config::default().with_max_depth(3);
    assert_matches!(
        decode_value::<Vec<Vec<Vec<Vec<u32>>>>>(&encoded, one_over),
        Err(Error::DepthExceeded)
    );
}

// A stream substrate (an arbitrary Read/Write, not a contiguous slice) round-trips the same
// values as the buffer substrate, exercising the refill/stage buffering path.
#[test]
fn stream_substrate_roundtrips_with_small_buffer() {
    use cbor::{ReaderSource, WriterSink};

    let values: Vec<u32> = (0..200).collect();
    let mut out = Vec::new();
    {
        let sink = WriterSink::new(&mut out, 8);
        let mut enc = Encoder::new(sink, Config::default());
        enc.encode(&values).unwrap();
        enc.finish().unwrap();
    }

    let source = ReaderSource::new(&out[..], 8);
    let mut dec = Decoder::new(source, Config::default());
    let back: Vec<u32> = dec.decode().unwrap();
    assert_eq!(back, values);
}

use std::collections::{BTreeMap, HashMap};
use serde::{Serialize, Deserialize};
use msgpack_kit::{
    from_slice, to_vec,
    Decoder, Encoder, ErrorKind, Path, Timestamp
};

fn roundtrip<T>(value: &T, expected: &[u8])
    where T: Serialize + for<'de> Deserialize<'de> + PartialEq + core::fmt::Debug
{
    let bytes = to_vec(value).unwrap();
    assert_eq!(bytes, expected, "encoding {:?}", value);
    assert_eq!(&from_slice::<T>(&bytes).unwrap(), value);
}

#[test]
fn test_integer_boundaries() {
    roundtrip(&-32i64, b"\xe0");
    roundtrip(&-33i64, b"\xd0\xdf");
    roundtrip(&-1i8, b"\xff");
    roundtrip(&0u64, b"\x00");
    roundtrip(&127i32, b"\x7f");
    roundtrip(&128u16, b"\xcc\x80");
    roundtrip(&256i64, b"\xcd\x01\x00");
    roundtrip(&65536u32, b"\xce\x00\x01\x00\x00");
    roundtrip(&(1u64 << 32), b"\xcf\x00\x00\x00\x01\x00\x00\x00\x00");
    roundtrip(&i64::MIN, b"\xd3\x80\x00\x00\x00\x00\x00\x00\x00");
    roundtrip(&u64::MAX, b"\xcf\xff\xff\xff\xff\xff\xff\xff\xff");
}

#[test]
fn test_minimal_widths() {
    assert_eq!(to_vec(&100u64).unwrap(), b"\x64");
    assert_eq!(to_vec(&300i64).unwrap(), b"\xcd\x01\x2c");
    assert_eq!(to_vec(&-100i64).unwrap(), b"\xd0\x9c");
    // decoders accept any width as long as the value fits
    assert_eq!(from_slice::<u8>(b"\xcf\x00\x00\x00\x00\x00\x00\x00\x64").unwrap(), 100);
    assert_eq!(from_slice::<i8>(b"\xd3\xff\xff\xff\xff\xff\xff\xff\x9c").unwrap(), -100);
    assert_eq!(from_slice::<u8>(b"\xcd\x01\x2c").unwrap_err().kind(), &ErrorKind::ValueOutOfRange);
    assert_eq!(from_slice::<u32>(b"\xff").unwrap_err().kind(), &ErrorKind::ValueOutOfRange);
}

#[test]
fn test_float_bit_patterns() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0, f64::MIN_POSITIVE] {
        let bytes = to_vec(&value).unwrap();
        assert_eq!(bytes[0], 0xcb);
        assert_eq!(&bytes[1..], value.to_bits().to_be_bytes());
        assert_eq!(from_slice::<f64>(&bytes).unwrap().to_bits(), value.to_bits());
    }
    for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -0.0] {
        let bytes = to_vec(&value).unwrap();
        assert_eq!(bytes[0], 0xca);
        assert_eq!(&bytes[1..], value.to_bits().to_be_bytes());
        assert_eq!(from_slice::<f32>(&bytes).unwrap().to_bits(), value.to_bits());
    }
    assert_eq!(from_slice::<f64>(b"\xca\x3f\xc0\x00\x00").unwrap(), 1.5);
    assert_eq!(from_slice::<f32>(b"\xcb\x3f\xf8\x00\x00\x00\x00\x00\x00").unwrap(), 1.5);
    assert_eq!(from_slice::<f32>(&to_vec(&0.1f64).unwrap()).unwrap_err().kind(),
               &ErrorKind::ValueOutOfRange);
    assert_eq!(from_slice::<f64>(b"\x01").unwrap_err().kind(),
               &ErrorKind::TypeMismatch { tag: 0x01, expected: "f64" });
}

#[test]
fn test_string_headers() {
    let short = "a".repeat(31);
    let bytes = to_vec(&short).unwrap();
    assert_eq!(bytes[0], 0xbf);
    assert_eq!(bytes.len(), 32);
    assert_eq!(from_slice::<String>(&bytes).unwrap(), short);

    let long = "a".repeat(32);
    let bytes = to_vec(&long).unwrap();
    assert_eq!(&bytes[..2], b"\xd9\x20");
    assert_eq!(from_slice::<&str>(&bytes).unwrap(), long);

    let long = "a".repeat(256);
    let bytes = to_vec(&long).unwrap();
    assert_eq!(&bytes[..3], b"\xda\x01\x00");
    assert_eq!(from_slice::<String>(&bytes).unwrap(), long);

    assert_eq!(from_slice::<&str>(b"\xa2\xff\xfe").unwrap_err().kind(), &ErrorKind::InvalidUtf8);
}

#[test]
fn test_bytes() {
    let data = serde_bytes::ByteBuf::from(vec![0u8; 256]);
    let bytes = to_vec(&data).unwrap();
    assert_eq!(&bytes[..3], b"\xc5\x01\x00");
    assert_eq!(from_slice::<serde_bytes::ByteBuf>(&bytes).unwrap(), data);
    roundtrip(&serde_bytes::ByteBuf::new(), b"\xc4\x00");
}

#[test]
fn test_canonical_map_order() {
    let mut map = HashMap::new();
    map.insert("b", 2u8);
    map.insert("a", 1u8);
    map.insert("c", 3u8);
    let bytes = to_vec(&map).unwrap();
    assert_eq!(bytes, b"\x83\xa1a\x01\xa1b\x02\xa1c\x03");

    let decoded: HashMap<String, u8> = from_slice(&bytes).unwrap();
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded["b"], 2);

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Unsorted { zulu: bool, alpha: Option<u8> }
    roundtrip(&Unsorted { zulu: true, alpha: None }, b"\x82\xa5alpha\xc0\xa4zulu\xc3");
    // the decoder does not care about the order of keys
    assert_eq!(from_slice::<Unsorted>(b"\x82\xa4zulu\xc2\xa5alpha\x07").unwrap(),
               Unsorted { zulu: false, alpha: Some(7) });
}

#[test]
fn test_nested_collections() {
    let mut map = BTreeMap::new();
    map.insert("odd".to_string(), vec![1u8, 3, 5]);
    map.insert("even".to_string(), vec![]);
    roundtrip(&map, b"\x82\xa4even\x90\xa3odd\x93\x01\x03\x05");
    roundtrip(&vec![(); 16], &[&b"\xdc\x00\x10"[..], &[0xc0u8; 16][..]].concat());
    roundtrip(&(1u8, "x".to_string(), Some(false)), b"\x93\x01\xa1x\xc2");
}

#[test]
fn test_keyed_view_of_array() {
    let bytes = to_vec(&[1u8, 2]).unwrap();
    let err = Decoder::new(&bytes).keyed_container().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedShape { tag: 0x92, expected: "keyed container" });
    let err = Decoder::new(b"\xa1a").unkeyed_container().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedShape { tag: 0xa1, expected: "unkeyed container" });
}

#[test]
fn test_timestamps() {
    roundtrip(&Timestamp::from_seconds(1), b"\xd6\xff\x00\x00\x00\x01");
    roundtrip(&Timestamp::from_seconds(u32::MAX.into()), b"\xd6\xff\xff\xff\xff\xff");
    roundtrip(&Timestamp::new(1, 1).unwrap(), b"\xd7\xff\x00\x00\x00\x04\x00\x00\x00\x01");
    roundtrip(&Timestamp::from_seconds(1 << 32), b"\xd7\xff\x00\x00\x00\x01\x00\x00\x00\x00");
    roundtrip(&Timestamp::from_seconds(-1),
              b"\xc7\x0c\xff\x00\x00\x00\x00\xff\xff\xff\xff\xff\xff\xff\xff");
    roundtrip(&Timestamp::new(1 << 34, 999_999_999).unwrap(),
              b"\xc7\x0c\xff\x3b\x9a\xc9\xff\x00\x00\x00\x04\x00\x00\x00\x00");

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Event { at: Timestamp, tick: u8 }
    roundtrip(&Event { at: Timestamp::UNIX_EPOCH, tick: 1 },
              b"\x82\xa2at\xd6\xff\x00\x00\x00\x00\xa4tick\x01");

    // nanoseconds out of range
    let err = from_slice::<Timestamp>(b"\xd7\xff\xee\x6b\x28\x00\x00\x00\x00\x00").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ValueOutOfRange);
    // not the timestamp extension type
    let err = from_slice::<Timestamp>(b"\xd6\x01\x00\x00\x00\x00").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::TypeMismatch { tag: 0xd6, expected: "timestamp" });
}

#[cfg(feature = "std")]
#[test]
fn test_system_time() {
    use std::time::{Duration, SystemTime};
    let time = SystemTime::UNIX_EPOCH + Duration::new(1_700_000_000, 5);
    let ts = Timestamp::from(time);
    assert_eq!((ts.seconds(), ts.nanoseconds()), (1_700_000_000, 5));
    let bytes = to_vec(&ts).unwrap();
    assert_eq!(SystemTime::try_from(from_slice::<Timestamp>(&bytes).unwrap()).unwrap(), time);
}

#[test]
fn test_truncated_input() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Sample { name: String, values: Vec<i64>, ratio: f64, at: Timestamp, blob: serde_bytes::ByteBuf }

    fn check<T>(value: &T)
        where T: Serialize + for<'de> Deserialize<'de> + core::fmt::Debug
    {
        let bytes = to_vec(value).unwrap();
        for len in 0..bytes.len() {
            let err = from_slice::<T>(&bytes[..len]).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UnexpectedEndOfData, "{:?} cut at {}", value, len);
        }
    }

    check(&());
    check(&true);
    check(&u64::MAX);
    check(&i16::MIN);
    check(&1.5f32);
    check(&-2.5f64);
    check(&"PDX".to_string());
    check(&serde_bytes::ByteBuf::from(vec![1u8, 2, 3]));
    check(&Timestamp::new(-5, 1).unwrap());
    check(&vec![Some(1u8), None]);
    check(&Sample {
        name: "Portland".into(),
        values: vec![-1, 1 << 40],
        ratio: 0.25,
        at: Timestamp::from_seconds(1 << 33),
        blob: serde_bytes::ByteBuf::from(vec![0xc1]),
    });
}

#[test]
fn test_trailing_bytes() {
    assert_eq!(from_slice::<bool>(b"\xc3\xc3").unwrap_err().kind(), &ErrorKind::TrailingBytes);
    let (value, tail) = msgpack_kit::from_slice_split_tail::<bool>(b"\xc3\xc2").unwrap();
    assert!(value);
    assert_eq!(tail, b"\xc2");
}

#[test]
fn test_encoder_latch() {
    let mut encoder = Encoder::new();
    let single = encoder.single_value_container().unwrap();
    single.encode_u16(300).unwrap();
    let err = single.encode_u16(301).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::AlreadyEncoded);
    assert_eq!(err.path(), &Path::root());
    assert_eq!(encoder.keyed_container().unwrap_err().kind(), &ErrorKind::ContainerAlreadyCreated);
    assert_eq!(encoder.into_bytes().unwrap(), b"\xcd\x01\x2c");
}

#[test]
fn test_decoder_latch() {
    let bytes = to_vec(&vec![1u8, 2]).unwrap();
    let mut decoder = Decoder::new(&bytes);
    let mut list = decoder.unkeyed_container().unwrap();
    assert_eq!(list.decode::<u8>().unwrap(), 1);
    assert_eq!(decoder.unkeyed_container().unwrap_err().kind(), &ErrorKind::ContainerAlreadyCreated);
    assert_eq!(list.decode::<u8>().unwrap(), 2);
    assert!(list.is_at_end().unwrap());
    let err = list.decode::<u8>().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnexpectedEndOfData);
    assert_eq!(err.path(), &Path::root().index(2));
}

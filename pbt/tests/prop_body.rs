//! ボディアクセス操作のプロパティテスト

use std::io::{Read, Write};
use std::sync::atomic::Ordering;

use pbt::{passthrough_encoding, payload, repetitive_payload, response};
use proptest::prelude::*;
use shiguredo_http11_body::{Error, ReadLimits, parse, parse_with, read_body, read_body_with_limits};

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn brotli(data: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    {
        let mut writer = brotli::CompressorWriter::new(&mut compressed, 4096, 5, 22);
        writer.write_all(data).unwrap();
    }
    compressed
}

// ========================================
// ラウンドトリップ
// ========================================

// Content-Encoding なしはボディをそのまま返す
proptest! {
    #[test]
    fn prop_read_body_identity(data in payload()) {
        let (mut res, closes) = response(data.clone(), None);

        prop_assert_eq!(read_body(&mut res).unwrap(), data);
        prop_assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}

// gzip は展開した元のデータを返す
proptest! {
    #[test]
    fn prop_read_body_gzip(data in payload()) {
        let (mut res, closes) = response(gzip(&data), Some("gzip"));

        prop_assert_eq!(read_body(&mut res).unwrap(), data);
        prop_assert_eq!(closes.load(Ordering::SeqCst), 1);
        prop_assert!(res.body.as_ref().unwrap().is_drained());
    }
}

// br は展開した元のデータを返す
proptest! {
    #[test]
    fn prop_read_body_brotli(data in payload()) {
        let (mut res, closes) = response(brotli(&data), Some("br"));

        prop_assert_eq!(read_body(&mut res).unwrap(), data);
        prop_assert_eq!(closes.load(Ordering::SeqCst), 1);
        prop_assert!(res.body.as_ref().unwrap().is_drained());
    }
}

// 展開対象外の Content-Encoding はボディをそのまま返す
proptest! {
    #[test]
    fn prop_read_body_passthrough(data in payload(), encoding in passthrough_encoding()) {
        let (mut res, closes) = response(data.clone(), Some(encoding.as_str()));

        prop_assert_eq!(read_body(&mut res).unwrap(), data);
        prop_assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}

// ========================================
// 読み捨てとクローズ
// ========================================

// パーサーが読んだバイト数に関わらず、ボディは読み捨てられて 1 回だけクローズされる
proptest! {
    #[test]
    fn prop_parse_partial_read(data in repetitive_payload(), take in 0usize..2048, compressed in any::<bool>()) {
        let (body, encoding) = if compressed {
            (gzip(&data), Some("gzip"))
        } else {
            (data.clone(), None)
        };
        let (mut res, closes) = response(body, encoding);

        let read = parse(&mut res, |stream| {
            let mut buf = Vec::new();
            stream.by_ref().take(take as u64).read_to_end(&mut buf).unwrap();
            buf
        })
        .unwrap();

        prop_assert_eq!(read.as_slice(), &data[..take.min(data.len())]);
        prop_assert_eq!(closes.load(Ordering::SeqCst), 1);
        prop_assert!(res.body.as_ref().unwrap().is_drained());
    }
}

// パーサーのエラーはそのまま返り、ボディはクローズされる
proptest! {
    #[test]
    fn prop_parse_with_error_passthrough(data in payload(), code in any::<u16>()) {
        let (mut res, closes) = response(data, None);

        let result: Result<(), ParserError> = parse_with(&mut res, |_| Err(ParserError::Code(code)));
        prop_assert_eq!(result, Err(ParserError::Code(code)));
        prop_assert_eq!(closes.load(Ordering::SeqCst), 1);
        prop_assert!(res.body.as_ref().unwrap().is_drained());
    }
}

#[derive(Debug, PartialEq)]
enum ParserError {
    Code(u16),
    Body(String),
}

impl From<Error> for ParserError {
    fn from(e: Error) -> Self {
        ParserError::Body(e.to_string())
    }
}

// ========================================
// サイズ制限
// ========================================

proptest! {
    #[test]
    fn prop_read_body_limit(data in repetitive_payload(), limit in 0usize..2048) {
        let (mut res, closes) = response(gzip(&data), Some("gzip"));
        let limits = ReadLimits::default().max_body_size(limit);

        match read_body_with_limits(&mut res, &limits) {
            Ok(body) => {
                prop_assert!(data.len() <= limit);
                prop_assert_eq!(body, data);
            }
            Err(Error::BodyTooLarge { size, limit: l }) => {
                prop_assert!(data.len() > limit);
                prop_assert_eq!(l, limit);
                prop_assert_eq!(size, limit + 1);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
        prop_assert_eq!(closes.load(Ordering::SeqCst), 1);
        prop_assert!(res.body.as_ref().unwrap().is_drained());
    }
}

// ========================================
// 不正な入力
// ========================================

// gzip ヘッダーが壊れている場合は Decoding エラーになり、ボディはクローズされる
proptest! {
    #[test]
    fn prop_corrupt_gzip_header(data in payload()) {
        // gzip のマジックナンバー (1f 8b) で始まらないデータ
        let mut body = vec![0x00];
        body.extend_from_slice(&data);
        let (mut res, closes) = response(body, Some("gzip"));

        prop_assert!(matches!(read_body(&mut res), Err(Error::Decoding(_))));
        prop_assert_eq!(closes.load(Ordering::SeqCst), 1);
        prop_assert!(res.body.as_ref().unwrap().is_drained());
    }
}

#![no_main]

use std::io::{self, Cursor, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_http11_body::{Body, ReadLimits, Response, parse, read_body_with_limits};

#[derive(Arbitrary, Debug)]
struct FuzzBody {
    content_encoding: Option<String>,
    body: Vec<u8>,
    parser_take: u16,
    max_body_size: u16,
}

struct FuzzReader {
    inner: Cursor<Vec<u8>>,
    closes: usize,
}

impl Read for FuzzReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Body for FuzzReader {
    fn close(&mut self) -> io::Result<()> {
        self.closes += 1;
        Ok(())
    }
}

fn response(input: &FuzzBody) -> Response<FuzzReader> {
    let body = FuzzReader {
        inner: Cursor::new(input.body.clone()),
        closes: 0,
    };
    let mut res = Response::new(200, "OK", body);
    if let Some(value) = &input.content_encoding {
        res.add_header("Content-Encoding", value);
    }
    res
}

fn assert_released(res: &Response<FuzzReader>) {
    let body = res.body.as_ref().unwrap();
    assert_eq!(body.closes, 1);
    assert_eq!(body.inner.position() as usize, body.inner.get_ref().len());
}

fuzz_target!(|input: FuzzBody| {
    // 展開爆弾でメモリを使い切らないように展開後のサイズを制限する
    let limits = ReadLimits::default().max_body_size(input.max_body_size as usize);
    let mut res = response(&input);
    let _ = read_body_with_limits(&mut res, &limits);
    assert_released(&res);

    let mut res = response(&input);
    let _ = parse(&mut res, |stream| {
        let mut buf = Vec::new();
        let _ = stream
            .by_ref()
            .take(input.parser_take as u64)
            .read_to_end(&mut buf);
        buf.len()
    });
    assert_released(&res);
});

//! PBT テスト共通ユーティリティ

use std::io::{self, Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use shiguredo_http11_body::{Body, Response};

// ========================================
// ボディ
// ========================================

/// クローズ回数を記録するボディ
#[derive(Debug)]
pub struct CountingBody {
    inner: Cursor<Vec<u8>>,
    closes: Arc<AtomicUsize>,
}

impl CountingBody {
    pub fn new(data: Vec<u8>) -> (Self, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        let body = Self {
            inner: Cursor::new(data),
            closes: closes.clone(),
        };
        (body, closes)
    }

    /// 最後まで読み込まれたかどうか
    pub fn is_drained(&self) -> bool {
        self.inner.position() as usize == self.inner.get_ref().len()
    }
}

impl Read for CountingBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Body for CountingBody {
    fn close(&mut self) -> io::Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Content-Encoding 付きのレスポンスを作成
pub fn response(
    data: Vec<u8>,
    content_encoding: Option<&str>,
) -> (Response<CountingBody>, Arc<AtomicUsize>) {
    let (body, closes) = CountingBody::new(data);
    let mut res = Response::new(200, "OK", body);
    if let Some(value) = content_encoding {
        res.add_header("Content-Encoding", value);
    }
    (res, closes)
}

// ========================================
// Strategy
// ========================================

/// 任意のペイロード (空を含む)
pub fn payload() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..4096)
}

/// 圧縮が効きやすい繰り返しの多いペイロード
pub fn repetitive_payload() -> impl Strategy<Value = Vec<u8>> {
    ("[a-c]{1,8}", 1usize..512).prop_map(|(unit, count)| unit.repeat(count).into_bytes())
}

/// 展開対象にならない Content-Encoding 値
pub fn passthrough_encoding() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("identity".to_string()),
        Just("deflate".to_string()),
        Just("zstd".to_string()),
        Just("x-gzip".to_string()),
        Just("gzip, br".to_string()),
        Just("br, gzip".to_string()),
        Just("g zip".to_string()),
        "[a-z][a-z0-9-]{0,15}"
            .prop_filter("recognized coding", |s| s != "gzip" && s != "br"),
    ]
}

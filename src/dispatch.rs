//! ボディアクセス操作
//!
//! すべての操作は同じ手順で動く。
//!
//! 1. ボディの読み捨て / クローズを保証するガードを作る
//! 2. Content-Encoding に応じた展開済みストリームを取得する
//! 3. 呼び出し側のパーサー / デコーダーにストリームを渡す
//! 4. ストリームを解放し、元のボディを読み捨ててクローズする
//!
//! 展開ストリームの取得に失敗した場合はパーサーを呼ばないが、4 は必ず行う。
//! パーサーのエラーはそのまま返す。

use std::io::Read;

use crate::body::Body;
use crate::decoded::DecodedStream;
use crate::decoder::Decoder;
use crate::error::{Error, Result};
use crate::lifecycle::BodyGuard;
use crate::limits::ReadLimits;
use crate::response::Response;

/// 展開済みボディをすべて読み込む
pub fn read_body<B: Body>(res: &mut Response<B>) -> Result<Vec<u8>> {
    read_body_with_limits(res, &ReadLimits::unlimited())
}

/// 展開済みボディをすべて読み込む (サイズ制限付き)
///
/// 展開後のサイズが `max_body_size` を超えた場合は `Error::BodyTooLarge` を返す。
/// その場合も残りのボディは読み捨ててクローズする。
pub fn read_body_with_limits<B: Body>(
    res: &mut Response<B>,
    limits: &ReadLimits,
) -> Result<Vec<u8>> {
    parse_with(res, |stream| read_limited(stream, limits.max_body_size))
}

fn read_limited<B: Body>(stream: &mut DecodedStream<'_, B>, limit: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    // 制限を超えたことを検出するために 1 バイト余分に読む
    let max = (limit as u64).saturating_add(1);
    let read = stream.by_ref().take(max).read_to_end(&mut buf);
    read.map_err(|e| stream.classify_error(e))?;

    if buf.len() > limit {
        return Err(Error::BodyTooLarge {
            size: buf.len(),
            limit,
        });
    }
    Ok(buf)
}

/// 展開済みストリームをパースする (パーサーは失敗しない)
///
/// エラーになるのは展開ストリームの取得とボディのクリーンアップに失敗した場合のみ。
pub fn parse<B, T, F>(res: &mut Response<B>, parser: F) -> Result<T>
where
    B: Body,
    F: FnOnce(&mut DecodedStream<'_, B>) -> T,
{
    parse_with(res, |stream| Ok(parser(stream)))
}

/// 展開済みストリームをパースする
///
/// パーサーのエラーはそのまま返す。
///
/// ```rust
/// use std::io::{Cursor, Read};
/// use shiguredo_http11_body::{Error, Response, parse_with};
///
/// let mut res = Response::new(200, "OK", Cursor::new(b"42".to_vec()));
/// let n: u32 = parse_with(&mut res, |stream| {
///     let mut text = String::new();
///     stream.read_to_string(&mut text)?;
///     text.parse().map_err(Error::decoding)
/// })
/// .unwrap();
/// assert_eq!(n, 42);
/// ```
pub fn parse_with<B, T, E, F>(res: &mut Response<B>, parser: F) -> std::result::Result<T, E>
where
    B: Body,
    E: From<Error>,
    F: FnOnce(&mut DecodedStream<'_, B>) -> std::result::Result<T, E>,
{
    let mut guard = BodyGuard::new(res)?;
    let result = match guard.decoded_stream() {
        Ok(mut stream) => parser(&mut stream),
        Err(e) => Err(e.into()),
    };
    guard.complete(result)
}

/// 展開済みストリームをデコーダーでデコードし、`target` に書き込む
///
/// デコーダーが失敗した場合は `Error::Decoding` を返す。
pub fn decode<'t, B, O, D>(
    mut decoder: D,
    res: &mut Response<B>,
    target: &'t mut O,
) -> Result<&'t mut O>
where
    B: Body,
    O: ?Sized,
    D: Decoder<O>,
{
    parse_with(res, |stream| {
        decoder
            .decode(stream, &mut *target)
            .map_err(Error::decoding)
    })?;
    Ok(target)
}

/// [`decode`] と同じだが、エラーのみを返す
pub fn decode_into<B, O, D>(decoder: D, res: &mut Response<B>, target: &mut O) -> Result<()>
where
    B: Body,
    O: ?Sized,
    D: Decoder<O>,
{
    decode(decoder, res, target).map(|_| ())
}

//! HTML ドキュメントのパース (scraper)

use std::io::Read;

use scraper::Html;

use crate::body::Body;
use crate::dispatch::parse_with;
use crate::error::Result;
use crate::response::Response;

/// 展開済みストリームを HTML ドキュメントとしてパースする
///
/// 不正な UTF-8 は置換文字に変換する。HTML パーサー自体は失敗しない。
pub fn parse_html<R: Read + ?Sized>(reader: &mut R) -> std::io::Result<Html> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(Html::parse_document(&String::from_utf8_lossy(&bytes)))
}

/// レスポンスボディを HTML ドキュメントとしてパースする
///
/// 読み込みエラーは展開ストリームの種類に応じて `Error::Decoding` / `Error::Read` になる。
pub fn parse_document<B: Body>(res: &mut Response<B>) -> Result<Html> {
    parse_with(res, |stream| {
        parse_html(stream).map_err(|e| stream.classify_error(e))
    })
}

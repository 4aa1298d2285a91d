//! Content-Encoding に応じた展開ストリームの選択
//!
//! レスポンスの Content-Encoding を見て、ボディを読むためのストリームを返す。
//!
//! - `gzip`: gzip 展開ストリーム (feature `gzip`)
//! - `br`: Brotli 展開ストリーム (feature `br`)
//! - それ以外 (なし、identity、未知のトークン、複数指定、不正な値): ボディそのもの
//!
//! 未知のエンコーディングはエラーにせずそのまま通す。
//! 下位のトランスポート層で既に展開済みの場合があるため。
//!
//! 展開ストリームはボディを借用するだけで、ボディのクローズは行わない。
//! ボディの読み捨てとクローズは [`crate::lifecycle`] が担当する。

use std::fmt;
use std::io::{self, Read};

use crate::body::Body;
use crate::content_encoding::{ContentCoding, ContentEncoding};
use crate::error::{Error, Result};
use crate::response::Response;

/// Brotli 展開器の内部バッファサイズ
#[cfg(feature = "br")]
const BROTLI_BUFFER_SIZE: usize = 4096;

/// 展開済みストリーム
///
/// 読み込みに応じて展開する。構築時に読み込むのは gzip ヘッダーのみ。
pub enum DecodedStream<'a, B: Body> {
    /// 展開なし
    Identity(&'a mut B),
    /// gzip 展開
    #[cfg(feature = "gzip")]
    Gzip(flate2::read::MultiGzDecoder<&'a mut B>),
    /// Brotli 展開
    #[cfg(feature = "br")]
    Brotli(brotli::Decompressor<&'a mut B>),
}

impl<'a, B: Body> DecodedStream<'a, B> {
    /// ボディとコンテントコーディングから展開ストリームを作成
    ///
    /// gzip の場合はここで先頭メンバーのヘッダーを読み込み、不正なら `Error::Decoding` を返す。
    /// 連結された複数の gzip メンバーはすべて展開する (RFC 1952 Section 2.2)。
    pub fn new(body: &'a mut B, coding: &ContentCoding) -> Result<Self> {
        match coding {
            #[cfg(feature = "gzip")]
            ContentCoding::Gzip => {
                let mut decoder = flate2::read::MultiGzDecoder::new(body);
                if decoder.header().is_none() {
                    // ヘッダーのパースに失敗した場合、次の read がその原因を返す
                    let cause = match decoder.read(&mut []) {
                        Err(e) => e,
                        Ok(_) => io::Error::new(io::ErrorKind::InvalidData, "invalid gzip header"),
                    };
                    return Err(Error::decoding(cause));
                }
                Ok(DecodedStream::Gzip(decoder))
            }
            #[cfg(feature = "br")]
            ContentCoding::Brotli => Ok(DecodedStream::Brotli(brotli::Decompressor::new(
                body,
                BROTLI_BUFFER_SIZE,
            ))),
            _ => Ok(DecodedStream::Identity(body)),
        }
    }

    /// 適用しているコンテントコーディング
    pub fn coding(&self) -> ContentCoding {
        match self {
            DecodedStream::Identity(_) => ContentCoding::Identity,
            #[cfg(feature = "gzip")]
            DecodedStream::Gzip(_) => ContentCoding::Gzip,
            #[cfg(feature = "br")]
            DecodedStream::Brotli(_) => ContentCoding::Brotli,
        }
    }

    /// 展開を伴うストリームかどうか
    pub fn is_compressed(&self) -> bool {
        !matches!(self, DecodedStream::Identity(_))
    }

    /// 読み込みエラーを分類する
    ///
    /// 展開ストリームで不正なデータ / 途中終端を検出した場合は `Error::Decoding`、
    /// それ以外は `Error::Read` になる。
    pub fn classify_error(&self, e: io::Error) -> Error {
        let corrupt = matches!(
            e.kind(),
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof
        );
        if self.is_compressed() && corrupt {
            Error::decoding(e)
        } else {
            Error::Read(e)
        }
    }
}

impl<B: Body> Read for DecodedStream<'_, B> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            DecodedStream::Identity(body) => body.read(buf),
            #[cfg(feature = "gzip")]
            DecodedStream::Gzip(decoder) => decoder.read(buf),
            #[cfg(feature = "br")]
            DecodedStream::Brotli(decoder) => decoder.read(buf),
        }
    }
}

impl<B: Body> fmt::Debug for DecodedStream<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedStream")
            .field("coding", &self.coding())
            .finish()
    }
}

/// Content-Encoding ヘッダー値から展開に使うコーディングを決める
///
/// 単一の gzip / br 以外はすべて identity として扱う。
/// トークンの比較は大文字小文字を区別しない (`GZIP` も gzip として展開する)。
pub fn resolve_coding(content_encoding: Option<&str>) -> ContentCoding {
    content_encoding
        .and_then(|value| ContentEncoding::parse(value).ok())
        .and_then(|ce| ce.single().cloned())
        .filter(|coding| matches!(coding, ContentCoding::Gzip | ContentCoding::Brotli))
        .unwrap_or(ContentCoding::Identity)
}

/// レスポンスから展開済みストリームを取得
///
/// ボディがない場合は I/O を行わずに `Error::InvalidInput` を返す。
pub fn decoded_stream<B: Body>(res: &mut Response<B>) -> Result<DecodedStream<'_, B>> {
    let coding = resolve_coding(res.content_encoding());
    let body = res
        .body
        .as_mut()
        .ok_or_else(|| Error::InvalidInput("http response body was absent".to_string()))?;

    let stream = DecodedStream::new(body, &coding)?;
    log::debug!("resolved response body coding: {}", stream.coding());
    Ok(stream)
}

//! # shiguredo_http11_body
//!
//! HTTP/1.1 レスポンスボディのアクセスレイヤー
//!
//! ## 特徴
//!
//! - **Content-Encoding の自動展開**: `gzip` / `br` のボディを展開してからパーサーに渡す
//! - **確実な読み捨てとクローズ**: パースの成否に関わらず、ボディを最後まで読み捨てて 1 回だけクローズする
//! - **パーサー非依存**: 任意のパーサー関数 / デコーダーを渡せる
//!
//! ## Features
//!
//! - `gzip` - gzip 展開 (flate2、デフォルト有効)
//! - `br` - Brotli 展開 (brotli、デフォルト有効)
//! - `json` - JSON デコーダー (nojson、デフォルト有効)
//! - `html` - HTML ドキュメントパース (scraper、デフォルト有効)
//!
//! ## 使い方
//!
//! ```rust
//! use std::io::Cursor;
//! use shiguredo_http11_body::{Response, read_body};
//!
//! // ヘッダー受信済みのレスポンス (ボディは未読)
//! let mut res = Response::new(200, "OK", Cursor::new(b"Hello, World!".to_vec()))
//!     .header("Content-Type", "text/plain");
//!
//! let body = read_body(&mut res).unwrap();
//! assert_eq!(body, b"Hello, World!");
//! ```
//!
//! ```rust
//! use std::io::{Cursor, Read};
//! use shiguredo_http11_body::{Response, parse};
//!
//! // パーサーが途中までしか読まなくても、残りは読み捨てられる
//! let mut res = Response::new(200, "OK", Cursor::new(b"first line\nsecond line".to_vec()));
//! let first = parse(&mut res, |stream| {
//!     let mut buf = [0u8; 5];
//!     stream.read_exact(&mut buf).ok().map(|_| buf)
//! })
//! .unwrap();
//! assert_eq!(first, Some(*b"first"));
//! ```

mod body;
pub mod content_encoding;
mod decoded;
pub mod decoder;
mod dispatch;
mod error;
#[cfg(feature = "html")]
pub mod html;
mod lifecycle;
mod limits;
mod response;

pub use body::Body;
pub use decoded::{DecodedStream, decoded_stream, resolve_coding};
pub use decoder::Decoder;
#[cfg(feature = "json")]
pub use decoder::{JsonDecoder, JsonError};
pub use dispatch::{decode, decode_into, parse, parse_with, read_body, read_body_with_limits};
pub use error::{Error, Result};
#[cfg(feature = "html")]
pub use html::parse_document;
pub use lifecycle::{BodyGuard, close, drain_and_close};
pub use limits::ReadLimits;
pub use response::Response;

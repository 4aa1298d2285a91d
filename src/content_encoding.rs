//! Content-Encoding ヘッダーパース (RFC 9110 Section 8.4)
//!
//! レスポンスボディをどの展開器で読むかを決めるために使う。
//!
//! ```rust
//! use shiguredo_http11_body::content_encoding::{ContentCoding, ContentEncoding};
//!
//! let ce = ContentEncoding::parse("BR").unwrap();
//! assert_eq!(ce.single(), Some(&ContentCoding::Brotli));
//!
//! // 複数のコーディングが重ねられている場合は single() が None になる
//! let ce = ContentEncoding::parse("gzip, br").unwrap();
//! assert_eq!(ce.single(), None);
//! ```

use core::fmt;

/// Content-Encoding パースエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEncodingError {
    /// 空の入力
    Empty,
    /// 不正なエンコーディングトークン
    InvalidEncoding,
}

impl fmt::Display for ContentEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentEncodingError::Empty => write!(f, "empty Content-Encoding"),
            ContentEncodingError::InvalidEncoding => {
                write!(f, "invalid Content-Encoding token")
            }
        }
    }
}

impl std::error::Error for ContentEncodingError {}

/// コンテント コーディング (Content Coding)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentCoding {
    Gzip,
    Brotli,
    Identity,
    Other(String),
}

impl ContentCoding {
    /// 正規化したトークン値
    pub fn as_str(&self) -> &str {
        match self {
            ContentCoding::Gzip => "gzip",
            ContentCoding::Brotli => "br",
            ContentCoding::Identity => "identity",
            ContentCoding::Other(value) => value.as_str(),
        }
    }
}

impl fmt::Display for ContentCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content-Encoding ヘッダー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEncoding {
    encodings: Vec<ContentCoding>,
}

impl ContentEncoding {
    /// Content-Encoding ヘッダーをパース
    pub fn parse(input: &str) -> Result<Self, ContentEncodingError> {
        let encodings = input
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_coding)
            .collect::<Result<Vec<_>, _>>()?;

        if encodings.is_empty() {
            return Err(ContentEncodingError::Empty);
        }

        Ok(ContentEncoding { encodings })
    }

    /// エンコーディング一覧 (適用された順)
    pub fn encodings(&self) -> &[ContentCoding] {
        &self.encodings
    }

    /// コーディングが 1 つだけの場合にそれを返す
    pub fn single(&self) -> Option<&ContentCoding> {
        match self.encodings.as_slice() {
            [coding] => Some(coding),
            _ => None,
        }
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<&str> = self.encodings.iter().map(ContentCoding::as_str).collect();
        write!(f, "{}", values.join(", "))
    }
}

fn parse_coding(token: &str) -> Result<ContentCoding, ContentEncodingError> {
    if !token.bytes().all(is_token_char) {
        return Err(ContentEncodingError::InvalidEncoding);
    }

    // x-gzip 等の別名は扱わない
    let coding = if token.eq_ignore_ascii_case("gzip") {
        ContentCoding::Gzip
    } else if token.eq_ignore_ascii_case("br") {
        ContentCoding::Brotli
    } else if token.eq_ignore_ascii_case("identity") {
        ContentCoding::Identity
    } else {
        ContentCoding::Other(token.to_ascii_lowercase())
    };

    Ok(coding)
}

fn is_token_char(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'0'..=b'9' | b'A'..=b'Z' | b'^' | b'_' | b'`' | b'a'..=b'z' | b'|' | b'~'
    )
}

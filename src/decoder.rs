//! 構造化デコーダー
//!
//! 展開済みストリームを読み込んで、呼び出し側が用意したターゲットに値を書き込む。

use std::io::Read;

/// 構造化デコーダー
///
/// `decode` は展開済みストリームを読み込み、`target` を書き換える。
/// ストリームを最後まで読む必要はない (残りは呼び出し側で読み捨てられる)。
pub trait Decoder<T: ?Sized> {
    /// デコードエラー
    type Error: std::error::Error + Send + Sync + 'static;

    /// ストリームをデコードして `target` に書き込む
    fn decode(&mut self, reader: &mut dyn Read, target: &mut T) -> Result<(), Self::Error>;
}

impl<T: ?Sized, D: Decoder<T> + ?Sized> Decoder<T> for &mut D {
    type Error = D::Error;

    fn decode(&mut self, reader: &mut dyn Read, target: &mut T) -> Result<(), Self::Error> {
        (**self).decode(reader, target)
    }
}

#[cfg(feature = "json")]
pub use json::{JsonDecoder, JsonError};

#[cfg(feature = "json")]
mod json {
    use std::io::{self, Read};

    use super::Decoder;

    /// JSON デコーダー (nojson)
    ///
    /// ストリームを UTF-8 として読み込み、`TryFrom<nojson::RawJsonValue>` を実装した型に変換する。
    #[derive(Debug, Default, Clone, Copy)]
    pub struct JsonDecoder;

    impl JsonDecoder {
        pub fn new() -> Self {
            Self
        }
    }

    impl<T> Decoder<T> for JsonDecoder
    where
        for<'text, 'raw> T:
            TryFrom<nojson::RawJsonValue<'text, 'raw>, Error = nojson::JsonParseError>,
    {
        type Error = JsonError;

        fn decode(&mut self, reader: &mut dyn Read, target: &mut T) -> Result<(), Self::Error> {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).map_err(JsonError::Io)?;
            let text = std::str::from_utf8(&bytes).map_err(JsonError::Utf8)?;
            let raw = nojson::RawJson::parse(text).map_err(JsonError::Parse)?;
            *target = raw.value().try_into().map_err(JsonError::Parse)?;
            Ok(())
        }
    }

    /// JSON デコードエラー
    #[derive(Debug)]
    pub enum JsonError {
        /// 読み込みエラー
        Io(io::Error),
        /// UTF-8 デコードエラー
        Utf8(std::str::Utf8Error),
        /// JSON パースエラー
        Parse(nojson::JsonParseError),
    }

    impl std::fmt::Display for JsonError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                JsonError::Io(e) => write!(f, "JSON read error: {}", e),
                JsonError::Utf8(e) => write!(f, "UTF-8 decode error: {}", e),
                JsonError::Parse(e) => write!(f, "JSON parse error: {}", e),
            }
        }
    }

    impl std::error::Error for JsonError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            match self {
                JsonError::Io(e) => Some(e),
                JsonError::Utf8(e) => Some(e),
                JsonError::Parse(e) => Some(e),
            }
        }
    }

}

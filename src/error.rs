use std::fmt;
use std::io;

/// ボディアクセスエラー
#[derive(Debug)]
pub enum Error {
    /// 不正な入力 (ボディがない等)
    ///
    /// I/O を行う前に検出される。
    InvalidInput(String),
    /// Content-Encoding の展開に失敗した
    ///
    /// 展開ストリームの初期化 (gzip ヘッダー) に失敗した場合、
    /// 展開中に不正なデータを検出した場合、構造化デコーダーが失敗した場合に返る。
    Decoding(Box<dyn std::error::Error + Send + Sync>),
    /// ストリームの読み込み / 読み捨てに失敗した
    Read(io::Error),
    /// ボディのクローズに失敗した
    Close(io::Error),
    /// 展開後のボディサイズ超過
    BodyTooLarge { size: usize, limit: usize },
}

impl Error {
    /// 展開エラーを作成
    pub fn decoding<E>(e: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Decoding(e.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Error::Decoding(e) => write!(f, "decoding error: {}", e),
            Error::Read(e) => write!(f, "read error: {}", e),
            Error::Close(e) => write!(f, "close error: {}", e),
            Error::BodyTooLarge { size, limit } => {
                write!(f, "body too large: {} > {}", size, limit)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decoding(e) => Some(e.as_ref()),
            Error::Read(e) => Some(e),
            Error::Close(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Read(e)
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

//! レスポンスボディ (読み込み + クローズ可能なリソース)
//!
//! HTTP クライアントが受信したレスポンスボディを表すトレイト。
//! 接続を再利用するためには、ボディを最後まで読み切ってからクローズする必要がある。

use std::io::{self, Read};
use std::net::{Shutdown, TcpStream};

/// 読み込み + クローズ可能なボディ
///
/// `close` はこのクレートのディスパッチ操作 1 回につき必ず 1 回だけ呼ばれる。
pub trait Body: Read {
    /// ボディが保持するリソースを解放する
    fn close(&mut self) -> io::Result<()>;
}

impl<B: Body + ?Sized> Body for &mut B {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<B: Body + ?Sized> Body for Box<B> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// バッファ済みボディ (解放するリソースはない)
impl<T: AsRef<[u8]>> Body for io::Cursor<T> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Body for io::Empty {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 接続を直接ボディとして扱う場合 (Connection: close のレスポンス等)
impl Body for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            // 相手が既に切断している
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

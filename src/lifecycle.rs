//! ボディの読み捨てとクローズ
//!
//! HTTP/1.1 の接続を再利用するには、ボディを最後まで読み切ってから
//! 接続をプールに戻す必要がある。パーサーが途中で読み込みをやめた場合や
//! パースに失敗した場合でも、ボディは必ず読み捨ててクローズする。
//!
//! 読み捨ての対象は常に元のボディであり、展開ストリームではない。

use std::io;

use crate::body::Body;
use crate::decoded::{DecodedStream, decoded_stream};
use crate::error::{Error, Result};
use crate::response::Response;

/// ボディを最後まで読み捨ててクローズする
///
/// 読み捨てに失敗した場合もクローズを試み、読み捨てのエラーを返す。
/// 読み捨てに成功した場合はクローズのエラーを返す。
///
/// 戻り値は読み捨てたバイト数。
pub fn drain_and_close<B: Body + ?Sized>(body: &mut B) -> Result<u64> {
    match io::copy(body, &mut io::sink()) {
        Err(e) => {
            if let Err(close_err) = body.close() {
                log::debug!("failed to close response body after drain error: {close_err}");
            }
            Err(Error::Read(e))
        }
        Ok(drained) => {
            body.close().map_err(Error::Close)?;
            log::debug!("drained {drained} bytes from response body");
            Ok(drained)
        }
    }
}

/// レスポンスのボディを読み捨ててクローズする
///
/// ボディがない場合は `Error::InvalidInput` を返す。
pub fn close<B: Body>(res: &mut Response<B>) -> Result<u64> {
    match res.body.as_mut() {
        Some(body) => drain_and_close(body),
        None => Err(absent_body()),
    }
}

pub(crate) fn absent_body() -> Error {
    Error::InvalidInput("http response body was absent".to_string())
}

/// ボディの読み捨て / クローズを保証するガード
///
/// [`BodyGuard::finish`] か [`BodyGuard::complete`] で明示的に終了する。
/// どちらも呼ばれずにスコープを抜けた場合 (早期リターン、パニック) は
/// `Drop` で読み捨てとクローズを行う。クローズは 1 回だけ行われる。
pub struct BodyGuard<'a, B: Body> {
    res: &'a mut Response<B>,
    finished: bool,
}

impl<'a, B: Body> BodyGuard<'a, B> {
    /// ガードを作成
    ///
    /// ボディがない場合は何も読まず、クローズもせずに `Error::InvalidInput` を返す。
    pub fn new(res: &'a mut Response<B>) -> Result<Self> {
        if res.body.is_none() {
            return Err(absent_body());
        }
        Ok(Self {
            res,
            finished: false,
        })
    }

    /// 展開済みストリームを取得
    ///
    /// ストリームはガードを借用するため、[`BodyGuard::finish`] より前に解放される。
    pub fn decoded_stream(&mut self) -> Result<DecodedStream<'_, B>> {
        decoded_stream(self.res)
    }

    /// ボディを読み捨ててクローズする
    pub fn finish(mut self) -> Result<u64> {
        self.release()
    }

    /// 処理結果とクリーンアップ結果をまとめる
    ///
    /// 処理が失敗していればそのエラーをそのまま返し、クリーンアップのエラーは捨てる。
    /// 処理が成功していればクリーンアップのエラーを返す。
    pub fn complete<T, E>(self, result: std::result::Result<T, E>) -> std::result::Result<T, E>
    where
        E: From<Error>,
    {
        let cleanup = self.finish();
        match result {
            Ok(value) => {
                cleanup?;
                Ok(value)
            }
            Err(e) => {
                if let Err(cleanup_err) = cleanup {
                    log::debug!("discarding response body cleanup error: {cleanup_err}");
                }
                Err(e)
            }
        }
    }

    fn release(&mut self) -> Result<u64> {
        if self.finished {
            return Ok(0);
        }
        self.finished = true;
        match self.res.body.as_mut() {
            Some(body) => drain_and_close(body),
            None => Err(absent_body()),
        }
    }
}

impl<B: Body> Drop for BodyGuard<'_, B> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::debug!("failed to release response body: {e}");
        }
    }
}

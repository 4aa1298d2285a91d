/// ボディ読み込みの制限設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadLimits {
    /// 展開後の最大ボディサイズ (デフォルト: 10MB)
    ///
    /// 圧縮されたボディは展開後に大きく膨らむことがあるため、展開後のサイズで判定する。
    pub max_body_size: usize,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ReadLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_body_size: usize::MAX,
        }
    }

    /// 最大ボディサイズを設定 (ビルダーパターン)
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }
}

//! エンドポイント死活確認
//!
//! 1回のGETリクエストで稼働状況を判定する。リトライ・バックオフは行わない。
//! レジストリには依存せず、URLから `StatusRecord` を得るだけの部品。

use crate::common::error::{MonitorError, MonitorResult};
use crate::common::types::{now, StatusRecord};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// デフォルトのプローブタイムアウト（秒）
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// プローブエンジン
///
/// 共有の `reqwest::Client`（接続プーリング有効）を保持する。
/// 呼び出し間で状態は持たない。
#[derive(Clone, Debug)]
pub struct ProbeEngine {
    client: Client,
}

impl ProbeEngine {
    /// タイムアウト付きのHTTPクライアントでエンジンを作成
    pub fn new(timeout: Duration) -> MonitorResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MonitorError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// URLに対してGETを1回発行し、結果を分類する
    ///
    /// - 2xx → `Alive`
    /// - それ以外のステータス、または通信エラー（DNS、接続、タイムアウト、TLS等） → `Dead`
    ///
    /// 時刻は応答（または失敗）確定時に1度だけ取得する。
    pub async fn probe(&self, url: &str) -> StatusRecord {
        let result = self.client.get(url).send().await;
        let at = now();

        match result {
            Ok(response) if response.status().is_success() => {
                debug!(url = %url, status = %response.status(), "Probe succeeded");
                StatusRecord::alive(at)
            }
            Ok(response) => {
                warn!(url = %url, status = %response.status(), "Probe returned non-success status");
                StatusRecord::dead(at)
            }
            Err(e) => {
                warn!(url = %url, error = %e, timeout = e.is_timeout(), "Probe failed");
                StatusRecord::dead(at)
            }
        }
    }
}

//! ロギング初期化ユーティリティ
//!
//! 標準出力へのfmtレイヤーに加え、`SVCWATCH_LOG_DIR` が設定されていれば
//! 日次ローテーションのファイルにも出力する。

use crate::common::error::{MonitorError, MonitorResult};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログレベル指定の環境変数
pub const LOG_LEVEL_ENV: &str = "SVCWATCH_LOG_LEVEL";
/// ログ出力ディレクトリの環境変数
pub const LOG_DIR_ENV: &str = "SVCWATCH_LOG_DIR";
/// ログファイル名（日付サフィックスが付く）
pub const LOG_FILE_PREFIX: &str = "svcwatch.log";

const DEFAULT_LOG_LEVEL: &str = "info";

/// フィルタ指定（`SVCWATCH_LOG_LEVEL`、未設定なら `info`）
pub fn log_filter_directive() -> String {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// ファイル出力先ディレクトリ（未設定ならファイル出力しない）
pub fn log_dir() -> Option<PathBuf> {
    std::env::var(LOG_DIR_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// ログファイルのベースパス
pub fn log_file_path() -> Option<PathBuf> {
    log_dir().map(|dir| dir.join(LOG_FILE_PREFIX))
}

/// グローバルsubscriberを初期化
///
/// 2回目以降の呼び出しはエラーになる。
pub fn init() -> MonitorResult<()> {
    let directive = log_filter_directive();
    let filter = EnvFilter::try_new(&directive).map_err(|e| {
        MonitorError::Internal(format!("Invalid log filter '{}': {}", directive, e))
    })?;

    let file_layer = match log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                MonitorError::Internal(format!(
                    "Failed to create log directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            Some(fmt::layer().with_ansi(false).with_writer(appender))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| MonitorError::Internal(format!("Failed to initialize logging: {}", e)))?;

    if let Some(path) = log_file_path() {
        tracing::debug!(path = %path.display(), "File logging enabled");
    }
    Ok(())
}

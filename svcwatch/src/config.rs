//! 環境変数からの設定読み込み
//!
//! `SVCWATCH_*` を優先し、旧名（`PORT` など）が使われた場合は警告を出す。

use crate::common::config::MonitorConfig;
use std::path::PathBuf;

/// `new_name` を読み、未設定なら旧名 `old_name` を読む
///
/// 旧名の値を返すときは deprecation の警告をログに残す。
///
/// ```
/// use svcwatch::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("SVCWATCH_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    std::env::var(new_name).ok().or_else(|| {
        let val = std::env::var(old_name).ok()?;
        tracing::warn!(
            legacy = old_name,
            current = new_name,
            "Deprecated environment variable in use"
        );
        Some(val)
    })
}

/// [`get_env_with_fallback`] の値をパースする（未設定・パース失敗は `default`）
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// 空でない環境変数を取得
fn get_env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// 環境変数からサーバー設定を構築
///
/// 未設定の項目は `MonitorConfig::default()` の値を使う。
/// - `SVCWATCH_HOST`
/// - `SVCWATCH_PORT`（旧: `PORT`）
/// - `SVCWATCH_DATA_FILE`
/// - `SVCWATCH_PROBE_TIMEOUT_SECS`
/// - `SVCWATCH_STATIC_DIR`
pub fn monitor_config_from_env() -> MonitorConfig {
    let defaults = MonitorConfig::default();

    MonitorConfig {
        host: get_env_non_empty("SVCWATCH_HOST").unwrap_or(defaults.host),
        port: get_env_with_fallback_parse("SVCWATCH_PORT", "PORT", defaults.port),
        data_file: get_env_non_empty("SVCWATCH_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file),
        probe_timeout_secs: get_env_non_empty("SVCWATCH_PROBE_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.probe_timeout_secs),
        static_dir: get_env_non_empty("SVCWATCH_STATIC_DIR").map(PathBuf::from),
    }
}

//! 設定管理
//!
//! MonitorConfig設定構造体

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// svcwatchサーバー設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// レジストリ保存ファイル (デフォルト: "./data/services_storage.json")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// プローブのタイムアウト（秒）(デフォルト: 10)
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// 静的ファイル配信ディレクトリ（未設定なら配信しない）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./data/services_storage.json")
}

fn default_probe_timeout() -> u64 {
    10
}

impl MonitorConfig {
    /// バインドアドレス（`host:port`）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            probe_timeout_secs: default_probe_timeout(),
            static_dir: None,
        }
    }
}

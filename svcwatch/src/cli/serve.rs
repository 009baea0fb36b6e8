//! serve サブコマンド
//!
//! 監視サーバーを起動します。指定しなかった項目は環境変数（なければ既定値）を使います。

use crate::common::config::MonitorConfig;
use clap::Args;
use std::path::PathBuf;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Registry document path
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Probe timeout in seconds
    #[arg(long)]
    pub probe_timeout_secs: Option<u64>,

    /// Directory served for non-API paths
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

impl ServeArgs {
    /// 引数を `base` に上書きした設定を返す
    pub fn apply_to(self, base: MonitorConfig) -> MonitorConfig {
        MonitorConfig {
            host: self.host.unwrap_or(base.host),
            port: self.port.unwrap_or(base.port),
            data_file: self.data_file.unwrap_or(base.data_file),
            probe_timeout_secs: self.probe_timeout_secs.unwrap_or(base.probe_timeout_secs),
            static_dir: self.static_dir.or(base.static_dir),
        }
    }
}

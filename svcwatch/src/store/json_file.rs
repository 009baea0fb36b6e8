//! JSONファイルによる永続化
//!
//! 保存は一時ファイルへの書き込み→renameで行い、読み手が
//! 書きかけのドキュメントを見ることはない。

use super::{decode_snapshot, encode_snapshot, PersistenceStore};
use crate::common::error::{MonitorError, MonitorResult};
use crate::common::types::Snapshot;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// `services_storage.json` 形式のファイルストア
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// 指定パスのファイルストアを作成（ファイルは初回保存時に作られる）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 保存先パス
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存先と同じディレクトリの `<ファイル名>.tmp`
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PersistenceStore for JsonFileStore {
    async fn load(&self) -> MonitorResult<Snapshot> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Storage file not found, starting empty");
                return Ok(Snapshot::new());
            }
            Err(e) => {
                return Err(MonitorError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        decode_snapshot(&bytes, &self.path.display().to_string())
    }

    async fn save(&self, snapshot: &Snapshot) -> MonitorResult<()> {
        let bytes = encode_snapshot(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                MonitorError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes).await.map_err(|e| {
            MonitorError::Storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            MonitorError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(
            path = %self.path.display(),
            services = snapshot.len(),
            "Snapshot saved"
        );
        Ok(())
    }
}

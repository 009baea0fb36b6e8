//! インメモリストア（テスト用）
//!
//! ドキュメントをシリアライズ済みバイト列のまま保持するため、
//! 「保存されていない」「バイト単位で同一」といった検証ができる。

use super::{decode_snapshot, encode_snapshot, PersistenceStore};
use crate::common::error::{MonitorError, MonitorResult};
use crate::common::types::Snapshot;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// インメモリのPersistenceStore
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<Vec<u8>>>,
    saves: AtomicUsize,
    load_delay: Option<Duration>,
    fail_saves: bool,
}

impl MemoryStore {
    /// 空のストア（ドキュメント未作成）
    pub fn new() -> Self {
        Self::default()
    }

    /// 任意のドキュメントで初期化（破損データの再現用）
    pub fn with_document(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            document: Mutex::new(Some(bytes.into())),
            ..Self::default()
        }
    }

    /// 読み込みのたびに待機を入れる（並行実行の重なりを再現する）
    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = Some(delay);
        self
    }

    /// 保存を常に失敗させる
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// 現在のドキュメント
    pub fn document(&self) -> Option<Vec<u8>> {
        self.lock().clone()
    }

    /// 成功した保存の回数
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        // 保持中にpanicしてもデータ自体は常に整合している
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PersistenceStore for MemoryStore {
    async fn load(&self) -> MonitorResult<Snapshot> {
        let document = self.document();
        if let Some(delay) = self.load_delay {
            tokio::time::sleep(delay).await;
        }
        match document {
            Some(bytes) => decode_snapshot(&bytes, "memory"),
            None => Ok(Snapshot::new()),
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> MonitorResult<()> {
        if self.fail_saves {
            return Err(MonitorError::Storage("memory store rejects saves".to_string()));
        }
        let bytes = encode_snapshot(snapshot)?;
        *self.lock() = Some(bytes);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

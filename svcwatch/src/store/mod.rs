//! レジストリ永続化
//!
//! スナップショット全体を1つのドキュメントとして読み書きする。
//! 部分更新やロックは提供しない（順序制御は `RegistryService` の責務）。

/// JSONファイルストア
pub mod json_file;
/// インメモリストア
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::common::error::{CommonError, MonitorError, MonitorResult};
use crate::common::types::Snapshot;
use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

/// スナップショット永続化のRepository trait
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// スナップショットを読み込む（未作成なら空）
    async fn load(&self) -> MonitorResult<Snapshot>;
    /// スナップショット全体で保存済みドキュメントを置き換える
    async fn save(&self, snapshot: &Snapshot) -> MonitorResult<()>;
}

/// ドキュメントをスナップショットに変換
///
/// 空（空白のみ）のドキュメントは初回起動と同じく空のスナップショットとみなす。
pub(crate) fn decode_snapshot(bytes: &[u8], origin: &str) -> MonitorResult<Snapshot> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Snapshot::new());
    }
    let snapshot: Snapshot = serde_json::from_slice(bytes)
        .map_err(|e| MonitorError::CorruptStore(format!("{}: {}", origin, e)))?;
    check_unique_ids(&snapshot)
        .map_err(|id| MonitorError::CorruptStore(format!("{}: duplicate id {}", origin, id)))?;
    Ok(snapshot)
}

/// サービスIDとエンドポイントIDがドキュメント全体で一意か確認し、重複したIDを返す
fn check_unique_ids(snapshot: &Snapshot) -> Result<(), Uuid> {
    let mut seen = HashSet::new();
    for service in snapshot.services() {
        if !seen.insert(service.id) {
            return Err(service.id);
        }
        for endpoint in &service.endpoints {
            if !seen.insert(endpoint.id) {
                return Err(endpoint.id);
            }
        }
    }
    Ok(())
}

/// スナップショットをドキュメント（整形済みJSON配列）に変換
pub(crate) fn encode_snapshot(snapshot: &Snapshot) -> MonitorResult<Vec<u8>> {
    serde_json::to_vec_pretty(snapshot).map_err(|e| CommonError::Serialization(e).into())
}

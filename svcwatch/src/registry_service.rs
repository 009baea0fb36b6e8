//! レジストリサービス
//!
//! 外部からの操作ごとに `load → mutate → save` を実行する。
//! 変更系の操作は書き込みゲート（`tokio::sync::Mutex`）で直列化され、
//! 同時に2つのサイクルが同じスナップショットを読むことはない（lost update防止）。
//!
//! プローブのネットワーク呼び出しだけはゲートの外で行い、遅い監視対象が
//! 他の変更をタイムアウト以上に待たせないようにする。

use crate::common::error::MonitorResult;
use crate::common::types::{Endpoint, Service};
use crate::probe::ProbeEngine;
use crate::registry::ServiceRegistry;
use crate::store::PersistenceStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// レジストリサービス
#[derive(Clone)]
pub struct RegistryService {
    store: Arc<dyn PersistenceStore>,
    probe: ProbeEngine,
    write_gate: Arc<Mutex<()>>,
}

impl RegistryService {
    /// ストアとプローブエンジンからサービスを作成
    pub fn new(store: Arc<dyn PersistenceStore>, probe: ProbeEngine) -> Self {
        Self {
            store,
            probe,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// 保存済みドキュメントが読めることを確認し、サービス数を返す
    ///
    /// 起動時に呼び出し、破損したドキュメントで起動しないようにする。
    pub async fn ensure_readable(&self) -> MonitorResult<usize> {
        let snapshot = self.store.load().await?;
        Ok(snapshot.len())
    }

    /// 全サービスを登録順で取得
    pub async fn list_services(&self) -> MonitorResult<Vec<Service>> {
        Ok(self.store.load().await?.into_services())
    }

    /// サービスを作成
    pub async fn create_service(&self, name: &str, urls: &[String]) -> MonitorResult<Service> {
        let service = self.mutate(|registry| registry.create(name, urls)).await?;
        info!(
            service_id = %service.id,
            name = %service.name,
            endpoint_count = service.endpoints.len(),
            "Service registered"
        );
        Ok(service)
    }

    /// サービスと所有する全エンドポイントを削除
    pub async fn delete_service(&self, service_id: Uuid) -> MonitorResult<()> {
        let removed = self.mutate(|registry| registry.delete(service_id)).await?;
        info!(
            service_id = %removed.id,
            name = %removed.name,
            "Service deleted"
        );
        Ok(())
    }

    /// エンドポイントをプローブし、結果を反映した親サービスを返す
    pub async fn ping_endpoint(&self, service_id: Uuid, endpoint_id: Uuid) -> MonitorResult<Service> {
        let url = {
            let registry = ServiceRegistry::new(self.store.load().await?);
            let (_, endpoint) = registry.find_endpoint(service_id, endpoint_id)?;
            endpoint.url.clone()
        };

        let status = self.probe.probe(&url).await;

        // プローブ中に削除された場合はここでNotFoundになる
        let service = self
            .mutate(|registry| {
                registry
                    .record_probe(service_id, endpoint_id, status)
                    .cloned()
            })
            .await?;

        info!(
            service_id = %service_id,
            endpoint_id = %endpoint_id,
            status = %status,
            "Endpoint probed"
        );
        Ok(service)
    }

    /// 既存サービスにエンドポイントを追加
    pub async fn add_endpoint(&self, service_id: Uuid, url: &str) -> MonitorResult<Endpoint> {
        let endpoint = self
            .mutate(|registry| registry.add_endpoint(service_id, url))
            .await?;
        info!(
            service_id = %service_id,
            endpoint_id = %endpoint.id,
            url = %endpoint.url,
            "Endpoint added"
        );
        Ok(endpoint)
    }

    /// サービスからエンドポイントを削除
    pub async fn remove_endpoint(&self, service_id: Uuid, endpoint_id: Uuid) -> MonitorResult<()> {
        let removed = self
            .mutate(|registry| registry.remove_endpoint(service_id, endpoint_id))
            .await?;
        info!(
            service_id = %service_id,
            endpoint_id = %removed.id,
            "Endpoint removed"
        );
        Ok(())
    }

    /// 書き込みゲート内で1回の load → mutate → save を行う
    ///
    /// `f` が失敗した場合は保存しない（ドキュメントは変化しない）。
    async fn mutate<T, F>(&self, f: F) -> MonitorResult<T>
    where
        F: FnOnce(&mut ServiceRegistry) -> MonitorResult<T>,
    {
        let _gate = self.write_gate.lock().await;

        let mut registry = ServiceRegistry::new(self.store.load().await?);
        let output = f(&mut registry)?;
        self.store.save(registry.snapshot()).await?;

        Ok(output)
    }
}

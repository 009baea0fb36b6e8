//! サービスレジストリ
//!
//! 読み込んだスナップショット上でサービスとエンドポイントを操作する。
//! 永続化は行わない（`RegistryService` が load/save を担当）。

use crate::common::error::{MonitorError, MonitorResult};
use crate::common::types::{Endpoint, Service, Snapshot, StatusRecord};
use reqwest::Url;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// サービス名の最大文字数
pub const MAX_NAME_LEN: usize = 40;
/// URLの最大文字数
pub const MAX_URL_LEN: usize = 256;

/// 名前を検証し、前後の空白を除去して返す
///
/// ASCIIのみ、最大 `MAX_NAME_LEN` 文字。
pub fn validate_name(name: &str) -> MonitorResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MonitorError::validation("Name is required"));
    }
    if !name.is_ascii() {
        return Err(MonitorError::validation("Name can only contain ASCII"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(MonitorError::validation(format!(
            "Name cannot be longer than {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

/// URLを検証し、前後の空白を除去して返す
///
/// http/https の絶対URLのみ受け付ける。
pub fn validate_url(url: &str) -> MonitorResult<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(MonitorError::validation("URL is required"));
    }
    if !url.is_ascii() {
        return Err(MonitorError::validation("URL can only contain ASCII"));
    }
    if url.len() > MAX_URL_LEN {
        return Err(MonitorError::validation(format!(
            "URL cannot be longer than {} characters",
            MAX_URL_LEN
        )));
    }

    let parsed = Url::parse(url)
        .map_err(|_| MonitorError::validation(format!("Invalid URL format: {}", url)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(MonitorError::validation(format!(
            "URL must begin with http:// or https://: {}",
            url
        )));
    }

    Ok(url.to_string())
}

/// サービスレジストリ
///
/// スナップショットを所有し、作成・一覧・削除・検索と
/// プローブ結果の反映を提供する。
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    snapshot: Snapshot,
}

impl ServiceRegistry {
    /// スナップショットからレジストリを作成
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// 現在のスナップショット
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// 全サービスを登録順で取得
    pub fn list(&self) -> &[Service] {
        self.snapshot.services()
    }

    /// サービスを取得
    pub fn get(&self, service_id: Uuid) -> MonitorResult<&Service> {
        self.list()
            .iter()
            .find(|s| s.id == service_id)
            .ok_or(MonitorError::ServiceNotFound(service_id))
    }

    fn get_mut(&mut self, service_id: Uuid) -> MonitorResult<&mut Service> {
        self.snapshot
            .services_mut()
            .iter_mut()
            .find(|s| s.id == service_id)
            .ok_or(MonitorError::ServiceNotFound(service_id))
    }

    /// サービスを作成してスナップショット末尾に追加
    ///
    /// URLは重複を許し、指定順を保持する。検証はすべての変更より先に行う。
    pub fn create(&mut self, name: &str, urls: &[String]) -> MonitorResult<Service> {
        let name = validate_name(name)?;
        if urls.is_empty() {
            return Err(MonitorError::validation("At least one URL is required"));
        }
        let urls = urls
            .iter()
            .map(|u| validate_url(u))
            .collect::<MonitorResult<Vec<_>>>()?;

        let mut taken = self.taken_ids();
        let service_id = allocate_id(&mut taken);
        let endpoints = urls
            .into_iter()
            .map(|url| Endpoint::new(allocate_id(&mut taken), url))
            .collect();

        let service = Service {
            id: service_id,
            name,
            endpoints,
        };
        self.snapshot.services_mut().push(service.clone());

        debug!(
            service_id = %service.id,
            endpoint_count = service.endpoints.len(),
            "Service created"
        );

        Ok(service)
    }

    /// サービスと所有する全エンドポイントを削除
    pub fn delete(&mut self, service_id: Uuid) -> MonitorResult<Service> {
        let services = self.snapshot.services_mut();
        let index = services
            .iter()
            .position(|s| s.id == service_id)
            .ok_or(MonitorError::ServiceNotFound(service_id))?;

        let removed = services.remove(index);
        debug!(
            service_id = %removed.id,
            endpoint_count = removed.endpoints.len(),
            "Service deleted"
        );
        Ok(removed)
    }

    /// サービスに属するエンドポイントを検索
    pub fn find_endpoint(
        &self,
        service_id: Uuid,
        endpoint_id: Uuid,
    ) -> MonitorResult<(&Service, &Endpoint)> {
        let service = self.get(service_id)?;
        let endpoint = service
            .endpoint(endpoint_id)
            .ok_or(MonitorError::EndpointNotFound(endpoint_id))?;
        Ok((service, endpoint))
    }

    /// プローブ結果をエンドポイントに反映し、親サービスを返す
    ///
    /// `status` と `last_probed_at` には同じ時刻を書き込む。
    /// 既存の `last_probed_at` より古い結果は破棄する。
    pub fn record_probe(
        &mut self,
        service_id: Uuid,
        endpoint_id: Uuid,
        status: StatusRecord,
    ) -> MonitorResult<&Service> {
        let at = status.observed_at().ok_or_else(|| {
            MonitorError::Internal("probe result carries no observation time".to_string())
        })?;

        let service = self.get_mut(service_id)?;
        let endpoint = service
            .endpoint_mut(endpoint_id)
            .ok_or(MonitorError::EndpointNotFound(endpoint_id))?;

        match endpoint.last_probed_at {
            Some(previous) if previous > at => {
                debug!(
                    endpoint_id = %endpoint_id,
                    previous = %previous,
                    discarded = %at,
                    "Discarding out-of-order probe result"
                );
            }
            _ => {
                endpoint.status = status;
                endpoint.last_probed_at = Some(at);
            }
        }

        Ok(&*service)
    }

    /// 既存サービスにエンドポイントを追加
    pub fn add_endpoint(&mut self, service_id: Uuid, url: &str) -> MonitorResult<Endpoint> {
        let url = validate_url(url)?;
        let mut taken = self.taken_ids();
        let endpoint = Endpoint::new(allocate_id(&mut taken), url);

        let service = self.get_mut(service_id)?;
        service.endpoints.push(endpoint.clone());
        Ok(endpoint)
    }

    /// サービスからエンドポイントを削除
    pub fn remove_endpoint(
        &mut self,
        service_id: Uuid,
        endpoint_id: Uuid,
    ) -> MonitorResult<Endpoint> {
        let service = self.get_mut(service_id)?;
        let index = service
            .endpoints
            .iter()
            .position(|e| e.id == endpoint_id)
            .ok_or(MonitorError::EndpointNotFound(endpoint_id))?;
        Ok(service.endpoints.remove(index))
    }

    /// 使用中の全ID（サービスIDとエンドポイントID）
    fn taken_ids(&self) -> HashSet<Uuid> {
        self.list()
            .iter()
            .flat_map(|s| std::iter::once(s.id).chain(s.endpoints.iter().map(|e| e.id)))
            .collect()
    }
}

/// 既存IDと衝突しない新しいIDを払い出す
fn allocate_id(taken: &mut HashSet<Uuid>) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if taken.insert(id) {
            return id;
        }
    }
}

//! 共通型定義
//!
//! Service, Endpoint, StatusRecord等のコアデータ型
//!
//! 永続化ドキュメントとHTTPレスポンスは同じJSON形状を共有する:
//! `{id, name, urls: [{id, url, status, lastPing}]}`

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use uuid::Uuid;

/// 現在時刻（ミリ秒精度に切り詰め）
///
/// ワイヤ形式はミリ秒精度のため、取得時点で切り詰めておくことで
/// 保存→読込後も同じ値になる。
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// ISO-8601（ミリ秒、`Z`サフィックス）形式に変換
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ISO-8601文字列をパース
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s.trim()).map(|dt| dt.with_timezone(&Utc))
}

/// StatusRecordのパースエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseStatusError {
    /// `ALIVE`/`DEAD` に `@<timestamp>` が付いていない
    #[error("status '{0}' has no timestamp")]
    MissingTimestamp(String),
    /// タイムスタンプが不正
    #[error("status '{0}' has an invalid timestamp")]
    InvalidTimestamp(String),
}

/// エンドポイントの稼働状態と観測時刻
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusRecord {
    /// 未プローブ
    #[default]
    Unknown,
    /// 稼働中（2xx応答）
    Alive {
        /// 観測時刻
        at: DateTime<Utc>,
    },
    /// 停止中（非2xx応答または通信失敗）
    Dead {
        /// 観測時刻
        at: DateTime<Utc>,
    },
}

impl StatusRecord {
    /// 稼働中として記録
    pub fn alive(at: DateTime<Utc>) -> Self {
        Self::Alive { at }
    }

    /// 停止中として記録
    pub fn dead(at: DateTime<Utc>) -> Self {
        Self::Dead { at }
    }

    /// 状態ラベル（`UNKNOWN` / `ALIVE` / `DEAD`）
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Alive { .. } => "ALIVE",
            Self::Dead { .. } => "DEAD",
        }
    }

    /// 観測時刻（Unknownの場合はNone）
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Unknown => None,
            Self::Alive { at } | Self::Dead { at } => Some(*at),
        }
    }

    /// 稼働中か
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Alive { .. })
    }
}

impl std::fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.observed_at() {
            Some(at) => write!(f, "{}@{}", self.as_label(), format_timestamp(&at)),
            None => f.write_str(self.as_label()),
        }
    }
}

impl FromStr for StatusRecord {
    type Err = ParseStatusError;

    /// 部分文字列 `ALIVE` / `DEAD` で判定し、それ以外は `Unknown` とみなす
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let alive = if s.contains("ALIVE") {
            true
        } else if s.contains("DEAD") {
            false
        } else {
            return Ok(Self::Unknown);
        };

        let (_, ts) = s
            .split_once('@')
            .ok_or_else(|| ParseStatusError::MissingTimestamp(s.to_string()))?;
        let at =
            parse_timestamp(ts).map_err(|_| ParseStatusError::InvalidTimestamp(s.to_string()))?;

        Ok(if alive {
            Self::alive(at)
        } else {
            Self::dead(at)
        })
    }
}

impl Serialize for StatusRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatusRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => s.parse().map_err(serde::de::Error::custom),
            None => Ok(Self::Unknown),
        }
    }
}

/// `Option<DateTime<Utc>>` をミリ秒精度のISO-8601文字列 / null として扱う
mod timestamp_option {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(at) => serializer.serialize_str(&format_timestamp(at)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| parse_timestamp(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// 監視対象URL（エンドポイント）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// 一意識別子（レジストリ全体で一意）
    pub id: Uuid,
    /// 監視URL
    pub url: String,
    /// 最新のプローブ結果
    #[serde(default)]
    pub status: StatusRecord,
    /// 最終プローブ時刻
    #[serde(rename = "lastPing", default, with = "timestamp_option")]
    pub last_probed_at: Option<DateTime<Utc>>,
}

impl Endpoint {
    /// 未プローブのエンドポイントを作成
    pub fn new(id: Uuid, url: String) -> Self {
        Self {
            id,
            url,
            status: StatusRecord::Unknown,
            last_probed_at: None,
        }
    }
}

/// サービス（エンドポイントの名前付きグループ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// 一意識別子
    pub id: Uuid,
    /// 表示名
    pub name: String,
    /// 所有するエンドポイント（登録順）
    #[serde(rename = "urls", default)]
    pub endpoints: Vec<Endpoint>,
}

impl Service {
    /// IDでエンドポイントを取得
    pub fn endpoint(&self, endpoint_id: Uuid) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == endpoint_id)
    }

    /// IDでエンドポイントを可変参照で取得
    pub fn endpoint_mut(&mut self, endpoint_id: Uuid) -> Option<&mut Endpoint> {
        self.endpoints.iter_mut().find(|e| e.id == endpoint_id)
    }
}

/// レジストリ全体の状態（永続化の単位）
///
/// JSON上はServiceの配列そのもの。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    services: Vec<Service>,
}

impl Snapshot {
    /// 空のスナップショット
    pub fn new() -> Self {
        Self::default()
    }

    /// 全サービス（登録順）
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// 全サービスを可変参照で取得
    pub fn services_mut(&mut self) -> &mut Vec<Service> {
        &mut self.services
    }

    /// サービス一覧に変換
    pub fn into_services(self) -> Vec<Service> {
        self.services
    }

    /// サービス数
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// 空か
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

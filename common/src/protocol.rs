//! 通信プロトコル定義
//!
//! HTTP API のリクエスト/レスポンスボディ

use serde::{Deserialize, Serialize};

/// サービス登録リクエスト
///
/// 必須チェックはハンドラ側で行うため、各フィールドはOptionで受ける。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateServiceRequest {
    /// 表示名
    #[serde(default)]
    pub name: Option<String>,
    /// 監視URL一覧
    #[serde(default)]
    pub urls: Option<Vec<String>>,
}

/// 既存サービスへのURL追加リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AddUrlRequest {
    /// 監視URL
    #[serde(default)]
    pub url: Option<String>,
}

/// エラーレスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// エラーメッセージ
    pub error: String,
}

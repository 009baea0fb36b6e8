//! svcwatch Server
//!
//! 監視対象サービスとエンドポイントを管理し、オンデマンドで死活確認を行うサーバー

#![warn(missing_docs)]

/// 共通型定義（svcwatch-commonの再エクスポート）
pub use svcwatch_common as common;

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;

/// エンドポイント死活確認
pub mod probe;

/// サービス/エンドポイントのインメモリモデル
pub mod registry;

/// load → mutate → save のオーケストレーション
pub mod registry_service;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

/// レジストリ永続化
pub mod store;

use std::path::PathBuf;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// レジストリサービス（全ての変更はここを経由する）
    pub registry: registry_service::RegistryService,
    /// 静的ファイル配信ディレクトリ
    pub static_dir: Option<PathBuf>,
}

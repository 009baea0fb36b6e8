//! svcwatch 共通ライブラリ
//!
//! サーバーとテストで共有する型・設定・エラー定義

#![warn(missing_docs)]

/// 設定構造体
pub mod config;

/// エラー型
pub mod error;

/// 通信プロトコル（リクエスト/レスポンス）
pub mod protocol;

/// コアデータ型（Service, Endpoint, StatusRecord）
pub mod types;

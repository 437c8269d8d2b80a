//! 共通型定義
//!
//! API・中継パイプライン・ストレージで共有する型とエラー

/// エラー型
pub mod error;

/// ドメイン型
pub mod types;

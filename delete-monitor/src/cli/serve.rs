//! serve サブコマンド
//!
//! 中継サーバーを起動します。

use crate::config::get_env_with_fallback_or;
use clap::Args;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "8000", env = "DELETE_MONITOR_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "DELETE_MONITOR_HOST")]
    pub host: String,
}

impl ServeArgs {
    /// サブコマンドなしで起動した場合の引数（環境変数から）
    pub fn from_env() -> Self {
        let host = get_env_with_fallback_or("DELETE_MONITOR_HOST", "HOST", "0.0.0.0");
        let port = crate::config::get_env_with_fallback_parse("DELETE_MONITOR_PORT", "PORT", 8000);
        Self { host, port }
    }

    /// `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

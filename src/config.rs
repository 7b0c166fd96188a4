//! 起動設定。コマンドライン引数、未指定なら `KYOBO_*` 環境変数から読む。

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// 永続化先の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// プロセス内のみ（再起動で消える）
    Memory,
    /// JSONファイル1つに両テーブルを保存
    Json,
}

/// kyobo-catalog - author & book catalog over REST
#[derive(Debug, Clone, Parser)]
#[command(name = "kyobo-catalog")]
#[command(version, about, long_about = None)]
pub struct AppConfig {
    /// Address to bind to
    #[arg(long, env = "KYOBO_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind to
    #[arg(long, env = "KYOBO_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Storage backend
    #[arg(long, env = "KYOBO_STORE", value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// Catalog file used by the json store
    #[arg(long, env = "KYOBO_DATA_FILE", default_value = "kyobo-catalog.json")]
    pub data_file: PathBuf,

    /// Log filter directive (RUST_LOG takes precedence)
    #[arg(long, env = "KYOBO_LOG", default_value = "kyobo_catalog=info,tower_http=info")]
    pub log: String,
}

impl AppConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

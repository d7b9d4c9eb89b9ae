//! 環境変数からの設定読み込み

/// データベース未指定時の接続先
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/toestel_rental";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    /// 環境変数から読み込む
    ///
    /// - DATABASE_URL
    /// - PORT
    /// - DATABASE_MAX_CONNECTIONS
    ///
    /// 未設定または解釈できない値はデフォルト値になる。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT);
        let max_connections =
            parse_or_default(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);

        Self {
            database_url,
            port,
            max_connections,
        }
    }

    /// 待ち受けアドレス
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or_default<T: std::str::FromStr + Copy + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}

/*
 * Responsibility
 * - 環境変数の読み込み (PORT, DATABASE_URL, CORS 許可, 署名鍵, トークン寿命など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: u64 = 60 * 60;
const MAX_ACCESS_TOKEN_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    // None -> in-memory repository (development only)
    pub database_url: Option<String>,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_issuer: String,
    // HS256 key material shared by the credential issuer and verifier
    pub jwt_secret: String,
    pub access_token_ttl_seconds: u64,
    pub access_token_leeway_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material or credentials embedded in the database url
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("database", &self.database_url.as_ref().map(|_| "postgres"))
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("auth_issuer", &self.auth_issuer)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field(
                "access_token_leeway_seconds",
                &self.access_token_leeway_seconds,
            )
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let app_env = AppEnv::from_env();

        if database_url.is_none() && app_env.is_production() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_issuer = std::env::var("AUTH_ISSUER").unwrap_or_else(|_| "task-users".to_string());

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let access_token_ttl_seconds =
            parse_ttl_seconds(std::env::var("ACCESS_TOKEN_TTL_SECONDS").ok().as_deref())?;

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            auth_issuer,
            jwt_secret,
            access_token_ttl_seconds,
            access_token_leeway_seconds,
        })
    }
}

/// unset -> 1 hour. 0, garbage or more than 30 days -> Invalid
fn parse_ttl_seconds(raw: Option<&str>) -> Result<u64, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(DEFAULT_ACCESS_TOKEN_TTL_SECONDS);
    };

    raw.parse::<u64>()
        .ok()
        .filter(|v| (1..=MAX_ACCESS_TOKEN_TTL_SECONDS).contains(v))
        .ok_or(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_defaults_to_an_hour() {
        assert_eq!(parse_ttl_seconds(None).unwrap(), 3600);
        assert_eq!(parse_ttl_seconds(Some("  ")).unwrap(), 3600);
        assert_eq!(parse_ttl_seconds(Some("900")).unwrap(), 900);
    }

    #[test]
    fn ttl_out_of_range_is_rejected() {
        for raw in ["0", "-1", "soon", "2592001", "18446744073709551615"] {
            assert!(
                matches!(
                    parse_ttl_seconds(Some(raw)),
                    Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))
                ),
                "{raw}"
            );
        }
        assert_eq!(
            parse_ttl_seconds(Some("2592000")).unwrap(),
            MAX_ACCESS_TOKEN_TTL_SECONDS
        );
    }
}

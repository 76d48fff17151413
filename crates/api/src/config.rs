use chrono::FixedOffset;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Offset used to cut booking timestamps into calendar days. `None`
    /// follows the server's local offset, read on every request.
    pub calendar_offset: Option<FixedOffset>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                               |
    /// |----------------------------|---------------------------------------|
    /// | `HOST`                     | `0.0.0.0`                             |
    /// | `PORT`                     | `3000`                                |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`               |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                                  |
    /// | `CALENDAR_UTC_OFFSET_MINS` | server local offset, read per request |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let calendar_offset = match std::env::var("CALENDAR_UTC_OFFSET_MINS") {
            Ok(raw) => Some(
                parse_offset_mins(&raw)
                    .unwrap_or_else(|e| panic!("CALENDAR_UTC_OFFSET_MINS is invalid: {e}")),
            ),
            Err(_) => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            calendar_offset,
            jwt,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a signed minute count (e.g. `330`, `-300`) into a fixed offset.
fn parse_offset_mins(raw: &str) -> Result<FixedOffset, String> {
    let mins: i32 = raw
        .trim()
        .parse()
        .map_err(|e| format!("'{raw}' is not a whole number of minutes: {e}"))?;
    mins.checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| format!("{mins} minutes is outside the valid UTC offset range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_origins(" http://a.test, ,http://b.test "),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn offset_parses_positive_and_negative_minutes() {
        assert_eq!(parse_offset_mins("330").unwrap().local_minus_utc(), 19_800);
        assert_eq!(parse_offset_mins("-300").unwrap().local_minus_utc(), -18_000);
        assert_eq!(parse_offset_mins("0").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn offset_rejects_garbage_and_out_of_range() {
        assert!(parse_offset_mins("five").is_err());
        assert!(parse_offset_mins("100000").is_err());
    }
}

use std::env;
use std::str::FromStr;
use std::time::Duration;
use std::num::NonZeroU32;
use governor::Quota;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,

    // Rate limiting configs
    pub server_get_period_secs: u64,
    pub server_get_burst_limit: u32,
    pub server_post_period_secs: u64,
    pub server_post_burst_limit: u32,

    // Directory limits
    pub max_servers: usize,
    pub server_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            server_get_period_secs: 1,
            server_get_burst_limit: 60,
            server_post_period_secs: 5,
            server_post_burst_limit: 10,
            max_servers: 10_000,
            server_timeout_secs: 300, // 5 minutes
        }
    }
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Reads every setting from the environment, keeping the default for
    /// anything missing or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: var_or("PORT", defaults.port),
            server_get_period_secs: var_or("SERVER_GET_PERIOD_SECS", defaults.server_get_period_secs),
            server_get_burst_limit: var_or("SERVER_GET_BURST_LIMIT", defaults.server_get_burst_limit),
            server_post_period_secs: var_or("SERVER_POST_PERIOD_SECS", defaults.server_post_period_secs),
            server_post_burst_limit: var_or("SERVER_POST_BURST_LIMIT", defaults.server_post_burst_limit),
            max_servers: var_or("MAX_SERVERS", defaults.max_servers),
            server_timeout_secs: var_or("SERVER_TIMEOUT_SECS", defaults.server_timeout_secs),
        }
    }

    pub fn bind(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn server_get_quota(&self) -> Option<Quota> {
        quota(self.server_get_period_secs, self.server_get_burst_limit)
    }

    pub fn server_post_quota(&self) -> Option<Quota> {
        quota(self.server_post_period_secs, self.server_post_burst_limit)
    }
}

// None when either the period or the burst is zero.
fn quota(period_secs: u64, burst: u32) -> Option<Quota> {
    Some(Quota::with_period(Duration::from_secs(period_secs))?.allow_burst(NonZeroU32::new(burst)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quotas_are_valid() {
        let config = Config::default();
        assert!(config.server_get_quota().is_some());
        assert!(config.server_post_quota().is_some());
    }

    #[test]
    fn zero_period_or_burst_has_no_quota() {
        let config = Config {
            server_get_period_secs: 0,
            server_post_burst_limit: 0,
            ..Config::default()
        };
        assert!(config.server_get_quota().is_none());
        assert!(config.server_post_quota().is_none());
    }

    #[test]
    fn bind_joins_address_and_port() {
        let config = Config {
            bind_address: "127.0.0.1".to_string(),
            port: 7000,
            ..Config::default()
        };
        assert_eq!(config.bind(), "127.0.0.1:7000");
    }
}

//! Redis admission gate - fixed windows shared across instances.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, Script};

use signup_core::ports::{AdmissionGate, RateLimitError, RateLimitResult};

use super::memory::RateLimitConfig;

#[derive(Debug, Clone)]
pub struct RedisGateConfig {
    pub url: String,
    pub connect_timeout: Duration,
    pub limits: RateLimitConfig,
    /// Key prefix for window counters
    pub key_prefix: String,
}

impl RedisGateConfig {
    pub fn new(url: impl Into<String>, limits: RateLimitConfig) -> Self {
        Self {
            url: url.into(),
            connect_timeout: Duration::from_secs(5),
            limits,
            key_prefix: "admission".to_string(),
        }
    }
}

/// Fixed-window gate keeping one expiring counter per client in Redis.
///
/// The counter key lives for exactly one window from the first admitted
/// request. Denied requests read the counter without incrementing it.
pub struct RedisAdmissionGate {
    conn: ConnectionManager,
    config: RedisGateConfig,
    script: Script,
}

impl RedisAdmissionGate {
    pub async fn new(config: RedisGateConfig) -> Result<Self, RateLimitError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| RateLimitError::Backend(e.to_string()))?;

        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| RateLimitError::Backend("Connection timed out".to_string()))?
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        // Returns: [admitted, count, pttl_ms]
        let script = Script::new(
            r#"
            local key = KEYS[1]
            local max_requests = tonumber(ARGV[1])
            local window_ms = tonumber(ARGV[2])

            local current = tonumber(redis.call('GET', key) or '0')
            if current > 0 and current >= max_requests then
                return {0, current, redis.call('PTTL', key)}
            end

            current = redis.call('INCR', key)
            if current == 1 then
                redis.call('PEXPIRE', key, window_ms)
            end

            return {1, current, redis.call('PTTL', key)}
            "#,
        );

        tracing::info!(url = %config.url, "Connected to Redis admission gate");

        Ok(Self {
            conn,
            config,
            script,
        })
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }
}

#[async_trait]
impl AdmissionGate for RedisAdmissionGate {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        let limits = &self.config.limits;
        let mut conn = self.conn.clone();

        let result: Vec<i64> = self
            .script
            .key(self.make_key(key))
            .arg(limits.max_requests)
            .arg(limits.window.as_millis() as u64)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        let allowed = result.first().copied().unwrap_or(1) == 1;
        let count = result.get(1).copied().unwrap_or(1).max(0) as u32;
        let ttl_ms = result
            .get(2)
            .copied()
            .filter(|ttl| *ttl > 0)
            .map(|ttl| Duration::from_millis(ttl as u64))
            .unwrap_or(limits.window);

        Ok(RateLimitResult {
            allowed,
            remaining: if allowed {
                limits.max_requests.saturating_sub(count)
            } else {
                0
            },
            reset_after: ttl_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_test_gate(prefix: &str) -> Option<RedisAdmissionGate> {
        let mut config = RedisGateConfig::new(
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            RateLimitConfig {
                max_requests: 2,
                window: Duration::from_secs(1),
            },
        );
        config.connect_timeout = Duration::from_secs(1);
        config.key_prefix = format!("{prefix}:{}", uuid::Uuid::new_v4());

        RedisAdmissionGate::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_gate_fixed_window() {
        let Some(gate) = get_test_gate("test_gate").await else {
            return;
        };

        let res = gate.check("client").await.unwrap();
        assert!(res.allowed);
        assert_eq!(res.remaining, 1);

        let res = gate.check("client").await.unwrap();
        assert!(res.allowed);
        assert_eq!(res.remaining, 0);

        // Denied requests do not extend the count or the window
        assert!(!gate.check("client").await.unwrap().allowed);
        assert!(!gate.check("client").await.unwrap().allowed);

        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert!(gate.check("client").await.unwrap().allowed);
    }

    #[tokio::test]
    async fn test_redis_gate_separates_clients() {
        let Some(gate) = get_test_gate("test_gate_clients").await else {
            return;
        };

        assert!(gate.check("a").await.unwrap().allowed);
        assert!(gate.check("a").await.unwrap().allowed);
        assert!(!gate.check("a").await.unwrap().allowed);
        assert!(gate.check("b").await.unwrap().allowed);
    }
}

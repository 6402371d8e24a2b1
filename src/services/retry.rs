//! Reintentos con espera creciente
//!
//! Solo se reintenta cuando el backend es inalcanzable (`AppError::Network`).
//! Los errores HTTP y de decodificación se devuelven en el primer intento.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppResult;

/// Factor de crecimiento de la espera entre intentos
const DELAY_GROWTH: f64 = 1.5;

// acota la espera para que `mul_f64` no desborde con muchos intentos
const MAX_GROWTH_STEPS: u32 = 20;

/// Política de reintentos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// Los endpoints pesados (`/cars`) esperan el doble
    pub large_endpoint: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(2000),
            large_endpoint: false,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self {
            max_attempts: config.retry_max_attempts.max(1),
            base_delay: config.retry_base_delay,
            large_endpoint: false,
        }
    }

    pub fn for_large_endpoint(mut self) -> Self {
        self.large_endpoint = true;
        self
    }

    /// Espera tras el intento `attempt` (1-based): empieza en `base` y crece ×1.5
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let steps = attempt.saturating_sub(1).min(MAX_GROWTH_STEPS) as i32;
        let delay = self.base_delay.mul_f64(DELAY_GROWTH.powi(steps));
        if self.large_endpoint {
            delay * 2
        } else {
            delay
        }
    }
}

/// Ejecuta `operation` hasta `max_attempts` veces mientras falle por red
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, label: &str, mut operation: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        info!("🔄 Intento {}/{}: {}", attempt, max_attempts, label);

        match operation().await {
            Ok(value) => {
                info!("✅ Éxito en el intento {}: {}", attempt, label);
                return Ok(value);
            }
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                let delay = policy.delay_after(attempt);
                warn!(
                    "❌ Intento {} falló ({}), esperando {}ms: {}",
                    attempt,
                    e.code(),
                    delay.as_millis(),
                    label
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                warn!("❌ Intento {} falló sin reintento ({}): {}", attempt, e.code(), label);
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            large_endpoint: false,
        }
    }

    #[test]
    fn test_growing_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(3000));
        assert_eq!(policy.delay_after(3), Duration::from_millis(4500));
        let large = policy.for_large_endpoint();
        assert_eq!(large.delay_after(1), Duration::from_millis(4000));
        assert_eq!(large.delay_after(2), Duration::from_millis(6000));
    }

    #[tokio::test]
    async fn test_network_errors_are_retried_until_exhausted() {
        let calls = AtomicU32::new(0);
        let result: AppResult<()> = with_retry(&fast_policy(), "GET /cars", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::Network("connection refused".into())) }
        })
        .await;

        assert!(matches!(result, Err(AppError::Network(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_network_error() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(), "GET /cars", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(AppError::Network("unreachable".into()))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_http_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: AppResult<()> = with_retry(&fast_policy(), "POST /favorites", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::NotFound("Carro não encontrado".into())) }
        })
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

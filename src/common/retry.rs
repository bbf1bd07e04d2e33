// src/common/retry.rs

use std::future::Future;
use std::time::Duration;

// Política de retry explícita: máximo de tentativas e intervalo fixo entre
// elas. Cada operação que precisa repetir recebe uma política pronta em vez
// de carregar o próprio laço com sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

// O erro final junto com quantas tentativas foram feitas até desistir.
#[derive(Debug)]
pub struct RetryFailure<E> {
    pub error: E,
    pub attempts: u32,
}

impl RetryFailure<crate::common::error::FetchError> {
    // Desistir depois de repetir vira Exhausted; uma falha única (política
    // de tentativa só, ou erro não repetível) passa direto
    pub fn into_fetch_error(self) -> crate::common::error::FetchError {
        if self.attempts > 1 && self.error.is_retryable() {
            crate::common::error::FetchError::Exhausted {
                attempts: self.attempts,
                last: self.error.to_string(),
            }
        } else {
            self.error
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            // Zero tentativas não faz sentido; a primeira sempre acontece.
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    // Política que executa uma única tentativa, sem espera.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    // Executa `operation` até suceder, até `retryable` negar o erro, ou até
    // esgotar as tentativas. O intervalo só corre entre tentativas.
    pub async fn run<T, E, F, Fut, P>(
        &self,
        mut operation: F,
        retryable: P,
    ) -> Result<T, RetryFailure<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if attempt >= self.max_attempts || !retryable(&error) {
                        return Err(RetryFailure { error, attempts: attempt });
                    }
                    tracing::warn!(
                        "Tentativa {}/{} falhou, aguardando {:?} antes de repetir",
                        attempt,
                        self.max_attempts,
                        self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn esgota_as_tentativas_com_intervalo_fixo() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        let result: Result<(), _> = policy
            .run(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err::<(), &str>("sem resposta") }
                },
                |_| true,
            )
            .await;

        let failure = result.unwrap_err();
        assert_eq!(failure.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Duas esperas de 2s entre as três tentativas.
        assert!(start.elapsed() >= Duration::from_secs(4));
    }

    #[tokio::test]
    async fn erro_nao_repetivel_interrompe_na_primeira() {
        let policy = RetryPolicy::new(3, Duration::from_millis(10));
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = policy
            .run(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err::<(), &str>("senha incorreta") }
                },
                |_| false,
            )
            .await;

        let failure = result.unwrap_err();
        assert_eq!(failure.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sucesso_tardio_nao_vira_erro() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result = policy
            .run(
                || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if n < 2 {
                            Err("instável")
                        } else {
                            Ok("ok")
                        }
                    }
                },
                |_| true,
            )
            .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}

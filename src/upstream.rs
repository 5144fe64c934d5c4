use std::future::Future;
use std::time::Duration;

use crate::error::UpstreamError;

/// Run one upstream call under a hard deadline.
///
/// The HTTP clients also carry a request timeout, but this bound holds for
/// any implementation behind the client traits, including ones that never
/// touch the network.
pub async fn bounded<T, F>(timeout: Duration, service: &'static str, call: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(service, timeout_secs = timeout.as_secs(), "upstream call timed out");
            Err(UpstreamError::Timeout {
                service,
                secs: timeout.as_secs(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_fast_results() {
        let out = bounded(Duration::from_secs(1), "test", async { Ok::<_, UpstreamError>(7) }).await;
        assert_eq!(out.unwrap(), 7);
    }

    #[tokio::test]
    async fn passes_through_errors() {
        let out: Result<(), _> = bounded(Duration::from_secs(1), "test", async {
            Err(UpstreamError::GraphQl("bad query".into()))
        })
        .await;
        assert!(matches!(out, Err(UpstreamError::GraphQl(m)) if m == "bad query"));
    }

    #[tokio::test]
    async fn hung_call_becomes_timeout() {
        let out: Result<(), _> = bounded(Duration::from_millis(20), "groq", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(
            out,
            Err(UpstreamError::Timeout { service: "groq", .. })
        ));
    }
}

//! Credential store deadline
//!
//! Every store call is wrapped in a timeout. If the request itself is
//! dropped (client gone), the wrapped future is dropped with it and the
//! store call is abandoned.

use std::future::Future;
use std::time::Duration;

use crate::error::{AuthError, AuthResult};

pub async fn with_deadline<F, T>(limit: Duration, call: F) -> AuthResult<T>
where
    F: Future<Output = AuthResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(AuthError::StoreTimeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passes_result_through() {
        let ok = with_deadline(Duration::from_secs(1), async { Ok(5) }).await;
        assert_eq!(ok.unwrap(), 5);

        let err: AuthResult<()> =
            with_deadline(Duration::from_secs(1), async { Err(AuthError::UserNotFound) }).await;
        assert!(matches!(err, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        };
        let result = with_deadline(Duration::from_millis(50), slow).await;
        assert!(matches!(result, Err(AuthError::StoreTimeout)));
    }
}

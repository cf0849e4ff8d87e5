//! Login action

use crate::core::auth::{CREDENTIALS_STRATEGY, Credentials, CredentialsProvider, ProviderError};
use crate::core::form::FormData;

/// Code shown by the login page when the credentials are rejected
pub const CREDENTIAL_SIGNIN: &str = "CredentialSignin";

/// Forward every form field to the provider's `credentials` strategy
///
/// Returns `Ok(None)` on success and `Ok(Some("CredentialSignin"))` when the
/// provider rejects the credentials. Any other provider failure is returned
/// as is. The previous state is not consulted.
pub async fn authenticate(
    _prev: Option<&str>,
    form: &FormData,
    provider: &dyn CredentialsProvider,
) -> Result<Option<&'static str>, ProviderError> {
    let credentials: Credentials = form.clone().into();

    match provider.sign_in(CREDENTIALS_STRATEGY, &credentials).await {
        Ok(()) => {
            tracing::info!("Sign-in succeeded");
            Ok(None)
        }
        Err(e) if e.is_invalid_credentials() => {
            tracing::warn!("Sign-in rejected: invalid credentials");
            Ok(Some(CREDENTIAL_SIGNIN))
        }
        Err(e) => {
            tracing::error!(error = %e, "Identity provider failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::{InMemoryCredentialsProvider, ProviderErrorKind};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records what it was called with and answers with a fixed result
    struct RecordingProvider {
        result: Result<(), ProviderError>,
        calls: Mutex<Vec<(String, Credentials)>>,
    }

    #[async_trait]
    impl CredentialsProvider for RecordingProvider {
        async fn sign_in(
            &self,
            strategy: &str,
            credentials: &Credentials,
        ) -> Result<(), ProviderError> {
            self.calls
                .lock()
                .expect("lock")
                .push((strategy.to_string(), credentials.clone()));
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn test_all_fields_forwarded_to_credentials_strategy() {
        let provider = RecordingProvider {
            result: Ok(()),
            calls: Mutex::new(Vec::new()),
        };
        let form = FormData::from_pairs([
            ("email", "user@nextmail.com"),
            ("password", "123456"),
            ("redirectTo", "/dashboard"),
        ]);

        let result = authenticate(None, &form, &provider).await;

        assert_eq!(result.expect("sign-in succeeds"), None);
        let calls = provider.calls.lock().expect("lock");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "credentials");
        assert_eq!(calls[0].1.len(), 3);
        assert_eq!(calls[0].1["redirectTo"], "/dashboard");
    }

    #[tokio::test]
    async fn test_invalid_credentials_returns_code() {
        let provider = InMemoryCredentialsProvider::new().with_account("a@b.c", "right");
        let form = FormData::from_pairs([("email", "a@b.c"), ("password", "wrong")]);

        let result = authenticate(Some("CredentialSignin"), &form, &provider).await;

        assert_eq!(result.expect("handled"), Some(CREDENTIAL_SIGNIN));
    }

    #[tokio::test]
    async fn test_other_provider_errors_propagate_unchanged() {
        let provider = RecordingProvider {
            result: Err(ProviderError::new(
                ProviderErrorKind::Other,
                "CredentialsSignin lookalike from a broken backend",
            )),
            calls: Mutex::new(Vec::new()),
        };
        let form = FormData::from_pairs([("email", "a@b.c")]);

        let err = authenticate(None, &form, &provider)
            .await
            .expect_err("provider failure propagates");

        assert_eq!(err.kind, ProviderErrorKind::Other);
        assert_eq!(
            err.message,
            "CredentialsSignin lookalike from a broken backend"
        );
    }
}

//! Sign-in / sign-out
//!
//! Populates and clears the `Session`.

use tracing::warn;

use crate::api::{AccountCredentials, AuthApi};
use crate::error::{SyncError, SyncResult};
use crate::session::{Credential, Session};

/// Exchange username/password for a bearer token and establish the session.
///
/// Blank input is rejected without contacting the server. On failure the
/// session is left as it was.
pub async fn sign_in<A: AuthApi + ?Sized>(
    api: &A,
    session: &Session,
    username: &str,
    password: &str,
) -> SyncResult<Credential> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(SyncError::InvalidInput("username and password are required".into()));
    }

    let account = AccountCredentials {
        username: username.to_owned(),
        password: password.to_owned(),
    };
    let token = api.sign_in(&account).await.map_err(|source| {
        warn!(username, error = %source, "sign-in failed");
        SyncError::SignIn(source)
    })?;

    let credential = Credential::new(username, token.access_token);
    session.establish(credential.clone());
    Ok(credential)
}

/// Clear the session; returns whether anyone was signed in
pub fn sign_out(session: &Session) -> bool {
    session.clear()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::testing::FakeApi;

    #[tokio::test]
    async fn test_sign_in_establishes_session() {
        let api = FakeApi::new().with_token("jwt-123");
        let session = Session::new();

        let credential = sign_in(&api, &session, " leandro ", "admin123").await.unwrap();

        assert_eq!(credential.username(), "leandro");
        assert_eq!(session.credential().unwrap().access_token(), "jwt-123");
        assert_eq!(api.sign_ins(), vec!["leandro".to_string()]);
    }

    #[tokio::test]
    async fn test_sign_in_rejects_blank_input_locally() {
        let api = FakeApi::new().with_token("jwt-123");
        let session = Session::new();

        let result = sign_in(&api, &session, "leandro", "").await;

        assert!(matches!(result, Err(SyncError::InvalidInput(_))));
        assert!(api.sign_ins().is_empty());
        assert!(!session.is_active());
    }

    #[tokio::test]
    async fn test_failed_sign_in_leaves_session_absent() {
        let api = FakeApi::new().with_sign_in_error(ApiError::Unauthorized);
        let session = Session::new();

        let result = sign_in(&api, &session, "leandro", "wrong").await;

        assert_eq!(result, Err(SyncError::SignIn(ApiError::Unauthorized)));
        assert!(!session.is_active());
    }

    #[test]
    fn test_sign_out() {
        let session = Session::new();
        session.establish(Credential::new("leandro", "jwt-123"));
        assert!(sign_out(&session));
        assert!(!sign_out(&session));
    }
}

//! Login, logout and profile lookup on top of the user and session stores.

use tracing::{info, instrument, trace, warn};

use crate::error::{ModelError, Result};
use crate::session::{SessionStore, SessionToken};
use crate::store::UserStore;
use crate::user::{Credentials, User};

/// Session-based authentication.
///
/// Owns the token to session mapping and reads users through the shared
/// [`UserStore`].
#[derive(Clone, Debug)]
pub struct AuthService {
    users: UserStore,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(users: UserStore) -> Self {
        Self {
            users,
            sessions: SessionStore::new(),
        }
    }

    /// Checks the credentials and opens a new session for the matching user.
    #[instrument(skip(self))]
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken> {
        trace!("Entering AuthService::login");
        let Some(user) = self
            .users
            .find_by_credentials(&credentials.username, &credentials.password)
            .await
        else {
            warn!("Invalid credentials for username '{}'", credentials.username);
            return Err(ModelError::Unauthorized);
        };

        let token = self.sessions.create_session(user.id).await;
        info!("User '{}' (ID {}) logged in", user.username, user.id);
        Ok(token)
    }

    /// Ends the session identified by `token`.
    ///
    /// A token that maps to no session is accepted; only a missing token is
    /// rejected.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: Option<&str>) -> Result<()> {
        let Some(token) = token else {
            warn!("Logout attempted without a session token");
            return Err(ModelError::Unauthorized);
        };

        match self.sessions.destroy_session(token).await {
            Some(session) => info!("User ID {} logged out", session.user_id),
            None => warn!("Logout with an unknown session token"),
        }
        Ok(())
    }

    /// The user owning the session identified by `token`.
    ///
    /// Returns [`ModelError::NotFound`] when the session outlived its user.
    #[instrument(skip_all)]
    pub async fn profile(&self, token: Option<&str>) -> Result<User> {
        let Some(token) = token else {
            warn!("Profile requested without a session token");
            return Err(ModelError::Unauthorized);
        };

        let Some(session) = self.sessions.get(token).await else {
            warn!("Profile requested with an unknown session token");
            return Err(ModelError::Unauthorized);
        };

        self.users.get_one(session.user_id).await
    }

    pub async fn session_count(&self) -> u64 {
        self.sessions.session_count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::NewUser;

    async fn setup() -> (UserStore, AuthService, User) {
        let users = UserStore::new();
        let auth = AuthService::new(users.clone());
        let alice = users
            .create(NewUser {
                username: "alice".to_string(),
                password: "pw".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Liddell".to_string(),
            })
            .await
            .unwrap();
        (users, auth, alice)
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_then_profile_returns_authenticated_user() {
        let (_, auth, alice) = setup().await;

        let token = auth.login(&credentials("alice", "pw")).await.unwrap();
        let profile = auth.profile(Some(token.as_str())).await.unwrap();

        assert_eq!(profile, alice);
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials_is_unauthorized() {
        let (_, auth, _) = setup().await;

        assert_eq!(
            auth.login(&credentials("alice", "nope")).await,
            Err(ModelError::Unauthorized)
        );
        assert_eq!(
            auth.login(&credentials("bob", "pw")).await,
            Err(ModelError::Unauthorized)
        );
        assert_eq!(auth.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_logout_then_profile_is_unauthorized() {
        let (_, auth, _) = setup().await;
        let token = auth.login(&credentials("alice", "pw")).await.unwrap();

        auth.logout(Some(token.as_str())).await.unwrap();

        assert_eq!(auth.profile(Some(token.as_str())).await, Err(ModelError::Unauthorized));
        assert_eq!(auth.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_logout_without_token_is_unauthorized() {
        let (_, auth, _) = setup().await;
        assert_eq!(auth.logout(None).await, Err(ModelError::Unauthorized));
    }

    #[tokio::test]
    async fn test_logout_with_unknown_token_succeeds() {
        let (_, auth, _) = setup().await;
        assert_eq!(auth.logout(Some("not-a-session")).await, Ok(()));
    }

    #[tokio::test]
    async fn test_profile_without_or_with_unknown_token_is_unauthorized() {
        let (_, auth, _) = setup().await;

        assert_eq!(auth.profile(None).await, Err(ModelError::Unauthorized));
        assert_eq!(
            auth.profile(Some("not-a-session")).await,
            Err(ModelError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn test_profile_after_user_deleted_is_not_found() {
        let (users, auth, alice) = setup().await;
        let token = auth.login(&credentials("alice", "pw")).await.unwrap();

        users.delete(alice.id).await.unwrap();

        assert_eq!(
            auth.profile(Some(token.as_str())).await,
            Err(ModelError::NotFound(alice.id))
        );
    }

    #[tokio::test]
    async fn test_each_login_opens_its_own_session() {
        let (_, auth, alice) = setup().await;

        let first = auth.login(&credentials("alice", "pw")).await.unwrap();
        let second = auth.login(&credentials("alice", "pw")).await.unwrap();
        assert_ne!(first, second);

        auth.logout(Some(first.as_str())).await.unwrap();
        assert_eq!(auth.profile(Some(second.as_str())).await.unwrap(), alice);
    }
}

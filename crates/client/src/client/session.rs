//! Client-level credential handling.
//!
//! # What this module does NOT handle:
//! - The login HTTP exchange (handled by [`crate::endpoints::login`])
//! - Token storage details (handled by [`SessionManager`](crate::auth::SessionManager))
//!
//! # Invariants
//! - [`ProbeClient::login`] requires `&mut self` because it replaces the session token
//! - A pre-issued bearer token never triggers a login request

use probe_config::AuthStrategy;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::auth::AuthToken;
use crate::client::ProbeClient;
use crate::endpoints;
use crate::error::{ClientError, Result};

impl ProbeClient {
    /// Log in with the configured username and password.
    ///
    /// Every call issues a new login request and replaces the session token,
    /// so repeated calls yield independent tokens.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthFailed`] if the strategy is not credential-based,
    ///   the server rejects the credentials, or no `access_token` is returned.
    /// - [`ClientError::MalformedResponse`] if a 200 body is not JSON.
    /// - [`ClientError::Transport`] if the endpoint is unreachable after retries.
    pub async fn login(&mut self) -> Result<AuthToken> {
        let AuthStrategy::Credentials { username, password } = self.session.strategy() else {
            return Err(ClientError::AuthFailed(format!(
                "login requires username and password (auth strategy is {})",
                self.session.strategy().kind()
            )));
        };

        let token = endpoints::login(
            &self.http,
            &self.base_url,
            &self.login_path,
            self.login_encoding,
            username,
            password.expose_secret(),
            self.retry,
        )
        .await?;

        info!(
            token_type = token.token_type(),
            expires_in = token.expires_in(),
            "Login succeeded"
        );
        self.session.set_token(token.clone());
        Ok(token)
    }

    /// Prepare the session for probing according to the auth strategy.
    ///
    /// Credentials log in once; a bearer token is used as-is; anonymous runs
    /// continue without a token.
    pub async fn authenticate(&mut self) -> Result<()> {
        match self.session.strategy() {
            AuthStrategy::Credentials { .. } => self.login().await.map(|_| ()),
            AuthStrategy::BearerToken { .. } => {
                info!("Using pre-issued bearer token");
                Ok(())
            }
            AuthStrategy::Anonymous => {
                warn!("No credentials configured; probes will run unauthenticated");
                Ok(())
            }
        }
    }

    /// The token attached to authenticated probes, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        self.session.bearer_token()
    }

    /// The token from the last successful login.
    pub fn auth_token(&self) -> Option<&AuthToken> {
        self.session.token()
    }

    pub fn auth_strategy(&self) -> &AuthStrategy {
        self.session.strategy()
    }
}

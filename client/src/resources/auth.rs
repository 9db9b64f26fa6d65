//! Login and logout.

use crate::client::AdminClient;
use crate::error::Result;
use crate::transport::{ApiRequest, Transport};
use serde_json::{Value, json};

/// Result of a login call.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginOutcome {
    /// Issued token, when the server returned one
    pub token: Option<String>,
    /// Body as received
    pub raw: Value,
}

/// Token from `data.token`, else top-level `token`.
fn issued_token(body: &Value) -> Option<String> {
    [body.pointer("/data/token"), body.get("token")]
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

impl<T: Transport> AdminClient<T> {
    /// Sign in and store the issued token.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let raw = self
            .send_json(
                ApiRequest::post("/auth/login")
                    .with_body(json!({ "username": username, "password": password })),
            )
            .await?;

        let token = issued_token(&raw);
        match &token {
            Some(token) => {
                self.tokens().save(token);
                tracing::info!(username, "Logged in");
            }
            None => tracing::warn!(username, "Login response carried no token"),
        }

        Ok(LoginOutcome { token, raw })
    }

    /// Forget the stored token.
    pub fn logout(&self) {
        self.tokens().remove();
        tracing::info!("Logged out");
    }
}

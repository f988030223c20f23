use crate::{
    config::ApiConfig,
    error::Error,
    model::{Credential, LoginBody},
};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// A credential this close to expiry is treated as already expired, so a
/// slow request cannot ride a token that lapses mid-flight.
pub const RENEWAL_MARGIN: Duration = Duration::seconds(30);

/// Owns the current session credential and renews it on demand.
///
/// The slot is guarded by an async mutex that is held across the whole
/// check-renew-store sequence, so concurrent callers can never observe a
/// half-updated credential or race to double-renew.
pub struct TokenCache {
    http: Client,
    config: ApiConfig,
    slot: Mutex<Option<Credential>>,
}

impl TokenCache {
    pub fn new(http: Client, config: ApiConfig) -> Self {
        Self {
            http,
            config,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached credential, renewing it first if it is absent or
    /// within [`RENEWAL_MARGIN`] of expiry.
    ///
    /// On renewal failure the slot is left unchanged, so the next call
    /// retries instead of reusing a stale token.
    pub async fn token(&self) -> Result<Credential, Error> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if !Self::needs_renewal(cached, Utc::now()) {
                debug!("Reusing cached session token");
                return Ok(cached.clone());
            }
        }

        let fresh = self.authorize().await?;
        info!(expires_at = %fresh.expires_at, "Cached new session token");
        *slot = Some(fresh.clone());
        Ok(fresh)
    }

    fn needs_renewal(credential: &Credential, now: DateTime<Utc>) -> bool {
        now + RENEWAL_MARGIN >= credential.expires_at
    }

    async fn authorize(&self) -> Result<Credential, Error> {
        let endpoint = format!("{}{}", self.config.base_url, self.config.authorize_route);
        info!(%endpoint, "Authenticating against the weather API");

        let body = LoginBody {
            username: self.config.username.clone(),
            password: self.config.password.clone(),
        };

        let response = self.http.post(&endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Auth {
                endpoint,
                reason: format!("returned {status}"),
            });
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| Error::Auth {
            endpoint: endpoint.clone(),
            reason: format!("response is not valid JSON: {e}"),
        })?;

        let token = payload
            .get("token")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| Error::Auth {
                endpoint: endpoint.clone(),
                reason: "response has no \"token\" field".to_string(),
            })?;

        Ok(Credential {
            value: token.to_string(),
            expires_at: Utc::now() + Duration::minutes(self.config.session_expires_min),
        })
    }

    /// Pre-populate the slot, bypassing the authorize endpoint.
    #[cfg(test)]
    pub(crate) async fn seed(&self, credential: Credential) {
        *self.slot.lock().await = Some(credential);
    }
}

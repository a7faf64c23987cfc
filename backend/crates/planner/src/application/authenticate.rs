//! Authenticate Use Case

use crate::application::config::PlannerConfig;
use crate::domain::value_objects::TelegramId;
use crate::error::{AuthFailure, PlannerResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use telegram::InitDataVerifier;

/// Authenticate Request Use Case
///
/// A request is authentic when its init data carries a valid signature
/// and the signed `user.id` equals the `telegramId` the client claims.
pub struct AuthenticateUseCase {
    verifier: Arc<InitDataVerifier>,
    config: Arc<PlannerConfig>,
}

impl AuthenticateUseCase {
    pub fn new(verifier: Arc<InitDataVerifier>, config: Arc<PlannerConfig>) -> Self {
        Self { verifier, config }
    }

    /// Authenticate against the current time
    pub fn execute(&self, init_data: &str, claimed: &TelegramId) -> PlannerResult<TelegramId> {
        self.execute_at(init_data, claimed, Utc::now())
    }

    /// Authenticate as if the request arrived at `now`
    pub fn execute_at(
        &self,
        init_data: &str,
        claimed: &TelegramId,
        now: DateTime<Utc>,
    ) -> PlannerResult<TelegramId> {
        let verified = self
            .verifier
            .authenticate(init_data)
            .map_err(AuthFailure::from)?;

        let user = verified.user().map_err(AuthFailure::from)?;
        if user.telegram_id() != claimed.as_str() {
            return Err(AuthFailure::IdentityMismatch.into());
        }

        if let Some(max_age) = self.config.max_init_data_age_chrono() {
            if !verified.is_fresh(max_age, now) {
                return Err(AuthFailure::Stale.into());
            }
        }

        Ok(claimed.clone())
    }
}

//! Account route handlers: mock login/signup and settings.
//!
//! Login and signup only validate the submitted form and tell the client
//! where to go next. Nothing is stored and no session is created.

use axum::{Json, extract::State};
use redcart_core::{LOGIN_REDIRECT, LoginForm, SIGNUP_REDIRECT, Setting, Settings, SignupForm};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::store::SettingsAction;

/// Successful form submission.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub email: String,
    pub redirect: &'static str,
}

/// Partial settings update. Absent fields are left alone.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsPatch {
    #[serde(alias = "darkMode")]
    pub dark_mode: Option<bool>,
    #[serde(alias = "orderUpdates")]
    pub order_updates: Option<bool>,
    #[serde(alias = "shippingNotifications")]
    pub shipping_notifications: Option<bool>,
    #[serde(alias = "promoNotifications")]
    pub promo_notifications: Option<bool>,
}

impl SettingsPatch {
    /// The `Set` actions this patch stands for.
    #[must_use]
    pub fn actions(&self) -> Vec<SettingsAction> {
        [
            (Setting::DarkMode, self.dark_mode),
            (Setting::OrderUpdates, self.order_updates),
            (Setting::ShippingNotifications, self.shipping_notifications),
            (Setting::PromoNotifications, self.promo_notifications),
        ]
        .into_iter()
        .filter_map(|(setting, value)| value.map(|v| SettingsAction::Set(setting, v)))
        .collect()
    }
}

/// Validate a login form.
#[instrument(skip_all)]
pub async fn login(Json(form): Json<LoginForm>) -> Result<Json<AuthResponse>> {
    let email = form.validate()?;
    tracing::info!(domain = email.domain(), "Login form accepted");
    Ok(Json(AuthResponse {
        email: email.into(),
        redirect: LOGIN_REDIRECT,
    }))
}

/// Validate a signup form.
#[instrument(skip_all)]
pub async fn signup(Json(form): Json<SignupForm>) -> Result<Json<AuthResponse>> {
    let email = form.validate()?;
    tracing::info!(domain = email.domain(), "Signup form accepted");
    Ok(Json(AuthResponse {
        email: email.into(),
        redirect: SIGNUP_REDIRECT,
    }))
}

#[instrument(skip(state))]
pub async fn settings(State(state): State<AppState>) -> Result<Json<Settings>> {
    let stores = state.stores()?;
    Ok(Json(*stores.settings.state()))
}

#[instrument(skip(state))]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<Settings>> {
    let mut stores = state.stores()?;
    for action in patch.actions() {
        stores.settings.dispatch(action);
    }
    Ok(Json(*stores.settings.state()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_actions() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"dark_mode": true, "promoNotifications": false}"#)
                .unwrap_or_default();
        assert_eq!(
            patch.actions(),
            vec![
                SettingsAction::Set(Setting::DarkMode, true),
                SettingsAction::Set(Setting::PromoNotifications, false),
            ]
        );
        assert!(SettingsPatch::default().actions().is_empty());
    }
}

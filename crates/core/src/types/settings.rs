//! Account settings persisted on the device.

use serde::{Deserialize, Serialize};

/// A single on/off account preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    DarkMode,
    OrderUpdates,
    ShippingNotifications,
    PromoNotifications,
}

impl Setting {
    /// Every setting, in display order.
    pub const ALL: [Self; 4] = [
        Self::DarkMode,
        Self::OrderUpdates,
        Self::ShippingNotifications,
        Self::PromoNotifications,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DarkMode => "dark_mode",
            Self::OrderUpdates => "order_updates",
            Self::ShippingNotifications => "shipping_notifications",
            Self::PromoNotifications => "promo_notifications",
        }
    }
}

impl std::str::FromStr for Setting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|setting| setting.as_str() == normalized)
            .ok_or_else(|| format!("unknown setting: {s}"))
    }
}

/// Account preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub dark_mode: bool,
    pub order_updates: bool,
    pub shipping_notifications: bool,
    pub promo_notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            order_updates: true,
            shipping_notifications: true,
            promo_notifications: false,
        }
    }
}

impl Settings {
    #[must_use]
    pub const fn get(&self, setting: Setting) -> bool {
        match setting {
            Setting::DarkMode => self.dark_mode,
            Setting::OrderUpdates => self.order_updates,
            Setting::ShippingNotifications => self.shipping_notifications,
            Setting::PromoNotifications => self.promo_notifications,
        }
    }

    /// Copy of `self` with one setting changed.
    #[must_use]
    pub const fn with(mut self, setting: Setting, value: bool) -> Self {
        match setting {
            Setting::DarkMode => self.dark_mode = value,
            Setting::OrderUpdates => self.order_updates = value,
            Setting::ShippingNotifications => self.shipping_notifications = value,
            Setting::PromoNotifications => self.promo_notifications = value,
        }
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.dark_mode);
        assert!(settings.order_updates);
        assert!(settings.shipping_notifications);
        assert!(!settings.promo_notifications);
    }

    #[test]
    fn test_with_and_get() {
        let settings = Settings::default().with(Setting::DarkMode, true);
        assert!(settings.get(Setting::DarkMode));
        assert!(settings.get(Setting::OrderUpdates));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"darkMode": true}"#).unwrap();
        assert!(settings.dark_mode);
        assert!(settings.order_updates);
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!("dark-mode".parse::<Setting>().unwrap(), Setting::DarkMode);
        assert_eq!(
            "PROMO_NOTIFICATIONS".parse::<Setting>().unwrap(),
            Setting::PromoNotifications
        );
        assert!("volume".parse::<Setting>().is_err());
    }
}

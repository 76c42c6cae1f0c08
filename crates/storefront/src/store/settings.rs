//! Settings slice, persisted under `preferences`.

use redcart_core::{Setting, Settings};

use super::{Outcome, Slice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    Toggle(Setting),
    Set(Setting, bool),
    /// Back to defaults; drops the persisted copy.
    Reset,
}

#[derive(Debug)]
pub struct SettingsSlice;

impl Slice for SettingsSlice {
    type State = Settings;
    type Action = SettingsAction;

    const NAME: &'static str = "settings";
    const STORAGE_KEY: &'static str = "preferences";

    fn reduce(state: &Settings, action: SettingsAction) -> Outcome<Settings> {
        match action {
            SettingsAction::Toggle(setting) => {
                Outcome::Changed(state.with(setting, !state.get(setting)))
            }
            SettingsAction::Set(setting, value) if state.get(setting) == value => {
                Outcome::Unchanged
            }
            SettingsAction::Set(setting, value) => Outcome::Changed(state.with(setting, value)),
            SettingsAction::Reset => Outcome::Cleared,
        }
    }
}

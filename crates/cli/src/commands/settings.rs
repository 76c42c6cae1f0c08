//! Account settings commands.

use std::io::Write;

use redcart_core::Setting;
use redcart_storefront::store::SettingsAction;

use super::render;
use super::{CliError, Context};

/// # Errors
///
/// Returns an error if output fails.
pub fn show(ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
    render::settings(out, ctx.stores.settings.state())?;
    Ok(())
}

/// # Errors
///
/// Returns an error if output fails.
pub fn toggle(ctx: &mut Context, setting: Setting, out: &mut impl Write) -> Result<(), CliError> {
    ctx.stores.settings.dispatch(SettingsAction::Toggle(setting));
    let state = if ctx.stores.settings.state().get(setting) {
        "on"
    } else {
        "off"
    };
    writeln!(out, "{} is now {state}", setting.as_str())?;
    Ok(())
}

/// # Errors
///
/// Returns an error if output fails.
pub fn reset(ctx: &mut Context, out: &mut impl Write) -> Result<(), CliError> {
    ctx.stores.settings.dispatch(SettingsAction::Reset);
    writeln!(out, "Settings restored to defaults")?;
    Ok(())
}

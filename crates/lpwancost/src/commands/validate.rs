//! Settings validation handler.

use crate::cli::{GlobalOpts, SettingsArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &SettingsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let settings = super::load_settings(&args.settings)?;

    let names: Vec<&str> = settings.model_names().collect();
    let out = format!(
        "{}: ok ({} models: {})",
        args.settings.display(),
        names.len(),
        names.join(", ")
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

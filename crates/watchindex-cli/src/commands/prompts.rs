use crate::output::Output;
use color_eyre::Result;
use dialoguer::Confirm;

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>, output: &Output) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder.interact().map_err(|e| {
        output.error(format!("Failed to read confirmation: {}", e));
        color_eyre::eyre::eyre!("Failed to read confirmation: {}", e)
    })
}

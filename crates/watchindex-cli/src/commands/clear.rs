use super::prompts;
use super::Store;
use crate::output::Output;
use color_eyre::Result;
use serde_json::json;

pub fn run_clear(store: &mut Store, yes: bool, output: &Output) -> Result<()> {
    if store.is_empty() {
        output.info("No favorites to clear");
        return Ok(());
    }

    if !yes {
        // JSON consumers can't answer a prompt
        if !output.is_human() {
            return Err(color_eyre::eyre::eyre!(
                "Refusing to clear {} favorites without --yes",
                store.count()
            ));
        }
        if !prompts::prompt_yes_no("Are you sure you want to remove all favorites?", Some(false), output)? {
            output.info("Nothing removed");
            return Ok(());
        }
    }

    let cleared = store.clear();

    if output.is_human() {
        output.success(format!(
            "Removed {} favorite{}",
            cleared,
            if cleared == 1 { "" } else { "s" }
        ));
    } else {
        output.json(&json!({ "cleared": cleared }));
    }
    Ok(())
}

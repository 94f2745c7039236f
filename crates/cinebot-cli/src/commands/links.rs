use crate::output::Output;
use cinebot_config::Config;
use cinebot_core::{derive_links, streaming_suffix, LinkTemplates};
use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Derive links without calling either catalog
pub fn run_links(config: &Config, title: &str, cross_ref_id: Option<&str>, output: &Output) -> Result<()> {
    if title.trim().is_empty() {
        return Err(eyre!("Title must not be empty"));
    }
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;

    // An explicit id that cannot be used is worth telling the user about
    if let Some(id) = cross_ref_id {
        if let Err(e) = streaming_suffix(Some(id)) {
            output.warn(e.to_string());
        }
    }

    let templates = LinkTemplates::from(&config.links);
    let links = derive_links(title, cross_ref_id, &templates);
    output.links(title, &links);
    Ok(())
}

use crate::commands::build_resolver;
use crate::output::Output;
use crate::render::NO_INFORMATION;
use cinebot_config::{Config, PathManager};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::time::Duration;

pub async fn run_info(paths: &PathManager, config: &Config, title: &str, output: &Output) -> Result<()> {
    let resolver = build_resolver(paths, config).map_err(|e| eyre!("{:#}", e))?;
    let timeout = Duration::from_secs(config.resolution.timeout_secs);

    match tokio::time::timeout(timeout, resolver.resolve(title)).await {
        Ok(Ok(movie)) => {
            output.movie(&movie);
            Ok(())
        }
        Ok(Err(not_found)) => {
            tracing::debug!("{}", not_found);
            Err(eyre!("{} \"{}\" ({})", NO_INFORMATION, title, not_found.reason))
        }
        Err(_) => Err(eyre!("Resolving '{}' exceeded {}s", title, timeout.as_secs())),
    }
}

use crate::commands::build_resolver;
use crate::output::Output;
use cinebot_config::{Config, PathManager};
use cinebot_core::{Dispatcher, MessageContext};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Feed stdin lines to the dispatcher as if they were posted in `channel` by `user`.
///
/// Lines that are not commands are ignored, same as in a real channel.
pub async fn run_chat(paths: &PathManager, config: &Config, channel: String, user: String, output: &Output) -> Result<()> {
    let resolver = build_resolver(paths, config).map_err(|e| eyre!("{:#}", e))?;
    let dispatcher = Dispatcher::new(Arc::new(resolver), Duration::from_secs(config.resolution.timeout_secs));
    let ctx = MessageContext::new(channel, user);

    info!("Listening for commands in #{} as {}", ctx.channel, ctx.user);
    output.info("Type /help for commands, Ctrl-D to quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut handled = 0usize;
    while let Some(line) = lines.next_line().await? {
        if let Some(reply) = dispatcher.handle(&ctx, &line).await {
            output.reply(&reply);
            handled += 1;
        }
    }

    info!("Input closed after {} command(s)", handled);
    Ok(())
}

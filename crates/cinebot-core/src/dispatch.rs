//! Chat command parsing and execution.
//!
//! The gateway hands every incoming message to [`Dispatcher::handle`]; it
//! gets back a structured [`Reply`] (or nothing, for messages that are not
//! commands) and is responsible for rendering it.

use crate::guard::ChannelGuard;
use crate::links::derive_links;
use crate::resolver::Resolver;
use crate::store::{LeaderboardEntry, MovieStore};
use cinebot_models::{is_cross_ref_id, CanonicalMovie, MovieLinks};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const INFO_USAGE: &str = "/info <title>  e.g. /info Inception";
pub const LINKS_USAGE: &str = "/links <title> [tt-id]  e.g. /links Inception tt1375666";
pub const ADD_WATCHLIST_USAGE: &str = "/addwatchlist <title>";
pub const RANK_USAGE: &str = "/rank <title> <score 1-10>  e.g. /rank Heat 9";

/// Who sent a message and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub channel: String,
    pub user: String,
    /// Messages from bots (including ourselves) are never answered
    pub from_bot: bool,
}

impl MessageContext {
    pub fn new(channel: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            user: user.into(),
            from_bot: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Info(String),
    Links { title: String, cross_ref_id: Option<String> },
    AddWatchlist(String),
    Watchlist,
    ClearWatchlist,
    Rank { title: String, score: i64 },
    MyRanks,
    Leaderboard,
    Help,
    /// Known command with missing or unusable arguments
    Invalid { usage: &'static str },
}

impl Command {
    /// Parse a chat message; `None` for anything that is not a known command
    pub fn parse(text: &str) -> Option<Command> {
        let body = text.trim().strip_prefix('/')?;
        let (name, args) = match body.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (body, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "info" => with_title(args, INFO_USAGE, Command::Info),
            "links" => parse_links(args),
            "addwatchlist" => with_title(args, ADD_WATCHLIST_USAGE, Command::AddWatchlist),
            "watchlist" => Command::Watchlist,
            "clearwatchlist" => Command::ClearWatchlist,
            "rank" => parse_rank(args),
            "myranks" => Command::MyRanks,
            "leaderboard" => Command::Leaderboard,
            "help" => Command::Help,
            _ => return None,
        };
        Some(command)
    }
}

fn with_title(args: &str, usage: &'static str, build: fn(String) -> Command) -> Command {
    if args.is_empty() {
        Command::Invalid { usage }
    } else {
        build(args.to_string())
    }
}

fn parse_links(args: &str) -> Command {
    if args.is_empty() {
        return Command::Invalid { usage: LINKS_USAGE };
    }
    match args.rsplit_once(char::is_whitespace) {
        Some((title, last)) if is_cross_ref_id(last) && !title.trim().is_empty() => Command::Links {
            title: title.trim().to_string(),
            cross_ref_id: Some(last.to_string()),
        },
        _ => Command::Links {
            title: args.to_string(),
            cross_ref_id: None,
        },
    }
}

fn parse_rank(args: &str) -> Command {
    let parsed = args
        .rsplit_once(char::is_whitespace)
        .and_then(|(title, score)| Some((title.trim(), score.parse::<i64>().ok()?)))
        .filter(|(title, _)| !title.is_empty());

    match parsed {
        Some((title, score)) => Command::Rank {
            title: title.to_string(),
            score,
        },
        None => Command::Invalid { usage: RANK_USAGE },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Movie(Box<CanonicalMovie>),
    NotFound { query: String },
    TimedOut { query: String },
    /// Another command is still being answered in this channel
    Busy,
    Links { title: String, links: MovieLinks },
    Usage(&'static str),
    Help,
    WatchlistAdded { title: String },
    WatchlistDuplicate { title: String },
    Watchlist(Vec<String>),
    WatchlistCleared(usize),
    Ranked { title: String, score: u8, previous: Option<u8> },
    Rejected(String),
    UserRankings(Vec<(String, u8)>),
    Leaderboard(Vec<LeaderboardEntry>),
}

/// Routes commands to the resolver and the in-memory store
pub struct Dispatcher {
    resolver: Arc<Resolver>,
    store: RwLock<MovieStore>,
    guard: ChannelGuard,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(resolver: Arc<Resolver>, timeout: Duration) -> Self {
        Self {
            resolver,
            store: RwLock::new(MovieStore::new()),
            guard: ChannelGuard::new(),
            timeout,
        }
    }

    pub fn guard(&self) -> &ChannelGuard {
        &self.guard
    }

    /// Handle one incoming message
    pub async fn handle(&self, ctx: &MessageContext, text: &str) -> Option<Reply> {
        if ctx.from_bot {
            return None;
        }
        let command = Command::parse(text)?;
        debug!("Channel {} user {}: {:?}", ctx.channel, ctx.user, command);
        Some(self.execute(ctx, command).await)
    }

    pub async fn execute(&self, ctx: &MessageContext, command: Command) -> Reply {
        match command {
            Command::Info(title) => self.info(ctx, title).await,
            Command::Links { title, cross_ref_id } => Reply::Links {
                links: derive_links(&title, cross_ref_id.as_deref(), &self.resolver.options().links),
                title,
            },
            Command::AddWatchlist(title) => match self.store.write().await.add_to_watchlist(&title) {
                Ok(true) => Reply::WatchlistAdded { title },
                Ok(false) => Reply::WatchlistDuplicate { title },
                Err(e) => Reply::Rejected(e.to_string()),
            },
            Command::Watchlist => Reply::Watchlist(self.store.read().await.watchlist().to_vec()),
            Command::ClearWatchlist => Reply::WatchlistCleared(self.store.write().await.clear_watchlist()),
            Command::Rank { title, score } => match self.store.write().await.rank(&ctx.user, &title, score) {
                Ok(ranking) => Reply::Ranked {
                    title,
                    score: ranking.score,
                    previous: ranking.previous,
                },
                Err(e) => Reply::Rejected(e.to_string()),
            },
            Command::MyRanks => Reply::UserRankings(self.store.read().await.rankings_for(&ctx.user)),
            Command::Leaderboard => Reply::Leaderboard(self.store.read().await.leaderboard()),
            Command::Help => Reply::Help,
            Command::Invalid { usage } => Reply::Usage(usage),
        }
    }

    async fn info(&self, ctx: &MessageContext, title: String) -> Reply {
        let Some(_permit) = self.guard.try_acquire(&ctx.channel) else {
            debug!("Channel {} busy, dropping /info {}", ctx.channel, title);
            return Reply::Busy;
        };

        match tokio::time::timeout(self.timeout, self.resolver.resolve(&title)).await {
            Ok(Ok(movie)) => Reply::Movie(Box::new(movie)),
            Ok(Err(not_found)) => {
                info!("{}", not_found);
                Reply::NotFound { query: title }
            }
            Err(_) => {
                warn!("Resolving '{}' exceeded {:?}", title, self.timeout);
                Reply::TimedOut { query: title }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolverOptions;
    use async_trait::async_trait;
    use cinebot_config::ResolutionStrategy;
    use cinebot_models::Link;
    use cinebot_sources::{CatalogError, CatalogSet, Credits, PrimaryCatalog, PrimaryMovie, Video};

    /// Answers every search with one fixed movie after an optional delay
    struct StubPrimary {
        delay: Duration,
    }

    #[async_trait]
    impl PrimaryCatalog for StubPrimary {
        fn catalog_name(&self) -> &'static str {
            "stub"
        }

        async fn search(&self, query: &str) -> Result<Vec<PrimaryMovie>, CatalogError> {
            tokio::time::sleep(self.delay).await;
            if query == "Nothing" {
                return Ok(Vec::new());
            }
            Ok(vec![PrimaryMovie {
                id: 7,
                title: query.to_string(),
                release_date: Some("2001-01-01".to_string()),
                ..PrimaryMovie::default()
            }])
        }

        async fn credits(&self, _id: u64) -> Result<Credits, CatalogError> {
            Ok(Credits::default())
        }

        async fn videos(&self, _id: u64) -> Result<Vec<Video>, CatalogError> {
            Ok(Vec::new())
        }

        async fn find_by_external_id(&self, _cross_ref_id: &str) -> Result<Vec<PrimaryMovie>, CatalogError> {
            Ok(Vec::new())
        }
    }

    fn dispatcher(delay: Duration, timeout: Duration) -> Dispatcher {
        let options = ResolverOptions {
            strategy: ResolutionStrategy::PrimaryOnly,
            ..ResolverOptions::default()
        };
        let resolver = Resolver::new(CatalogSet::new(Arc::new(StubPrimary { delay }), None), options);
        Dispatcher::new(Arc::new(resolver), timeout)
    }

    fn ctx(user: &str) -> MessageContext {
        MessageContext::new("general", user)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/info Inception"), Some(Command::Info("Inception".to_string())));
        assert_eq!(Command::parse("  /INFO   The Thing  "), Some(Command::Info("The Thing".to_string())));
        assert_eq!(Command::parse("/info"), Some(Command::Invalid { usage: INFO_USAGE }));
        assert_eq!(Command::parse("/info    "), Some(Command::Invalid { usage: INFO_USAGE }));
        assert_eq!(Command::parse("/watchlist"), Some(Command::Watchlist));
        assert_eq!(Command::parse("/dance"), None);
        assert_eq!(Command::parse("hello /info Heat"), None);
    }

    #[test]
    fn test_parse_rank() {
        assert_eq!(
            Command::parse("/rank The Godfather 10"),
            Some(Command::Rank { title: "The Godfather".to_string(), score: 10 })
        );
        assert_eq!(Command::parse("/rank Heat"), Some(Command::Invalid { usage: RANK_USAGE }));
        assert_eq!(Command::parse("/rank 9"), Some(Command::Invalid { usage: RANK_USAGE }));
        assert_eq!(Command::parse("/rank Heat nine"), Some(Command::Invalid { usage: RANK_USAGE }));
    }

    #[test]
    fn test_parse_links() {
        assert_eq!(
            Command::parse("/links Inception tt1375666"),
            Some(Command::Links { title: "Inception".to_string(), cross_ref_id: Some("tt1375666".to_string()) })
        );
        assert_eq!(
            Command::parse("/links Blade Runner 2049"),
            Some(Command::Links { title: "Blade Runner 2049".to_string(), cross_ref_id: None })
        );
        assert_eq!(
            Command::parse("/links tt1375666"),
            Some(Command::Links { title: "tt1375666".to_string(), cross_ref_id: None })
        );
    }

    #[tokio::test]
    async fn test_info_resolves() {
        let dispatcher = dispatcher(Duration::ZERO, Duration::from_secs(5));
        let reply = dispatcher.handle(&ctx("ana"), "/info Heat").await.unwrap();
        match reply {
            Reply::Movie(movie) => {
                assert_eq!(movie.title, "Heat");
                assert_eq!(movie.release_year.as_str(), "2001");
            }
            other => panic!("unexpected reply {:?}", other),
        }
        assert!(!dispatcher.guard().is_busy("general"));
    }

    #[tokio::test]
    async fn test_info_not_found() {
        let dispatcher = dispatcher(Duration::ZERO, Duration::from_secs(5));
        let reply = dispatcher.handle(&ctx("ana"), "/info Nothing").await;
        assert_eq!(reply, Some(Reply::NotFound { query: "Nothing".to_string() }));
    }

    #[tokio::test]
    async fn test_info_times_out() {
        let dispatcher = dispatcher(Duration::from_millis(200), Duration::from_millis(10));
        let reply = dispatcher.handle(&ctx("ana"), "/info Heat").await;
        assert_eq!(reply, Some(Reply::TimedOut { query: "Heat".to_string() }));
        assert!(!dispatcher.guard().is_busy("general"));
    }

    #[tokio::test]
    async fn test_busy_channel() {
        let dispatcher = dispatcher(Duration::ZERO, Duration::from_secs(5));
        let _permit = dispatcher.guard().try_acquire("general").unwrap();

        let reply = dispatcher.handle(&ctx("ana"), "/info Heat").await;
        assert_eq!(reply, Some(Reply::Busy));

        let elsewhere = MessageContext::new("movies", "ana");
        let reply = dispatcher.handle(&elsewhere, "/info Heat").await;
        assert!(matches!(reply, Some(Reply::Movie(_))));
    }

    #[tokio::test]
    async fn test_bot_messages_ignored() {
        let dispatcher = dispatcher(Duration::ZERO, Duration::from_secs(5));
        let mut bot = ctx("cinebot");
        bot.from_bot = true;
        assert_eq!(dispatcher.handle(&bot, "/watchlist").await, None);
        assert_eq!(dispatcher.handle(&ctx("ana"), "just chatting").await, None);
    }

    #[tokio::test]
    async fn test_usage_reply() {
        let dispatcher = dispatcher(Duration::ZERO, Duration::from_secs(5));
        assert_eq!(dispatcher.handle(&ctx("ana"), "/info").await, Some(Reply::Usage(INFO_USAGE)));
    }

    #[tokio::test]
    async fn test_watchlist_flow() {
        let dispatcher = dispatcher(Duration::ZERO, Duration::from_secs(5));
        let ana = ctx("ana");

        assert_eq!(
            dispatcher.handle(&ana, "/addwatchlist Heat").await,
            Some(Reply::WatchlistAdded { title: "Heat".to_string() })
        );
        assert_eq!(
            dispatcher.handle(&ana, "/addwatchlist Heat").await,
            Some(Reply::WatchlistDuplicate { title: "Heat".to_string() })
        );
        assert_eq!(
            dispatcher.handle(&ana, "/watchlist").await,
            Some(Reply::Watchlist(vec!["Heat".to_string()]))
        );
        assert_eq!(dispatcher.handle(&ana, "/clearwatchlist").await, Some(Reply::WatchlistCleared(1)));
    }

    #[tokio::test]
    async fn test_rank_flow() {
        let dispatcher = dispatcher(Duration::ZERO, Duration::from_secs(5));

        assert_eq!(
            dispatcher.handle(&ctx("ana"), "/rank Heat 8").await,
            Some(Reply::Ranked { title: "Heat".to_string(), score: 8, previous: None })
        );
        assert_eq!(
            dispatcher.handle(&ctx("ana"), "/rank Heat 9").await,
            Some(Reply::Ranked { title: "Heat".to_string(), score: 9, previous: Some(8) })
        );
        assert!(matches!(
            dispatcher.handle(&ctx("ana"), "/rank Heat 42").await,
            Some(Reply::Rejected(_))
        ));
        dispatcher.handle(&ctx("ben"), "/rank Heat 7").await;

        assert_eq!(
            dispatcher.handle(&ctx("ana"), "/myranks").await,
            Some(Reply::UserRankings(vec![("Heat".to_string(), 9)]))
        );
        match dispatcher.handle(&ctx("ana"), "/leaderboard").await {
            Some(Reply::Leaderboard(board)) => {
                assert_eq!(board.len(), 1);
                assert_eq!(board[0].votes, 2);
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_links_command_needs_no_network() {
        let dispatcher = dispatcher(Duration::from_secs(60), Duration::from_millis(1));
        match dispatcher.handle(&ctx("ana"), "/links Inception tt1375666").await {
            Some(Reply::Links { title, links }) => {
                assert_eq!(title, "Inception");
                assert!(matches!(links.catalog, Link::Available(_)));
                assert!(matches!(links.streaming, Link::Available(ref url) if url.contains("1375666")));
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }
}

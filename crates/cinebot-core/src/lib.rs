pub mod dispatch;
pub mod error;
pub mod guard;
pub mod links;
pub mod reconcile;
pub mod resolver;
pub mod store;

pub use dispatch::{Command, Dispatcher, MessageContext, Reply};
pub use error::{LinkError, NotFound, NotFoundReason, StoreError};
pub use guard::{ChannelGuard, ChannelPermit};
pub use links::{derive_links, slugify, streaming_suffix, LinkTemplates};
pub use resolver::{Resolver, ResolverOptions};
pub use store::{LeaderboardEntry, MovieStore, Ranking};

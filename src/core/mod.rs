/// Core palette pipeline
///
/// Classification, candidate sources, fuzzy ranking, grouping, the recency
/// cache, and the session that ties them together.

pub mod command;
pub mod grouper;
pub mod query;
pub mod ranker;
pub mod recent;
pub mod registry;
pub mod session;
pub mod sources;

pub use command::{Command, CommandType, RECENT_GROUP};
pub use grouper::{group_and_sort, summarize, GroupRun, GroupSummary};
pub use query::{classify, ClassifiedQuery, Mode};
pub use ranker::Ranker;
pub use recent::RecencyCache;
pub use registry::{CommandRegistry, Icon, Label, RegistryEntry};
pub use session::{Lookup, Outcome, PaletteSession, QueryTicket};
pub use sources::{EntityHit, EntityKind, EntitySearch, OpenSession, OpenSessions, SourceAggregator};

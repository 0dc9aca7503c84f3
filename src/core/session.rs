/// Palette session
///
/// Drives the query pipeline (classify, gather, rank, group) and owns the
/// state a renderer reads: input, flattened list, group summary, cursor and
/// loading flag.
///
/// Hosts that interleave typing with in-flight lookups use the split API:
/// `begin` hands out a ticket, `lookup` turns it into an owned [`Lookup`]
/// that borrows nothing from the session, and `apply` drops the result
/// unless the ticket is still the latest one. While a lookup runs the host
/// is free to keep calling `begin`. `update_query` chains the three for
/// callers that don't need to interleave.

use crate::config::PaletteConfig;
use crate::core::command::Command;
use crate::core::grouper::{group_and_sort, summarize, GroupSummary};
use crate::core::query::{classify, ClassifiedQuery, Mode, COMMAND_SENTINEL};
use crate::core::ranker::Ranker;
use crate::core::recent::RecencyCache;
use crate::core::sources::{EntitySearch, OpenSessions, SourceAggregator};
use crate::navigation::cursor::{step, Cursor, Effect, NavEvent};
use crate::navigation::dispatch::DispatchTable;
use crate::store::KeyValueStore;
use log::{debug, info};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A query that has been issued but not applied yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    query: ClassifiedQuery,
    debounce: Duration,
}

impl QueryTicket {
    pub fn query(&self) -> &ClassifiedQuery {
        &self.query
    }

    /// How long to wait before running it: nonzero only for entity lookups
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    fn hits_entities(&self) -> bool {
        self.query.mode == Mode::Search && !self.query.is_empty()
    }
}

/// What the host should do with the palette after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Stay,
    Close,
}

/// The parts of the pipeline a running lookup needs
struct Pipeline<S, E, O> {
    aggregator: SourceAggregator<E, O>,
    ranker: Ranker,
    recent: RecencyCache<S>,
}

impl<S, E, O> Pipeline<S, E, O>
where
    S: KeyValueStore,
    E: EntitySearch,
    O: OpenSessions,
{
    async fn evaluate(&self, query: &ClassifiedQuery) -> Vec<Command> {
        let mut candidates = match query.mode {
            Mode::Command => self.recent.read().await,
            Mode::Search => Vec::new(),
        };
        candidates.extend(self.aggregator.gather(query).await);

        self.ranker.rank(query, candidates)
    }
}

/// An issued query, detached from the session
///
/// Owns everything it needs, so it can be awaited in place or handed to
/// `tokio::task::spawn_local` while the session keeps taking input.
pub struct Lookup<S, E, O> {
    pipeline: Arc<Pipeline<S, E, O>>,
    latest: Arc<AtomicU64>,
    ticket: QueryTicket,
}

impl<S, E, O> Lookup<S, E, O>
where
    S: KeyValueStore,
    E: EntitySearch,
    O: OpenSessions,
{
    pub fn ticket(&self) -> &QueryTicket {
        &self.ticket
    }

    fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.ticket.generation
    }

    /// Wait out the debounce, then gather and rank
    ///
    /// Returns `None` without touching any source when a newer query was
    /// issued in the meantime, so keystrokes inside the debounce window
    /// collapse into a single lookup.
    pub async fn run(self) -> Option<(QueryTicket, Vec<Command>)> {
        if !self.ticket.debounce.is_zero() {
            tokio::time::sleep(self.ticket.debounce).await;
        }

        if !self.is_current() {
            debug!("Query #{} superseded before lookup", self.ticket.generation);
            return None;
        }

        let ranked = self.pipeline.evaluate(&self.ticket.query).await;
        Some((self.ticket, ranked))
    }
}

pub struct PaletteSession<S, E, O> {
    pipeline: Arc<Pipeline<S, E, O>>,
    dispatch: DispatchTable,
    debounce: Duration,

    input: String,
    // shared with outstanding lookups
    generation: Arc<AtomicU64>,
    // generation of the entity query in flight, if any
    pending_lookup: Option<u64>,
    list: Arc<Vec<Command>>,
    summary: GroupSummary,
    cursor: Cursor,
}

impl<S, E, O> PaletteSession<S, E, O>
where
    S: KeyValueStore,
    E: EntitySearch,
    O: OpenSessions,
{
    pub fn new(
        config: &PaletteConfig,
        aggregator: SourceAggregator<E, O>,
        recent: RecencyCache<S>,
        dispatch: DispatchTable,
    ) -> Self {
        let pipeline = Pipeline {
            aggregator,
            ranker: Ranker::new(config.highlight.clone()),
            recent,
        };

        Self {
            pipeline: Arc::new(pipeline),
            dispatch,
            debounce: config.search.debounce(),
            input: String::new(),
            generation: Arc::new(AtomicU64::new(0)),
            pending_lookup: None,
            list: Arc::new(Vec::new()),
            summary: Vec::new(),
            cursor: Cursor::default(),
        }
    }

    /// Open the palette. Command mode pre-seeds the input with the sentinel.
    ///
    /// Before the first keystroke the list is the recency entries followed
    /// by the whole registry.
    pub async fn open(&mut self, mode: Mode) {
        self.input = match mode {
            Mode::Command => COMMAND_SENTINEL.to_string(),
            Mode::Search => String::new(),
        };
        self.next_generation();
        self.pending_lookup = None;

        let recent = self.pipeline.recent.read().await;
        let initial = self.pipeline.aggregator.initial(recent);
        self.set_list(group_and_sort(initial));
    }

    /// Record new input and hand out a ticket for it
    pub fn begin(&mut self, raw: &str) -> QueryTicket {
        self.input = raw.to_string();
        let generation = self.next_generation();

        let query = classify(raw);
        let mut ticket = QueryTicket {
            generation,
            query,
            debounce: Duration::ZERO,
        };

        if ticket.hits_entities() {
            ticket.debounce = self.debounce;
            self.pending_lookup = Some(generation);
        }

        debug!(
            "Query #{}: {:?} '{}'",
            ticket.generation, ticket.query.mode, ticket.query.prepared
        );
        ticket
    }

    /// True while no newer query has been issued
    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        ticket.generation == self.generation.load(Ordering::SeqCst)
    }

    /// Detach a ticket into a lookup that can run while input keeps arriving
    pub fn lookup(&self, ticket: QueryTicket) -> Lookup<S, E, O> {
        Lookup {
            pipeline: Arc::clone(&self.pipeline),
            latest: Arc::clone(&self.generation),
            ticket,
        }
    }

    /// Show ranked results for a ticket. Stale tickets are dropped and false is returned.
    pub fn apply(&mut self, ticket: QueryTicket, ranked: Vec<Command>) -> bool {
        if !self.is_current(&ticket) {
            debug!(
                "Dropping stale results for query #{} (current #{})",
                ticket.generation,
                self.generation.load(Ordering::SeqCst)
            );
            return false;
        }

        if self.pending_lookup == Some(ticket.generation) {
            self.pending_lookup = None;
        }
        self.set_list(group_and_sort(ranked));
        true
    }

    /// Begin, debounce, evaluate and apply in one go
    pub async fn update_query(&mut self, raw: &str) -> bool {
        let ticket = self.begin(raw);
        match self.lookup(ticket).run().await {
            Some((ticket, ranked)) => self.apply(ticket, ranked),
            None => false,
        }
    }

    /// Feed one navigation event and carry out its side effects
    pub async fn handle(&mut self, event: NavEvent) -> Outcome {
        let transition = step(self.cursor, &self.list, event);
        self.cursor = transition.cursor;

        match transition.effect {
            None => Outcome::Stay,
            Some(Effect::Run(command)) => {
                info!("Activating '{}' ({})", command.id, command.kind);
                self.dispatch.dispatch(&command);
                self.pipeline.recent.add(&command).await;
                Outcome::Close
            }
            Some(Effect::Forget { row, command }) => {
                self.pipeline.recent.remove(&command.id).await;

                // fresh copy; earlier snapshots handed to renderers stay intact
                let mut next = (*self.list).clone();
                next.remove(row);
                self.set_list(next);
                Outcome::Stay
            }
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// An entity lookup for the current input is still out
    pub fn is_loading(&self) -> bool {
        self.pending_lookup == Some(self.generation.load(Ordering::SeqCst))
    }

    /// Snapshot of the flattened list
    pub fn list(&self) -> Arc<Vec<Command>> {
        Arc::clone(&self.list)
    }

    pub fn summary(&self) -> &GroupSummary {
        &self.summary
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn selected(&self) -> Option<&Command> {
        self.list.get(self.cursor.row)
    }

    /// Nothing to show: the "no results" state
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn recent(&self) -> &RecencyCache<S> {
        &self.pipeline.recent
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn set_list(&mut self, list: Vec<Command>) {
        self.summary = summarize(&list);
        self.list = Arc::new(list);
        self.cursor = Cursor::default();
    }
}

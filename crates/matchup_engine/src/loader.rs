//! Data loading: memoized chart and exception-table store.
//!
//! Charts and the exception table are external immutable inputs, fetched
//! once and cached for the life of the store. Everything runs on the host's
//! single dispatch thread, so the memoized `Rc` handle doubles as the
//! per-key in-flight guard: a repeated request for the same key shares the
//! already-resolved value instead of refetching.
//!
//! Rapid generation switching can still leave a superseded load completing
//! after a newer request; callers tag each load with a [`RequestToken`] and
//! drop results whose token is no longer current.

use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::chart::{ChartDoc, TypeChart};
use crate::exceptions::{ExceptionTable, ExceptionsDoc};
use crate::types::Generation;

/// Configuration errors raised while loading data documents.
///
/// These are fatal to the computation that needed the data: a silently
/// wrong multiplier is worse than a visible failure.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {what}: {reason}")]
    Fetch { what: String, reason: String },
    #[error("failed to parse data document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("malformed data: {0}")]
    Shape(String),
}

/// Where raw data documents come from. The bundled source is the default;
/// tests substitute counting/failing sources.
pub trait DataSource {
    fn fetch_chart(&self, generation: Generation) -> Result<String, LoadError>;
    fn fetch_exceptions(&self) -> Result<String, LoadError>;
}

/// Data documents compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledSource;

impl DataSource for BundledSource {
    fn fetch_chart(&self, generation: Generation) -> Result<String, LoadError> {
        let json = match generation {
            Generation::Gen1 => include_str!("../data/gen1.json"),
            Generation::Gen2To5 => include_str!("../data/gen2-5.json"),
            Generation::Gen6Plus => include_str!("../data/gen6plus.json"),
        };
        Ok(json.to_string())
    }

    fn fetch_exceptions(&self) -> Result<String, LoadError> {
        Ok(include_str!("../data/exceptions.json").to_string())
    }
}

/// Token identifying one load request. Monotonic per store; only the most
/// recently issued token is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Memoized store for charts and the exception table.
pub struct DataStore<S> {
    source: S,
    charts: HashMap<Generation, Rc<TypeChart>>,
    exceptions: Option<Rc<ExceptionTable>>,
    current_token: u64,
}

impl DataStore<BundledSource> {
    /// Store backed by the bundled data documents.
    pub fn bundled() -> Self {
        DataStore::new(BundledSource)
    }
}

impl<S: DataSource> DataStore<S> {
    pub fn new(source: S) -> Self {
        DataStore {
            source,
            charts: HashMap::new(),
            exceptions: None,
            current_token: 0,
        }
    }

    /// The chart for a generation, fetching and validating it on first use.
    pub fn chart(&mut self, generation: Generation) -> Result<Rc<TypeChart>, LoadError> {
        if let Some(chart) = self.charts.get(&generation) {
            debug!(%generation, "chart cache hit");
            return Ok(Rc::clone(chart));
        }
        let json = self.source.fetch_chart(generation)?;
        let doc: ChartDoc = serde_json::from_str(&json)?;
        let chart = Rc::new(TypeChart::from_doc(doc)?);
        if chart.generation() != generation {
            return Err(LoadError::Shape(format!(
                "requested generation {generation} but document is for {}",
                chart.generation()
            )));
        }
        debug!(%generation, "chart loaded");
        self.charts.insert(generation, Rc::clone(&chart));
        Ok(chart)
    }

    /// The exception table, fetching and validating it on first use.
    pub fn exceptions(&mut self) -> Result<Rc<ExceptionTable>, LoadError> {
        if let Some(table) = &self.exceptions {
            return Ok(Rc::clone(table));
        }
        let json = self.source.fetch_exceptions()?;
        let doc: ExceptionsDoc = serde_json::from_str(&json)?;
        let table = Rc::new(ExceptionTable::from_doc(doc)?);
        debug!("exception table loaded");
        self.exceptions = Some(Rc::clone(&table));
        Ok(table)
    }

    /// Issue a new request token, superseding all previously issued ones.
    pub fn begin_request(&mut self) -> RequestToken {
        self.current_token += 1;
        RequestToken(self.current_token)
    }

    /// Whether a load tagged with `token` is still the newest request.
    /// Stale completions must be discarded by the caller.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.current_token
    }
}

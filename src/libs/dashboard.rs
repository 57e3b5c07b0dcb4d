//! Dashboard service: periodic sync trigger plus cached read operations.
//!
//! The presentation layer only needs [`Dashboard::filter_options`] and
//! [`Dashboard::view`]. [`Dashboard::run`] keeps the store fresh in the
//! background of a long-running session.
//!
//! The view cache only pays off for callers that live across several
//! requests, such as library users and `donelog watch`. The one-shot `view`
//! and `options` commands exit after a single read, so they query the store
//! through [`QueryView`] directly and need no Todoist token.
//!
//! ```rust,no_run
//! use donelog::libs::config::Config;
//! use donelog::libs::dashboard::Dashboard;
//! use donelog::libs::task::TaskFilter;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let dashboard = Dashboard::from_config(&config)?;
//! dashboard.sync().await?;
//! let view = dashboard.view(&TaskFilter::all())?;
//! println!("{} tasks", view.total());
//! # Ok(())
//! # }
//! ```

use crate::api::{RemoteSource, Todoist};
use crate::db::store::Store;
use crate::libs::cache::Cache;
use crate::libs::config::Config;
use crate::libs::error::{FilterQueryError, StorageError};
use crate::libs::messages::Message;
use crate::libs::query::{DashboardView, FilterOptions, QueryView};
use crate::libs::sync::{SyncEngine, SyncReport, SyncState};
use crate::libs::task::TaskFilter;
use crate::{msg_debug, msg_error, msg_success, msg_warning};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub struct Dashboard<R> {
    engine: SyncEngine<R>,
    cache: Mutex<Cache<TaskFilter, DashboardView>>,
}

impl<R: RemoteSource> Dashboard<R> {
    pub fn new(remote: R, store: Store, cache_ttl: Duration) -> Self {
        Self {
            engine: SyncEngine::new(remote, Arc::new(Mutex::new(store))),
            cache: Mutex::new(Cache::new(cache_ttl)),
        }
    }

    pub fn store(&self) -> &Arc<Mutex<Store>> {
        self.engine.store()
    }

    /// Runs one sync cycle. Cached views are dropped when it added rows.
    pub async fn sync(&self) -> Result<SyncReport, StorageError> {
        let report = self.engine.sync().await?;
        if report.inserted() > 0 {
            self.cache.lock().clear();
        }
        Ok(report)
    }

    pub fn filter_options(&self) -> Result<FilterOptions, FilterQueryError> {
        let store = self.store().lock();
        QueryView::new(&store).filter_options()
    }

    pub fn view(&self, filter: &TaskFilter) -> Result<DashboardView, FilterQueryError> {
        let generation = {
            let cache = self.cache.lock();
            if let Some(view) = cache.get(filter) {
                msg_debug!(format!("view cache hit for {:?}", filter));
                return Ok(view);
            }
            cache.generation()
        };

        let view = {
            let store = self.store().lock();
            QueryView::new(&store).view(filter)?
        };
        // A sync that committed meanwhile has cleared the cache; its rows may be missing here
        if !self.cache.lock().insert_if_current(generation, filter.clone(), view.clone()) {
            msg_debug!(format!("view for {:?} outdated by a sync, not cached", filter));
        }
        Ok(view)
    }

    /// Syncs now and then every `every` until `shutdown` resolves.
    ///
    /// A failed cycle is logged and retried on the next tick. A tick that
    /// fires while a cycle is still running is skipped.
    pub async fn run<F>(&self, every: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        self.tick().await;

        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => self.tick().await,
            }
        }
    }

    async fn tick(&self) {
        match self.sync().await {
            Ok(report) => match report.state {
                SyncState::Skipped => {}
                SyncState::PartiallyFailed => msg_warning!(Message::SyncPartiallyFailed(report.skipped.len())),
                _ => msg_success!(Message::SyncCompleted {
                    projects_inserted: report.projects.inserted,
                    tasks_inserted: report.tasks.inserted,
                }),
            },
            Err(e) => msg_error!(Message::SyncFailed(e.to_string())),
        }
    }
}

impl Dashboard<Todoist> {
    /// Builds the production dashboard: Todoist client, configured store,
    /// and a view cache that lives as long as one sync interval.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let remote = Todoist::new(&config.todoist()?)?;
        let store = config.open_store()?;
        Ok(Self::new(remote, store, config.sync_interval()))
    }
}

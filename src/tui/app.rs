use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{error, info};

use crate::lookup::{lookup_series, LookupOptions};
use crate::models::SeriesRecord;
use crate::tmdb::TmdbApi;
use crate::widgets::{HeatMap, SearchLine};

/// Results sent from lookup tasks back to the UI loop.
pub enum AppEvent {
    LookupDone(Box<SeriesRecord>),
    LookupFailed { query: String, error: String },
}

pub struct App {
    pub running: bool,
    pub search: SearchLine,
    pub heat_map: HeatMap,
    pub status: Option<String>,

    api: Arc<dyn TmdbApi>,
    runtime: Handle,
    options: LookupOptions,

    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
}

impl App {
    pub fn new(api: Arc<dyn TmdbApi>, runtime: Handle, options: LookupOptions) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            running: true,
            search: SearchLine::new(),
            heat_map: HeatMap::new(),
            status: None,
            api,
            runtime,
            options,
            event_tx,
            event_rx,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Enter: move the typed title into a pending lookup.
    pub fn submit(&mut self) {
        if self.heat_map.is_searching() || self.heat_map.is_pending() {
            self.status = Some("A search is already running".to_string());
            return;
        }
        if self.search.text().trim().is_empty() {
            self.status = Some("Type a title first".to_string());
            return;
        }
        let query = self.search.take();
        self.status = None;
        self.heat_map.trigger(query);
    }

    /// Per-frame update: starts the pending lookup, if any, off the UI thread.
    pub fn update(&mut self) {
        let Some(query) = self.heat_map.update() else {
            return;
        };
        info!("Looking up '{}'", query);

        let api = self.api.clone();
        let tx = self.event_tx.clone();
        let options = self.options;
        let lookup_query = query.clone();
        let lookup = self
            .runtime
            .spawn(async move { lookup_series(api.as_ref(), &lookup_query, options).await });

        // Watches the lookup so a panicking task still reports back.
        self.runtime.spawn(async move {
            let event = match lookup.await {
                Ok(Ok(record)) => AppEvent::LookupDone(Box::new(record)),
                Ok(Err(e)) => AppEvent::LookupFailed {
                    query,
                    error: format!("{:#}", e),
                },
                Err(e) => AppEvent::LookupFailed {
                    query,
                    error: format!("lookup task aborted: {}", e),
                },
            };
            let _ = tx.send(event);
        });
    }

    /// Drains finished lookups.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AppEvent::LookupDone(record) => {
                    info!(
                        "Loaded '{}' ({} seasons)",
                        record.title,
                        record.episodes.len()
                    );
                    self.heat_map.apply(*record);
                }
                AppEvent::LookupFailed { query, error } => {
                    error!("Lookup for '{}' failed: {}", query, error);
                    self.heat_map.abort();
                    self.status = Some(format!("Lookup for '{}' failed: {}", query, error));
                }
            }
        }
    }
}

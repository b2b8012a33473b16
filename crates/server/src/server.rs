#![forbid(unsafe_code)]

use crate::http::{read_request, write_response};
use crate::routes;
use chores_core::LocalCalendar;
use chores_storage::{SqliteStore, StoreError};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

const IO_TIMEOUT: Duration = Duration::from_secs(2);
const ACCEPT_POLL: Duration = Duration::from_millis(25);

#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    #[error("store lock poisoned by a panicked request")]
    StorePoisoned,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServerError {
    /// Stable tag for log lines.
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::StorePoisoned => "STORE_POISONED",
            Self::Store(err) => err.code(),
        }
    }
}

/// Shared request context. The store sits behind a mutex so at most one
/// storage call is in flight at a time.
pub(crate) struct AppState {
    store: Mutex<SqliteStore>,
    calendar: LocalCalendar,
}

impl AppState {
    pub(crate) fn new(store: SqliteStore, calendar: LocalCalendar) -> Self {
        Self {
            store: Mutex::new(store),
            calendar,
        }
    }

    pub(crate) fn calendar(&self) -> &LocalCalendar {
        &self.calendar
    }

    pub(crate) fn with_store<T>(
        &self,
        f: impl FnOnce(&mut SqliteStore) -> Result<T, StoreError>,
    ) -> Result<T, ServerError> {
        let mut store = self.store.lock().map_err(|_| ServerError::StorePoisoned)?;
        Ok(f(&mut store)?)
    }

    pub(crate) fn into_store(self) -> SqliteStore {
        self.store.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<AtomicBool>,
}

impl Server {
    pub(crate) fn bind(addr: impl ToSocketAddrs, state: AppState) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener,
            state: Arc::new(state),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    pub(crate) fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Accepts until the shutdown flag is raised, then waits for in-flight
    /// connections and hands the state back so the store can be closed.
    pub(crate) fn run(self) -> std::io::Result<Arc<AppState>> {
        self.listener.set_nonblocking(true)?;
        let mut workers: Vec<JoinHandle<()>> = Vec::new();

        while !self.shutdown.load(Ordering::Relaxed) {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    let state = Arc::clone(&self.state);
                    workers.push(std::thread::spawn(move || {
                        if let Err(err) = handle_connection(stream, &state) {
                            tracing::debug!(%peer, error = %err, "connection dropped");
                        }
                    }));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    workers.retain(|worker| !worker.is_finished());
                    std::thread::sleep(ACCEPT_POLL);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "accept failed");
                }
            }
        }

        join_workers(workers);
        Ok(self.state)
    }
}

/// Waits for every worker; returns how many of them panicked.
fn join_workers(workers: Vec<JoinHandle<()>>) -> usize {
    let mut panicked = 0;
    for worker in workers {
        if worker.join().is_err() {
            panicked += 1;
            tracing::warn!("connection worker panicked");
        }
    }
    panicked
}

fn handle_connection(mut stream: TcpStream, state: &AppState) -> std::io::Result<()> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(Some(IO_TIMEOUT))?;
    stream.set_write_timeout(Some(IO_TIMEOUT))?;

    let Some(request) = read_request(&mut stream)? else {
        return Ok(());
    };
    tracing::debug!(method = %request.method, target = %request.target, "request");

    let response = routes::route(state, &request);
    write_response(&mut stream, &response, request.method == "HEAD")
}

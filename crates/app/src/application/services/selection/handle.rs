//! Command handle for a manager running on its own task

use countrylist_domain::{AddOutcome, Country, RemoveOutcome, SearchOutcome};
use tokio::sync::{mpsc, oneshot, watch};

use super::manager::{FetchOutcome, SelectionManager};
use super::snapshot::SelectionSnapshot;
use crate::application::services::shortlist_store::RestoreOutcome;

const COMMAND_BUFFER: usize = 32;

/// The manager task is gone
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("selection manager is no longer running")]
    Stopped,
}

/// Requests accepted by a spawned manager, each with its reply channel
#[derive(Debug)]
pub enum SelectionCommand {
    Search {
        term: String,
        reply: oneshot::Sender<SearchOutcome>,
    },
    Add {
        country: Country,
        reply: oneshot::Sender<AddOutcome>,
    },
    RemoveAt {
        offsets: Vec<usize>,
        reply: oneshot::Sender<RemoveOutcome>,
    },
    Fetch {
        reply: oneshot::Sender<FetchOutcome>,
    },
    Restore {
        reply: oneshot::Sender<RestoreOutcome>,
    },
}

impl SelectionManager {
    /// Move the manager onto its own task.
    ///
    /// The task ends once every handle has been dropped.
    pub fn spawn(mut self) -> SelectionHandle {
        let (commands_tx, mut commands) = mpsc::channel(COMMAND_BUFFER);
        let (snapshots, snapshot_rx) = watch::channel(self.snapshot());

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    command = commands.recv() => match command {
                        Some(command) => self.execute(command, &snapshots),
                        None => break,
                    },
                    Some(completion) = self.next_completion() => {
                        self.apply(completion);
                        snapshots.send_replace(self.snapshot());
                    }
                }
            }
            tracing::debug!("Selection manager stopped");
        });

        SelectionHandle {
            commands: commands_tx,
            snapshots: snapshot_rx,
        }
    }

    /// Run one command, publishing the new state before replying.
    fn execute(&mut self, command: SelectionCommand, snapshots: &watch::Sender<SelectionSnapshot>) {
        match command {
            SelectionCommand::Search { term, reply } => {
                let outcome = self.search_country(&term);
                self.respond(snapshots, reply, outcome);
            }
            SelectionCommand::Add { country, reply } => {
                let outcome = self.add(country);
                self.respond(snapshots, reply, outcome);
            }
            SelectionCommand::RemoveAt { offsets, reply } => {
                let outcome = self.remove_at(&offsets);
                self.respond(snapshots, reply, outcome);
            }
            SelectionCommand::Fetch { reply } => {
                let outcome = self.fetch_countries();
                self.respond(snapshots, reply, outcome);
            }
            SelectionCommand::Restore { reply } => {
                let outcome = self.restore_shortlist();
                self.respond(snapshots, reply, outcome);
            }
        }
    }

    fn respond<T>(
        &self,
        snapshots: &watch::Sender<SelectionSnapshot>,
        reply: oneshot::Sender<T>,
        value: T,
    ) {
        snapshots.send_replace(self.snapshot());
        // Caller may have given up waiting
        let _ = reply.send(value);
    }
}

/// Cloneable front door to a spawned `SelectionManager`
#[derive(Clone)]
pub struct SelectionHandle {
    commands: mpsc::Sender<SelectionCommand>,
    snapshots: watch::Receiver<SelectionSnapshot>,
}

impl SelectionHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SelectionCommand,
    ) -> Result<T, SelectionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| SelectionError::Stopped)?;
        response.await.map_err(|_| SelectionError::Stopped)
    }

    pub async fn search(&self, term: impl Into<String>) -> Result<SearchOutcome, SelectionError> {
        let term = term.into();
        self.request(|reply| SelectionCommand::Search { term, reply })
            .await
    }

    pub async fn add(&self, country: Country) -> Result<AddOutcome, SelectionError> {
        self.request(|reply| SelectionCommand::Add { country, reply })
            .await
    }

    pub async fn remove(&self, index: usize) -> Result<RemoveOutcome, SelectionError> {
        self.remove_at(vec![index]).await
    }

    pub async fn remove_at(&self, offsets: Vec<usize>) -> Result<RemoveOutcome, SelectionError> {
        self.request(|reply| SelectionCommand::RemoveAt { offsets, reply })
            .await
    }

    pub async fn fetch(&self) -> Result<FetchOutcome, SelectionError> {
        self.request(|reply| SelectionCommand::Fetch { reply }).await
    }

    pub async fn restore(&self) -> Result<RestoreOutcome, SelectionError> {
        self.request(|reply| SelectionCommand::Restore { reply })
            .await
    }

    /// Latest published state
    pub fn snapshot(&self) -> SelectionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<SelectionSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until no fetch or location lookup is in flight.
    pub async fn wait_until_idle(&self) -> Result<SelectionSnapshot, SelectionError> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|s| !s.is_busy())
            .await
            .map_err(|_| SelectionError::Stopped)?;
        Ok(snapshot.clone())
    }
}

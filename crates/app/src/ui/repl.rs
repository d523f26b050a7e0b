//! Line-oriented terminal front-end over a `SelectionHandle`

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::command::{Command, HELP};
use super::render;
use crate::application::{FetchOutcome, SelectionError, SelectionHandle};
use crate::ports::outbound::ConnectivityProvider;

/// Why the REPL stopped early
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

pub struct Repl<R, W> {
    handle: SelectionHandle,
    connectivity: Arc<dyn ConnectivityProvider>,
    input: R,
    output: W,
}

impl<R, W> Repl<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        handle: SelectionHandle,
        connectivity: Arc<dyn ConnectivityProvider>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            handle,
            connectivity,
            input,
            output,
        }
    }

    /// Read commands until `quit` or end of input.
    pub async fn run(mut self) -> Result<(), ReplError> {
        self.say("Country shortlist. Type `help` for commands.").await?;
        self.report_load().await?;

        let mut line = String::new();
        loop {
            self.output.write_all(b"> ").await?;
            self.output.flush().await?;

            line.clear();
            if self.input.read_line(&mut line).await? == 0 {
                break;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    self.say(&e.to_string()).await?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            self.execute(command).await?;
        }

        self.say("Bye.").await?;
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<(), ReplError> {
        match command {
            Command::Search(term) => {
                let outcome = self.handle.search(term.clone()).await?;
                self.say(&render::search(&outcome, &term)).await?;
            }
            Command::Remove(index) => {
                let outcome = self.handle.remove(index).await?;
                self.say(&render::remove(&outcome)).await?;
            }
            Command::List => {
                let snapshot = self.handle.snapshot();
                self.say(&render::shortlist(&snapshot.shortlist)).await?;
            }
            Command::Show(index) => {
                let snapshot = self.handle.snapshot();
                let text = match snapshot.shortlist.get(index) {
                    Some(country) => render::detail(country),
                    None => format!(
                        "There is no entry {} (shortlist has {}).",
                        index + 1,
                        snapshot.shortlist.len()
                    ),
                };
                self.say(&text).await?;
            }
            Command::Catalog(filter) => {
                let snapshot = self.handle.snapshot();
                self.say(&render::catalog(&snapshot.catalog, filter.as_deref()))
                    .await?;
            }
            Command::Fetch => {
                let outcome = self.handle.fetch().await?;
                match outcome {
                    FetchOutcome::Started => self.report_load().await?,
                    other => self.say(&render::fetch(&other)).await?,
                }
            }
            Command::Status => {
                let text = render::status(&self.handle.snapshot(), self.connectivity.is_online());
                self.say(&text).await?;
            }
            Command::Help => self.say(HELP).await?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Show the loading indicator while background work runs, then the result.
    async fn report_load(&mut self) -> Result<(), ReplError> {
        if self.handle.snapshot().is_busy() {
            self.say(render::LOADING).await?;
        }
        let snapshot = self.handle.wait_until_idle().await?;
        match &snapshot.notice {
            Some(notice) => self.say(notice).await?,
            None if snapshot.catalog_len() > 0 => {
                self.say(&format!("{} countries available.", snapshot.catalog_len()))
                    .await?
            }
            None => {}
        }
        self.say(&render::shortlist(&snapshot.shortlist)).await
    }

    async fn say(&mut self, text: &str) -> Result<(), ReplError> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        Ok(())
    }
}

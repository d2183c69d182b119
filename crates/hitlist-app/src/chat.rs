//! Chat host - Feeds console lines to the game and posts the replies
//!
//! Live input dispatches every line as its own task, the way a chat bot
//! handles messages from many players at once. Script replay awaits each
//! line before reading the next so the transcript is deterministic.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use hitlist_domain::UserId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::commands::{parse_line, CommandError};
use crate::game::Game;

/// Where replies go
#[async_trait]
pub trait Outbox: Send + Sync {
    async fn send(&self, to: &UserId, text: &str) -> anyhow::Result<()>;
}

/// Prints replies to stdout, one message per block
pub struct ConsoleOutbox {
    stdout: Mutex<tokio::io::Stdout>,
}

impl ConsoleOutbox {
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for ConsoleOutbox {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Outbox for ConsoleOutbox {
    async fn send(&self, to: &UserId, text: &str) -> anyhow::Result<()> {
        let message = format!("[to {}]\n{}\n\n", to, text);
        let mut stdout = self.stdout.lock().await;
        stdout.write_all(message.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}

pub struct ChatHost {
    game: Arc<Game>,
    outbox: Arc<dyn Outbox>,
}

impl ChatHost {
    pub fn new(game: Arc<Game>, outbox: Arc<dyn Outbox>) -> Self {
        Self { game, outbox }
    }

    /// Handle one input line to completion
    pub async fn handle_line(&self, line: String) -> anyhow::Result<()> {
        handle(self.game.clone(), self.outbox.clone(), line).await
    }

    /// Handle one input line on its own task
    pub fn dispatch(&self, line: String) -> JoinHandle<()> {
        let game = self.game.clone();
        let outbox = self.outbox.clone();
        tokio::spawn(async move {
            if let Err(e) = handle(game, outbox, line).await {
                warn!(error = %e, "could not deliver reply");
            }
        })
    }

    /// Read lines until EOF, one task per line
    pub async fn run<R>(&self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut in_flight = Vec::new();
        while let Some(line) = lines.next_line().await? {
            in_flight.push(self.dispatch(line));
            in_flight.retain(|task: &JoinHandle<()>| !task.is_finished());
        }
        for task in in_flight {
            task.await?;
        }
        Ok(())
    }

    /// Replay a script file, one line at a time
    pub async fn replay(&self, path: &Path) -> anyhow::Result<()> {
        let file = tokio::fs::File::open(path).await?;
        let mut lines = BufReader::new(file).lines();
        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            self.handle_line(line).await?;
        }
        Ok(())
    }
}

async fn handle(game: Arc<Game>, outbox: Arc<dyn Outbox>, line: String) -> anyhow::Result<()> {
    let (user, command) = match parse_line(&line) {
        Ok(parsed) => parsed,
        Err(CommandError::Empty) => return Ok(()),
        Err(e) => {
            debug!(line = %line, error = %e, "unparseable line");
            let author = line.split_whitespace().next().unwrap_or_default();
            return outbox.send(&UserId::new(author), &format!("❌ {}", e)).await;
        }
    };

    // Storage calls block on locks and file writes
    let reply = {
        let user = user.clone();
        tokio::task::spawn_blocking(move || game.execute(&user, command)).await?
    };

    match reply {
        Some(text) => outbox.send(&user, &text).await,
        None => Ok(()),
    }
}

//! Session: a tokio task that drives one match engine.
//!
//! The task is the single event loop of a game. It pulls commands from one
//! queue in arrival order and owns the only timer, the mismatch reset. While
//! that timer is armed, reveals still reach the engine, which ignores them.
//!
//! Every update is published to a `watch` channel holding the latest
//! snapshot. Consumers that need every step ask for an update stream with
//! `updates`; nothing is queued until one does.
//!
//! An engine handed over mid-mismatch gets its reset armed for the full
//! delay as soon as the loop starts.
//!
//! ```no_run
//! use concentration::cards::Deck;
//! use concentration::core::GameRng;
//! use concentration::engine::MatchEngine;
//! use concentration::session::GameSession;
//!
//! # async fn demo() -> concentration::Result<()> {
//! let deck = Deck::generate(&[1u32, 2, 3], &mut GameRng::new(42));
//! let session = GameSession::spawn(MatchEngine::new(deck));
//!
//! session.reveal(0)?;
//! let engine = session.shutdown().await?;
//! assert_eq!(engine.flips(), 1);
//! # Ok(())
//! # }
//! ```

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::cards::Deck;
use crate::engine::{MatchEngine, ResetHandle, Snapshot, Update};
use crate::error::{Error, Result};

/// Input to the session loop.
enum Command<P: Clone> {
    Reveal(usize),
    NewGame(Deck<P>),
    Stream(mpsc::UnboundedSender<Update<P>>),
}

/// Handle to a running game.
///
/// Dropping the handle stops the loop; `shutdown` does the same and returns
/// the engine.
pub struct GameSession<P: Clone> {
    commands: mpsc::UnboundedSender<Command<P>>,
    snapshots: watch::Receiver<Snapshot<P>>,
    task: JoinHandle<MatchEngine<P>>,
}

impl<P> GameSession<P>
where
    P: Clone + Send + Sync + 'static,
{
    /// Start the event loop for `engine` on the current runtime.
    pub fn spawn(engine: MatchEngine<P>) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(engine.snapshot());

        let task = tokio::spawn(run(engine, command_rx, snapshot_tx));

        Self {
            commands,
            snapshots,
            task,
        }
    }

    /// Queue a reveal of the card at `index`.
    pub fn reveal(&self, index: usize) -> Result<()> {
        self.send(Command::Reveal(index))
    }

    /// Queue a new game with `deck`, cancelling any pending reset.
    pub fn new_game(&self, deck: Deck<P>) -> Result<()> {
        self.send(Command::NewGame(deck))
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<P> {
        self.snapshots.borrow().clone()
    }

    /// A receiver that always holds the latest snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<P>> {
        self.snapshots.clone()
    }

    /// Stream every update produced after this call.
    ///
    /// There is one stream at a time: a later call ends the earlier stream.
    /// Dropping the receiver stops the loop from queueing updates.
    pub fn updates(&self) -> Result<mpsc::UnboundedReceiver<Update<P>>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.send(Command::Stream(sender))?;
        Ok(receiver)
    }

    /// Stop the loop and return the engine in its final state.
    ///
    /// Commands already queued are processed first. A pending reset that has
    /// not fired stays on the engine; a session spawned on it fires it after
    /// the full delay.
    pub async fn shutdown(self) -> Result<MatchEngine<P>> {
        drop(self.commands);
        self.task
            .await
            .map_err(|e| Error::Session(format!("session task failed: {}", e)))
    }

    fn send(&self, command: Command<P>) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| Error::Session("session loop has stopped".to_string()))
    }
}

async fn run<P: Clone>(
    mut engine: MatchEngine<P>,
    mut commands: mpsc::UnboundedReceiver<Command<P>>,
    snapshots: watch::Sender<Snapshot<P>>,
) -> MatchEngine<P> {
    let timer = sleep(engine.mismatch_delay());
    tokio::pin!(timer);
    let mut armed: Option<ResetHandle> = engine.phase().awaiting_reset();
    let mut updates: Option<mpsc::UnboundedSender<Update<P>>> = None;

    match armed {
        Some(handle) => debug!(pairs = engine.total_pairs(), %handle, "Session started with a pending reset"),
        None => debug!(pairs = engine.total_pairs(), "Session started"),
    }

    loop {
        let batch = tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Reveal(index)) => engine.reveal(index),
                Some(Command::NewGame(deck)) => {
                    if let Some(handle) = armed.take() {
                        debug!(%handle, "Reset timer cancelled");
                    }
                    vec![engine.new_game(deck)]
                }
                Some(Command::Stream(sender)) => {
                    updates = Some(sender);
                    Vec::new()
                }
                None => break,
            },
            () = &mut timer, if armed.is_some() => match armed.take() {
                Some(handle) => engine.complete_evaluation(handle),
                None => Vec::new(),
            },
        };

        for update in batch {
            if let Some(reset) = update.event.scheduled_reset() {
                timer.as_mut().reset(Instant::now() + reset.delay);
                armed = Some(reset.handle);
            }
            snapshots.send_replace(update.snapshot.clone());
            if updates.as_ref().is_some_and(|stream| stream.send(update).is_err()) {
                updates = None;
            }
        }
    }

    debug!(matched = engine.matched_pairs(), "Session stopped");
    engine
}

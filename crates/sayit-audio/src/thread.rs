//! Dedicated playback thread - isolates the `!Send` output stream from
//! the async runtime.
//!
//! `rodio::OutputStream` is `!Send` on some platforms. Rather than
//! using `unsafe impl Send/Sync`, the player is confined to a single OS
//! thread and every operation is routed through a [`PlayerCommand`]
//! sent to the actor. The public [`PlayerHandle`] is the `Send + Sync`
//! proxy the controller holds, and it implements the core
//! [`AudioPlayerPort`].

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use sayit_core::{AudioPlayerError, AudioPlayerPort};

use crate::error::PlayerError;
use crate::player::{PlaybackFinishedCallback, RodioPlayer};

// ── Commands ───────────────────────────────────────────────────────

/// A command sent from the handle to the playback thread.
enum PlayerCommand {
    /// Decode and stage a clip; replies with its duration.
    Load {
        bytes: Vec<u8>,
        reply: mpsc::Sender<Result<Duration, PlayerError>>,
    },

    /// Drop the staged clip and halt playback (fire-and-forget).
    Clear,

    /// Start playing the staged clip from the beginning.
    Play {
        reply: mpsc::Sender<Result<(), PlayerError>>,
    },

    /// Pause playback (fire-and-forget).
    Pause,

    /// Resume paused playback (or restart after a refused play).
    Resume {
        reply: mpsc::Sender<Result<(), PlayerError>>,
    },

    /// Halt playback and reset the position (fire-and-forget).
    Stop,

    /// Apply a playback-rate multiplier (fire-and-forget).
    SetRate(f32),

    /// Query whether audio is audible.
    IsPlaying { reply: mpsc::Sender<bool> },

    /// Query whether a clip is staged.
    HasAudio { reply: mpsc::Sender<bool> },

    /// Shut down the playback thread.
    Shutdown,
}

// ── Handle (Send + Sync proxy) ─────────────────────────────────────

/// `Send + Sync` handle to the dedicated playback thread.
///
/// All methods take `&self`; request-reply methods block the caller for
/// the microseconds of local channel I/O plus the operation itself.
pub struct PlayerHandle {
    cmd_tx: mpsc::Sender<PlayerCommand>,
    thread: Option<thread::JoinHandle<()>>,
}

impl PlayerHandle {
    /// Spawn the playback thread and return the handle.
    ///
    /// `on_finished` fires on every natural end of playback (never for
    /// an explicit stop). Errors from opening the output device are
    /// propagated back through a one-shot init channel.
    pub fn spawn(on_finished: PlaybackFinishedCallback) -> Result<Self, PlayerError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<PlayerCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), PlayerError>>();

        let thread = thread::Builder::new()
            .name("sayit-audio".into())
            .spawn(move || {
                Self::run(on_finished, cmd_rx, &init_tx);
            })
            .map_err(|e| PlayerError::OutputStream(format!("failed to spawn audio thread: {e}")))?;

        // Wait for the playback thread to finish initialisation.
        init_rx.recv().map_err(|_| PlayerError::ThreadDied)??;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }

    // ── Internal helpers ───────────────────────────────────────────

    /// Send a command that expects a reply and block until the thread
    /// responds. Channel failures map to [`PlayerError::ThreadDied`].
    fn send_and_recv<T>(
        &self,
        build: impl FnOnce(mpsc::Sender<Result<T, PlayerError>>) -> PlayerCommand,
    ) -> Result<T, PlayerError> {
        let (tx, rx) = mpsc::channel();
        self.cmd_tx
            .send(build(tx))
            .map_err(|_| PlayerError::ThreadDied)?;
        rx.recv().map_err(|_| PlayerError::ThreadDied)?
    }

    /// Like `send_and_recv` but for queries returning a bare value.
    /// Returns `None` if the thread is dead.
    fn query<T>(&self, build: impl FnOnce(mpsc::Sender<T>) -> PlayerCommand) -> Option<T> {
        let (tx, rx) = mpsc::channel();
        self.cmd_tx.send(build(tx)).ok()?;
        rx.recv().ok()
    }

    // ── Playback thread event loop ─────────────────────────────────

    /// The body of the playback thread. Owns the `RodioPlayer` for its
    /// entire lifetime; it never crosses thread boundaries.
    fn run(
        on_finished: PlaybackFinishedCallback,
        cmd_rx: mpsc::Receiver<PlayerCommand>,
        init_tx: &mpsc::Sender<Result<(), PlayerError>>,
    ) {
        let mut player = match RodioPlayer::new(on_finished) {
            Ok(player) => {
                if init_tx.send(Ok(())).is_err() {
                    // Caller dropped, nothing to do.
                    return;
                }
                player
            }
            Err(e) => {
                let _ = init_tx.send(Err(e));
                return;
            }
        };

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                PlayerCommand::Load { bytes, reply } => {
                    let _ = reply.send(player.load(bytes));
                }

                PlayerCommand::Clear => player.clear(),

                PlayerCommand::Play { reply } => {
                    let _ = reply.send(player.play());
                }

                PlayerCommand::Pause => player.pause(),

                PlayerCommand::Resume { reply } => {
                    let _ = reply.send(player.resume());
                }

                PlayerCommand::Stop => player.stop(),

                PlayerCommand::SetRate(multiplier) => player.set_rate(multiplier),

                PlayerCommand::IsPlaying { reply } => {
                    let _ = reply.send(player.is_playing());
                }

                PlayerCommand::HasAudio { reply } => {
                    let _ = reply.send(player.has_audio());
                }

                PlayerCommand::Shutdown => break,
            }
        }

        // `player` is dropped here, on the playback thread.
        tracing::debug!("Audio thread shutting down");
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        // Best-effort shutdown - the thread may already be dead.
        let _ = self.cmd_tx.send(PlayerCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

// ── Port implementation ────────────────────────────────────────────

impl AudioPlayerPort for PlayerHandle {
    fn load(&self, bytes: Vec<u8>) -> Result<Duration, AudioPlayerError> {
        self.send_and_recv(|reply| PlayerCommand::Load { bytes, reply })
            .map_err(AudioPlayerError::from)
    }

    fn clear(&self) {
        let _ = self.cmd_tx.send(PlayerCommand::Clear);
    }

    fn play(&self) -> Result<(), AudioPlayerError> {
        self.send_and_recv(|reply| PlayerCommand::Play { reply })
            .map_err(AudioPlayerError::from)
    }

    fn pause(&self) {
        let _ = self.cmd_tx.send(PlayerCommand::Pause);
    }

    fn resume(&self) -> Result<(), AudioPlayerError> {
        self.send_and_recv(|reply| PlayerCommand::Resume { reply })
            .map_err(AudioPlayerError::from)
    }

    fn stop(&self) {
        let _ = self.cmd_tx.send(PlayerCommand::Stop);
    }

    fn set_rate(&self, multiplier: f32) {
        let _ = self.cmd_tx.send(PlayerCommand::SetRate(multiplier));
    }

    fn is_playing(&self) -> bool {
        self.query(|reply| PlayerCommand::IsPlaying { reply })
            .unwrap_or(false)
    }

    fn has_audio(&self) -> bool {
        self.query(|reply| PlayerCommand::HasAudio { reply })
            .unwrap_or(false)
    }
}

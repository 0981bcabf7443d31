use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use hibiki_detect::{DetectError, PlayerDef, WindowHandle, WindowSystem};

use crate::output::OutputFile;
use crate::sentinel;
use crate::title::TitleParser;

/// Sleep intervals for the two poller phases.
#[derive(Debug, Clone, Copy)]
pub struct PollIntervals {
    pub search: Duration,
    pub watch: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            search: Duration::from_secs(2),
            watch: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    /// Scanning for a window belonging to the player.
    Searching,
    /// Watching one window for title changes and closure.
    Watching {
        handle: WindowHandle,
        last_title: String,
    },
}

/// Per-player polling state machine.
///
/// Alternates between searching (find a window for one of the player's
/// executables) and watching (react to title changes, fall back to
/// searching when the window closes). Runs until process exit and never
/// gives up: any error is logged and resets the machine to searching.
pub struct Poller<W: WindowSystem> {
    player: PlayerDef,
    system: W,
    parser: TitleParser,
    output: OutputFile,
    intervals: PollIntervals,
    phase: Phase,
}

impl<W: WindowSystem> Poller<W> {
    pub fn new(
        player: PlayerDef,
        system: W,
        parser: TitleParser,
        output: OutputFile,
        intervals: PollIntervals,
    ) -> Self {
        Self {
            player,
            system,
            parser,
            output,
            intervals,
            phase: Phase::Searching,
        }
    }

    /// Drive the state machine forever.
    pub async fn run(mut self) {
        info!(player = %self.player.name, "Poller started");
        loop {
            let interval = self.tick();
            sleep(interval).await;
        }
    }

    /// Run one step of the state machine and return how long to sleep
    /// before the next one.
    pub fn tick(&mut self) -> Duration {
        let result = match self.phase.clone() {
            Phase::Searching => self.search(),
            Phase::Watching { handle, last_title } => self.watch(handle, last_title),
        };

        if let Err(e) = result {
            warn!(player = %self.player.name, error = %e, "Poller error, restarting search");
            self.phase = Phase::Searching;
        }

        match self.phase {
            Phase::Searching => self.intervals.search,
            Phase::Watching { .. } => self.intervals.watch,
        }
    }

    /// Whether the poller currently has a window under watch.
    pub fn is_watching(&self) -> bool {
        matches!(self.phase, Phase::Watching { .. })
    }

    fn search(&mut self) -> Result<(), DetectError> {
        for executable in &self.player.executables {
            for pt in self.system.find_process_threads(executable)? {
                let windows = self.system.thread_windows(pt.tid)?;

                // First found window wins; players aren't expected to
                // expose more than one candidate.
                if let Some(window) = windows.into_iter().next() {
                    info!(player = %self.player.name, title = %window.title, "Found player window");
                    self.output.write(&self.parser.parse(Some(&window.title)));
                    self.phase = Phase::Watching {
                        handle: window.handle,
                        last_title: window.title,
                    };
                    return Ok(());
                }
            }
        }

        Ok(())
    }

    fn watch(&mut self, handle: WindowHandle, last_title: String) -> Result<(), DetectError> {
        if !self.system.window_exists(handle) {
            info!(player = %self.player.name, "Player window closed");
            self.output.write(sentinel::NO_SONG);
            self.phase = Phase::Searching;
            return Ok(());
        }

        if let Some(title) = self.system.window_title(handle) {
            if title != last_title {
                debug!(player = %self.player.name, title = %title, "Title changed");
                self.output.write(&self.parser.parse(Some(&title)));
                self.phase = Phase::Watching {
                    handle,
                    last_title: title,
                };
            }
        }

        Ok(())
    }
}

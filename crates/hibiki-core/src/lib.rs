pub mod config;
pub mod error;
pub mod output;
pub mod poller;
pub mod title;

/// Placeholder lines written when no real song title is available.
pub mod sentinel {
    /// Startup value, before any player has been found.
    pub const WAITING: &str = "waiting for player detection";
    /// The player window closed or reported an empty title.
    pub const NO_SONG: &str = "no song currently playing";
    /// Written on shutdown so overlays don't keep showing a stale song.
    pub const STOPPED: &str = "monitoring not active";
}

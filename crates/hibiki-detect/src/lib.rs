pub mod platform;
pub mod player_db;

mod error;

pub use error::DetectError;
pub use platform::NativeSystem;
pub use player_db::{PlayerDatabase, PlayerDef};

/// Opaque handle to a top-level window, valid for the window's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// A live process matching a player executable, with one of its threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessThread {
    pub pid: u32,
    pub tid: u32,
}

/// A titled top-level window owned by a player thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
}

/// OS window-enumeration seam.
///
/// The poller state machine only talks to the OS through this trait, so
/// platform backends can be swapped and tests can substitute a fake.
pub trait WindowSystem {
    /// All (pid, tid) pairs whose executable name equals `process_name`,
    /// case-insensitively. Processes that vanish mid-scan are skipped
    /// rather than failing the whole scan.
    fn find_process_threads(&self, process_name: &str) -> Result<Vec<ProcessThread>, DetectError>;

    /// Windows owned by `tid` that are visible, not child windows, not
    /// tool windows, and have a non-empty title.
    fn thread_windows(&self, tid: u32) -> Result<Vec<WindowInfo>, DetectError>;

    /// Whether the handle still refers to a live window.
    fn window_exists(&self, handle: WindowHandle) -> bool;

    /// Current title of the window, filtered like `thread_windows`.
    fn window_title(&self, handle: WindowHandle) -> Option<String>;
}

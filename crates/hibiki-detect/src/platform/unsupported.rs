use tracing::warn;

use crate::{DetectError, ProcessThread, WindowHandle, WindowInfo, WindowSystem};

/// Fallback backend for platforms without a window-enumeration API.
///
/// Every scan comes back empty, so pollers simply stay in their search
/// phase forever and the output file keeps its startup sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedSystem;

impl UnsupportedSystem {
    pub fn new() -> Self {
        warn!("Window enumeration is not supported on this platform");
        Self
    }
}

impl WindowSystem for UnsupportedSystem {
    fn find_process_threads(&self, _process_name: &str) -> Result<Vec<ProcessThread>, DetectError> {
        Ok(Vec::new())
    }

    fn thread_windows(&self, _tid: u32) -> Result<Vec<WindowInfo>, DetectError> {
        Ok(Vec::new())
    }

    fn window_exists(&self, _handle: WindowHandle) -> bool {
        false
    }

    fn window_title(&self, _handle: WindowHandle) -> Option<String> {
        None
    }
}

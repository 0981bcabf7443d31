use tracing::trace;

use windows::Win32::Foundation::{CloseHandle, BOOL, HWND, LPARAM, TRUE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, Thread32First, Thread32Next,
    PROCESSENTRY32W, TH32CS_SNAPPROCESS, TH32CS_SNAPTHREAD, THREADENTRY32,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumThreadWindows, GetWindowLongW, GetWindowTextW, IsWindow, IsWindowVisible, GWL_EXSTYLE,
    GWL_STYLE, WS_CHILD, WS_EX_TOOLWINDOW,
};

use crate::{DetectError, ProcessThread, WindowHandle, WindowInfo, WindowSystem};

/// Win32 backend: Toolhelp snapshots for process/thread discovery,
/// `EnumThreadWindows` for the windows a thread owns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32System;

impl Win32System {
    pub fn new() -> Self {
        Self
    }
}

impl WindowSystem for Win32System {
    fn find_process_threads(&self, process_name: &str) -> Result<Vec<ProcessThread>, DetectError> {
        let wanted = process_name.to_lowercase();
        let mut results = Vec::new();

        unsafe {
            // One snapshot covers both walks, so a process that exits
            // between them can't produce dangling thread ids.
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS | TH32CS_SNAPTHREAD, 0)
                .map_err(|e| DetectError::Snapshot(e.to_string()))?;

            let mut pids = Vec::new();
            let mut proc_entry = PROCESSENTRY32W {
                dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
                ..Default::default()
            };
            if Process32FirstW(snapshot, &mut proc_entry).is_ok() {
                loop {
                    if utf16_until_nul(&proc_entry.szExeFile).to_lowercase() == wanted {
                        pids.push(proc_entry.th32ProcessID);
                    }
                    if Process32NextW(snapshot, &mut proc_entry).is_err() {
                        break;
                    }
                }
            }

            if !pids.is_empty() {
                let mut thread_entry = THREADENTRY32 {
                    dwSize: std::mem::size_of::<THREADENTRY32>() as u32,
                    ..Default::default()
                };
                if Thread32First(snapshot, &mut thread_entry).is_ok() {
                    loop {
                        if pids.contains(&thread_entry.th32OwnerProcessID) {
                            results.push(ProcessThread {
                                pid: thread_entry.th32OwnerProcessID,
                                tid: thread_entry.th32ThreadID,
                            });
                        }
                        if Thread32Next(snapshot, &mut thread_entry).is_err() {
                            break;
                        }
                    }
                }
            }

            let _ = CloseHandle(snapshot);
        }

        trace!(process = %process_name, threads = results.len(), "Process scan");
        Ok(results)
    }

    fn thread_windows(&self, tid: u32) -> Result<Vec<WindowInfo>, DetectError> {
        let mut windows = Vec::new();

        unsafe {
            let _ = EnumThreadWindows(
                tid,
                Some(enum_thread_callback),
                LPARAM(&mut windows as *mut Vec<WindowInfo> as isize),
            );
        }

        Ok(windows)
    }

    fn window_exists(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindow(hwnd(handle)).as_bool() }
    }

    fn window_title(&self, handle: WindowHandle) -> Option<String> {
        unsafe { read_title(hwnd(handle)) }
    }
}

unsafe extern "system" fn enum_thread_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = &mut *(lparam.0 as *mut Vec<WindowInfo>);

    if let Some(title) = read_title(hwnd) {
        windows.push(WindowInfo {
            handle: WindowHandle(hwnd.0 as isize),
            title,
        });
    }

    TRUE
}

/// Title of a visible, non-child, non-tool window.
///
/// `None` means the window should not be considered at all: invisible,
/// auxiliary UI, or untitled.
unsafe fn read_title(hwnd: HWND) -> Option<String> {
    if !IsWindowVisible(hwnd).as_bool() {
        return None;
    }

    let style = GetWindowLongW(hwnd, GWL_STYLE) as u32;
    let ex_style = GetWindowLongW(hwnd, GWL_EXSTYLE) as u32;
    if style & WS_CHILD.0 != 0 || ex_style & WS_EX_TOOLWINDOW.0 != 0 {
        return None;
    }

    let mut buf = [0u16; 512];
    let len = GetWindowTextW(hwnd, &mut buf);
    if len > 0 {
        Some(String::from_utf16_lossy(&buf[..len as usize]))
    } else {
        None
    }
}

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut core::ffi::c_void)
}

fn utf16_until_nul(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

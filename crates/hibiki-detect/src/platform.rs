#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(not(target_os = "windows"))]
pub mod unsupported;

/// Backend for the current platform.
#[cfg(target_os = "windows")]
pub use self::windows::Win32System as NativeSystem;

#[cfg(not(target_os = "windows"))]
pub use self::unsupported::UnsupportedSystem as NativeSystem;

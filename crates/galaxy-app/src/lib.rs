//! Galaxy backdrop host: windowed and headless frontends for the particle
//! field.

pub mod frame_loop;
pub mod headless;
pub mod platform;
pub mod window;

pub use frame_loop::{FRAME_DT, FpsCounter, FrameLoop, MAX_FRAME_TIME};
pub use headless::{
    HeadlessError, HeadlessOptions, HeadlessRenderer, HeadlessReport, ResizeStep, frame_file_name,
};
pub use platform::{PlatformDirs, PlatformError};
pub use window::{AppState, KeyAction, key_action, run};

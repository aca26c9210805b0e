//! UI layer for desktop GUI: app shell, tabs, forms and the response panel.

pub mod app;

pub use app::{DesktopGuiApp, StartupConfig};

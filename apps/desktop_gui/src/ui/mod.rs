//! UI layer for the desktop app: app shell, record table, and record dialog.

pub mod app;
pub mod record_form;
pub mod record_table;

pub use app::DesktopGuiApp;

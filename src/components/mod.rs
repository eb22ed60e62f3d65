// ABOUTME: UI components for the TUI interface: toast widget, layout and help overlay

pub mod help;
pub mod layout;
pub mod toast;

pub use help::HelpComponent;
pub use layout::{HitArea, LayoutComponent};
pub use toast::{ToastComponent, ToastHitAreas, TOAST_HEIGHT};

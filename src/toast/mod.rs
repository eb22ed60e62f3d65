// ABOUTME: Single-toast presentation unit: lifecycle state machine, host seam and render model

pub mod host;
pub mod unit;
pub mod view;

pub use host::{ChannelHost, HostCommand, ToastHost};
pub use unit::{Control, Lifecycle, ToastUnit};
pub use view::{ActionControl, Role, ToastView};

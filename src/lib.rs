// ABOUTME: Library crate for Toastbox exposing the toast unit, its manager and the demo UI

pub mod animation;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod icons;
pub mod input;
pub mod manager;
pub mod notification;
pub mod toast;

pub use error::{Result, ToastboxError};
pub use notification::{Notification, NotificationId, NotificationType, ToastAction};
pub use toast::{ToastHost, ToastUnit};

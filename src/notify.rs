/// Outcome notifications
///
/// Every export call reports its outcome exactly once through a
/// [`NotificationSink`]. The console implementation renders a colored
/// one-line notice on stderr and mirrors it into the log.
use crate::ui;
use log::{error, info, warn};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Success,
    Error,
    Warning,
    Info,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Success => "success",
            Variant::Error => "error",
            Variant::Warning => "warning",
            Variant::Info => "info",
        }
    }

    fn color(&self) -> term::color::Color {
        match self {
            Variant::Success => term::color::BRIGHT_GREEN,
            Variant::Error => term::color::BRIGHT_RED,
            Variant::Warning => term::color::BRIGHT_YELLOW,
            Variant::Info => term::color::BRIGHT_BLUE,
        }
    }
}

/// A user-visible outcome message
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub variant: Variant,
}

impl Notification {
    pub fn new(title: &str, message: impl Into<String>, variant: Variant) -> Self {
        Self { title: title.to_string(), message: message.into(), variant }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new("Success", message, Variant::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message, Variant::Error)
    }
}

/// Receiver of export outcome notifications
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to stderr (unless quiet) and logs them
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let variant = notification.variant.as_str();
        match notification.variant {
            Variant::Error => error!("[{}] {}: {}", variant, notification.title, notification.message),
            Variant::Warning => warn!("[{}] {}: {}", variant, notification.title, notification.message),
            Variant::Success | Variant::Info => {
                info!("[{}] {}: {}", variant, notification.title, notification.message)
            }
        }

        if !self.quiet {
            ui::notice(&notification.title, &notification.message, notification.variant.color());
        }
    }
}

mod requests;
mod text_manipulators;

pub mod availability;
pub mod config;
pub mod error;
pub mod markup;
pub mod notification;
pub mod section_fetcher;
pub mod session;
pub mod watcher;

pub use availability::{AvailabilityRecord, parse_waitlist};
pub use config::{PortalConfig, WatchConfig};
pub use error::CheckError;
pub use notification::{DiscordNotifier, Notification, NotificationKind, Notifier, decide};
pub use section_fetcher::CourseQuery;
pub use session::{Credentials, PortalSession, authenticate};
pub use watcher::{CheckOutcome, CourseOutcome, WatchContext};

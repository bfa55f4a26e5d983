use std::time::Duration;

use chrono::Utc;
use log::debug;
use serde_json::json;

use crate::{availability::AvailabilityRecord, error::CheckError, requests::RequestClient};

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);
const WEBHOOK_USER_AGENT: &str = "seatwatch";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    SeatsAvailable,
    WaitlistAvailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
}

/// Open seats win over open waitlist spots; nothing open means no message.
///
/// There is no memory of earlier runs, so an unchanged opening notifies again.
pub fn decide(record: &AvailabilityRecord) -> Option<Notification> {
    let label = format!("{} {}", record.subject, record.course);
    let (kind, title) = if record.seats_available != "0" {
        (
            NotificationKind::SeatsAvailable,
            format!("Seats available for {label}!"),
        )
    } else if record.waitlist_remaining != "0" {
        (
            NotificationKind::WaitlistAvailable,
            format!("Waitlist available for {label}!"),
        )
    } else {
        return None;
    };
    Some(Notification {
        kind,
        title,
        body: record.report(),
    })
}

/// Somewhere to send a title and a body.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, title: &str, body: &str) -> Result<(), CheckError>;
}

/// Posts notifications as embeds to a Discord webhook.
#[derive(Debug)]
pub struct DiscordNotifier {
    request_client: RequestClient,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, CheckError> {
        Ok(Self {
            request_client: RequestClient::new(WEBHOOK_USER_AGENT)?,
            webhook_url: webhook_url.into(),
        })
    }
}

impl Notifier for DiscordNotifier {
    async fn notify(&self, title: &str, body: &str) -> Result<(), CheckError> {
        let payload = json!({
            "embeds": [{
                "title": title,
                "description": body,
                "timestamp": Utc::now().to_rfc3339(),
            }]
        });
        self.request_client
            .post_json(&self.webhook_url, &payload, WEBHOOK_TIMEOUT)
            .await?;
        debug!("Sent \"{}\" to Discord", title);
        Ok(())
    }
}

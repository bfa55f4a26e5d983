use log::{error, info};

use crate::{
    availability::{AvailabilityRecord, parse_waitlist},
    config::PortalConfig,
    error::CheckError,
    notification::{NotificationKind, Notifier, decide},
    section_fetcher::{CourseQuery, fetch_sections},
    session::{Credentials, PortalSession, authenticate},
};

/// What one course check found.
#[derive(Debug)]
pub struct CheckOutcome {
    pub record: AvailabilityRecord,
    pub notified: Option<NotificationKind>,
}

#[derive(Debug)]
pub struct CourseOutcome {
    pub query: CourseQuery,
    pub result: Result<CheckOutcome, CheckError>,
}

pub struct WatchContext<N> {
    pub portal: PortalConfig,
    pub notifier: N,
}

impl<N: Notifier> WatchContext<N> {
    pub fn new(portal: PortalConfig, notifier: N) -> Self {
        Self { portal, notifier }
    }

    /// Fetch, extract, decide and maybe notify for a single course.
    pub async fn run_for_course(
        &self,
        session: &PortalSession,
        query: &CourseQuery,
    ) -> Result<CheckOutcome, CheckError> {
        let html = fetch_sections(session, &self.portal, query).await?;
        let record = parse_waitlist(&html, &query.subject, &query.course)?;
        info!("{}", record.report());

        let notified = match decide(&record) {
            Some(notification) => {
                self.notifier
                    .notify(&notification.title, &notification.body)
                    .await?;
                info!("Notified: {}", notification.title);
                Some(notification.kind)
            }
            None => None,
        };
        Ok(CheckOutcome { record, notified })
    }

    /// Logs in once and checks every course in turn.
    ///
    /// A failing course is logged and skipped. Failing to log in ends the
    /// whole batch, since nothing can be checked without a session.
    pub async fn run_batch(
        &self,
        credentials: &Credentials,
        courses: &[CourseQuery],
    ) -> Result<Vec<CourseOutcome>, CheckError> {
        let session = authenticate(&self.portal, credentials).await?;

        let mut outcomes = Vec::with_capacity(courses.len());
        for query in courses {
            let result = self.run_for_course(&session, query).await;
            if let Err(e) = &result {
                error!("[{}] error: {}", query, e);
            }
            outcomes.push(CourseOutcome {
                query: query.clone(),
                result,
            });
        }
        Ok(outcomes)
    }
}

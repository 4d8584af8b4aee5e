use crate::db::models::NewContact;
use crate::db::session::{Connector, Session};
use crate::service::session_guard::SessionGuard;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Saved { id: i64 },
    NotSaved,
}

/// Store one contact-form submission.
///
/// Datastore problems never escape: an unavailable datastore short-circuits
/// before any insert, and a failed insert is reported as `NotSaved` without
/// a retry so a double-submit cannot produce duplicate rows.
pub async fn submit<C: Connector>(guard: &SessionGuard<C>, contact: &NewContact) -> SubmissionOutcome {
    let Ok(mut session) = guard.with_connection().await else {
        warn!("datastore unavailable; contact not saved");
        return SubmissionOutcome::NotSaved;
    };

    match session.insert_contact(contact).await {
        Ok(id) => {
            info!(id, source = session.source(), "contact saved");
            SubmissionOutcome::Saved { id }
        }
        Err(e) => {
            error!(source = session.source(), error = %e, "contact insert failed");
            SubmissionOutcome::NotSaved
        }
    }
}

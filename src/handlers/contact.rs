use axum::{extract::State, response::Html};

use crate::db::session::Connector;
use crate::middleware::contact_form::ContactSubmission;
use crate::pages::{Banner, Page};
use crate::router::AppState;
use crate::service::submission::{SubmissionOutcome, submit};

/// POST /submit -> stores the form and re-renders the contact page with the
/// outcome. Always a 200 page; datastore trouble only changes the banner.
pub async fn submit_contact<C: Connector>(
    State(state): State<AppState<C>>,
    ContactSubmission(contact): ContactSubmission,
) -> Html<String> {
    let banner = match submit(&state.guard, &contact).await {
        SubmissionOutcome::Saved { .. } => Banner::Saved,
        SubmissionOutcome::NotSaved => Banner::NotSaved,
    };
    state.pages.render(Page::Contact, banner).await
}

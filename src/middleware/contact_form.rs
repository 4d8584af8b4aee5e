use axum::{
    Form,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::db::models::NewContact;
use crate::db::session::Connector;
use crate::pages::{Banner, Page};
use crate::router::AppState;

/// Raw form body of `POST /submit`. Every field may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl ContactForm {
    /// Trim every field and require `name` and `email`.
    pub fn validate(self) -> Result<NewContact, MissingFields> {
        let contact = NewContact {
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        let missing: Vec<&'static str> = [("name", &contact.name), ("email", &contact.email)]
            .into_iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(k, _)| k)
            .collect();

        if missing.is_empty() {
            Ok(contact)
        } else {
            Err(MissingFields(missing))
        }
    }
}

/// A validated submission. Malformed or incomplete forms are rejected with
/// the contact page and an "invalid" banner, still as a 200 page.
pub struct ContactSubmission(pub NewContact);

impl<C: Connector> FromRequest<AppState<C>> for ContactSubmission {
    type Rejection = Response;

    async fn from_request(req: Request, state: &AppState<C>) -> Result<Self, Self::Rejection> {
        let form = match Form::<ContactForm>::from_request(req, state).await {
            Ok(Form(form)) => form,
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "unreadable contact form");
                return Err(invalid(state).await);
            }
        };

        match form.validate() {
            Ok(contact) => Ok(ContactSubmission(contact)),
            Err(MissingFields(missing)) => {
                debug!(?missing, "contact form missing required fields");
                Err(invalid(state).await)
            }
        }
    }
}

async fn invalid<C: Connector>(state: &AppState<C>) -> Response {
    state
        .pages
        .render(Page::Contact, Banner::Invalid)
        .await
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default_to_empty() {
        let form = ContactForm {
            name: " Ada ".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        let contact = form.validate().expect("valid form");
        assert_eq!(contact.name, "Ada");
        assert_eq!(contact.company, "");
        assert_eq!(contact.phone, "");
        assert_eq!(contact.message, "");
    }

    #[test]
    fn name_and_email_are_required() {
        let form = ContactForm {
            name: "   ".to_string(),
            message: "hi".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(MissingFields(vec!["name", "email"])));
    }
}

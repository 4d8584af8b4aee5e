//! Page rendering for the marketing site.
//!
//! Pages are plain HTML files under the templates directory. The contact
//! page may contain a `{{ status }}` marker that is replaced by the outcome
//! banner of a submission. Missing files fall back to a bare built-in page so
//! the site stays up without its assets.

use axum::response::Html;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub const STATUS_MARKER: &str = "{{ status }}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Products,
    Contact,
    Ecommerce,
}

impl Page {
    fn file_name(self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Products => "products.html",
            Page::Contact => "contact.html",
            Page::Ecommerce => "ecommerce.html",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Products => "Products",
            Page::Contact => "Contact",
            Page::Ecommerce => "E-commerce",
        }
    }
}

/// Outcome shown on the contact page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    None,
    Saved,
    NotSaved,
    Invalid,
}

impl Banner {
    fn html(self) -> &'static str {
        match self {
            Banner::None => "",
            Banner::Saved => {
                r#"<p class="status success" data-outcome="saved">Thank you! Your message has been received.</p>"#
            }
            Banner::NotSaved => {
                r#"<p class="status error" data-outcome="not-saved">Sorry, your message could not be saved right now. Please try again later.</p>"#
            }
            Banner::Invalid => {
                r#"<p class="status error" data-outcome="invalid">Please provide at least your name and email.</p>"#
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pages {
    dir: Arc<PathBuf>,
}

impl Pages {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
        }
    }

    pub async fn render(&self, page: Page, banner: Banner) -> Html<String> {
        let path = self.dir.join(page.file_name());
        let body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "template missing; using built-in page");
                fallback(page)
            }
        };
        Html(body.replace(STATUS_MARKER, banner.html()))
    }
}

fn fallback(page: Page) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body><h1>{title}</h1>{STATUS_MARKER}</body></html>",
        title = page.title()
    )
}

use axum::{extract::State, response::Html};

use crate::pages::{Banner, Page, Pages};

pub async fn home(State(pages): State<Pages>) -> Html<String> {
    pages.render(Page::Home, Banner::None).await
}

pub async fn products(State(pages): State<Pages>) -> Html<String> {
    pages.render(Page::Products, Banner::None).await
}

pub async fn contact(State(pages): State<Pages>) -> Html<String> {
    pages.render(Page::Contact, Banner::None).await
}

pub async fn ecommerce(State(pages): State<Pages>) -> Html<String> {
    pages.render(Page::Ecommerce, Banner::None).await
}

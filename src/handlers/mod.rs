pub mod contact;
pub mod diagnostics;
pub mod pages;

#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Render a plain-text or Markdown body to HTML, embed local images and send
//! the result as a single multipart email through an SMTP relay.

pub mod domain;
pub mod infrastructure;

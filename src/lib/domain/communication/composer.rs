//! Message composition
//!
//! Produces a `multipart/related` email whose first part is a
//! `multipart/alternative` (plain text and HTML) followed by one inline part
//! per image. Every image is referenced from the HTML as `cid:<path>` and
//! carries the same path as its `Content-ID`.

mod errors;

use std::fs;

use anyhow::anyhow;
use lettre::{
    message::{header::ContentType, Attachment, MultiPart, SinglePart},
    Message as Email,
};
use sha2::{Digest, Sha256};
use tracing::debug;

pub use errors::ComposeError;

use super::{mailer::Message, rendering::Renderer};

/// Render the HTML alternative for `plain`, followed by one `<img>` tag per
/// image in the order given.
pub fn render_html<R: Renderer + ?Sized>(renderer: &R, plain: &str, images: &[String]) -> String {
    let mut html = renderer.render(plain);

    for image in images {
        html.push_str(&format!(r#"<img src="cid:{image}" width="100%"><br>"#));
    }

    html
}

/// Builds complete emails from [`Message`] drafts
#[derive(Debug, Clone)]
pub struct MessageComposer<R: Renderer> {
    renderer: R,
}

impl<R: Renderer> MessageComposer<R> {
    /// Creates a new composer rendering HTML with `renderer`
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Compose the email for `message`.
    ///
    /// All images are read before anything else happens: if one of them can't
    /// be read no message is produced at all.
    ///
    /// # Returns
    /// - [`Ok`] with the finished [`lettre::Message`]; its `formatted()` bytes
    ///   are what goes on the wire and its envelope holds sender and recipient.
    /// - [`Err`] containing a [`ComposeError`] otherwise.
    pub fn compose(&self, message: &Message) -> Result<Email, ComposeError> {
        let images = message
            .images
            .iter()
            .map(|path| InlineImage::read(path))
            .collect::<Result<Vec<_>, _>>()?;

        let html = render_html(&self.renderer, &message.plain_body, &message.images);
        let boundary = boundary_for(message, &images);

        let mut alternative = MultiPart::alternative()
            .boundary(format!("{boundary}-alt"))
            .build();

        if !message.plain_body.is_empty() {
            alternative = alternative.singlepart(SinglePart::plain(message.plain_body.clone()));
        }

        let with_html = !html.is_empty() || !images.is_empty();

        if with_html {
            alternative = alternative.singlepart(SinglePart::html(html));
        } else if message.plain_body.is_empty() {
            // multipart bodies need at least one part
            alternative = alternative.singlepart(SinglePart::plain(String::new()));
        }

        let mut related = MultiPart::related()
            .boundary(format!("{boundary}-rel"))
            .multipart(alternative);

        for image in images {
            related = related.singlepart(image.into_part());
        }

        debug!(
            images = message.images.len(),
            html = with_html,
            "composed message for {}",
            message.to
        );

        Ok(Email::builder()
            .from(message.from.clone().into())
            .to(message.to.clone().into())
            .subject(message.subject.clone())
            .date(message.date)
            .multipart(related)?)
    }
}

struct InlineImage {
    content_id: String,
    content_type: ContentType,
    body: Vec<u8>,
}

impl InlineImage {
    fn read(path: &str) -> Result<Self, ComposeError> {
        // a non-ASCII Content-ID gets RFC 2047 encoded and no longer matches `cid:`
        if !path.is_ascii() {
            return Err(ComposeError::NonAsciiImagePath(path.to_string()));
        }

        let body = fs::read(path).map_err(|source| ComposeError::ImageUnreadable {
            path: path.to_string(),
            source,
        })?;

        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let content_type = ContentType::parse(mime.as_ref())
            .map_err(|e| anyhow!("unusable content type {mime} for {path}: {e}"))?;

        Ok(Self {
            content_id: path.to_string(),
            content_type,
            body,
        })
    }

    fn into_part(self) -> SinglePart {
        Attachment::new_inline(self.content_id).body(self.body, self.content_type)
    }
}

/// Multipart boundaries are a digest of the inputs so the same draft always
/// serializes to the same bytes.
fn boundary_for(message: &Message, images: &[InlineImage]) -> String {
    let mut hasher = Sha256::new();

    let mut field = |bytes: &[u8]| {
        hasher.update((bytes.len() as u64).to_be_bytes());
        hasher.update(bytes);
    };

    field(message.subject.as_bytes());
    field(message.from.to_string().as_bytes());
    field(message.to.to_string().as_bytes());
    field(message.plain_body.as_bytes());

    for image in images {
        field(image.content_id.as_bytes());
        field(&image.body);
    }

    let digest = format!("{:x}", hasher.finalize());

    digest[..32].to_string()
}

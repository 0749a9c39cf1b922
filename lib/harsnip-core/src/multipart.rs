//! Multipart form data bodies.
//!
//! Normalized multipart requests carry their fully serialized body in
//! `postData.text`, so renderers that embed raw bodies get the exact bytes a
//! client would send. The serializer is exposed as a single-pass iterator of
//! chunks; [`Form::encode`] materializes it.
//!
//! # Example
//!
//! ```
//! use harsnip_core::{Form, Part};
//!
//! let form = Form::with_boundary("xyz").part(Part::text("name", "John Doe"));
//! assert_eq!(
//!     form.encode(),
//!     "--xyz\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nJohn Doe\r\n--xyz--\r\n"
//! );
//! ```

use bytes::{Bytes, BytesMut};

use crate::body::MULTIPART_FORM_DATA;
use crate::har::Param;

/// Boundary used for every multipart body this crate generates.
pub const BOUNDARY: &str = "---011000010111000001101001";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Known file extensions, matched case-insensitively.
const EXTENSIONS: &[(&str, &str)] = &[
    ("csv", "text/csv"),
    ("gif", "image/gif"),
    ("gz", "application/gzip"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("json", "application/json"),
    ("md", "text/markdown"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("txt", "text/plain"),
    ("xml", "application/xml"),
    ("zip", "application/zip"),
];

fn content_type_for(filename: &str) -> &'static str {
    filename
        .rsplit_once('.')
        .and_then(|(_, extension)| {
            EXTENSIONS
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(extension))
        })
        .map_or(FALLBACK_CONTENT_TYPE, |&(_, content_type)| content_type)
}

/// One field of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl Part {
    /// A plain field, written without a `Content-Type` line.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            data: Bytes::from(value.into()),
        }
    }

    /// A file field; its content type comes from the filename extension.
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let filename = filename.into();
        Self {
            name: name.into(),
            content_type: Some(content_type_for(&filename).to_string()),
            filename: Some(filename),
            data: data.into(),
        }
    }

    /// Override the content type.
    #[must_use]
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            ..self
        }
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filename, for file fields.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Content type, if one is written.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Field data.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Boundary line and headers, up to and including the blank line.
    fn head(&self, boundary: &str) -> Bytes {
        let mut head = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"",
            self.name
        );
        if let Some(filename) = &self.filename {
            head.push_str(&format!("; filename=\"{filename}\""));
        }
        head.push_str("\r\n");
        if let Some(content_type) = &self.content_type {
            head.push_str(&format!("Content-Type: {content_type}\r\n"));
        }
        head.push_str("\r\n");
        Bytes::from(head)
    }

    fn body(&self) -> Bytes {
        let mut body = BytesMut::with_capacity(self.data.len() + 2);
        body.extend_from_slice(&self.data);
        body.extend_from_slice(b"\r\n");
        body.freeze()
    }
}

impl From<&Param> for Part {
    /// A param with a `fileName` becomes a file field holding the param
    /// value; the file itself is never read.
    fn from(param: &Param) -> Self {
        let value = param.value.clone().unwrap_or_default();
        let part = match &param.file_name {
            Some(file_name) => Self::file(param.name.as_str(), file_name.as_str(), value),
            None => Self::text(param.name.as_str(), value),
        };
        match &param.content_type {
            Some(content_type) => part.with_content_type(content_type.as_str()),
            None => part,
        }
    }
}

/// An ordered list of parts and the boundary separating them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    boundary: String,
    parts: Vec<Part>,
}

impl Default for Form {
    fn default() -> Self {
        Self::with_boundary(BOUNDARY)
    }
}

impl Form {
    /// An empty form using [`BOUNDARY`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty form using a custom boundary.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Append a part.
    #[must_use]
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// The boundary.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Parts, in order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// `multipart/form-data; boundary=<boundary>`.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("{MULTIPART_FORM_DATA}; boundary={}", self.boundary)
    }

    /// Serialized body, chunk by chunk.
    #[must_use]
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks {
            form: self,
            position: 0,
        }
    }

    /// Serialize the whole body. Invalid UTF-8 in part data is replaced.
    #[must_use]
    pub fn encode(&self) -> String {
        let body: BytesMut = self.chunks().fold(BytesMut::new(), |mut body, chunk| {
            body.extend_from_slice(&chunk);
            body
        });
        String::from_utf8_lossy(&body).into_owned()
    }
}

impl FromIterator<Part> for Form {
    fn from_iter<I: IntoIterator<Item = Part>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Single-pass iterator over the serialized chunks of a [`Form`].
///
/// Each part yields its head then its data; the closing boundary comes last.
#[derive(Debug)]
pub struct Chunks<'a> {
    form: &'a Form,
    position: usize,
}

impl Iterator for Chunks<'_> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.position;
        let closing = self.form.parts.len() * 2;
        if position > closing {
            return None;
        }
        self.position += 1;

        if position == closing {
            return Some(Bytes::from(format!("--{}--\r\n", self.form.boundary)));
        }
        let part = self.form.parts.get(position / 2)?;
        Some(if position.is_multiple_of(2) {
            part.head(&self.form.boundary)
        } else {
            part.body()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.form.parts.len() * 2 + 1).saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

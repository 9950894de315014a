//! Minimal `multipart/form-data` encoder for CSV file parts.
//!
//! ureq 2 only sends raw bodies, so forms are assembled in memory.

/// A form under construction.
#[derive(Debug)]
pub(crate) struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub(crate) fn new() -> Self {
        Self::with_boundary(format!("uda-client-{}", uuid::Uuid::new_v4().simple()))
    }

    pub(crate) fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// Append a file part with a `text/csv` content type.
    pub(crate) fn add_csv(&mut self, field: &str, file_name: &str, contents: &[u8]) -> &mut Self {
        let header = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\nContent-Type: text/csv\r\n\r\n",
            boundary = self.boundary,
            name = sanitize_file_name(file_name),
        );
        self.body.extend_from_slice(header.as_bytes());
        self.body.extend_from_slice(contents);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Value for the request `Content-Type` header.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the form and return the encoded body.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|ch| !matches!(ch, '\r' | '\n'))
        .map(|ch| if ch == '"' { '\'' } else { ch })
        .collect();
    if cleaned.trim().is_empty() {
        "upload.csv".to_string()
    } else {
        cleaned
    }
}

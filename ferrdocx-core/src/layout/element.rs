use bytes::Bytes;
use serde::Serialize;

/// One reconstructed list entry: a thumbnail and the text printed next to it.
#[derive(Clone, Debug, Serialize)]
pub struct Row {
    pub page_no: usize,
    #[serde(skip)]
    pub image: Bytes,
    pub image_size: usize,
    pub text: String,
}

impl Row {
    pub fn new(page_no: usize, image: Bytes, text: String) -> Self {
        Self {
            page_no,
            image_size: image.len(),
            image,
            text,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderRole {
    Title,
    Subtitle,
    Body,
}

impl HeaderRole {
    /// Role of the `idx`-th header candidate, top to bottom.
    pub const fn from_position(idx: usize) -> Self {
        match idx {
            0 => HeaderRole::Title,
            1 => HeaderRole::Subtitle,
            _ => HeaderRole::Body,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeaderLine {
    pub text: String,
    pub role: HeaderRole,
}

use bytes::Bytes;
use serde::Serialize;

use crate::{analysis::bbox::Bbox, consts::SPAN_SPACE_FACTOR};

/// A run of characters sharing one position on the page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Span {
    pub bbox: Bbox,
    pub text: String,
}

impl Span {
    pub fn new(bbox: Bbox, text: impl Into<String>) -> Self {
        Self {
            bbox,
            text: text.into(),
        }
    }
}

/// Spans sharing a baseline, ordered left to right.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Line {
    pub bbox: Bbox,
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        let bbox = spans
            .iter()
            .map(|span| span.bbox)
            .reduce(|acc, bbox| acc.union(&bbox))
            .unwrap_or(Bbox::from_edges(0.0, 0.0, 0.0, 0.0));

        Self { bbox, spans }
    }

    /// Joins the spans, inserting a space where two spans are visibly apart
    /// and neither side already carries whitespace.
    pub fn text(&self) -> String {
        let space_gap = self.bbox.height() * SPAN_SPACE_FACTOR;
        let mut text = String::new();
        let mut prev_right: Option<f32> = None;

        for span in &self.spans {
            if let Some(right) = prev_right {
                let apart = span.bbox.left() - right > space_gap;
                let spaced = text.ends_with(char::is_whitespace)
                    || span.text.starts_with(char::is_whitespace);
                if apart && !spaced {
                    text.push(' ');
                }
            }
            text.push_str(&span.text);
            prev_right = Some(span.bbox.right());
        }

        text
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageBlock {
    pub bbox: Bbox,
    #[serde(skip)]
    pub bytes: Bytes,
    /// Byte length of the image, compared against the noise threshold.
    pub size: usize,
}

impl ImageBlock {
    pub fn new(bbox: Bbox, bytes: Bytes) -> Self {
        let size = bytes.len();
        Self { bbox, bytes, size }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextBlock {
    pub bbox: Bbox,
    pub lines: Vec<Line>,
}

impl TextBlock {
    pub fn new(lines: Vec<Line>) -> Self {
        let bbox = lines
            .iter()
            .map(|line| line.bbox)
            .reduce(|acc, bbox| acc.union(&bbox))
            .unwrap_or(Bbox::from_edges(0.0, 0.0, 0.0, 0.0));

        Self { bbox, lines }
    }

    /// Single-span-per-line block, handy when the geometry of the spans
    /// inside the block does not matter.
    pub fn from_lines(bbox: Bbox, lines: &[&str]) -> Self {
        let line_height = bbox.height() / lines.len().max(1) as f32;
        let lines = lines
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                let top = bbox.top() + idx as f32 * line_height;
                let span_bbox = Bbox::from_edges(bbox.left(), top, bbox.right(), top + line_height);
                Line::new(vec![Span::new(span_bbox, *text)])
            })
            .collect();

        Self { bbox, lines }
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One rectangular region of a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Image(ImageBlock),
    Text(TextBlock),
}

impl Block {
    pub fn bbox(&self) -> &Bbox {
        match self {
            Block::Image(image) => &image.bbox,
            Block::Text(text) => &text.bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_spacing() {
        let line = Line::new(vec![
            Span::new(Bbox::from_edges(120.0, 10.0, 160.0, 20.0), "Widget"),
            Span::new(Bbox::from_edges(164.0, 10.0, 172.0, 20.0), "A"),
            // Touching span continues the word
            Span::new(Bbox::from_edges(172.0, 10.0, 180.0, 20.0), "B"),
        ]);

        assert_eq!(line.text(), "Widget AB");
        assert_eq!(line.bbox, Bbox::from_edges(120.0, 10.0, 180.0, 20.0));
    }

    #[test]
    fn test_line_text_keeps_existing_whitespace() {
        let line = Line::new(vec![
            Span::new(Bbox::from_edges(0.0, 0.0, 40.0, 10.0), "Blue "),
            Span::new(Bbox::from_edges(50.0, 0.0, 80.0, 10.0), "color"),
        ]);

        assert_eq!(line.text(), "Blue color");
    }

    #[test]
    fn test_text_block_from_lines() {
        let block = TextBlock::from_lines(
            Bbox::from_edges(120.0, 100.0, 400.0, 130.0),
            &["Widget A", "Blue color", "(XCODE123) -> 2"],
        );

        assert_eq!(block.lines.len(), 3);
        assert_eq!(block.lines[1].bbox.top(), 110.0);
        assert_eq!(block.text(), "Widget A\nBlue color\n(XCODE123) -> 2");
    }

    #[test]
    fn test_image_block_size() {
        let image = ImageBlock::new(
            Bbox::from_edges(0.0, 0.0, 10.0, 10.0),
            Bytes::from_static(&[1, 2, 3, 4]),
        );
        assert_eq!(image.size, 4);

        let block = Block::Image(image);
        assert_eq!(block.bbox().right(), 10.0);
    }
}

use std::cmp::Ordering;

use crate::layout::{
    block::{Block, TextBlock},
    element::{HeaderLine, HeaderRole},
    page::Page,
};

use super::{HeaderConfig, normalize::strip_zero_width};

/// Picks the title, subtitle and intro text from the top of the first page.
pub struct HeaderExtractor<'a> {
    config: &'a HeaderConfig,
}

impl<'a> HeaderExtractor<'a> {
    pub fn new(config: &'a HeaderConfig) -> Self {
        Self { config }
    }

    pub fn extract(&self, page: &Page) -> Vec<HeaderLine> {
        let mut candidates = page
            .blocks
            .iter()
            .filter_map(|block| match block {
                Block::Text(text) if text.bbox.top() < self.config.header_max_y => Some(text),
                Block::Text(_) | Block::Image(_) => None,
            })
            .collect::<Vec<&TextBlock>>();

        candidates.sort_by(|a, b| {
            a.bbox
                .top()
                .partial_cmp(&b.bbox.top())
                .unwrap_or(Ordering::Equal)
        });

        candidates
            .into_iter()
            .map(|block| strip_zero_width(&block.text()))
            .filter(|text| !text.is_empty())
            .enumerate()
            .map(|(idx, text)| HeaderLine {
                text,
                role: HeaderRole::from_position(idx),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::{analysis::bbox::Bbox, layout::block::ImageBlock};

    fn text(top: f32, bottom: f32, lines: &[&str]) -> Block {
        Block::Text(TextBlock::from_lines(
            Bbox::from_edges(40.0, top, 500.0, bottom),
            lines,
        ))
    }

    fn page(blocks: Vec<Block>) -> Page {
        Page {
            width: 600.0,
            height: 800.0,
            blocks,
            page_no: 0,
        }
    }

    fn extract(page: &Page) -> Vec<HeaderLine> {
        let config = HeaderConfig { header_max_y: 150.0 };
        HeaderExtractor::new(&config).extract(page)
    }

    #[test]
    fn test_header_roles_by_position() {
        let page = page(vec![
            text(90.0, 100.0, &["Spring offers"]),
            text(20.0, 40.0, &["\u{200D}Catalogue 2024"]),
            text(50.0, 60.0, &["Home & garden"]),
        ]);

        assert_eq!(
            extract(&page),
            vec![
                HeaderLine {
                    text: "Catalogue 2024".to_string(),
                    role: HeaderRole::Title,
                },
                HeaderLine {
                    text: "Home & garden".to_string(),
                    role: HeaderRole::Subtitle,
                },
                HeaderLine {
                    text: "Spring offers".to_string(),
                    role: HeaderRole::Body,
                },
            ]
        );
    }

    #[test]
    fn test_header_threshold_and_images() {
        let page = page(vec![
            text(20.0, 40.0, &["Catalogue"]),
            Block::Image(ImageBlock::new(
                Bbox::from_edges(20.0, 10.0, 90.0, 80.0),
                Bytes::from_static(&[1, 2, 3]),
            )),
            text(150.0, 170.0, &["Widget A"]),
            text(400.0, 420.0, &["Widget B"]),
        ]);
        let headers = extract(&page);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].role, HeaderRole::Title);
    }

    #[test]
    fn test_header_skips_empty_blocks() {
        let page = page(vec![
            text(10.0, 20.0, &["\u{200D}", "  "]),
            text(30.0, 40.0, &["Catalogue"]),
            text(50.0, 60.0, &["Subtitle"]),
        ]);
        let headers = extract(&page);

        assert_eq!(headers[0].text, "Catalogue");
        assert_eq!(headers[0].role, HeaderRole::Title);
        assert_eq!(headers[1].role, HeaderRole::Subtitle);
    }

    #[test]
    fn test_header_keeps_lines() {
        let page = page(vec![text(10.0, 30.0, &["Catalogue", "2024"])]);

        assert_eq!(extract(&page)[0].text, "Catalogue\n2024");
    }
}

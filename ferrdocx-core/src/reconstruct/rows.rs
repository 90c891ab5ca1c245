use std::cmp::Ordering;

use tracing::*;

use crate::{
    analysis::band::{Band, compute_bands},
    layout::{
        block::{Block, ImageBlock, TextBlock},
        element::Row,
        page::Page,
    },
};

use super::{ReconstructConfig, normalize::TextNormalizer};

/// Pairs each product thumbnail of a page with the text printed beside it.
pub struct RowReconstructor<'a, N: TextNormalizer> {
    config: &'a ReconstructConfig,
    normalizer: &'a N,
}

impl<'a, N: TextNormalizer> RowReconstructor<'a, N> {
    pub fn new(config: &'a ReconstructConfig, normalizer: &'a N) -> Self {
        Self { config, normalizer }
    }

    /// Rows of `page`, top to bottom, one per qualifying image.
    pub fn reconstruct(&self, page: &Page) -> Vec<Row> {
        let images = self.qualifying_images(&page.blocks);
        if images.is_empty() {
            debug!("page {} has no qualifying image", page.page_no);
            return Vec::new();
        }

        let texts = self.candidate_texts(&page.blocks);
        let image_boxes = images.iter().map(|image| image.bbox).collect::<Vec<_>>();
        let bands = compute_bands(
            &image_boxes,
            page.height,
            self.config.top_margin,
            self.config.bottom_margin,
        );
        let owners = assign_owners(&texts, &bands);

        let rows = images
            .iter()
            .zip(&bands)
            .enumerate()
            .map(|(idx, (image, band))| {
                let owned = texts
                    .iter()
                    .zip(&owners)
                    .filter(|(_, owner)| **owner == Some(idx))
                    .map(|(text, _)| *text);
                let mut text = self.collect_text(owned);

                if text.chars().count() < self.config.min_text_length {
                    let extended = band.extended(self.config.fallback_extra_margin);
                    debug!(
                        "page {} row {idx}: {} chars below {}, retrying band {:?}",
                        page.page_no,
                        text.chars().count(),
                        self.config.min_text_length,
                        extended
                    );
                    let retry = self.collect_text(
                        texts
                            .iter()
                            .filter(|block| extended.intersects(&block.bbox))
                            .copied(),
                    );
                    if retry.chars().count() >= text.chars().count() {
                        text = retry;
                    }
                }

                Row::new(page.page_no, image.bytes.clone(), text)
            })
            .collect::<Vec<_>>();

        debug!("page {} reconstructed {} rows", page.page_no, rows.len());
        rows
    }

    /// Images above the noise threshold, sorted by top edge then left edge.
    fn qualifying_images<'b>(&self, blocks: &'b [Block]) -> Vec<&'b ImageBlock> {
        let mut images = blocks
            .iter()
            .filter_map(|block| match block {
                Block::Image(image) if image.size > self.config.noise_size_threshold => {
                    Some(image)
                }
                Block::Image(_) | Block::Text(_) => None,
            })
            .collect::<Vec<_>>();

        images.sort_by(|a, b| {
            a.bbox
                .top()
                .partial_cmp(&b.bbox.top())
                .unwrap_or(Ordering::Equal)
                .then(
                    a.bbox
                        .left()
                        .partial_cmp(&b.bbox.left())
                        .unwrap_or(Ordering::Equal),
                )
        });
        images
    }

    /// Text blocks right of the thumbnail column.
    fn candidate_texts<'b>(&self, blocks: &'b [Block]) -> Vec<&'b TextBlock> {
        blocks
            .iter()
            .filter_map(|block| match block {
                Block::Text(text) if text.bbox.left() > self.config.left_margin_x => Some(text),
                Block::Text(_) | Block::Image(_) => None,
            })
            .collect()
    }

    fn collect_text<'b>(&self, blocks: impl Iterator<Item = &'b TextBlock>) -> String {
        let mut blocks = blocks.collect::<Vec<_>>();
        blocks.sort_by(|a, b| {
            a.bbox
                .top()
                .partial_cmp(&b.bbox.top())
                .unwrap_or(Ordering::Equal)
        });

        let raw = blocks
            .iter()
            .map(|block| block.text())
            .collect::<Vec<_>>()
            .join("\n");

        self.normalizer.normalize(&raw)
    }
}

/// Gives every text block at most one owning band: the band holding the
/// block's vertical centre, else the band it overlaps most.
fn assign_owners(texts: &[&TextBlock], bands: &[Band]) -> Vec<Option<usize>> {
    texts
        .iter()
        .map(|text| {
            let center = text.bbox.center().y;
            bands
                .iter()
                .position(|band| band.contains_y(center))
                .or_else(|| {
                    bands
                        .iter()
                        .enumerate()
                        .map(|(idx, band)| (idx, band.overlap(&text.bbox)))
                        .filter(|(_, overlap)| *overlap > 0.0)
                        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
                        .map(|(idx, _)| idx)
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::{
        analysis::bbox::Bbox,
        reconstruct::{ReconstructConfigBuilder, normalize::CodeQuantityNormalizer},
    };

    const PAGE_HEIGHT: f32 = 800.0;

    fn image(top: f32, bottom: f32, size: usize) -> Block {
        Block::Image(ImageBlock::new(
            Bbox::from_edges(20.0, top, 90.0, bottom),
            Bytes::from(vec![7u8; size]),
        ))
    }

    fn text(x0: f32, top: f32, bottom: f32, lines: &[&str]) -> Block {
        Block::Text(TextBlock::from_lines(
            Bbox::from_edges(x0, top, 500.0, bottom),
            lines,
        ))
    }

    fn page(blocks: Vec<Block>) -> Page {
        Page {
            width: 600.0,
            height: PAGE_HEIGHT,
            blocks,
            page_no: 0,
        }
    }

    fn config() -> ReconstructConfig {
        ReconstructConfigBuilder::default()
            .noise_size_threshold(100)
            .left_margin_x(100.0)
            .top_margin(10.0)
            .bottom_margin(40.0)
            .fallback_extra_margin(60.0)
            .min_text_length(0)
            .build()
            .unwrap()
    }

    fn reconstruct(config: &ReconstructConfig, page: &Page) -> Vec<Row> {
        RowReconstructor::new(config, &CodeQuantityNormalizer).reconstruct(page)
    }

    #[test]
    fn test_images_without_text() {
        let page = page(vec![
            image(100.0, 180.0, 500),
            image(220.0, 300.0, 500),
            image(400.0, 480.0, 500),
        ]);
        let rows = reconstruct(&config(), &page);

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.text.is_empty()));
        assert!(rows.iter().all(|row| row.image.len() == 500));
    }

    #[test]
    fn test_no_images_no_rows() {
        let page = page(vec![
            text(120.0, 100.0, 130.0, &["Widget A"]),
            text(120.0, 200.0, 230.0, &["Widget B"]),
            // Decorative border below the noise threshold
            image(0.0, 800.0, 50),
        ]);

        assert!(reconstruct(&config(), &page).is_empty());
    }

    #[test]
    fn test_rows_follow_image_order() {
        let page = page(vec![
            text(120.0, 230.0, 260.0, &["Widget B", "(XCODE456) -> 1"]),
            image(220.0, 300.0, 500),
            text(120.0, 100.0, 140.0, &["Widget A", "(XCODE123) -> 2", "Blue color"]),
            image(100.0, 180.0, 700),
        ]);
        let rows = reconstruct(&config(), &page);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].image.len(), 700);
        assert_eq!(rows[0].text, "Widget A\nBlue color\n(XCODE123) -> 2");
        assert_eq!(rows[1].image.len(), 500);
        assert_eq!(rows[1].text, "Widget B\n(XCODE456) -> 1");
    }

    #[test]
    fn test_text_in_thumbnail_column_ignored() {
        let page = page(vec![
            image(100.0, 180.0, 500),
            text(30.0, 185.0, 195.0, &["caption under thumbnail"]),
            text(120.0, 100.0, 120.0, &["Widget A"]),
        ]);
        let rows = reconstruct(&config(), &page);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "Widget A");
    }

    #[test]
    fn test_blocks_joined_top_to_bottom() {
        let page = page(vec![
            image(100.0, 180.0, 500),
            text(120.0, 150.0, 160.0, &["second"]),
            text(120.0, 100.0, 110.0, &["first"]),
        ]);
        let rows = reconstruct(&config(), &page);

        assert_eq!(rows[0].text, "first\nsecond");
    }

    #[test]
    fn test_straddling_block_assigned_once() {
        // Bands: [90, 200) and [200, 840). The block spans 190..230, its
        // centre (210) lies in the second band.
        let page = page(vec![
            image(100.0, 180.0, 500),
            image(220.0, 300.0, 500),
            text(120.0, 190.0, 230.0, &["shared"]),
        ]);
        let rows = reconstruct(&config(), &page);

        assert_eq!(rows[0].text, "");
        assert_eq!(rows[1].text, "shared");
    }

    #[test]
    fn test_overlapping_images_still_one_row_each() {
        // Bands: [90, 225), [225, 225), [225, 840).
        let page = page(vec![
            image(100.0, 300.0, 500),
            image(150.0, 160.0, 500),
            image(170.0, 400.0, 500),
            text(120.0, 230.0, 250.0, &["Widget A"]),
        ]);
        let rows = reconstruct(&config(), &page);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text, "");
        assert_eq!(rows[1].text, "");
        assert_eq!(rows[2].text, "Widget A");
    }

    #[test]
    fn test_block_above_first_band_goes_to_overlapping_band() {
        // First band starts at 90; the block's centre (87.5) is above it.
        let page = page(vec![
            image(100.0, 180.0, 500),
            text(120.0, 80.0, 95.0, &["heading"]),
        ]);
        let rows = reconstruct(&config(), &page);

        assert_eq!(rows[0].text, "heading");
    }

    #[test]
    fn test_fallback_extends_band() {
        let config = ReconstructConfigBuilder::default()
            .noise_size_threshold(100)
            .left_margin_x(100.0)
            .top_margin(10.0)
            .bottom_margin(0.0)
            .fallback_extra_margin(60.0)
            .min_text_length(10)
            .build()
            .unwrap();

        // Band of the only image: [90, 300). The description starts below it.
        let mut page = page(vec![
            image(100.0, 180.0, 500),
            text(120.0, 100.0, 110.0, &["Widget"]),
            text(120.0, 320.0, 340.0, &["Long description of the widget"]),
        ]);
        page.height = 300.0;
        let rows = reconstruct(&config, &page);

        assert_eq!(rows[0].text, "Widget\nLong description of the widget");
    }

    #[test]
    fn test_fallback_never_shorter() {
        let config = ReconstructConfigBuilder::default()
            .noise_size_threshold(100)
            .min_text_length(1_000)
            .build()
            .unwrap();

        let page = page(vec![
            image(100.0, 180.0, 500),
            image(220.0, 300.0, 500),
            text(120.0, 100.0, 130.0, &["Widget A", "Blue color"]),
            text(120.0, 230.0, 260.0, &["Widget B"]),
        ]);
        let rows = reconstruct(&config, &page);

        assert!(rows[0].text.starts_with("Widget A\nBlue color"));
        assert!(rows[0].text.chars().count() >= "Widget A\nBlue color".chars().count());
        assert_eq!(rows[1].text, "Widget B");
    }

    #[test]
    fn test_fallback_not_triggered_when_long_enough() {
        let config = ReconstructConfigBuilder::default()
            .noise_size_threshold(100)
            .min_text_length(5)
            .fallback_extra_margin(500.0)
            .build()
            .unwrap();

        let page = page(vec![
            image(100.0, 180.0, 500),
            image(220.0, 300.0, 500),
            text(120.0, 100.0, 130.0, &["Widget A"]),
            text(120.0, 230.0, 260.0, &["Widget B"]),
        ]);
        let rows = reconstruct(&config, &page);

        assert_eq!(rows[0].text, "Widget A");
    }
}

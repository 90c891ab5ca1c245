use bytes::Bytes;
use docx_rs::*;
use image::GenericImageView;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, ensure};
use tracing::*;

use crate::{
    consts::*,
    error::{DecodeSnafu, DocxPackSnafu, EmbedError, EmptySnafu, EncodeSnafu, FerrdocxError},
    layout::element::{HeaderLine, HeaderRole, Row},
    utils::encode_png,
};

/// Turns headers and per-page rows into a document.
pub trait Assembler {
    fn render(&self, headers: &[HeaderLine], pages: &[Vec<Row>]) -> Result<Bytes, FerrdocxError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssemblerConfig {
    /// Image column width, in twentieths of a point.
    pub image_column_width: usize,
    /// Text column width, in twentieths of a point.
    pub text_column_width: usize,
    /// Thumbnails wider than this are scaled down to it.
    pub image_width_px: u32,
    /// Title size, in half points.
    pub title_size: usize,
    /// Subtitle size, in half points.
    pub subtitle_size: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            image_column_width: DEFAULT_IMAGE_COLUMN_WIDTH,
            text_column_width: DEFAULT_TEXT_COLUMN_WIDTH,
            image_width_px: DEFAULT_IMAGE_WIDTH_PX,
            title_size: DEFAULT_TITLE_SIZE,
            subtitle_size: DEFAULT_SUBTITLE_SIZE,
        }
    }
}

/// An image ready to be placed in a run.
pub struct EmbeddedImage {
    pub pic: Pic,
    pub width_px: u32,
    pub height_px: u32,
}

/// Writes a `.docx`: heading paragraphs, then one borderless two-column
/// table per page with a row per reconstructed entry.
#[derive(Debug, Clone, Default)]
pub struct DocxAssembler {
    config: AssemblerConfig,
}

impl DocxAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Validates and scales raw image bytes for embedding.
    pub fn embed_image(&self, bytes: &[u8]) -> Result<EmbeddedImage, EmbedError> {
        ensure!(!bytes.is_empty(), EmptySnafu);

        let image = image::load_from_memory(bytes).context(DecodeSnafu)?;
        let (width, height) = image.dimensions();
        let png = encode_png(&image).context(EncodeSnafu)?;

        let width_px = self.config.image_width_px.min(width).max(1);
        let height_px = ((height as u64 * width_px as u64) / width.max(1) as u64).max(1) as u32;

        let pic = Pic::new(&png).size(width_px * EMU_PER_PX, height_px * EMU_PER_PX);

        Ok(EmbeddedImage {
            pic,
            width_px,
            height_px,
        })
    }

    fn header_paragraph(&self, header: &HeaderLine) -> Paragraph {
        let mut run = Run::new();
        for (idx, line) in header.text.lines().enumerate() {
            if idx > 0 {
                run = run.add_break(BreakType::TextWrapping);
            }
            run = run.add_text(line);
        }

        let run = match header.role {
            HeaderRole::Title => run.bold().size(self.config.title_size),
            HeaderRole::Subtitle => run.italic().size(self.config.subtitle_size),
            HeaderRole::Body => run,
        };

        Paragraph::new().add_run(run)
    }

    fn image_cell(&self, row: &Row) -> TableCell {
        let paragraph = match self.embed_image(&row.image) {
            Ok(embedded) => Paragraph::new().add_run(Run::new().add_image(embedded.pic)),
            Err(EmbedError::Empty) => Paragraph::new(),
            Err(err) => {
                warn!("page {} row rendered without image: {err}", row.page_no);
                Paragraph::new()
            }
        };

        TableCell::new()
            .width(self.config.image_column_width, WidthType::Dxa)
            .add_paragraph(paragraph)
    }

    fn text_cell(&self, row: &Row) -> TableCell {
        let cell = TableCell::new().width(self.config.text_column_width, WidthType::Dxa);
        if row.text.is_empty() {
            return cell.add_paragraph(Paragraph::new());
        }

        row.text.lines().fold(cell, |cell, line| {
            cell.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)))
        })
    }

    fn rows_table(&self, rows: &[Row]) -> Table {
        let table_rows = rows
            .iter()
            .map(|row| TableRow::new(vec![self.image_cell(row), self.text_cell(row)]))
            .collect::<Vec<_>>();

        Table::new(table_rows)
            .set_grid(vec![
                self.config.image_column_width,
                self.config.text_column_width,
            ])
            .set_borders(TableBorders::with_empty())
    }
}

impl Assembler for DocxAssembler {
    fn render(&self, headers: &[HeaderLine], pages: &[Vec<Row>]) -> Result<Bytes, FerrdocxError> {
        let mut docx = Docx::new();

        for header in headers {
            docx = docx.add_paragraph(self.header_paragraph(header));
        }

        for (page_idx, rows) in pages.iter().enumerate() {
            if page_idx > 0 {
                docx = docx
                    .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
            }
            if !rows.is_empty() {
                docx = docx.add_table(self.rows_table(rows));
            }
        }

        let mut buffer = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).map_err(|err| {
            DocxPackSnafu {
                message: err.to_string(),
            }
            .build()
        })?;

        let bytes = buffer.into_inner();
        info!(
            "assembled docx: {} headers, {} pages, {} bytes",
            headers.len(),
            pages.len(),
            bytes.len()
        );

        Ok(Bytes::from(bytes))
    }
}

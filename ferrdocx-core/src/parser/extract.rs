use bytes::Bytes;
use pdfium_render::prelude::*;
use snafu::ResultExt;
use tracing::*;

use crate::{
    analysis::bbox::Bbox,
    error::{FerrdocxError, ImageEncodeSnafu, PdfiumSnafu},
    layout::{
        block::{Block, ImageBlock, Span},
        group::group_text_blocks,
        page::Page,
    },
    utils::encode_png,
};

fn to_bbox(rect: &PdfRect, page_height: f32) -> Bbox {
    Bbox::from_pdf_edges(
        rect.left.value,
        rect.bottom.value,
        rect.right.value,
        rect.top.value,
        page_height,
    )
}

/// Reads the image and text geometry of one pdfium page.
pub fn extract_page(page: &PdfPage, page_no: usize) -> Result<Page, FerrdocxError> {
    let width = page.width().value;
    let height = page.height().value;

    let mut blocks = extract_images(page, page_no, height)?;
    let image_count = blocks.len();

    let spans = extract_spans(page, height)?;
    blocks.extend(group_text_blocks(spans).into_iter().map(Block::Text));

    debug!(
        "page {page_no}: {image_count} images, {} text blocks",
        blocks.len() - image_count
    );

    Ok(Page {
        width,
        height,
        blocks,
        page_no,
    })
}

/// Page objects that may nest further objects, like form XObjects.
trait ObjectTree: Sized {
    /// Direct children, or `None` for a leaf.
    fn children(&self) -> Result<Option<Vec<Self>>, PdfiumError>;
}

impl<'a> ObjectTree for PdfPageObject<'a> {
    fn children(&self) -> Result<Option<Vec<Self>>, PdfiumError> {
        let PdfPageObject::XObjectForm(form) = self else {
            return Ok(None);
        };

        form.as_range()
            .map(|index| form.get(index))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Leaves of the object trees under `roots`, in content order.
fn flatten_objects<T: ObjectTree>(
    roots: impl IntoIterator<Item = T>,
) -> Result<Vec<T>, PdfiumError> {
    let mut leaves = Vec::new();
    let mut stack = roots.into_iter().collect::<Vec<_>>();
    stack.reverse();

    while let Some(object) = stack.pop() {
        match object.children()? {
            Some(mut children) => {
                children.reverse();
                stack.extend(children);
            }
            None => leaves.push(object),
        }
    }

    Ok(leaves)
}

fn extract_images(
    page: &PdfPage,
    page_no: usize,
    page_height: f32,
) -> Result<Vec<Block>, FerrdocxError> {
    let objects = flatten_objects(page.objects().iter()).context(PdfiumSnafu {
        stage: "form-object",
    })?;
    let mut blocks = Vec::new();

    for (idx, object) in objects.iter().enumerate() {
        let Some(image_object) = object.as_image_object() else {
            continue;
        };

        let rect = object
            .bounds()
            .context(PdfiumSnafu { stage: "image-bounds" })?;

        let image = match image_object.get_raw_image() {
            Ok(image) => image,
            Err(err) => {
                warn!("page {page_no} object {idx}: skip undecodable image: {err}");
                continue;
            }
        };

        let png = encode_png(&image).context(ImageEncodeSnafu {
            stage: "extract-image",
        })?;

        blocks.push(Block::Image(ImageBlock::new(
            to_bbox(&rect, page_height),
            Bytes::from(png),
        )));
    }

    Ok(blocks)
}

fn extract_spans(page: &PdfPage, page_height: f32) -> Result<Vec<Span>, FerrdocxError> {
    let text = page.text().context(PdfiumSnafu { stage: "text" })?;

    let spans = text
        .segments()
        .iter()
        .filter_map(|segment| {
            let content = segment.text();
            if content.trim().is_empty() {
                return None;
            }
            Some(Span::new(to_bbox(&segment.bounds(), page_height), content))
        })
        .collect();

    Ok(spans)
}

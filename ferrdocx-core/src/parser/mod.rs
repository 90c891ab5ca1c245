use std::{ops::Range, path::Path};

use bytes::Bytes;
use pdfium_render::prelude::Pdfium;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use tracing::*;
use uuid::Uuid;

use crate::{
    consts::*,
    error::{
        ConfigParseSnafu, EnvNotFoundSnafu, FerrdocxError, IoReadSnafu, IoWriteSnafu, PdfiumSnafu,
    },
    layout::{
        element::{HeaderLine, Row},
        page::Page,
    },
    reconstruct::{
        CodeQuantityNormalizer, HeaderConfig, HeaderExtractor, ReconstructConfig,
        RowReconstructor,
    },
};

pub mod assemble;
pub mod extract;

pub use assemble::{Assembler, AssemblerConfig, DocxAssembler};

/// Everything that tunes a conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    pub rows: ReconstructConfig,
    pub header: HeaderConfig,
    pub assembler: AssemblerConfig,
}

impl ConverterConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FerrdocxError> {
        let path = path.as_ref().to_string_lossy().to_string();
        let content = std::fs::read_to_string(&path).context(IoReadSnafu { path: &path })?;
        serde_json::from_str(&content).context(ConfigParseSnafu { path })
    }
}

/// Pages to convert, zero based. `end` is inclusive; `None` runs to the
/// last page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRange {
    pub start: u16,
    pub end: Option<u16>,
}

impl PageRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: u16, end: Option<u16>) -> Self {
        Self { start, end }
    }

    /// Page indexes of a document with `page_count` pages. An end past the
    /// last page is clamped.
    pub fn resolve(&self, page_count: u16, path: &str) -> Result<Range<u16>, FerrdocxError> {
        if page_count == 0 && self.start == 0 {
            return Ok(0..0);
        }

        if self.start >= page_count {
            return Err(FerrdocxError::ParserErr {
                stage: "page-range".to_string(),
                path: path.to_string(),
                message: format!(
                    "start page {} is past the last page {}",
                    self.start,
                    page_count.saturating_sub(1)
                ),
            });
        }

        let end = match self.end {
            Some(end) if end < self.start => {
                return Err(FerrdocxError::ParserErr {
                    stage: "page-range".to_string(),
                    path: path.to_string(),
                    message: format!("end page {end} is before start page {}", self.start),
                });
            }
            Some(end) => end.saturating_add(1).min(page_count),
            None => page_count,
        };

        Ok(self.start..end)
    }
}

/// A PDF supplied whole, with the file name it was uploaded under.
#[derive(Debug, Clone)]
pub struct PdfInput {
    pub name: String,
    pub bytes: Bytes,
    pub password: Option<String>,
    pub range: PageRange,
}

impl PdfInput {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            password: None,
            range: PageRange::all(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FerrdocxError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).context(IoReadSnafu {
            path: path.to_string_lossy(),
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(Self::new(name, bytes))
    }

    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    pub fn with_range(mut self, range: PageRange) -> Self {
        self.range = range;
        self
    }
}

pub struct ConvertedDocx {
    pub file_name: String,
    pub bytes: Bytes,
}

impl ConvertedDocx {
    /// Writes the document to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FerrdocxError> {
        let path = path.as_ref();
        std::fs::write(path, &self.bytes).context(IoWriteSnafu {
            path: path.to_string_lossy(),
        })
    }
}

/// `catalogue.pdf` -> `catalogue.docx`. Expects a bare file name.
pub fn docx_file_name(name: &str) -> String {
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    format!("{stem}.{DOCX_EXTENSION}")
}

/// Headers of the first page and rows of every page.
pub fn reconstruct_pages(
    pages: &[Page],
    config: &ConverterConfig,
) -> (Vec<HeaderLine>, Vec<Vec<Row>>) {
    let headers = pages
        .first()
        .map(|page| HeaderExtractor::new(&config.header).extract(page))
        .unwrap_or_default();

    let normalizer = CodeQuantityNormalizer;
    let reconstructor = RowReconstructor::new(&config.rows, &normalizer);
    let rows = pages
        .iter()
        .map(|page| reconstructor.reconstruct(page))
        .collect::<Vec<_>>();

    (headers, rows)
}

/// Runs reconstruction over already extracted pages and renders the result.
pub fn build_document<A: Assembler>(
    pages: &[Page],
    config: &ConverterConfig,
    assembler: &A,
) -> Result<Bytes, FerrdocxError> {
    let (headers, rows) = reconstruct_pages(pages, config);
    info!(
        "reconstructed {} headers and {} rows over {} pages",
        headers.len(),
        rows.iter().map(Vec::len).sum::<usize>(),
        pages.len()
    );

    assembler.render(&headers, &rows)
}

/// Converts PDFs to DOCX through a pdfium binding loaded once.
pub struct PdfConverter {
    pdfium: Pdfium,
    config: ConverterConfig,
}

impl PdfConverter {
    /// Binds the pdfium library found under `PDFIUM_DYNAMIC_LIB_PATH`.
    pub fn new(config: ConverterConfig) -> Result<Self, FerrdocxError> {
        let pdfium_lib_path =
            std::env::var(PDFIUM_LIB_PATH_ENV_NAME).context(EnvNotFoundSnafu {
                name: PDFIUM_LIB_PATH_ENV_NAME,
            })?;

        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                &pdfium_lib_path,
            ))
            .context(PdfiumSnafu {
                stage: "load-dyn-lib",
            })?,
        );

        Ok(Self::with_pdfium(pdfium, config))
    }

    pub fn with_pdfium(pdfium: Pdfium, config: ConverterConfig) -> Self {
        Self { pdfium, config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Converts the whole input or fails without output.
    #[tracing::instrument(skip_all, fields(name = %input.name, id = %Uuid::new_v4()))]
    pub fn convert(&self, input: &PdfInput) -> Result<ConvertedDocx, FerrdocxError> {
        info!("start convert, {} bytes, range {:?}", input.bytes.len(), input.range);

        let pages = self.extract_pages(input)?;
        let assembler = DocxAssembler::new(self.config.assembler.clone());
        let bytes = build_document(&pages, &self.config, &assembler)?;

        let file_name = docx_file_name(&input.name);
        info!("converted to {file_name}");

        Ok(ConvertedDocx { file_name, bytes })
    }

    /// Block geometry of the selected pages.
    pub fn extract_pages(&self, input: &PdfInput) -> Result<Vec<Page>, FerrdocxError> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(&input.bytes, input.password.as_deref())
            .context(PdfiumSnafu {
                stage: "load-pdf",
            })?;

        let range = input.range.resolve(document.pages().len(), &input.name)?;
        info!("pdf has {} pages, converting {range:?}", document.pages().len());

        range
            .map(|idx| {
                let page = document
                    .pages()
                    .get(idx)
                    .context(PdfiumSnafu { stage: "get-page" })?;
                extract::extract_page(&page, idx as usize)
            })
            .collect()
    }
}

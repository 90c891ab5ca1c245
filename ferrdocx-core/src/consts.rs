/// Environment variable holding the directory of the pdfium shared library.
pub const PDFIUM_LIB_PATH_ENV_NAME: &str = "PDFIUM_DYNAMIC_LIB_PATH";

/// MIME type of the generated document.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Extension given to the generated file name.
pub const DOCX_EXTENSION: &str = "docx";

/// Shown next to any conversion failure.
pub const SCANNED_PDF_HINT: &str =
    "If the PDF is a scan (image only), OCR is required: the DOCX will be limited anyway.";

/// Zero-width joiner left behind by the PDF text layer.
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// Image blocks at or below this many bytes are borders and icons.
pub const DEFAULT_NOISE_SIZE_THRESHOLD: usize = 2_000;

/// Text blocks must start right of this x (points) to belong to a row.
///
/// Everything left of it is the thumbnail column.
pub const DEFAULT_LEFT_MARGIN_X: f32 = 100.0;

/// Room above the first image of a page.
pub const DEFAULT_TOP_MARGIN: f32 = 10.0;

/// Room below the page bottom for the last image of a page.
pub const DEFAULT_BOTTOM_MARGIN: f32 = 40.0;

/// Extra band height used when a row captured too little text.
pub const DEFAULT_FALLBACK_EXTRA_MARGIN: f32 = 60.0;

/// Rows with fewer normalized characters than this trigger the fallback.
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 20;

/// Text blocks starting above this y on the first page are header candidates.
pub const DEFAULT_HEADER_MAX_Y: f32 = 150.0;

/// Two spans share a line when their vertical overlap covers this share of
/// the shorter span.
pub const LINE_OVERLAP_RATIO: f32 = 0.5;

/// A line joins a block when the gap above it is at most this many line
/// heights.
pub const BLOCK_GAP_FACTOR: f32 = 0.8;

/// Spans further apart than this share of the line height get a space.
pub const SPAN_SPACE_FACTOR: f32 = 0.15;

/// Width of the image column, in twentieths of a point.
pub const DEFAULT_IMAGE_COLUMN_WIDTH: usize = 2_400;

/// Width of the text column, in twentieths of a point.
pub const DEFAULT_TEXT_COLUMN_WIDTH: usize = 6_600;

/// Rendered width of a row thumbnail, in pixels.
pub const DEFAULT_IMAGE_WIDTH_PX: u32 = 110;

/// Title font size, in half points.
pub const DEFAULT_TITLE_SIZE: usize = 36;

/// Subtitle font size, in half points.
pub const DEFAULT_SUBTITLE_SIZE: usize = 28;

/// English metric units per pixel at 96 dpi.
pub const EMU_PER_PX: u32 = 9_525;

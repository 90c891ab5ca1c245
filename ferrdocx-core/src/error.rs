use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FerrdocxError {
    #[snafu(display("Environment `{}` Not Found, error {}", name, source))]
    EnvNotFound {
        source: std::env::VarError,
        name: String,
    },
    #[snafu(display("Pdfium `{}` error {}", stage, source))]
    Pdfium {
        source: pdfium_render::prelude::PdfiumError,
        stage: String,
    },
    #[snafu(display("Image encode error at stage `{}`: {}", stage, source))]
    ImageEncode {
        source: image::ImageError,
        stage: String,
    },
    #[snafu(display("Pack docx error: {}", message))]
    DocxPack { message: String },
    #[snafu(display("Read `{}` error: {}", path, source))]
    IoRead {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Write `{}` error: {}", path, source))]
    IoWrite {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Parse config `{}` error: {}", path, source))]
    ConfigParse {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Parse pdf error on `{}` for {}, msg {}", stage, path, message))]
    ParserErr {
        stage: String,
        path: String,
        message: String,
    },
}

/// Failure to turn raw image bytes into something the document can embed.
///
/// Never aborts a conversion: the assembler renders the row without its image.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EmbedError {
    #[snafu(display("Image bytes are empty"))]
    Empty,
    #[snafu(display("Decode image error: {}", source))]
    Decode { source: image::ImageError },
    #[snafu(display("Re-encode image as png error: {}", source))]
    Encode { source: image::ImageError },
}

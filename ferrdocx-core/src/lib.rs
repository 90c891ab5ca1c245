pub mod analysis;
pub mod consts;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reconstruct;
pub mod utils;

// Re-export commonly used types
pub use error::FerrdocxError;
pub use parser::{
    ConvertedDocx, ConverterConfig, PageRange, PdfConverter, PdfInput, build_document,
    docx_file_name,
};

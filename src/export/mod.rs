//! hOCR (HTML-based OCR markup) import and export.
//!
//! hOCR embeds OCR layout and recognition data in XHTML: a page is a
//! `div.ocr_page`, blocks are `div.ocr_carea`, paragraphs `p.ocr_par`,
//! lines `span.ocr_line` and words `span.ocrx_word`, with geometry and
//! confidences carried in `title` properties (`bbox x0 y0 x1 y1`,
//! `x_wconf N`). See <https://kba.github.io/hocr-spec/>.
//!
//! ## Example
//!
//! ```ignore
//! use ocr_oxide::export::{parse_hocr, HocrWriter};
//!
//! let writer = HocrWriter::new(page_bbox).with_image("scan.png");
//! let xml = writer.to_xml(&tree);
//!
//! // Round-trip: a previously exported page can be re-imported.
//! let page = parse_hocr(&xml)?;
//! ```

pub mod hocr;
pub mod hocr_parser;

pub use hocr::HocrWriter;
pub use hocr_parser::{parse_hocr, HocrPage};

//! hOCR writer implementation.
//!
//! Serializes an edited document tree back to hOCR, preserving the moves,
//! repositions and deletions applied since recognition. Element ids follow
//! the `block_{page}_{n}` convention; block classifications travel in an
//! `x_blocktype` title property so a re-import restores container behavior.

use crate::error::Result;
use crate::geometry::Bbox;
use crate::tree::{ElementKind, Node, TreeStore};
use std::path::Path;

/// hOCR file writer.
///
/// Holds the page-level metadata (page box, source image, page number); the
/// tree itself is passed at serialization time so one writer can snapshot
/// successive edit states.
///
/// # Example
///
/// ```ignore
/// use ocr_oxide::export::HocrWriter;
/// use ocr_oxide::geometry::Bbox;
///
/// let writer = HocrWriter::new(Bbox::new(0.0, 0.0, 800.0, 600.0))
///     .with_image("scan.png");
/// writer.write_to_file("page.hocr", &tree)?;
/// ```
#[derive(Debug, Clone)]
pub struct HocrWriter {
    /// Full page bounding box in image pixels
    page_bbox: Bbox,
    /// Source image reference, emitted in the page title when present
    image: Option<String>,
    /// 1-based page number used in element ids
    page_number: u32,
}

/// Per-kind running ids within one page.
#[derive(Debug, Default)]
struct IdCounters {
    carea: u32,
    par: u32,
    line: u32,
    word: u32,
}

impl HocrWriter {
    /// Create a writer for a page with the given bounding box.
    pub fn new(page_bbox: Bbox) -> Self {
        Self {
            page_bbox,
            image: None,
            page_number: 1,
        }
    }

    /// Set the source image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the 1-based page number (defaults to 1).
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Write the tree as hOCR to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>, store: &TreeStore) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_xml(store))?;
        Ok(())
    }

    /// Generate the hOCR XHTML string.
    pub fn to_xml(&self, store: &TreeStore) -> String {
        let mut xml = String::new();

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(concat!(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" ",
            "\"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">\n"
        ));
        xml.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\" xml:lang=\"en\" lang=\"en\">\n");
        xml.push_str("  <head>\n");
        xml.push_str("    <title></title>\n");
        xml.push_str("    <meta http-equiv=\"Content-Type\" content=\"text/html;charset=utf-8\"/>\n");
        xml.push_str(&format!(
            "    <meta name=\"ocr-system\" content=\"ocr_oxide {}\"/>\n",
            env!("CARGO_PKG_VERSION")
        ));
        xml.push_str(concat!(
            "    <meta name=\"ocr-capabilities\" ",
            "content=\"ocr_page ocr_carea ocr_par ocr_line ocrx_word\"/>\n"
        ));
        xml.push_str("  </head>\n");
        xml.push_str("  <body>\n");

        let mut page_title = String::new();
        if let Some(ref image) = self.image {
            page_title.push_str(&format!("image \"{}\"; ", xml_escape(image)));
        }
        page_title.push_str(&format_bbox(&self.page_bbox));
        xml.push_str(&format!(
            "    <div class=\"ocr_page\" id=\"page_{}\" title=\"{}\">\n",
            self.page_number, page_title
        ));

        let mut counters = IdCounters::default();
        for root in store.roots() {
            if let Some(node) = store.get(*root) {
                self.node_to_xml(store, node, 3, &mut counters, &mut xml);
            }
        }

        xml.push_str("    </div>\n");
        xml.push_str("  </body>\n");
        xml.push_str("</html>\n");

        xml
    }

    /// Generate hOCR as bytes (UTF-8).
    pub fn to_bytes(&self, store: &TreeStore) -> Vec<u8> {
        self.to_xml(store).into_bytes()
    }

    fn node_to_xml(
        &self,
        store: &TreeStore,
        node: &Node,
        indent_level: usize,
        counters: &mut IdCounters,
        xml: &mut String,
    ) {
        let indent = "  ".repeat(indent_level);
        let bbox = format_bbox(&node.bbox);

        match node.kind {
            ElementKind::Block(kind) => {
                counters.carea += 1;
                xml.push_str(&format!(
                    "{}<div class=\"ocr_carea\" id=\"block_{}_{}\" title=\"{}; x_blocktype {}\">\n",
                    indent,
                    self.page_number,
                    counters.carea,
                    bbox,
                    kind.as_str()
                ));
                self.children_to_xml(store, node, indent_level + 1, counters, xml);
                xml.push_str(&format!("{}</div>\n", indent));
            },
            ElementKind::Paragraph => {
                counters.par += 1;
                xml.push_str(&format!(
                    "{}<p class=\"ocr_par\" id=\"par_{}_{}\" title=\"{}\">\n",
                    indent, self.page_number, counters.par, bbox
                ));
                self.children_to_xml(store, node, indent_level + 1, counters, xml);
                xml.push_str(&format!("{}</p>\n", indent));
            },
            ElementKind::Line => {
                counters.line += 1;
                xml.push_str(&format!(
                    "{}<span class=\"ocr_line\" id=\"line_{}_{}\" title=\"{}\">\n",
                    indent, self.page_number, counters.line, bbox
                ));
                self.children_to_xml(store, node, indent_level + 1, counters, xml);
                xml.push_str(&format!("{}</span>\n", indent));
            },
            ElementKind::Word => {
                counters.word += 1;
                xml.push_str(&format!(
                    "{}<span class=\"ocrx_word\" id=\"word_{}_{}\" title=\"{}; x_wconf {}\">{}</span>\n",
                    indent,
                    self.page_number,
                    counters.word,
                    bbox,
                    node.confidence.round() as i32,
                    xml_escape(&node.text)
                ));
            },
        }
    }

    fn children_to_xml(
        &self,
        store: &TreeStore,
        node: &Node,
        indent_level: usize,
        counters: &mut IdCounters,
        xml: &mut String,
    ) {
        for child in &node.children {
            if let Some(child_node) = store.get(*child) {
                self.node_to_xml(store, child_node, indent_level, counters, xml);
            }
        }
    }
}

/// Format a bounding box as an hOCR `bbox` property with integer pixels.
fn format_bbox(bbox: &Bbox) -> String {
    format!(
        "bbox {} {} {} {}",
        bbox.x0.round() as i32,
        bbox.y0.round() as i32,
        bbox.x1.round() as i32,
        bbox.y1.round() as i32
    )
}

/// Escape special XML characters.
pub(crate) fn xml_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

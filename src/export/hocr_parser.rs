//! hOCR parser implementation.
//!
//! Reads a previously exported (or third-party) hOCR page back into a
//! [`RecognizeResult`], so a saved proofreading session can be resumed with
//! an ordinary `Init` action. Unknown classes and extra markup are skipped;
//! structurally impossible nesting (a word outside a line, a line outside a
//! paragraph) is rejected.

use crate::error::{Error, Result};
use crate::geometry::Bbox;
use crate::recognition::{
    BlockKind, RecognizeResult, RecognizedBlock, RecognizedLine, RecognizedParagraph,
    RecognizedWord,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One page parsed from an hOCR document.
#[derive(Debug, Clone, Default)]
pub struct HocrPage {
    /// Source image reference from the page title, if present
    pub image: Option<String>,
    /// Page bounding box from the page title, if present
    pub bbox: Option<Bbox>,
    /// The recognition hierarchy, ready for tree building
    pub result: RecognizeResult,
}

/// Parse the first page of an hOCR document.
pub fn parse_hocr(xml: &str) -> Result<HocrPage> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut assembler = Assembler::default();
    let mut stack: Vec<OpenElement> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let element = assembler.open(&e)?;
                stack.push(element);
            },
            Event::Empty(e) => {
                // Self-closing elements open and close in one step.
                let element = assembler.open(&e)?;
                assembler.close(element)?;
            },
            Event::Text(e) => {
                // Word text may be wrapped in formatting elements
                // (`<strong>`, `<em>`), so any text while a word is open
                // belongs to that word.
                if assembler.word.is_some() {
                    let text = e.unescape()?;
                    assembler.append_word_text(&text)?;
                }
            },
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    assembler.close(element)?;
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(assembler.page)
}

/// Recognized hOCR element classes, tracked through the open-element stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenElement {
    Page,
    Block,
    Paragraph,
    Line,
    Word,
    Other,
}

/// Builds the page hierarchy from the event stream.
///
/// One slot per nesting level; `close` pops a finished element into its
/// parent's child list.
#[derive(Debug, Default)]
struct Assembler {
    page: HocrPage,
    block: Option<RecognizedBlock>,
    paragraph: Option<RecognizedParagraph>,
    line: Option<RecognizedLine>,
    word: Option<RecognizedWord>,
}

impl Assembler {
    fn open(&mut self, e: &BytesStart) -> Result<OpenElement> {
        let Some(class) = get_attribute(e, "class") else {
            return Ok(OpenElement::Other);
        };
        let props = match get_attribute(e, "title") {
            Some(title) => parse_title(&title)?,
            None => TitleProps::default(),
        };

        let element = match class.as_str() {
            "ocr_page" => {
                self.page.image = props.image;
                self.page.bbox = props.bbox;
                OpenElement::Page
            },
            "ocr_carea" => {
                self.block = Some(RecognizedBlock {
                    bbox: props.bbox,
                    block_type: props.block_type.unwrap_or_default(),
                    ..Default::default()
                });
                OpenElement::Block
            },
            "ocr_par" => {
                self.paragraph = Some(RecognizedParagraph {
                    bbox: props.bbox,
                    ..Default::default()
                });
                OpenElement::Paragraph
            },
            "ocr_line" => {
                self.line = Some(RecognizedLine {
                    bbox: props.bbox,
                    ..Default::default()
                });
                OpenElement::Line
            },
            "ocrx_word" => {
                self.word = Some(RecognizedWord {
                    bbox: props.bbox,
                    confidence: props.wconf.unwrap_or_default(),
                    ..Default::default()
                });
                OpenElement::Word
            },
            _ => OpenElement::Other,
        };
        Ok(element)
    }

    fn close(&mut self, element: OpenElement) -> Result<()> {
        match element {
            OpenElement::Word => {
                let word = self.word.take().ok_or_else(|| unbalanced("ocrx_word"))?;
                self.line
                    .as_mut()
                    .ok_or_else(|| nesting_error("ocrx_word", "ocr_line"))?
                    .words
                    .push(word);
            },
            OpenElement::Line => {
                let line = self.line.take().ok_or_else(|| unbalanced("ocr_line"))?;
                self.paragraph
                    .as_mut()
                    .ok_or_else(|| nesting_error("ocr_line", "ocr_par"))?
                    .lines
                    .push(line);
            },
            OpenElement::Paragraph => {
                let paragraph = self.paragraph.take().ok_or_else(|| unbalanced("ocr_par"))?;
                self.block
                    .as_mut()
                    .ok_or_else(|| nesting_error("ocr_par", "ocr_carea"))?
                    .paragraphs
                    .push(paragraph);
            },
            OpenElement::Block => {
                let block = self.block.take().ok_or_else(|| unbalanced("ocr_carea"))?;
                self.page.result.blocks.push(block);
            },
            OpenElement::Page | OpenElement::Other => {},
        }
        Ok(())
    }

    fn append_word_text(&mut self, text: &str) -> Result<()> {
        let word = self
            .word
            .as_mut()
            .ok_or_else(|| Error::MalformedHocr("text outside an ocrx_word element".into()))?;
        // Chunks split by inline formatting rejoin without a separator.
        word.text.push_str(text);
        Ok(())
    }
}

fn nesting_error(child: &str, parent: &str) -> Error {
    Error::MalformedHocr(format!("{child} element outside {parent}"))
}

fn unbalanced(class: &str) -> Error {
    Error::MalformedHocr(format!("unbalanced {class} element"))
}

/// Title properties this crate understands; unrecognized keys are ignored.
#[derive(Debug, Default)]
struct TitleProps {
    bbox: Option<Bbox>,
    image: Option<String>,
    wconf: Option<f32>,
    block_type: Option<BlockKind>,
}

/// Parse an hOCR `title` attribute: semicolon-separated `key value` pairs.
fn parse_title(title: &str) -> Result<TitleProps> {
    let mut props = TitleProps::default();

    for part in title.split(';') {
        let part = part.trim();
        let Some((key, value)) = part.split_once(char::is_whitespace) else {
            continue;
        };
        let value = value.trim();

        match key {
            "bbox" => {
                let coords: Vec<f32> = value
                    .split_whitespace()
                    .map(str::parse)
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|_| Error::MalformedHocr(format!("bad bbox property: {part}")))?;
                if coords.len() != 4 {
                    return Err(Error::MalformedHocr(format!("bad bbox property: {part}")));
                }
                props.bbox = Some(Bbox::new(coords[0], coords[1], coords[2], coords[3]));
            },
            "image" => props.image = Some(value.trim_matches('"').to_string()),
            "x_wconf" => props.wconf = value.parse().ok(),
            "x_blocktype" => props.block_type = BlockKind::from_name(value),
            _ => {},
        }
    }

    Ok(props)
}

/// Helper to get an attribute value from an XML element.
fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return attr.unescape_value().ok().map(|v| v.into_owned());
        }
    }
    None
}

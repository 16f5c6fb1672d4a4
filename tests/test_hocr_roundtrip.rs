//! Integration tests for hOCR export and re-import.
//!
//! A proofreading session ends in an hOCR file; resuming one starts by
//! parsing that file back into recognizer-result form. These tests drive
//! edit → export → parse → rebuild and check that nothing is lost.

use ocr_oxide::export::{parse_hocr, HocrWriter};
use ocr_oxide::recognition::{BlockKind, RecognizeResult};
use ocr_oxide::{build_tree, Action, Bbox, ElementKind, NodeId, State};
use tempfile::tempdir;

const PAGE_JSON: &str = r#"{
    "blocks": [{
        "bbox": { "x0": 10, "y0": 10, "x1": 410, "y1": 110 },
        "blocktype": "FLOWING_TEXT",
        "paragraphs": [{
            "bbox": { "x0": 20, "y0": 20, "x1": 400, "y1": 100 },
            "lines": [
                { "bbox": { "x0": 20, "y0": 25, "x1": 400, "y1": 55 },
                  "words": [
                    { "bbox": { "x0": 20, "y0": 25, "x1": 90, "y1": 50 }, "text": "Hello", "confidence": 96.0 },
                    { "bbox": { "x0": 100, "y0": 25, "x1": 180, "y1": 50 }, "text": "world", "confidence": 88.0 }
                  ] },
                { "bbox": { "x0": 20, "y0": 60, "x1": 400, "y1": 95 },
                  "words": [
                    { "bbox": { "x0": 20, "y0": 65, "x1": 95, "y1": 90 }, "text": "again", "confidence": 91.0 }
                  ] }
            ]
        }]
    }]
}"#;

fn initial_state() -> State {
    let result = RecognizeResult::from_json(PAGE_JSON).unwrap();
    State::new().apply(Action::Init(result)).unwrap()
}

fn page_writer() -> HocrWriter {
    HocrWriter::new(Bbox::new(0.0, 0.0, 800.0, 600.0)).with_image("scan.png")
}

#[test]
fn test_export_parse_rebuild_preserves_structure() {
    let state = initial_state();
    let xml = page_writer().to_xml(&state.tree);

    let page = parse_hocr(&xml).unwrap();
    assert_eq!(page.image.as_deref(), Some("scan.png"));
    assert_eq!(page.bbox, Some(Bbox::new(0.0, 0.0, 800.0, 600.0)));

    let rebuilt = build_tree(&page.result).unwrap();
    assert_eq!(rebuilt.len(), state.tree.len());

    // Node-for-node: same kinds, texts and boxes in the same document order.
    for (original, round_tripped) in state.tree.iter().zip(rebuilt.iter()) {
        assert_eq!(original.kind, round_tripped.kind);
        assert_eq!(original.text, round_tripped.text);
        assert_eq!(original.bbox, round_tripped.bbox);
    }

    // Block classification survives via the x_blocktype title property.
    let root = rebuilt.get(rebuilt.roots()[0]).unwrap();
    assert_eq!(root.kind, ElementKind::Block(BlockKind::FlowingText));
}

#[test]
fn test_export_reflects_edits() {
    let state = initial_state();
    // Move "world" into the second line, then delete "Hello".
    let state = state
        .apply(Action::Move {
            id: NodeId(4),
            new_parent: Some(NodeId(5)),
            new_index: Some(1),
        })
        .unwrap();
    let state = state.apply(Action::Delete(NodeId(3))).unwrap();

    let xml = page_writer().to_xml(&state.tree);

    assert!(!xml.contains(">Hello</span>"));
    let again = xml.find(">again</span>").unwrap();
    let world = xml.find(">world</span>").unwrap();
    assert!(again < world, "edited word order must survive export");

    // And the re-import sees the edited structure, not the original one.
    let page = parse_hocr(&xml).unwrap();
    let lines = &page.result.blocks[0].paragraphs[0].lines;
    assert_eq!(lines.len(), 2);
    assert!(lines[0].words.is_empty());
    let texts: Vec<&str> = lines[1].words.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["again", "world"]);
    // The moved word is exported at its post-move position: (100, 25) plus
    // the (0, 35) delta between the two lines' origins.
    assert_eq!(lines[1].words[1].bbox, Some(Bbox::new(100.0, 60.0, 180.0, 85.0)));
}

#[test]
fn test_export_rounds_fractional_geometry() {
    let mut state = initial_state();
    // Nudge a word to a fractional position.
    state = state
        .apply(Action::Reposition {
            id: NodeId(6),
            x: 0.4,
            y: 5.6,
            width: None,
            height: None,
        })
        .unwrap();

    let xml = page_writer().to_xml(&state.tree);
    let page = parse_hocr(&xml).unwrap();

    // Original offset (0, 5), bbox (20, 65): delta (0.4, 0.6) lands the box
    // at (20.4, 65.6), exported as integers.
    let word = &page.result.blocks[0].paragraphs[0].lines[1].words[0];
    assert_eq!(word.bbox, Some(Bbox::new(20.0, 66.0, 95.0, 91.0)));
}

#[test]
fn test_write_to_file() {
    let state = initial_state();
    let temp_dir = tempdir().unwrap();
    let output_path = temp_dir.path().join("page.hocr");

    page_writer().write_to_file(&output_path, &state.tree).unwrap();

    assert!(output_path.exists());
    let content = std::fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("<div class=\"ocr_page\""));
    assert!(content.contains("x_wconf 96"));
}

#[test]
fn test_foreign_hocr_without_extensions_still_imports() {
    // Output of another engine: no x_blocktype, extra title properties.
    let xml = r#"<div class="ocr_page" title="bbox 0 0 100 100">
        <div class="ocr_carea" title="bbox 0 0 100 50">
          <p class="ocr_par" title="bbox 0 0 100 50">
            <span class="ocr_line" title="bbox 0 0 100 20; baseline 0.01 -4">
              <span class="ocrx_word" title="bbox 0 0 40 20; x_wconf 73">ink</span>
            </span>
          </p>
        </div>
    </div>"#;

    let page = parse_hocr(xml).unwrap();
    let block = &page.result.blocks[0];
    assert_eq!(block.block_type, BlockKind::Unknown);
    assert_eq!(block.paragraphs[0].lines[0].words[0].text, "ink");
    assert_eq!(block.paragraphs[0].lines[0].words[0].confidence, 73.0);
}

//! Pipeline boundary tests.
//!
//! Fixtures live in `test_fixtures/<name>/` as an `input.txt` and the
//! `expected.html` the standard parser must produce for it, byte for byte.
//! On top of the fixtures, property tests pin down the invariants that hold
//! for any input: splitting, one claim per block, balanced lists, a single
//! title.

use std::path::PathBuf;
use textmarkup_core::{
    blocks_from_str, markup_to_html, MarkupConfig, MarkupEvent, ParseStages, Parser, Recorder,
    Region,
};

// ============================================================================
// Fixture helpers
// ============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_fixtures")
}

fn load_fixture(fixture_name: &str, file: &str) -> String {
    let path = fixtures_dir().join(fixture_name).join(file);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Missing fixture: {}", path.display()))
}

fn capture(text: &str) -> ParseStages {
    let mut parser: Parser<Recorder> = Parser::standard(&MarkupConfig::default())
        .unwrap()
        .with_handler(Recorder::default());
    parser.parse_capture_stages(text.as_bytes()).unwrap()
}

/// Tag names in document order, `/name` for closing tags
fn tag_sequence(html: &str) -> Vec<String> {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(html);
    let mut tags = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                tags.push(String::from_utf8_lossy(e.name().as_ref()).into_owned())
            }
            Ok(Event::End(e)) => {
                tags.push(format!("/{}", String::from_utf8_lossy(e.name().as_ref())))
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("Malformed HTML at {}: {e}", reader.buffer_position()),
        }
    }
    tags
}

// ============================================================================
// Fixture output: byte-for-byte HTML
// ============================================================================

mod fixtures {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_fixture(fixture_name: &str) {
        let input = load_fixture(fixture_name, "input.txt");
        let expected = load_fixture(fixture_name, "expected.html");
        let html = markup_to_html(&input, &MarkupConfig::default()).unwrap();
        assert_eq!(html, expected, "HTML drift for fixture {fixture_name}");
    }

    #[test]
    fn scenario_html_stable() {
        assert_fixture("scenario");
    }

    #[test]
    fn release_notes_html_stable() {
        assert_fixture("release_notes");
    }

    #[test]
    fn trailing_list_is_closed() {
        assert_fixture("trailing_list");
    }
}

// ============================================================================
// Stage capture
// ============================================================================

mod stages {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scenario_stage_boundaries() {
        let stages = capture(&load_fixture("scenario", "input.txt"));

        assert_eq!(stages.block_count(), 5);
        assert_eq!(stages.blocks[3], "-item one\n-item two");
        assert_eq!(
            stages.filtered_blocks[2],
            "<a href=\"http://example.com/a?b=c\">http://example.com/a?b=c</a>"
        );
        assert_eq!(
            stages.classifications,
            vec![
                Region::Title,
                Region::Paragraph,
                Region::Heading,
                Region::ListItem,
                Region::Heading
            ]
        );
    }

    #[test]
    fn release_notes_lists_and_substitutions() {
        let stages = capture(&load_fixture("release_notes", "input.txt"));

        let list_items = stages
            .classifications
            .iter()
            .filter(|region| **region == Region::ListItem)
            .count();
        assert_eq!(list_items, 4);

        let lists_opened = stages
            .events
            .iter()
            .filter(|event| **event == MarkupEvent::start(Region::UList))
            .count();
        assert_eq!(lists_opened, 2);

        let substitutions = stages
            .events
            .iter()
            .filter(|event| matches!(event, MarkupEvent::Substitute { .. }))
            .count();
        // two emphasis, one url, two mail
        assert_eq!(substitutions, 5);
    }

    #[test]
    fn stages_serialize_for_dumps() {
        let stages = capture("Title\n\n-a");
        let json = serde_json::to_value(&stages).unwrap();
        assert_eq!(json["classifications"], serde_json::json!(["title", "listitem"]));
        assert_eq!(
            json["events"][0],
            serde_json::json!({"event": "start", "region": "document"})
        );
    }
}

// ============================================================================
// HTML structure
// ============================================================================

mod html_structure {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixtures_are_well_formed() {
        for fixture_name in ["scenario", "release_notes", "trailing_list"] {
            let input = load_fixture(fixture_name, "input.txt");
            let html = markup_to_html(&input, &MarkupConfig::default()).unwrap();
            let tags = tag_sequence(&html);

            assert_eq!(tags.first().map(String::as_str), Some("html"));
            assert_eq!(tags.last().map(String::as_str), Some("/html"));

            let mut stack: Vec<&str> = Vec::new();
            for tag in &tags {
                match tag.strip_prefix('/') {
                    Some(name) => assert_eq!(stack.pop(), Some(name), "in {fixture_name}"),
                    None => stack.push(tag),
                }
            }
            assert!(stack.is_empty(), "unclosed tags in {fixture_name}: {stack:?}");
        }
    }

    #[test]
    fn list_items_only_inside_lists() {
        let input = load_fixture("release_notes", "input.txt");
        let html = markup_to_html(&input, &MarkupConfig::default()).unwrap();
        let mut in_list = false;
        for tag in tag_sequence(&html) {
            match tag.as_str() {
                "ul" => in_list = true,
                "/ul" => in_list = false,
                "li" => assert!(in_list),
                _ => {}
            }
        }
    }
}

// ============================================================================
// Properties over arbitrary text
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn document() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z*:. -]{0,12}|-[a-z ]{0,8}", 0..30)
            .prop_map(|lines| lines.join("\n"))
    }

    fn expected_block_count(text: &str) -> usize {
        let mut count = 0;
        let mut in_block = false;
        for line in text.lines() {
            let blank = line.trim().is_empty();
            if !blank && !in_block {
                count += 1;
            }
            in_block = !blank;
        }
        count
    }

    proptest! {
        #[test]
        fn blocks_are_trimmed_runs_of_lines(text in document()) {
            let blocks: Vec<String> = blocks_from_str(&text).map(|b| b.unwrap()).collect();
            prop_assert_eq!(blocks.len(), expected_block_count(&text));
            for block in &blocks {
                prop_assert!(!block.is_empty());
                prop_assert_eq!(block.trim(), block.as_str());
                prop_assert!(block.lines().all(|line| !line.trim().is_empty()));
            }
        }

        #[test]
        fn every_block_claimed_exactly_once(text in document()) {
            let stages = capture(&text);
            prop_assert_eq!(stages.classifications.len(), stages.blocks.len());
            for (region, block) in stages.classifications.iter().zip(&stages.filtered_blocks) {
                prop_assert!(matches!(
                    region,
                    Region::Title | Region::Heading | Region::ListItem | Region::Paragraph
                ));
                prop_assert_eq!(*region == Region::ListItem, block.starts_with('-'));
            }
        }

        #[test]
        fn lists_are_balanced_and_flat(text in document()) {
            let stages = capture(&text);
            let mut depth = 0i32;
            for event in &stages.events {
                match event {
                    MarkupEvent::Start { region: Region::UList } => depth += 1,
                    MarkupEvent::End { region: Region::UList } => depth -= 1,
                    MarkupEvent::Start { region: Region::ListItem } => {
                        prop_assert_eq!(depth, 1);
                    }
                    _ => {}
                }
                prop_assert!((0..=1).contains(&depth));
            }
            prop_assert_eq!(depth, 0);
        }

        #[test]
        fn title_at_most_once_after_list_items(text in document()) {
            let stages = capture(&text);
            let titles: Vec<usize> = stages
                .classifications
                .iter()
                .enumerate()
                .filter(|(_, region)| **region == Region::Title)
                .map(|(index, _)| index)
                .collect();
            prop_assert!(titles.len() <= 1);
            if let Some(&title) = titles.first() {
                prop_assert!(stages.classifications[..title]
                    .iter()
                    .all(|region| *region == Region::ListItem));
            }
        }

        #[test]
        fn document_wraps_everything(text in document()) {
            let stages = capture(&text);
            prop_assert_eq!(stages.events.first(), Some(&MarkupEvent::start(Region::Document)));
            prop_assert_eq!(stages.events.last(), Some(&MarkupEvent::end(Region::Document)));
            let documents = stages
                .events
                .iter()
                .filter(|event| matches!(event, MarkupEvent::Start { region: Region::Document }))
                .count();
            prop_assert_eq!(documents, 1);
        }
    }
}

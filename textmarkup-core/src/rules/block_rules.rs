use super::engine::{emit_region, Claim, ClassifierState, Rule};
use super::list_detection::is_list_item;
use crate::error::Result;
use crate::handlers::Handler;
use crate::types::Region;

/// Single line, at most `max_chars` characters, no trailing colon.
pub fn has_heading_shape(block: &str, max_chars: usize) -> bool {
    !block.contains('\n') && block.chars().count() <= max_chars && !block.ends_with(':')
}

/// The first block the rule is asked about, when it is heading-shaped.
///
/// Only one block ever gets that chance: list items claimed earlier in the
/// rule order never reach it, everything else does.
#[derive(Debug, Clone)]
pub struct TitleRule {
    max_chars: usize,
}

impl TitleRule {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Rule for TitleRule {
    fn region(&self) -> Region {
        Region::Title
    }

    fn name(&self) -> &str {
        "title"
    }

    fn matches(&self, block: &str, state: &ClassifierState) -> bool {
        state.first_block && has_heading_shape(block, self.max_chars)
    }

    fn evaluated(&self, state: &mut ClassifierState) {
        state.first_block = false;
    }
}

#[derive(Debug, Clone)]
pub struct HeadingRule {
    max_chars: usize,
}

impl HeadingRule {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Rule for HeadingRule {
    fn region(&self) -> Region {
        Region::Heading
    }

    fn name(&self) -> &str {
        "heading"
    }

    fn matches(&self, block: &str, _state: &ClassifierState) -> bool {
        has_heading_shape(block, self.max_chars)
    }
}

/// A block starting with `-`. The marker is dropped and the rest trimmed;
/// further lines stay part of the same item.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListItemRule;

impl Rule for ListItemRule {
    fn region(&self) -> Region {
        Region::ListItem
    }

    fn name(&self) -> &str {
        "listitem"
    }

    fn matches(&self, block: &str, _state: &ClassifierState) -> bool {
        is_list_item(block)
    }

    fn apply(
        &self,
        block: &str,
        _state: &mut ClassifierState,
        handler: &mut dyn Handler,
    ) -> Result<Claim> {
        let item = block.strip_prefix('-').unwrap_or(block).trim();
        emit_region(Region::ListItem, item, handler)
    }
}

/// Catch-all
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphRule;

impl Rule for ParagraphRule {
    fn region(&self) -> Region {
        Region::Paragraph
    }

    fn name(&self) -> &str {
        "paragraph"
    }

    fn matches(&self, _block: &str, _state: &ClassifierState) -> bool {
        true
    }

    fn is_catch_all(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Recorder;
    use crate::types::MarkupEvent;
    use rstest::rstest;

    #[rstest]
    #[case("Title", true)]
    #[case("end.", true)]
    #[case("", true)]
    #[case("Intro heading:", false)]
    #[case("two\nlines", false)]
    fn test_heading_shape(#[case] block: &str, #[case] expected: bool) {
        assert_eq!(has_heading_shape(block, 70), expected);
    }

    #[test]
    fn test_heading_length_limit() {
        assert!(has_heading_shape(&"x".repeat(70), 70));
        assert!(!has_heading_shape(&"x".repeat(71), 70));
        // Length counts characters, not bytes
        assert!(has_heading_shape(&"é".repeat(70), 70));
    }

    #[test]
    fn test_title_needs_first_block() {
        let rule = TitleRule::new(70);
        let mut state = ClassifierState::default();
        assert!(rule.matches("Title", &state));
        rule.evaluated(&mut state);
        assert!(!state.first_block);
        assert!(!rule.matches("Title", &state));
    }

    #[test]
    fn test_other_rules_leave_title_flag_alone() {
        let mut state = ClassifierState::default();
        ListItemRule.evaluated(&mut state);
        HeadingRule::new(70).evaluated(&mut state);
        ParagraphRule.evaluated(&mut state);
        assert!(state.first_block);
    }

    #[test]
    fn test_custom_heading_length() {
        let rule = HeadingRule::new(5);
        let state = ClassifierState::default();
        assert!(rule.matches("short", &state));
        assert!(!rule.matches("longer", &state));
    }

    #[test]
    fn test_list_item_strips_marker() {
        let mut recorder: Recorder = Recorder::default();
        let mut state = ClassifierState::default();
        let claim = ListItemRule
            .apply("-  item one\n-item two", &mut state, &mut recorder)
            .unwrap();
        assert_eq!(claim, Claim::Claimed);
        assert_eq!(
            recorder.into_events(),
            vec![
                MarkupEvent::start(Region::ListItem),
                MarkupEvent::feed("item one\n-item two"),
                MarkupEvent::end(Region::ListItem),
            ]
        );
    }

    #[test]
    fn test_paragraph_matches_anything() {
        let state = ClassifierState::default();
        assert!(ParagraphRule.matches("", &state));
        assert!(ParagraphRule.matches("a\nb:", &state));
        assert!(ParagraphRule.is_catch_all());
        assert!(!HeadingRule::new(70).is_catch_all());
    }
}

use super::engine::{Claim, ClassifierState, Rule};
use crate::error::Result;
use crate::handlers::Handler;
use crate::types::Region;

/// Entry criterion shared by the list rules so they can never disagree.
pub fn is_list_item(block: &str) -> bool {
    block.starts_with('-')
}

/// Brackets runs of list-item blocks with ulist start/end events.
///
/// Observes every block without claiming any: it opens the list before the
/// first item of a run and closes it before the first non-item block after
/// it. A list still open at the end of input is closed by `finish`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnorderedListRule;

impl Rule for UnorderedListRule {
    fn region(&self) -> Region {
        Region::UList
    }

    fn name(&self) -> &str {
        "ulist"
    }

    fn matches(&self, _block: &str, _state: &ClassifierState) -> bool {
        true
    }

    fn apply(
        &self,
        block: &str,
        state: &mut ClassifierState,
        handler: &mut dyn Handler,
    ) -> Result<Claim> {
        let item = is_list_item(block);
        if item && !state.inside_list {
            handler.start(Region::UList)?;
            state.inside_list = true;
        } else if !item && state.inside_list {
            handler.end(Region::UList)?;
            state.inside_list = false;
        }
        Ok(Claim::Continue)
    }

    fn finish(&self, state: &mut ClassifierState, handler: &mut dyn Handler) -> Result<()> {
        if state.inside_list {
            state.inside_list = false;
            handler.end(Region::UList)?;
        }
        Ok(())
    }
}

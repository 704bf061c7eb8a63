//! Input preprocessing
//!
//! This module turns raw text into the unit the rest of the pipeline works on:
//! the block.
//!
//! ## Architecture
//!
//! ```text
//! Text source (stdin, file, &str)
//!     ↓
//! [Blocks splitter]
//!     ↓
//! Block (trimmed, non-empty)
//!     ↓
//! [FilterChain] → [RuleSet] → Handler
//! ```

pub mod blocks;

pub use blocks::{blocks, blocks_from_str, Blocks};

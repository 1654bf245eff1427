//! Value refinement for WML.
//!
//! The grammar keeps key values as flat token runs. This crate turns a parsed
//! key back into text and recognises the specialised value shapes WML uses:
//! compass directions, comma lists, animation progressions and image paths.

pub mod error;
pub mod key_text;
pub mod refine;

pub use error::ValueError;
pub use key_text::{textdomain_at, KeyText};
pub use refine::{
    classify, parse_directions, parse_list, parse_path, parse_progressive, Direction, ImageFunction,
    ImagePath, ProgressiveSegment, RefinedValue,
};

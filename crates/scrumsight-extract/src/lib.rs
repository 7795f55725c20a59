//! Scrumsight Extract — text normalization, section segmentation, and
//! rule-driven field recovery.
//!
//! Nothing here is fatal except outright text-extraction failure: a missing
//! section or a non-matching field falls back and is reported, never raised.

pub mod fields;
pub mod normalize;
pub mod players;
pub mod rules;
pub mod sections;

pub use fields::{extract_fields, extract_sided, ExtractedField, SectionExtraction, SidedExtraction};
pub use normalize::{normalize, NormalizedText};
pub use players::{scan_player_rows, PlayerRow};
pub use rules::{FieldKind, FieldRule, FieldValue};
pub use sections::{segment, split_attack_defence, Section, SectionName};

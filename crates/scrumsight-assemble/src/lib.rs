//! Scrumsight Assemble — builds team and player records from section
//! extractions and summarizes extraction quality.

pub mod confidence;
pub mod players;
pub mod team;

pub use confidence::{confidence_score, SectionStat};
pub use players::assemble_players;
pub use team::{assemble_team, SectionData, TeamContext};

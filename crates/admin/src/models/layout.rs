//! Store layout domain types.

use curbside_core::SectionId;

/// A storefront layout section, e.g. "Featured" or "New Arrivals".
///
/// Sections are ordered by `position`; positions are kept contiguous
/// starting at zero by the repository.
#[derive(Debug, Clone)]
pub struct LayoutSection {
    /// Unique section ID.
    pub id: SectionId,
    /// Display name.
    pub name: String,
    /// Zero-based position within the layout.
    pub position: i32,
    /// Whether the section is shown to shoppers.
    pub enabled: bool,
}

/// Direction for reordering a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl std::str::FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(format!("invalid move direction: {s}")),
        }
    }
}

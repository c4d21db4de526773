use serde::{Deserialize, Serialize};

// ── Sentinel values ────────────────────────────────────────────────
//
// These show up verbatim in the exported CSV, so they are named once
// here rather than compared as loose literals around the codebase.

/// Characters column when the info line carries no comma-separated names.
pub const UNKNOWN_CHARACTERS: &str = "Unknown";

/// Post Change column when the ship line carries no trailing delta marker.
pub const NO_CHANGE: &str = "0";

/// Fandom Category for any fandom absent from the category table.
pub const OTHER_CATEGORY: &str = "Other";

/// Separator inside a multi-valued category tag, e.g. "Books/TV".
pub const CATEGORY_SEPARATOR: char = '/';

// ── Rank movement since the previous year's list ───────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeDirection {
    Up,
    Down,
    /// No delta marker on the ship line: either a new entry or no movement.
    #[serde(rename = "New / No Change")]
    NewOrNoChange,
    /// Sign character matched neither `+` nor a minus variant. The delta
    /// regex only admits those signs, so this stays unexercised.
    Unknown,
}

impl ChangeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::NewOrNoChange => "New / No Change",
            Self::Unknown => "Unknown",
        }
    }
}

// ── One ranked ship within one year's list ─────────────────────────
//
// Field order matches the CSV column order exactly:
//   Year, Rank, Ship Name, Characters, Fandom, Fandom Category,
//   Post Change, Change Direction

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipRecord {
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "Ship Name")]
    pub ship_name: String,
    #[serde(rename = "Characters")]
    pub characters: String,
    /// Free-text fandom label, the final comma segment of the info line.
    #[serde(rename = "Fandom")]
    pub fandom: String,
    /// Coarse media tag from the category table; may be multi-valued
    /// ("Books/TV") until expanded.
    #[serde(rename = "Fandom Category")]
    pub fandom_category: String,
    /// Raw signed magnitude text, preserved verbatim (unicode minus kept).
    #[serde(rename = "Post Change")]
    pub post_change: String,
    #[serde(rename = "Change Direction")]
    pub change_direction: ChangeDirection,
}

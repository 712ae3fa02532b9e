//! The fixed compass table.

use std::fmt;

/// A canonical movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// North.
    Norden,
    /// South.
    Sueden,
    /// East.
    Osten,
    /// West.
    Westen,
    /// Up.
    Oben,
    /// Down.
    Unten,
}

impl Direction {
    /// All directions in display order.
    pub const ALL: [Direction; 6] = [
        Self::Norden,
        Self::Sueden,
        Self::Osten,
        Self::Westen,
        Self::Oben,
        Self::Unten,
    ];

    /// Parse a direction or one of its synonyms.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "n" | "nord" | "norden" => Some(Self::Norden),
            "s" | "süd" | "süden" | "sued" | "sueden" => Some(Self::Sueden),
            "o" | "ost" | "osten" => Some(Self::Osten),
            "w" | "west" | "westen" => Some(Self::Westen),
            "hoch" | "rauf" | "oben" => Some(Self::Oben),
            "runter" | "hinab" | "unten" => Some(Self::Unten),
            _ => None,
        }
    }

    /// The canonical name exits are keyed by.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Norden => "norden",
            Self::Sueden => "süden",
            Self::Osten => "osten",
            Self::Westen => "westen",
            Self::Oben => "oben",
            Self::Unten => "unten",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

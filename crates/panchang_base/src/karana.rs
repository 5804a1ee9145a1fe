//! Karana (half-tithi) table.
//!
//! A synodic month holds 60 karanas. Slot 1 is the fixed Kimstughna, slots
//! 2-57 cycle through the seven movable karanas eight times, and slots
//! 58-60 are the fixed Shakuni, Chatushpada and Naga.

use serde::{Deserialize, Serialize};

/// Whether a karana recurs through the month or occupies a fixed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KaranaClass {
    Fixed,
    Movable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Karana {
    Bava,
    Balava,
    Kaulava,
    Taitila,
    Garaja,
    Vanija,
    Vishti,
    Shakuni,
    Chatushpada,
    Naga,
    Kimstughna,
}

const MOVABLE: [Karana; 7] = [
    Karana::Bava,
    Karana::Balava,
    Karana::Kaulava,
    Karana::Taitila,
    Karana::Garaja,
    Karana::Vanija,
    Karana::Vishti,
];

impl Karana {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bava => "Bava",
            Self::Balava => "Balava",
            Self::Kaulava => "Kaulava",
            Self::Taitila => "Taitila",
            Self::Garaja => "Garaja",
            Self::Vanija => "Vanija",
            Self::Vishti => "Vishti",
            Self::Shakuni => "Shakuni",
            Self::Chatushpada => "Chatushpada",
            Self::Naga => "Naga",
            Self::Kimstughna => "Kimstughna",
        }
    }

    pub const fn class(self) -> KaranaClass {
        match self {
            Self::Shakuni | Self::Chatushpada | Self::Naga | Self::Kimstughna => {
                KaranaClass::Fixed
            }
            _ => KaranaClass::Movable,
        }
    }

    /// Karana occupying a 1-based slot of the month (1..=60).
    ///
    /// Returns `None` (with a warning) for slots outside the month.
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Self::Kimstughna),
            2..=57 => Some(MOVABLE[((slot - 2) % 7) as usize]),
            58 => Some(Self::Shakuni),
            59 => Some(Self::Chatushpada),
            60 => Some(Self::Naga),
            _ => {
                log::warn!("unmapped karana slot {slot}");
                None
            }
        }
    }
}

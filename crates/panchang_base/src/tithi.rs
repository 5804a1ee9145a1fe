//! Tithi (lunar day) and Paksha (fortnight) tables.
//!
//! A synodic month holds 30 tithis of 12 deg Moon-Sun elongation each.
//! Tithis 1-15 form the Shukla (waxing) paksha ending at Purnima;
//! tithis 16-30 form the Krishna (waning) paksha ending at Amavasya.

use serde::{Deserialize, Serialize};

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paksha {
    /// Waxing half, new moon to full moon.
    Shukla,
    /// Waning half, full moon to new moon.
    Krishna,
}

impl Paksha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }

    pub const fn is_waxing(self) -> bool {
        matches!(self, Self::Shukla)
    }
}

/// The 30 tithis of a synodic month, in order from the new moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Tithi {
    ShuklaPratipada,
    ShuklaDwitiya,
    ShuklaTritiya,
    ShuklaChaturthi,
    ShuklaPanchami,
    ShuklaShashthi,
    ShuklaSaptami,
    ShuklaAshtami,
    ShuklaNavami,
    ShuklaDashami,
    ShuklaEkadashi,
    ShuklaDwadashi,
    ShuklaTrayodashi,
    ShuklaChaturdashi,
    Purnima,
    KrishnaPratipada,
    KrishnaDwitiya,
    KrishnaTritiya,
    KrishnaChaturthi,
    KrishnaPanchami,
    KrishnaShashthi,
    KrishnaSaptami,
    KrishnaAshtami,
    KrishnaNavami,
    KrishnaDashami,
    KrishnaEkadashi,
    KrishnaDwadashi,
    KrishnaTrayodashi,
    KrishnaChaturdashi,
    Amavasya,
}

/// All 30 tithis in order (index 0 = Shukla Pratipada).
pub const ALL_TITHIS: [Tithi; 30] = [
    Tithi::ShuklaPratipada,
    Tithi::ShuklaDwitiya,
    Tithi::ShuklaTritiya,
    Tithi::ShuklaChaturthi,
    Tithi::ShuklaPanchami,
    Tithi::ShuklaShashthi,
    Tithi::ShuklaSaptami,
    Tithi::ShuklaAshtami,
    Tithi::ShuklaNavami,
    Tithi::ShuklaDashami,
    Tithi::ShuklaEkadashi,
    Tithi::ShuklaDwadashi,
    Tithi::ShuklaTrayodashi,
    Tithi::ShuklaChaturdashi,
    Tithi::Purnima,
    Tithi::KrishnaPratipada,
    Tithi::KrishnaDwitiya,
    Tithi::KrishnaTritiya,
    Tithi::KrishnaChaturthi,
    Tithi::KrishnaPanchami,
    Tithi::KrishnaShashthi,
    Tithi::KrishnaSaptami,
    Tithi::KrishnaAshtami,
    Tithi::KrishnaNavami,
    Tithi::KrishnaDashami,
    Tithi::KrishnaEkadashi,
    Tithi::KrishnaDwadashi,
    Tithi::KrishnaTrayodashi,
    Tithi::KrishnaChaturdashi,
    Tithi::Amavasya,
];

/// Day names within a paksha; the 15th differs between halves.
const PAKSHA_DAY_NAMES: [&str; 14] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
];

impl Tithi {
    /// 1-based number within the month (1..=30).
    pub fn number(self) -> u8 {
        // ALL_TITHIS is in declaration order.
        self as u8 + 1
    }

    /// Tithi for a 1-based number, `None` (with a warning) when out of range.
    pub fn from_number(number: u8) -> Option<Self> {
        if (1..=30).contains(&number) {
            Some(ALL_TITHIS[(number - 1) as usize])
        } else {
            log::warn!("unmapped tithi number {number}");
            None
        }
    }

    pub fn paksha(self) -> Paksha {
        if self.number() <= 15 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        }
    }

    /// 1-based day within the paksha (1..=15).
    pub fn day_in_paksha(self) -> u8 {
        (self.number() - 1) % 15 + 1
    }

    /// Traditional name without the paksha prefix.
    pub fn name(self) -> &'static str {
        match self {
            Self::Purnima => "Purnima",
            Self::Amavasya => "Amavasya",
            other => PAKSHA_DAY_NAMES[(other.day_in_paksha() - 1) as usize],
        }
    }

    /// Name qualified by paksha, e.g. "Shukla Ekadashi".
    pub fn full_name(self) -> String {
        match self {
            Self::Purnima | Self::Amavasya => self.name().to_string(),
            other => format!("{} {}", other.paksha().name(), other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_follows_declaration_order() {
        for (i, t) in ALL_TITHIS.iter().enumerate() {
            assert_eq!(t.number() as usize, i + 1);
        }
    }

    #[test]
    fn purnima_and_amavasya() {
        assert_eq!(Tithi::from_number(15), Some(Tithi::Purnima));
        assert_eq!(Tithi::from_number(30), Some(Tithi::Amavasya));
        assert_eq!(Tithi::Purnima.paksha(), Paksha::Shukla);
        assert_eq!(Tithi::Amavasya.paksha(), Paksha::Krishna);
    }

    #[test]
    fn krishna_days_restart() {
        let t = Tithi::from_number(26).unwrap();
        assert_eq!(t, Tithi::KrishnaEkadashi);
        assert_eq!(t.day_in_paksha(), 11);
        assert_eq!(t.name(), "Ekadashi");
        assert_eq!(t.full_name(), "Krishna Ekadashi");
    }

    #[test]
    fn out_of_range_is_none() {
        assert_eq!(Tithi::from_number(0), None);
        assert_eq!(Tithi::from_number(31), None);
    }
}

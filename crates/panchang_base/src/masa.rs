//! Masa (lunar month) names and month-numbering arithmetic.
//!
//! Lunar months are named from the Sun's sidereal position at the full moon
//! that governs them. The mean full moon of Chaitra falls with the Sun near
//! sidereal 0 deg, the full moon of Vaishakha near 30 deg, and so on, so the
//! month sign is measured with its boundary half a sign (15 deg) earlier than
//! the zodiacal one.

use panchang_math::normalize_360;
use serde::{Deserialize, Serialize};

/// Offset between zodiac-sign boundaries and full-moon month boundaries.
pub const FULL_MOON_SIGN_OFFSET_DEG: f64 = 15.0;

/// The 12 lunar months starting from Chaitra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Masa {
    Chaitra,
    Vaishakha,
    Jyeshtha,
    Ashadha,
    Shravana,
    Bhadrapada,
    Ashvina,
    Kartika,
    Margashirsha,
    Pausha,
    Magha,
    Phalguna,
}

pub const ALL_MASAS: [Masa; 12] = [
    Masa::Chaitra,
    Masa::Vaishakha,
    Masa::Jyeshtha,
    Masa::Ashadha,
    Masa::Shravana,
    Masa::Bhadrapada,
    Masa::Ashvina,
    Masa::Kartika,
    Masa::Margashirsha,
    Masa::Pausha,
    Masa::Magha,
    Masa::Phalguna,
];

impl Masa {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chaitra => "Chaitra",
            Self::Vaishakha => "Vaishakha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Ashadha => "Ashadha",
            Self::Shravana => "Shravana",
            Self::Bhadrapada => "Bhadrapada",
            Self::Ashvina => "Ashvina",
            Self::Kartika => "Kartika",
            Self::Margashirsha => "Margashirsha",
            Self::Pausha => "Pausha",
            Self::Magha => "Magha",
            Self::Phalguna => "Phalguna",
        }
    }

    /// 0-based index (Chaitra=0 .. Phalguna=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Self {
        ALL_MASAS[(index % 12) as usize]
    }

    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Parse a month name, accepting common transliterations.
    ///
    /// Unknown names resolve to `None` with a warning.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = name.trim().to_ascii_lowercase();
        let masa = match key.as_str() {
            "chaitra" | "chaitr" => Self::Chaitra,
            "vaishakha" | "vaishakh" | "baisakh" => Self::Vaishakha,
            "jyeshtha" | "jyaishtha" | "jeth" => Self::Jyeshtha,
            "ashadha" | "aashaadha" | "ashadh" => Self::Ashadha,
            "shravana" | "sravana" | "shravan" | "sawan" => Self::Shravana,
            "bhadrapada" | "bhadra" | "bhadrapad" | "bhado" => Self::Bhadrapada,
            "ashvina" | "ashwin" | "ashwina" | "asvina" => Self::Ashvina,
            "kartika" | "kartik" => Self::Kartika,
            "margashirsha" | "margashirsh" | "agrahayana" => Self::Margashirsha,
            "pausha" | "paush" | "pushya" => Self::Pausha,
            "magha" | "magh" => Self::Magha,
            "phalguna" | "phalgun" => Self::Phalguna,
            _ => {
                log::warn!("unknown masa name {name:?}");
                return None;
            }
        };
        Some(masa)
    }
}

/// How days are counted within a lunar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MonthNumbering {
    /// Month ends at the full moon; the waning half comes first.
    #[default]
    Purnimanta,
    /// Month ends at the new moon; the waxing half comes first.
    Amanta,
}

impl MonthNumbering {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Purnimanta => "Purnimanta",
            Self::Amanta => "Amanta",
        }
    }
}

/// Masa whose full moon has the Sun at `sun_sidereal_lon_deg`.
pub fn masa_from_full_moon_sun(sun_sidereal_lon_deg: f64) -> Masa {
    let shifted = normalize_360(sun_sidereal_lon_deg + FULL_MOON_SIGN_OFFSET_DEG);
    Masa::from_index(((shifted / 30.0).floor() as u8).min(11))
}

/// Continuous 1-30 day number of a tithi within its month.
///
/// Purnimanta months begin after the full moon, so the waning tithis
/// (16-30) count as days 1-15 and the waxing ones as days 16-30.
pub fn day_in_month(tithi_number: u8, numbering: MonthNumbering) -> u8 {
    match numbering {
        MonthNumbering::Amanta => tithi_number,
        MonthNumbering::Purnimanta => {
            if tithi_number <= 15 {
                tithi_number + 15
            } else {
                tithi_number - 15
            }
        }
    }
}

//! Vaar (weekday) and the weekday-indexed inauspicious periods.
//!
//! Rahu Kalam, Yamaganda and Gulika Kalam each occupy one eighth of the
//! daytime (sunrise to sunset). Which eighth depends only on the weekday.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vaar {
    Ravivara,
    Somavara,
    Mangalavara,
    Budhavara,
    Guruvara,
    Shukravara,
    Shanivara,
}

pub const ALL_VAARS: [Vaar; 7] = [
    Vaar::Ravivara,
    Vaar::Somavara,
    Vaar::Mangalavara,
    Vaar::Budhavara,
    Vaar::Guruvara,
    Vaar::Shukravara,
    Vaar::Shanivara,
];

impl Vaar {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ravivara => "Ravivara",
            Self::Somavara => "Somavara",
            Self::Mangalavara => "Mangalavara",
            Self::Budhavara => "Budhavara",
            Self::Guruvara => "Guruvara",
            Self::Shukravara => "Shukravara",
            Self::Shanivara => "Shanivara",
        }
    }

    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Ravivara => "Sunday",
            Self::Somavara => "Monday",
            Self::Mangalavara => "Tuesday",
            Self::Budhavara => "Wednesday",
            Self::Guruvara => "Thursday",
            Self::Shukravara => "Friday",
            Self::Shanivara => "Saturday",
        }
    }

    /// Days since Sunday (Ravivara=0 .. Shanivara=6).
    pub const fn days_from_sunday(self) -> u8 {
        self as u8
    }

    /// Weekday from days since Sunday, wrapping modulo 7.
    pub const fn from_days_from_sunday(days: u32) -> Self {
        ALL_VAARS[(days % 7) as usize]
    }
}

/// The weekday-fixed inauspicious windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kalam {
    Rahu,
    Yamaganda,
    Gulika,
}

// 1-based eighth of the daytime, Sunday first.
const RAHU_EIGHTH: [u8; 7] = [8, 2, 7, 5, 6, 4, 3];
const YAMAGANDA_EIGHTH: [u8; 7] = [5, 4, 3, 2, 1, 7, 6];
const GULIKA_EIGHTH: [u8; 7] = [7, 6, 5, 4, 3, 2, 1];

impl Kalam {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rahu => "Rahu Kalam",
            Self::Yamaganda => "Yamaganda",
            Self::Gulika => "Gulika Kalam",
        }
    }

    /// 1-based eighth of the daytime this window occupies on `vaar`.
    pub const fn eighth(self, vaar: Vaar) -> u8 {
        let day = vaar.days_from_sunday() as usize;
        match self {
            Self::Rahu => RAHU_EIGHTH[day],
            Self::Yamaganda => YAMAGANDA_EIGHTH[day],
            Self::Gulika => GULIKA_EIGHTH[day],
        }
    }

    /// Window as fractions of the daytime span, `(start, end)` in [0, 1].
    pub fn day_fractions(self, vaar: Vaar) -> (f64, f64) {
        let e = self.eighth(vaar) as f64;
        ((e - 1.0) / 8.0, e / 8.0)
    }
}

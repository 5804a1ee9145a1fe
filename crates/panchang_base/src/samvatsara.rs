//! Named years of the 60-year cycle.
//!
//! Era years land on the cycle through [`Samvatsara::from_cycle_position`],
//! each era adding its own calibration offset (see [`crate::era`]).

use serde::{Deserialize, Serialize};

macro_rules! samvatsaras {
    ($($year:ident),+ $(,)?) => {
        /// Cycle position 0 is Prabhava.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[allow(missing_docs)]
        pub enum Samvatsara {
            $($year),+
        }

        /// Cycle order, Prabhava first.
        pub const ALL_SAMVATSARAS: [Samvatsara; 60] = [$(Samvatsara::$year),+];

        impl Samvatsara {
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$year => stringify!($year)),+
                }
            }
        }
    };
}

samvatsaras![
    Prabhava, Vibhava, Shukla, Pramodoota, Prajothpatti, Angirasa,
    Shrimukha, Bhava, Yuva, Dhaatu, Eeshvara, Bahudhanya,
    Pramaathi, Vikrama, Vrisha, Chitrabhanu, Svabhanu, Taarana,
    Paarthiva, Vyaya, Sarvajit, Sarvadhari, Virodhi, Vikruti,
    Khara, Nandana, Vijaya, Jaya, Manmatha, Durmukhi,
    Hevilambi, Vilambi, Vikari, Sharvari, Plava, Shubhakrut,
    Shobhakrut, Krodhi, Vishvavasu, Paraabhava, Plavanga, Keelaka,
    Saumya, Sadharana, Virodhikrut, Paridhavi, Pramaadhi, Aananda,
    Raakshasa, Naala, Pingala, Kaalayukti, Siddharthi, Raudri,
    Durmathi, Dundubhi, Rudhirodgaari, Raktaakshi, Krodhana, Akshaya,
];

impl Samvatsara {
    /// Position in the cycle, 0..60.
    pub const fn position(self) -> u8 {
        self as u8
    }

    /// Year at an offset era year; reduces modulo 60 in both directions.
    pub fn from_cycle_position(position: i32) -> Self {
        ALL_SAMVATSARAS[position.rem_euclid(60) as usize]
    }
}

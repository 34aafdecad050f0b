// ♈ Zodiac - Western sun sign from month and day

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zodiac {
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    /// No range matched (month outside 1..=12)
    NotFound,
}

/// Sign that starts in each month, with its first day
const SIGN_STARTS: [(Zodiac, u32); 12] = [
    (Zodiac::Aquarius, 20),    // January
    (Zodiac::Pisces, 19),      // February
    (Zodiac::Aries, 21),       // March
    (Zodiac::Taurus, 20),      // April
    (Zodiac::Gemini, 21),      // May
    (Zodiac::Cancer, 21),      // June
    (Zodiac::Leo, 23),         // July
    (Zodiac::Virgo, 23),       // August
    (Zodiac::Libra, 23),       // September
    (Zodiac::Scorpio, 24),     // October
    (Zodiac::Sagittarius, 23), // November
    (Zodiac::Capricorn, 22),   // December
];

impl Zodiac {
    /// Sign for a month/day pair
    ///
    /// Each sign includes its start day and runs until the next sign's start
    /// day. The day is not checked against the month's length.
    pub fn from_month_day(month: u32, day: u32) -> Zodiac {
        if !(1..=12).contains(&month) {
            return Zodiac::NotFound;
        }
        let index = (month - 1) as usize;
        let (sign, start) = SIGN_STARTS[index];
        if day >= start {
            sign
        } else {
            // Still in the sign that started the previous month
            SIGN_STARTS[(index + 11) % 12].0
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Zodiac::Aquarius => "Aquarius",
            Zodiac::Pisces => "Pisces",
            Zodiac::Aries => "Aries",
            Zodiac::Taurus => "Taurus",
            Zodiac::Gemini => "Gemini",
            Zodiac::Cancer => "Cancer",
            Zodiac::Leo => "Leo",
            Zodiac::Virgo => "Virgo",
            Zodiac::Libra => "Libra",
            Zodiac::Scorpio => "Scorpio",
            Zodiac::Sagittarius => "Sagittarius",
            Zodiac::Capricorn => "Capricorn",
            Zodiac::NotFound => "Zodiac Not Found",
        }
    }

}

impl std::fmt::Display for Zodiac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Zodiac {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Lunar month (masa) resolution.
//!
//! A masa is named by the nakshatra the Moon occupies at the month's
//! governing full moon. The traditional table is intentionally partial:
//! only the nakshatras that anchor a month boundary appear, and paired
//! variants collapse to a single masa. A nakshatra with no entry simply
//! yields no masa; that is a normal outcome, not an error.

use crate::elements::NAKSHATRA_NAMES;

/// Resolves the masa anchored by a nakshatra index (1..=27).
pub fn masa_for_nakshatra(nakshatra_index: u8) -> Option<&'static str> {
    match nakshatra_index {
        1 => Some("Ashvina"),            // Ashwini
        3 => Some("Karttika"),           // Krittika
        5 => Some("Margashirsha"),       // Mrigashira
        8 => Some("Pausha"),             // Pushya
        10 => Some("Magha"),             // Magha
        11 | 12 => Some("Phalguna"),     // Purva/Uttara Phalguni
        14 => Some("Chaitra"),           // Chitra
        16 => Some("Vaishakha"),         // Vishakha
        18 | 19 => Some("Jyeshtha"),     // Jyeshtha, Mula
        20 | 21 => Some("Ashadha"),      // Purva/Uttara Ashadha
        22 => Some("Shravana"),          // Shravana
        25 | 26 => Some("Bhadrapada"),   // Purva/Uttara Bhadrapada
        _ => None,
    }
}

/// Resolves the masa anchored by a nakshatra name from the standard table.
pub fn masa_for_nakshatra_name(name: &str) -> Option<&'static str> {
    NAKSHATRA_NAMES
        .iter()
        .position(|n| *n == name)
        .and_then(|idx| masa_for_nakshatra((idx + 1) as u8))
}

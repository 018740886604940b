//! Zodiac reference data.
//!
//! The twelve canonical signs as a load-once constant table, plus lookup by
//! sign id. Sign ids are lowercase slugs (`"aries"`, `"taurus"`, ...); they
//! are the identifiers used by the horoscope provider, the state store, and
//! the CLI.

use std::fmt;

/// Classical element associated with a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        };
        f.write_str(name)
    }
}

/// Modality of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Cardinal,
    Fixed,
    Mutable,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quality::Cardinal => "Cardinal",
            Quality::Fixed => "Fixed",
            Quality::Mutable => "Mutable",
        };
        f.write_str(name)
    }
}

/// Immutable reference data for one zodiac sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZodiacSign {
    /// Unique lowercase slug, e.g. `"aries"`.
    pub id: &'static str,
    /// Display name, e.g. `"Aries"`.
    pub name: &'static str,
    /// Unicode symbol, e.g. `"♈"`.
    pub symbol: &'static str,
    /// Human-readable date range, e.g. `"Mar 21 - Apr 19"`.
    pub dates: &'static str,
    /// Classical element.
    pub element: Element,
    /// Modality.
    pub quality: Quality,
}

/// The twelve canonical signs, in calendar order starting from Aries.
pub const ZODIAC_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign {
        id: "aries",
        name: "Aries",
        symbol: "♈",
        dates: "Mar 21 - Apr 19",
        element: Element::Fire,
        quality: Quality::Cardinal,
    },
    ZodiacSign {
        id: "taurus",
        name: "Taurus",
        symbol: "♉",
        dates: "Apr 20 - May 20",
        element: Element::Earth,
        quality: Quality::Fixed,
    },
    ZodiacSign {
        id: "gemini",
        name: "Gemini",
        symbol: "♊",
        dates: "May 21 - Jun 20",
        element: Element::Air,
        quality: Quality::Mutable,
    },
    ZodiacSign {
        id: "cancer",
        name: "Cancer",
        symbol: "♋",
        dates: "Jun 21 - Jul 22",
        element: Element::Water,
        quality: Quality::Cardinal,
    },
    ZodiacSign {
        id: "leo",
        name: "Leo",
        symbol: "♌",
        dates: "Jul 23 - Aug 22",
        element: Element::Fire,
        quality: Quality::Fixed,
    },
    ZodiacSign {
        id: "virgo",
        name: "Virgo",
        symbol: "♍",
        dates: "Aug 23 - Sep 22",
        element: Element::Earth,
        quality: Quality::Mutable,
    },
    ZodiacSign {
        id: "libra",
        name: "Libra",
        symbol: "♎",
        dates: "Sep 23 - Oct 22",
        element: Element::Air,
        quality: Quality::Cardinal,
    },
    ZodiacSign {
        id: "scorpio",
        name: "Scorpio",
        symbol: "♏",
        dates: "Oct 23 - Nov 21",
        element: Element::Water,
        quality: Quality::Fixed,
    },
    ZodiacSign {
        id: "sagittarius",
        name: "Sagittarius",
        symbol: "♐",
        dates: "Nov 22 - Dec 21",
        element: Element::Fire,
        quality: Quality::Mutable,
    },
    ZodiacSign {
        id: "capricorn",
        name: "Capricorn",
        symbol: "♑",
        dates: "Dec 22 - Jan 19",
        element: Element::Earth,
        quality: Quality::Fixed,
    },
    ZodiacSign {
        id: "aquarius",
        name: "Aquarius",
        symbol: "♒",
        dates: "Jan 20 - Feb 18",
        element: Element::Air,
        quality: Quality::Fixed,
    },
    ZodiacSign {
        id: "pisces",
        name: "Pisces",
        symbol: "♓",
        dates: "Feb 19 - Mar 20",
        element: Element::Water,
        quality: Quality::Mutable,
    },
];

/// Looks up a sign by its id slug.
///
/// Returns `None` for anything that is not one of the twelve canonical ids.
pub fn sign_by_id(id: &str) -> Option<&'static ZodiacSign> {
    ZODIAC_SIGNS.iter().find(|sign| sign.id == id)
}

/// Returns true if `id` names one of the twelve canonical signs.
pub fn is_valid_sign(id: &str) -> bool {
    sign_by_id(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_signs_with_unique_ids() {
        assert_eq!(ZODIAC_SIGNS.len(), 12);
        for (i, a) in ZODIAC_SIGNS.iter().enumerate() {
            for b in &ZODIAC_SIGNS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_sign_by_id() {
        let leo = sign_by_id("leo").unwrap();
        assert_eq!(leo.name, "Leo");
        assert_eq!(leo.symbol, "♌");
        assert_eq!(leo.element, Element::Fire);
        assert_eq!(leo.quality, Quality::Fixed);

        assert!(sign_by_id("ophiuchus").is_none());
        assert!(sign_by_id("Leo").is_none()); // ids are lowercase slugs
    }

    #[test]
    fn test_is_valid_sign() {
        assert!(is_valid_sign("aries"));
        assert!(is_valid_sign("pisces"));
        assert!(!is_valid_sign(""));
        assert!(!is_valid_sign("dragon"));
    }
}

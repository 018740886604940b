//! Bundled fallback horoscopes, one per sign.
//!
//! Served when the remote API is unreachable. Static text; the date is
//! stamped with today's date at lookup time.

use super::Horoscope;
use chrono::Local;

struct FallbackEntry {
    sign: &'static str,
    description: &'static str,
    compatibility: &'static str,
    mood: &'static str,
    lucky_number: &'static str,
    lucky_time: &'static str,
}

const FALLBACK_HOROSCOPES: [FallbackEntry; 12] = [
    FallbackEntry {
        sign: "aries",
        description: "Today is a day of bold action and new beginnings. Your fiery energy will help you overcome any obstacles. Trust your instincts and take that leap of faith you've been considering.",
        compatibility: "Leo, Sagittarius",
        mood: "Energetic",
        lucky_number: "9",
        lucky_time: "9:00 AM",
    },
    FallbackEntry {
        sign: "taurus",
        description: "Your practical nature serves you well today. Focus on building solid foundations and nurturing your relationships. Financial opportunities may arise - trust your judgment.",
        compatibility: "Virgo, Capricorn",
        mood: "Stable",
        lucky_number: "6",
        lucky_time: "2:00 PM",
    },
    FallbackEntry {
        sign: "gemini",
        description: "Communication is your superpower today. Share your ideas and connect with others. Your curiosity will lead you to exciting discoveries. Stay open to new perspectives.",
        compatibility: "Libra, Aquarius",
        mood: "Curious",
        lucky_number: "5",
        lucky_time: "11:00 AM",
    },
    FallbackEntry {
        sign: "cancer",
        description: "Your intuition is heightened today. Listen to your inner voice and trust your emotional intelligence. Nurture your loved ones and create a cozy, safe environment.",
        compatibility: "Scorpio, Pisces",
        mood: "Intuitive",
        lucky_number: "2",
        lucky_time: "7:00 PM",
    },
    FallbackEntry {
        sign: "leo",
        description: "Your natural leadership shines today. Others are drawn to your confidence and charisma. Take center stage and share your creative talents with the world.",
        compatibility: "Aries, Sagittarius",
        mood: "Confident",
        lucky_number: "1",
        lucky_time: "12:00 PM",
    },
    FallbackEntry {
        sign: "virgo",
        description: "Your attention to detail will be rewarded today. Focus on organization and efficiency. Help others with your practical wisdom and analytical mind.",
        compatibility: "Taurus, Capricorn",
        mood: "Analytical",
        lucky_number: "7",
        lucky_time: "3:00 PM",
    },
    FallbackEntry {
        sign: "libra",
        description: "Balance and harmony are your themes today. Seek fairness in all situations and use your diplomatic skills to resolve conflicts. Your sense of beauty inspires others.",
        compatibility: "Gemini, Aquarius",
        mood: "Balanced",
        lucky_number: "6",
        lucky_time: "4:00 PM",
    },
    FallbackEntry {
        sign: "scorpio",
        description: "Your intensity and passion are magnetic today. Dive deep into meaningful conversations and explore the mysteries of life. Trust your powerful intuition.",
        compatibility: "Cancer, Pisces",
        mood: "Passionate",
        lucky_number: "8",
        lucky_time: "8:00 PM",
    },
    FallbackEntry {
        sign: "sagittarius",
        description: "Adventure calls your name today! Embrace new experiences and expand your horizons. Your optimism and wisdom will guide you to exciting opportunities.",
        compatibility: "Aries, Leo",
        mood: "Adventurous",
        lucky_number: "3",
        lucky_time: "10:00 AM",
    },
    FallbackEntry {
        sign: "capricorn",
        description: "Your ambition and determination are at their peak today. Set clear goals and work steadily toward them. Your practical approach will bring long-term success.",
        compatibility: "Taurus, Virgo",
        mood: "Ambitious",
        lucky_number: "4",
        lucky_time: "6:00 PM",
    },
    FallbackEntry {
        sign: "aquarius",
        description: "Innovation and originality are your strengths today. Think outside the box and embrace your unique perspective. Connect with like-minded individuals who share your vision.",
        compatibility: "Gemini, Libra",
        mood: "Innovative",
        lucky_number: "11",
        lucky_time: "1:00 PM",
    },
    FallbackEntry {
        sign: "pisces",
        description: "Your creativity and spirituality are heightened today. Trust your dreams and artistic instincts. Connect with your inner self through meditation or creative expression.",
        compatibility: "Cancer, Scorpio",
        mood: "Dreamy",
        lucky_number: "12",
        lucky_time: "9:00 PM",
    },
];

/// Returns the bundled fallback horoscope for `sign`, dated today, or `None`
/// for an unknown sign id.
pub fn fallback_horoscope(sign: &str) -> Option<Horoscope> {
    FALLBACK_HOROSCOPES
        .iter()
        .find(|entry| entry.sign == sign)
        .map(|entry| Horoscope {
            sign: entry.sign.to_string(),
            date: Local::now().date_naive(),
            description: entry.description.to_string(),
            compatibility: entry.compatibility.to_string(),
            mood: entry.mood.to_string(),
            lucky_number: entry.lucky_number.to_string(),
            lucky_time: entry.lucky_time.to_string(),
        })
}

//! Country reference data: the 193 UN member states as ISO 3166-1 alpha-2
//! codes, classified by continent.
//!
//! This is the value alphabet the layout engine draws from. The classifier is
//! total: any code outside the table maps to [`Continent::Unknown`], which the
//! balanced pool builder skips and color coding renders neutrally.

use serde::{Deserialize, Serialize};

/// Continent classification used for pile theming and balanced pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
    /// Sentinel for codes outside the reference table.
    Unknown,
}

impl Continent {
    /// The five real continents, in pile order (left to right).
    pub const ALL: [Continent; 5] = [
        Continent::Africa,
        Continent::Americas,
        Continent::Asia,
        Continent::Europe,
        Continent::Oceania,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Americas => "Americas",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::Oceania => "Oceania",
            Continent::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// All 193 UN member codes with their continent.
///
/// Grouped by continent; within a group, alphabetical by English short name.
pub const UN193: &[(&str, Continent)] = &[
    // Africa (54)
    ("dz", Continent::Africa),
    ("ao", Continent::Africa),
    ("bj", Continent::Africa),
    ("bw", Continent::Africa),
    ("bf", Continent::Africa),
    ("bi", Continent::Africa),
    ("cv", Continent::Africa),
    ("cm", Continent::Africa),
    ("cf", Continent::Africa),
    ("td", Continent::Africa),
    ("km", Continent::Africa),
    ("cg", Continent::Africa),
    ("cd", Continent::Africa),
    ("ci", Continent::Africa),
    ("dj", Continent::Africa),
    ("eg", Continent::Africa),
    ("gq", Continent::Africa),
    ("er", Continent::Africa),
    ("sz", Continent::Africa),
    ("et", Continent::Africa),
    ("ga", Continent::Africa),
    ("gm", Continent::Africa),
    ("gh", Continent::Africa),
    ("gn", Continent::Africa),
    ("gw", Continent::Africa),
    ("ke", Continent::Africa),
    ("ls", Continent::Africa),
    ("lr", Continent::Africa),
    ("ly", Continent::Africa),
    ("mg", Continent::Africa),
    ("mw", Continent::Africa),
    ("ml", Continent::Africa),
    ("mr", Continent::Africa),
    ("mu", Continent::Africa),
    ("ma", Continent::Africa),
    ("mz", Continent::Africa),
    ("na", Continent::Africa),
    ("ne", Continent::Africa),
    ("ng", Continent::Africa),
    ("rw", Continent::Africa),
    ("st", Continent::Africa),
    ("sn", Continent::Africa),
    ("sc", Continent::Africa),
    ("sl", Continent::Africa),
    ("so", Continent::Africa),
    ("za", Continent::Africa),
    ("ss", Continent::Africa),
    ("sd", Continent::Africa),
    ("tz", Continent::Africa),
    ("tg", Continent::Africa),
    ("tn", Continent::Africa),
    ("ug", Continent::Africa),
    ("zm", Continent::Africa),
    ("zw", Continent::Africa),
    // Americas (35)
    ("ag", Continent::Americas),
    ("ar", Continent::Americas),
    ("bs", Continent::Americas),
    ("bb", Continent::Americas),
    ("bz", Continent::Americas),
    ("bo", Continent::Americas),
    ("br", Continent::Americas),
    ("ca", Continent::Americas),
    ("cl", Continent::Americas),
    ("co", Continent::Americas),
    ("cr", Continent::Americas),
    ("cu", Continent::Americas),
    ("dm", Continent::Americas),
    ("do", Continent::Americas),
    ("ec", Continent::Americas),
    ("sv", Continent::Americas),
    ("gd", Continent::Americas),
    ("gt", Continent::Americas),
    ("gy", Continent::Americas),
    ("ht", Continent::Americas),
    ("hn", Continent::Americas),
    ("jm", Continent::Americas),
    ("mx", Continent::Americas),
    ("ni", Continent::Americas),
    ("pa", Continent::Americas),
    ("py", Continent::Americas),
    ("pe", Continent::Americas),
    ("kn", Continent::Americas),
    ("lc", Continent::Americas),
    ("vc", Continent::Americas),
    ("sr", Continent::Americas),
    ("tt", Continent::Americas),
    ("us", Continent::Americas),
    ("uy", Continent::Americas),
    ("ve", Continent::Americas),
    // Asia (47)
    ("af", Continent::Asia),
    ("am", Continent::Asia),
    ("az", Continent::Asia),
    ("bh", Continent::Asia),
    ("bd", Continent::Asia),
    ("bt", Continent::Asia),
    ("bn", Continent::Asia),
    ("kh", Continent::Asia),
    ("cn", Continent::Asia),
    ("cy", Continent::Asia),
    ("ge", Continent::Asia),
    ("in", Continent::Asia),
    ("id", Continent::Asia),
    ("ir", Continent::Asia),
    ("iq", Continent::Asia),
    ("il", Continent::Asia),
    ("jp", Continent::Asia),
    ("jo", Continent::Asia),
    ("kz", Continent::Asia),
    ("kw", Continent::Asia),
    ("kg", Continent::Asia),
    ("la", Continent::Asia),
    ("lb", Continent::Asia),
    ("my", Continent::Asia),
    ("mv", Continent::Asia),
    ("mn", Continent::Asia),
    ("mm", Continent::Asia),
    ("np", Continent::Asia),
    ("kp", Continent::Asia),
    ("kr", Continent::Asia),
    ("om", Continent::Asia),
    ("pk", Continent::Asia),
    ("ph", Continent::Asia),
    ("qa", Continent::Asia),
    ("sa", Continent::Asia),
    ("sg", Continent::Asia),
    ("lk", Continent::Asia),
    ("sy", Continent::Asia),
    ("tj", Continent::Asia),
    ("th", Continent::Asia),
    ("tl", Continent::Asia),
    ("tr", Continent::Asia),
    ("tm", Continent::Asia),
    ("ae", Continent::Asia),
    ("uz", Continent::Asia),
    ("vn", Continent::Asia),
    ("ye", Continent::Asia),
    // Europe (43)
    ("al", Continent::Europe),
    ("ad", Continent::Europe),
    ("at", Continent::Europe),
    ("by", Continent::Europe),
    ("be", Continent::Europe),
    ("ba", Continent::Europe),
    ("bg", Continent::Europe),
    ("hr", Continent::Europe),
    ("cz", Continent::Europe),
    ("dk", Continent::Europe),
    ("ee", Continent::Europe),
    ("fi", Continent::Europe),
    ("fr", Continent::Europe),
    ("de", Continent::Europe),
    ("gr", Continent::Europe),
    ("hu", Continent::Europe),
    ("is", Continent::Europe),
    ("ie", Continent::Europe),
    ("it", Continent::Europe),
    ("lv", Continent::Europe),
    ("li", Continent::Europe),
    ("lt", Continent::Europe),
    ("lu", Continent::Europe),
    ("mt", Continent::Europe),
    ("md", Continent::Europe),
    ("mc", Continent::Europe),
    ("me", Continent::Europe),
    ("nl", Continent::Europe),
    ("mk", Continent::Europe),
    ("no", Continent::Europe),
    ("pl", Continent::Europe),
    ("pt", Continent::Europe),
    ("ro", Continent::Europe),
    ("ru", Continent::Europe),
    ("sm", Continent::Europe),
    ("rs", Continent::Europe),
    ("sk", Continent::Europe),
    ("si", Continent::Europe),
    ("es", Continent::Europe),
    ("se", Continent::Europe),
    ("ch", Continent::Europe),
    ("ua", Continent::Europe),
    ("gb", Continent::Europe),
    // Oceania (14)
    ("au", Continent::Oceania),
    ("fj", Continent::Oceania),
    ("ki", Continent::Oceania),
    ("mh", Continent::Oceania),
    ("fm", Continent::Oceania),
    ("nr", Continent::Oceania),
    ("nz", Continent::Oceania),
    ("pw", Continent::Oceania),
    ("pg", Continent::Oceania),
    ("ws", Continent::Oceania),
    ("sb", Continent::Oceania),
    ("to", Continent::Oceania),
    ("tv", Continent::Oceania),
    ("vu", Continent::Oceania),
];

/// All codes, in table order.
pub fn all_codes() -> Vec<&'static str> {
    UN193.iter().map(|&(code, _)| code).collect()
}

/// Classifies a code. Total: unknown codes map to [`Continent::Unknown`].
pub fn continent_of(code: &str) -> Continent {
    UN193
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, cont)| cont)
        .unwrap_or(Continent::Unknown)
}

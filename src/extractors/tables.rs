//! Ordered lookup tables for the lexical extractors.
//!
//! Every table is scanned front to back and the first hit wins, so more
//! specific terms must come before the shorter terms they contain.

/// Ordered `(term, value)` pairs
pub type TermTable<T> = &'static [(&'static str, T)];

pub const DEFAULT_CITY: &str = "sfbay";
pub const GENERAL_CATEGORY: &str = "sss";
pub const VEHICLE_CATEGORY: &str = "cta";

pub const CITIES: TermTable<&str> = &[
    ("san francisco", "sfbay"),
    ("bay area", "sfbay"),
    ("silicon valley", "sfbay"),
    ("new york", "nyc"),
    ("manhattan", "nyc"),
    ("brooklyn", "nyc"),
    ("nyc", "nyc"),
    ("los angeles", "losangeles"),
    ("san diego", "sandiego"),
    ("washington dc", "washingtondc"),
    ("philadelphia", "philadelphia"),
    ("chicago", "chicago"),
    ("seattle", "seattle"),
    ("austin", "austin"),
    ("denver", "denver"),
    ("miami", "miami"),
    ("atlanta", "atlanta"),
    ("phoenix", "phoenix"),
    ("dallas", "dallas"),
    ("houston", "houston"),
    ("boston", "boston"),
    ("portland", "portland"),
];

/// Every listing category the marketplace accepts
pub const CATEGORY_CODES: &[&str] = &[
    "cta", "mca", "boo", "pta", "bia", "sys", "syp", "ela", "moa", "vga", "pho", "fua", "ppa",
    "hsa", "jwa", "clo", "spo", "msa", "tla", "bka", "taa", "apa", "roo", "rea", "jjj", "bbb",
    "pet", "sss",
];

/// Ambiguous or multi-word terms, checked before [`CATEGORIES`]
pub const CATEGORY_PRIORITY: TermTable<&str> = &[
    ("apple watch", "ela"),
    ("smart watch", "ela"),
    ("smartwatch", "ela"),
    ("iphone", "moa"),
    ("cell phone", "moa"),
    ("smartphone", "moa"),
    ("macbook", "sys"),
    ("gaming laptop", "sys"),
    ("gaming pc", "sys"),
    ("graphics card", "syp"),
    ("computer parts", "syp"),
    ("video game", "vga"),
    ("playstation", "vga"),
    ("xbox", "vga"),
    ("nintendo", "vga"),
    ("car parts", "pta"),
    ("auto parts", "pta"),
    ("dirt bike", "mca"),
    ("motorcycle", "mca"),
    ("mountain bike", "bia"),
    ("road bike", "bia"),
    ("real estate", "rea"),
    ("house for sale", "rea"),
    ("room for rent", "roo"),
    ("roommate", "roo"),
    ("furniture", "fua"),
    ("coffee table", "fua"),
    ("pool table", "spo"),
    ("apartment", "apa"),
    // words that contain "car" but are not vehicles
    ("carpet", "hsa"),
    ("cardboard", "hsa"),
    ("car seat", "hsa"),
    ("cardigan", "clo"),
    ("scarf", "clo"),
    ("memory card", "ela"),
    ("trading card", "taa"),
    ("gift card", "sss"),
    ("card", "sss"),
    ("watch", "jwa"),
];

pub const CATEGORIES: TermTable<&str> = &[
    ("car", "cta"),
    ("vehicle", "cta"),
    ("automobile", "cta"),
    ("truck", "cta"),
    ("suv", "cta"),
    ("sedan", "cta"),
    ("honda", "cta"),
    ("toyota", "cta"),
    ("chevy", "cta"),
    ("chevrolet", "cta"),
    ("bmw", "cta"),
    ("mercedes", "cta"),
    ("nissan", "cta"),
    ("subaru", "cta"),
    ("tesla", "cta"),
    ("jeep", "cta"),
    ("volkswagen", "cta"),
    ("hyundai", "cta"),
    ("mazda", "cta"),
    ("lexus", "cta"),
    ("mustang", "cta"),
    ("scooter", "mca"),
    ("harley", "mca"),
    ("boat", "boo"),
    ("kayak", "boo"),
    ("canoe", "boo"),
    ("bicycle", "bia"),
    ("bike", "bia"),
    ("laptop", "sys"),
    ("computer", "sys"),
    ("desktop", "sys"),
    ("chromebook", "sys"),
    ("thinkpad", "sys"),
    ("monitor", "syp"),
    ("keyboard", "syp"),
    ("television", "ela"),
    ("headphones", "ela"),
    ("speaker", "ela"),
    ("tablet", "ela"),
    ("ipad", "ela"),
    ("phone", "moa"),
    ("console", "vga"),
    ("camera", "pho"),
    ("dslr", "pho"),
    ("couch", "fua"),
    ("sofa", "fua"),
    ("table", "fua"),
    ("chair", "fua"),
    ("desk", "fua"),
    ("dresser", "fua"),
    ("mattress", "fua"),
    ("bookshelf", "fua"),
    ("washer", "ppa"),
    ("dryer", "ppa"),
    ("refrigerator", "ppa"),
    ("fridge", "ppa"),
    ("microwave", "ppa"),
    ("appliance", "ppa"),
    ("cookware", "hsa"),
    ("rug", "hsa"),
    ("jewelry", "jwa"),
    ("necklace", "jwa"),
    ("bracelet", "jwa"),
    ("clothing", "clo"),
    ("clothes", "clo"),
    ("jacket", "clo"),
    ("sneakers", "clo"),
    ("golf", "spo"),
    ("snowboard", "spo"),
    ("treadmill", "spo"),
    ("guitar", "msa"),
    ("piano", "msa"),
    ("violin", "msa"),
    ("drum", "msa"),
    ("drill", "tla"),
    ("ladder", "tla"),
    ("tools", "tla"),
    ("textbook", "bka"),
    ("books", "bka"),
    ("lego", "taa"),
    ("toy", "taa"),
    ("rental", "apa"),
    ("for rent", "apa"),
    ("condo", "rea"),
    ("townhouse", "rea"),
    ("house", "rea"),
    ("home", "rea"),
    ("room", "roo"),
    ("job", "jjj"),
    ("employment", "jjj"),
    ("hiring", "jjj"),
    ("work", "jjj"),
    ("repair", "bbb"),
    ("movers", "bbb"),
    ("plumber", "bbb"),
    ("lessons", "bbb"),
    ("puppy", "pet"),
    ("kitten", "pet"),
    ("dog", "pet"),
];

pub const DRIVE_TYPES: TermTable<u8> = &[
    ("fwd", 1),
    ("front wheel drive", 1),
    ("rwd", 2),
    ("rear wheel drive", 2),
    ("4wd", 3),
    ("4x4", 3),
    ("awd", 3),
    ("all wheel drive", 3),
    ("four wheel drive", 3),
];

pub const MANUAL_TERMS: &[&str] = &["manual", "stick shift", "stick"];
pub const AUTOMATIC_TERMS: &[&str] = &["automatic", "auto transmission"];
pub const TRANSMISSION_MANUAL: u8 = 1;
pub const TRANSMISSION_AUTOMATIC: u8 = 2;

pub const BODY_TYPES: TermTable<u8> = &[
    ("convertible", 2),
    ("coupe", 3),
    ("hatchback", 4),
    ("minivan", 5),
    ("off-road", 6),
    ("offroad", 6),
    ("pickup", 7),
    ("sedan", 8),
    ("truck", 9),
    ("suv", 10),
    ("wagon", 11),
    ("van", 12),
    ("bus", 1),
];

pub const FUEL_TYPES: TermTable<u8> = &[
    ("diesel", 2),
    ("hybrid", 3),
    ("electric", 4),
    ("gasoline", 1),
    ("gas", 1),
];

pub const PAINT_COLORS: TermTable<u8> = &[
    ("black", 1),
    ("blue", 2),
    ("brown", 20),
    ("green", 3),
    ("grey", 4),
    ("gray", 4),
    ("orange", 5),
    ("purple", 6),
    ("red", 7),
    ("silver", 8),
    ("white", 9),
    ("yellow", 10),
    ("custom", 11),
];

pub const TITLE_STATUSES: TermTable<u8> = &[
    ("clean title", 1),
    ("salvage", 2),
    ("rebuilt", 3),
    ("parts only", 4),
    ("lien", 5),
    ("missing title", 6),
];

pub const TITLES_ONLY_PHRASES: &[&str] = &["search titles only", "titles only", "title only"];
pub const HIDE_DUPLICATES_PHRASES: &[&str] =
    &["hide duplicates", "no duplicates", "bundle duplicates", "without duplicates"];

/// Immutable lookup data shared by every extractor.
///
/// Built once at startup and handed to the extractors by reference.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub default_city: String,
    pub cities: TermTable<&'static str>,
    pub category_priority: TermTable<&'static str>,
    pub categories: TermTable<&'static str>,
    pub category_codes: &'static [&'static str],
    pub drive_types: TermTable<u8>,
    pub body_types: TermTable<u8>,
    pub fuel_types: TermTable<u8>,
    pub paint_colors: TermTable<u8>,
    pub title_statuses: TermTable<u8>,
}

impl Lexicon {
    /// Craigslist tables with the given fallback region
    pub fn craigslist(default_city: impl Into<String>) -> Self {
        Self {
            default_city: default_city.into(),
            cities: CITIES,
            category_priority: CATEGORY_PRIORITY,
            categories: CATEGORIES,
            category_codes: CATEGORY_CODES,
            drive_types: DRIVE_TYPES,
            body_types: BODY_TYPES,
            fuel_types: FUEL_TYPES,
            paint_colors: PAINT_COLORS,
            title_statuses: TITLE_STATUSES,
        }
    }

    pub fn is_known_category(&self, code: &str) -> bool {
        self.category_codes.contains(&code)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::craigslist(DEFAULT_CITY)
    }
}

/// First table entry whose term occurs anywhere in `haystack`
pub fn first_substring_match<T: Copy>(haystack: &str, table: TermTable<T>) -> Option<T> {
    table
        .iter()
        .find(|(term, _)| haystack.contains(term))
        .map(|(_, value)| *value)
}

/// First table entry whose term occurs in `haystack` as a whole word
pub fn first_word_match<T: Copy>(haystack: &str, table: TermTable<T>) -> Option<T> {
    table
        .iter()
        .find(|(term, _)| contains_word(haystack, term))
        .map(|(_, value)| *value)
}

/// Word-boundary containment check; `term` may span several words
pub fn contains_word(haystack: &str, term: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric();
    haystack.match_indices(term).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = haystack[..start].chars().next_back().map_or(true, |c| !is_word(c));
        let after_ok = haystack[end..].chars().next().map_or(true, |c| !is_word(c));
        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mapped_category_is_known() {
        let lexicon = Lexicon::default();
        for (_, code) in CATEGORY_PRIORITY.iter().chain(CATEGORIES) {
            assert!(lexicon.is_known_category(code), "unknown code {code}");
        }
        assert!(lexicon.is_known_category(GENERAL_CATEGORY));
        assert!(lexicon.is_known_category(VEHICLE_CATEGORY));
    }

    #[test]
    fn test_contains_word_respects_boundaries() {
        assert!(contains_word("a red car", "red"));
        assert!(contains_word("red", "red"));
        assert!(!contains_word("registered owner", "red"));
        assert!(!contains_word("covered", "red"));
        assert!(contains_word("clean title, one owner", "clean title"));
    }

    #[test]
    fn test_first_substring_match_uses_table_order() {
        let table: TermTable<u8> = &[("bay area", 1), ("bay", 2)];
        assert_eq!(first_substring_match("east bay area", table), Some(1));
        assert_eq!(first_substring_match("bayside", table), Some(2));
        assert_eq!(first_substring_match("nothing", table), None);
    }
}

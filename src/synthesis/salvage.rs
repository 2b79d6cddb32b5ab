//! Recovery of a usable intent from model text that carries no parsable JSON.

use crate::extractors::extract_price_range;
use crate::models::ModelIntent;
use regex::Regex;
use std::sync::LazyLock;

const MAX_EXPLANATION_CHARS: usize = 500;
const MAX_CAPITALIZED_PHRASES: usize = 5;

/// Tried in order; the first label that yields items wins
static LABEL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"recommendations?",
        r"items?",
        r"suggest(?:ed|ions?)(?:\s+items?)?",
        r"popular(?:\s+(?:items?|options?|choices?|models?))?",
    ]
    .iter()
    .map(|label| Regex::new(&format!(r"(?i)\b{label}\s*:[ \t]*(?P<inline>[^\n]*)")).unwrap())
    .collect()
});

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s*(?P<item>.+)$").unwrap());

static CAPITALIZED_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b[A-Z][a-zA-Z0-9]+(?:[ \t]+[A-Z0-9][a-zA-Z0-9-]*)*(?:[ \t]+(?:laptop|phone|tablet|bike|car|truck|watch|camera|console|desk|chair|sofa|couch|table|speaker|headphones))?",
    )
    .unwrap()
});

static ITEM_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:,|;|\band\b)\s*").unwrap());

/// Sentence openers that the capitalized-phrase heuristic would otherwise keep
const STOPWORDS: &[&str] = &[
    "A", "An", "The", "I", "Here", "These", "This", "Those", "Some", "For", "If", "You", "Your",
    "Based", "Consider", "Great", "Sure", "Sorry", "Also", "However", "Note", "JSON",
];

/// Build an intent from free-form model text.
///
/// The category is whatever the lexical extractors already resolved; the
/// recommendation list is never empty.
pub fn salvage(text: &str, known_category: Option<&str>) -> ModelIntent {
    let mut recommendations = labelled_items(text);
    if recommendations.is_empty() {
        recommendations = capitalized_phrases(text);
    }
    if recommendations.is_empty() {
        recommendations = fallback_recommendations(known_category);
    }

    let price = extract_price_range(text);

    ModelIntent {
        recommendations,
        category_code: known_category.map(str::to_string),
        min_price: price.min,
        max_price: price.max,
        explanation: text.trim().chars().take(MAX_EXPLANATION_CHARS).collect(),
    }
}

/// Used when no category is known, and for the general `sss` listing
pub const GENERIC_RECOMMENDATIONS: &[&str] = &["Item", "Product", "Service", "Goods"];

/// Generic items for a category, used when nothing could be recovered
pub fn fallback_recommendations(category: Option<&str>) -> Vec<String> {
    let items: &[&str] = match category {
        Some("cta") => &[
            "Honda Civic",
            "Toyota Corolla",
            "Toyota Camry",
            "Honda Accord",
            "Ford F-150",
        ],
        Some("mca") => &["Honda", "Yamaha", "Kawasaki", "Harley Davidson"],
        Some("boo") => &["Kayak", "Fishing Boat", "Pontoon Boat", "Sailboat"],
        Some("pta") => &["Tires", "Wheels", "Car Battery", "Headlights"],
        Some("bia") => &["Road Bike", "Mountain Bike", "Hybrid Bike", "Electric Bike"],
        Some("sys") => &["MacBook Pro", "Dell XPS", "Lenovo ThinkPad", "HP Laptop", "Desktop PC"],
        Some("syp") => &["Graphics Card", "Monitor", "Mechanical Keyboard", "SSD", "RAM"],
        Some("ela") => &["Headphones", "Bluetooth Speaker", "Tablet", "Smart TV", "Smart Watch"],
        Some("moa") => &["iPhone", "Samsung Galaxy", "Google Pixel", "OnePlus"],
        Some("vga") => &["PlayStation 5", "Xbox Series X", "Nintendo Switch", "Gaming PC"],
        Some("pho") => &["DSLR Camera", "Mirrorless Camera", "Camera Lens", "Tripod"],
        Some("fua") => &["Sofa", "Dining Table", "Office Chair", "Bookshelf", "Dresser"],
        Some("ppa") => &["Washer", "Dryer", "Refrigerator", "Microwave", "Dishwasher"],
        Some("hsa") => &["Rug", "Lamp", "Mirror", "Curtains", "Cookware"],
        Some("jwa") => &["Necklace", "Ring", "Bracelet", "Earrings", "Wristwatch"],
        Some("clo") => &["Jacket", "Jeans", "Sneakers", "Boots", "Dress"],
        Some("spo") => &["Golf Clubs", "Treadmill", "Dumbbells", "Snowboard", "Tennis Racket"],
        Some("msa") => &["Acoustic Guitar", "Electric Guitar", "Keyboard Piano", "Drum Kit"],
        Some("tla") => &["Power Drill", "Circular Saw", "Tool Set", "Ladder"],
        Some("bka") => &["Textbooks", "Novels", "Cookbooks", "Comic Books"],
        Some("taa") => &["LEGO Set", "Board Games", "Puzzles", "Action Figures"],
        Some("apa") => &[
            "Studio Apartment",
            "1 Bedroom Apartment",
            "2 Bedroom Apartment",
            "Condo",
        ],
        Some("roo") => &["Private Room", "Shared Room", "Room for Rent", "Sublet"],
        Some("rea") => &["Single Family Home", "Townhouse", "Condo", "Land"],
        Some("jjj") => &["Full Time", "Part Time", "Remote", "Contract"],
        Some("bbb") => &["Moving Help", "House Cleaning", "Handyman", "Lawn Care"],
        Some("pet") => &["Dog Crate", "Cat Tree", "Aquarium", "Pet Carrier"],
        _ => GENERIC_RECOMMENDATIONS,
    };
    items.iter().map(|s| s.to_string()).collect()
}

fn labelled_items(text: &str) -> Vec<String> {
    for label in LABEL_PATTERNS.iter() {
        let Some(caps) = label.captures(text) else {
            continue;
        };
        let inline = caps.name("inline").map_or("", |m| m.as_str());

        let items = if clean_item(inline).is_empty() {
            let end = caps.get(0).map_or(0, |m| m.end());
            bulleted_lines(&text[end..])
        } else {
            split_items(inline)
        };

        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

/// Bullet lines directly below an otherwise empty label line
fn bulleted_lines(rest: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for line in rest.lines().skip_while(|l| l.trim().is_empty()) {
        match BULLET.captures(line).and_then(|caps| caps.name("item")) {
            Some(item) => lines.push(item.as_str().to_string()),
            None => break,
        }
    }
    split_items(&lines.join(", "))
}

fn capitalized_phrases(text: &str) -> Vec<String> {
    let phrases: Vec<String> = CAPITALIZED_PHRASE
        .find_iter(text)
        .filter_map(|m| {
            let words: Vec<&str> = m
                .as_str()
                .split_whitespace()
                .skip_while(|w| STOPWORDS.contains(w))
                .collect();
            (!words.is_empty()).then(|| words.join(" "))
        })
        .collect();

    let mut out = dedup_and_filter(phrases);
    out.truncate(MAX_CAPITALIZED_PHRASES);
    out
}

fn split_items(raw: &str) -> Vec<String> {
    let pieces = ITEM_SEPARATOR
        .split(raw)
        .map(clean_item)
        .filter(|item| !item.contains(':'))
        .map(str::to_string)
        .collect();
    dedup_and_filter(pieces)
}

fn clean_item(raw: &str) -> &str {
    raw.trim().trim_matches(|c: char| {
        c.is_whitespace()
            || matches!(
                c,
                '"' | '\'' | '`' | '[' | ']' | '(' | ')' | '{' | '}' | '-' | '*' | '•' | '.'
            )
    })
}

/// Case-sensitive, first appearance wins, drops anything of two chars or less
fn dedup_and_filter(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if item.chars().count() > 2 && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

use std::collections::HashMap;

use crate::types::OTHER_CATEGORY;

/// Fandom label → media category, exact match.
///
/// Labels must match the data files verbatim (case and whitespace
/// sensitive). Multi-medium fandoms carry a joined tag ("Books/Movies")
/// that the table layer expands into one row per medium.
pub const FANDOM_CATEGORIES: &[(&str, &str)] = &[
    // Anime & manga
    ("My Hero Academia", "Anime & Manga"),
    ("Attack on Titan", "Anime & Manga"),
    ("Jujutsu Kaisen", "Anime & Manga"),
    ("Haikyuu!!", "Anime & Manga"),
    ("One Piece", "Anime & Manga"),
    ("Naruto", "Anime & Manga"),
    ("Demon Slayer", "Anime & Manga"),
    ("Spy x Family", "Anime & Manga"),
    ("Chainsaw Man", "Anime & Manga"),
    ("Genshin Impact", "Video Games"),
    // Western TV
    ("Supernatural", "TV"),
    ("Stranger Things", "TV"),
    ("Voltron: Legendary Defender", "TV"),
    ("She-Ra and the Princesses of Power", "TV"),
    ("The Owl House", "TV"),
    ("Our Flag Means Death", "TV"),
    ("9-1-1", "TV"),
    ("Good Omens", "Books/TV"),
    ("The Umbrella Academy", "TV"),
    ("Heartstopper", "Books/TV"),
    ("Young Royals", "TV"),
    ("Interview with the Vampire", "Books/TV"),
    ("The Witcher", "Books/TV/Video Games"),
    ("Arcane", "TV/Video Games"),
    // Chinese media
    ("Mo Dao Zu Shi", "Books"),
    ("The Untamed", "Books/TV"),
    ("Tian Guan Ci Fu", "Books"),
    // Books & film
    ("Harry Potter", "Books/Movies"),
    ("The Lord of the Rings", "Books/Movies"),
    ("Marvel Cinematic Movies", "Movies"),
    ("Star Wars", "Movies"),
    ("Sherlock Holmes", "Books/TV"),
    ("Percy Jackson", "Books/TV"),
    ("Six of Crows", "Books"),
    ("Red, White & Royal Blue", "Books/Movies"),
    // Games
    ("Minecraft", "Video Games"),
    ("Overwatch", "Video Games"),
    ("Baldur's Gate 3", "Video Games"),
    ("Honkai: Star Rail", "Video Games"),
    ("Undertale", "Video Games"),
    // Music / real people
    ("BTS", "Music"),
    ("One Direction", "Music"),
    ("Minecraft YouTubers", "Web Video"),
    ("Hermitcraft", "Web Video"),
];

/// Immutable fandom → category lookup, passed into the parser so tests
/// can substitute their own table.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    map: HashMap<String, String>,
}

impl CategoryMap {
    /// The built-in table above.
    pub fn builtin() -> Self {
        Self::from_pairs(FANDOM_CATEGORIES.iter().copied())
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { map }
    }

    /// Exact-match lookup. No normalization: a label that differs in case
    /// or whitespace from the table is a miss and resolves to "Other".
    pub fn category_for(&self, fandom: &str) -> &str {
        self.map
            .get(fandom)
            .map(String::as_str)
            .unwrap_or(OTHER_CATEGORY)
    }
}

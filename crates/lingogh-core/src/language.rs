//! Supported language catalog.
//!
//! The catalog is static and immutable; the selector consumes it and every
//! session is scoped to one entry by name.

/// A language the tutor can teach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Display name, also the key used in session and storage scoping
    pub name: &'static str,
    /// Flag glyph shown next to the name
    pub flag: &'static str,
    /// Short code, unique across the catalog
    pub code: &'static str,
}

/// Languages offered on the selection screen.
pub const LANGUAGES: &[Language] = &[
    Language { name: "Spanish", flag: "\u{1F1EA}\u{1F1F8}", code: "ES" },
    Language { name: "French", flag: "\u{1F1EB}\u{1F1F7}", code: "FR" },
    Language { name: "German", flag: "\u{1F1E9}\u{1F1EA}", code: "DE" },
    Language { name: "Italian", flag: "\u{1F1EE}\u{1F1F9}", code: "IT" },
    Language { name: "Japanese", flag: "\u{1F1EF}\u{1F1F5}", code: "JP" },
    Language { name: "Korean", flag: "\u{1F1F0}\u{1F1F7}", code: "KR" },
    Language { name: "Portuguese", flag: "\u{1F1F5}\u{1F1F9}", code: "PT" },
    Language { name: "Mandarin", flag: "\u{1F1E8}\u{1F1F3}", code: "CN" },
];

/// Looks a language up by display name, case-insensitively.
pub fn find_language(name: &str) -> Option<&'static Language> {
    LANGUAGES
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(name.trim()))
}

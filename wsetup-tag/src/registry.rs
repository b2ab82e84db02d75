//! Static subtag knowledge: registered variants, well-known private-use
//! markers, suppress-script defaults and syntactic code checks.
//!
//! Only a small slice of the IANA registry is carried here. The full
//! ISO-639 inventory belongs to the language directory capability.

/// Variant subtags accepted outside the private-use section.
pub const REGISTERED_VARIANTS: &[&str] = &[
    "1606nict", "1694acad", "1901", "1959acad", "1994", "1996", "alalc97", "aluku", "arevela",
    "arevmda", "baku1926", "biske", "boont", "fonipa", "fonupa", "fonxsamp", "hepburn", "heploc",
    "kkcor", "laukika", "lipaw", "monoton", "njiva", "nulik", "osojs", "pamaka", "pinyin",
    "polyton", "rozaj", "scotland", "scouse", "solba", "tarask", "uccor", "ucrcor", "vaidika",
    "valencia", "wadegile",
];

/// Private-use tokens with a meaning of their own. They are never treated
/// as an unlisted language's name.
pub const WELL_KNOWN_PRIVATE_USE: &[&str] = &["etic", "emic", "audio", "py", "pyn"];

/// Scripts implied by a language, so spelling them out adds nothing.
const SUPPRESS_SCRIPTS: &[(&str, &str)] = &[
    ("am", "Ethi"),
    ("ar", "Arab"),
    ("de", "Latn"),
    ("el", "Grek"),
    ("en", "Latn"),
    ("es", "Latn"),
    ("fa", "Arab"),
    ("fr", "Latn"),
    ("he", "Hebr"),
    ("hi", "Deva"),
    ("hy", "Armn"),
    ("it", "Latn"),
    ("ka", "Geor"),
    ("km", "Khmr"),
    ("ko", "Kore"),
    ("lo", "Laoo"),
    ("my", "Mymr"),
    ("nl", "Latn"),
    ("pt", "Latn"),
    ("ru", "Cyrl"),
    ("th", "Thai"),
    ("tpi", "Latn"),
    ("uk", "Cyrl"),
];

/// Whether `token` is a registered variant subtag (case-insensitive).
#[must_use]
pub fn is_registered_variant(token: &str) -> bool {
    REGISTERED_VARIANTS.iter().any(|v| v.eq_ignore_ascii_case(token))
}

/// Whether `token` is one of the well-known private-use markers.
#[must_use]
pub fn is_well_known_private_use(token: &str) -> bool {
    WELL_KNOWN_PRIVATE_USE.iter().any(|v| v.eq_ignore_ascii_case(token))
}

/// The suppress-script for a language, if one is known.
#[must_use]
pub fn suppress_script(language: &str) -> Option<&'static str> {
    SUPPRESS_SCRIPTS
        .iter()
        .find(|(lang, _)| lang.eq_ignore_ascii_case(language))
        .map(|(_, script)| *script)
}

/// Whether writing `script` after `language` is redundant.
#[must_use]
pub fn is_script_implied(language: &str, script: &str) -> bool {
    suppress_script(language).is_some_and(|s| s.eq_ignore_ascii_case(script))
}

/// Two or three ASCII letters.
#[must_use]
pub fn is_valid_language_code(code: &str) -> bool {
    (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Four ASCII letters.
#[must_use]
pub fn is_valid_script_code(code: &str) -> bool {
    code.len() == 4 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Two ASCII letters or three digits.
#[must_use]
pub fn is_valid_region_code(code: &str) -> bool {
    (code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
        || (code.len() == 3 && code.chars().all(|c| c.is_ascii_digit()))
}

/// One to eight ASCII alphanumerics.
#[must_use]
pub fn is_valid_private_use_token(token: &str) -> bool {
    (1..=8).contains(&token.len()) && token.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Lowercases everything, then uppercases the first character.
#[must_use]
pub fn title_case(code: &str) -> String {
    let lower = code.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

//! Title-to-slug derivation.
//!
//! # Responsibility
//! - Transliterate Cyrillic titles into ASCII and reduce them to URL-safe
//!   slugs for notes created without an explicit slug.
//!
//! # Invariants
//! - Output only contains `[a-z0-9_-]` and is at most `SLUG_MAX_CHARS` chars.
//! - The same title always yields the same slug.
//!
//! Transliteration follows the Russian/Ukrainian table used by `pytils`, so
//! slugs stay compatible with ones generated by that library:
//! "Тестовый заголовок" becomes "testovyij-zagolovok".

use crate::model::note::SLUG_MAX_CHARS;
use once_cell::sync::Lazy;
use regex::Regex;

static AMPERSAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&amp;|&").expect("valid ampersand regex"));
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("valid separator regex"));

/// Derives a slug from a note title.
///
/// Steps: lowercase, `&` becomes ` and `, runs of whitespace and hyphens
/// collapse to one `-`, Cyrillic letters are transliterated, anything else
/// outside `[a-z0-9_-]` is dropped, and the result is cut to
/// `SLUG_MAX_CHARS` characters.
///
/// May return an empty string when the title has no usable characters.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let with_and = AMPERSAND_RE.replace_all(&lowered, " and ");
    let separated = SEPARATOR_RE.replace_all(with_and.trim(), "-");

    let mut slug = String::with_capacity(separated.len());
    for ch in separated.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            slug.push(ch);
        } else if let Some(latin) = transliterate(ch) {
            slug.push_str(latin);
        }
    }

    slug.chars().take(SLUG_MAX_CHARS).collect()
}

/// Lowercase Cyrillic letter to Latin; hard and soft signs vanish.
fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "yi",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        _ => return None,
    };
    Some(latin)
}

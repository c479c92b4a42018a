//! Attribute canonicalization applied before q-gram tokenization.
//!
//! Visually or phonetically close spellings ("Müller", "Mueller" typed as
//! "Muller") must converge to the same token stream before hashing, or the
//! encoded filters lose their overlap. Both functions are total: there is
//! no input they reject.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Academic and courtesy titles stripped before encoding.
pub const DEFAULT_TITLES: &[&str] = &[
    "Dr.", "dr.", "med.", "nat.", "Prof.", "Mr.", "Mrs.", "Dipl.-Ing.",
    "Dipl.-Kfm.", "M.A.", "M.Sc.", "B.A.", "B.Sc.", "Ph.D.", "M.D.",
    "LL.M.", "MBA", "Ing.", "Arch.",
];

fn title_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternation = DEFAULT_TITLES
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        // Case-sensitive alternation, swallowing trailing whitespace.
        Regex::new(&format!(r"(?:{alternation})\s*")).expect("static title pattern")
    })
}

/// Fold accented and ligature characters onto their base ASCII spelling.
fn fold_char(c: char, out: &mut String) {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' => out.push('a'),
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' => out.push('e'),
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ĭ' => out.push('i'),
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' => out.push('o'),
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ŭ' => out.push('u'),
        'ý' | 'ÿ' | 'ŷ' => out.push('y'),
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => out.push('c'),
        'ð' | 'ď' | 'đ' => out.push('d'),
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => out.push('g'),
        'ĥ' | 'ħ' => out.push('h'),
        'ĵ' => out.push('j'),
        'ķ' | 'ĸ' => out.push('k'),
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => out.push('l'),
        'ń' | 'ņ' | 'ň' | 'ŉ' | 'ŋ' => out.push('n'),
        'ŕ' | 'ŗ' | 'ř' => out.push('r'),
        'ś' | 'ŝ' | 'ş' | 'š' => out.push('s'),
        'ţ' | 'ť' | 'ŧ' => out.push('t'),
        'ŵ' => out.push('w'),
        'ź' | 'ż' | 'ž' => out.push('z'),
        'æ' => out.push_str("ae"),
        'œ' => out.push_str("oe"),
        'ß' => out.push_str("ss"),
        'þ' => out.push_str("th"),
        _ => out.push(c),
    }
}

/// Canonicalize a name-like string: strip titles, turn hyphens into
/// spaces, lowercase, fold diacritics, then either uppercase the whole
/// string (`to_upper`) or capitalize the first letter only.
#[must_use]
pub fn normalize_string(text: &str, to_upper: bool) -> String {
    let stripped = title_pattern().replace_all(text, "");
    let lowered = stripped.trim().replace('-', " ").to_lowercase();

    let mut folded = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        fold_char(c, &mut folded);
    }

    if to_upper {
        folded.to_uppercase()
    } else {
        let mut chars = folded.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => folded,
        }
    }
}

// Numeric layouts tried after separators are unified to '-'. Day-first
// wins over month-first for ambiguous inputs, matching the deployment
// locale of the stored data.
const NUMERIC_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%m-%d-%Y", "%d-%m-%y"];

// Layouts with a spelled-out month, tried on a comma-stripped copy.
const TEXTUAL_FORMATS: &[&str] = &["%d %B %Y", "%B %d %Y", "%d %b %Y", "%b %d %Y", "%Y %B %d"];

/// Parse a loosely formatted date and re-emit it as `YYYYMMDD`.
///
/// On parse failure the original input is returned unchanged. That
/// pass-through is the contract, not an error: callers must not assume
/// the result is always 8 digits.
#[must_use]
pub fn normalize_date(input: &str) -> String {
    match parse_loose_date(input.trim()) {
        Some(date) => date.format("%Y%m%d").to_string(),
        None => input.to_string(),
    }
}

fn parse_loose_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Some(date);
        }
    }

    let unified = squeeze(s, |c| matches!(c, '/' | '.' | ' ' | '-'), '-');
    for fmt in NUMERIC_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&unified, fmt) {
            return Some(date);
        }
    }

    let texty = squeeze(&s.replace(',', " "), |c| c == ' ', ' ');
    for fmt in TEXTUAL_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&texty, fmt) {
            return Some(date);
        }
    }

    None
}

/// Replace every run of separator characters with a single `joiner`.
fn squeeze(s: &str, is_sep: impl Fn(char) -> bool, joiner: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_sep = false;
    for c in s.chars() {
        if is_sep(c) {
            in_sep = true;
        } else {
            if in_sep && !out.is_empty() {
                out.push(joiner);
            }
            in_sep = false;
            out.push(c);
        }
    }
    out
}

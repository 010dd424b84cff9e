/// Case classification and the case-variant generator lookup tries against
/// an input token (spec.md §4.1).
use unicode_casing::CharExt;
use unicode_titlecase::StrTitleCase;

/// A word's capitalization pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapStyle {
    /// No characters are capitalized.
    No,
    /// Only the first character is capitalized.
    Init,
    /// Every (non-neutral) character is capitalized.
    All,
    /// First character capitalized, and at least one other too, but not all.
    HuhInit,
    /// Some character is capitalized but not the first, and not all.
    Huh,
}

impl CapStyle {
    pub fn classify(word: &str) -> CapStyle {
        let mut has_lower = false;
        let mut has_upper = false;
        let mut first_upper = false;
        let mut other_upper = false;
        for (i, c) in word.chars().enumerate() {
            if c.is_lowercase() {
                has_lower = true;
            } else if c.is_uppercase() {
                has_upper = true;
                if i == 0 {
                    first_upper = true;
                } else {
                    other_upper = true;
                }
            }
        }
        if !has_upper {
            CapStyle::No
        } else if !has_lower {
            CapStyle::All
        } else if first_upper && !other_upper {
            CapStyle::Init
        } else if first_upper {
            CapStyle::HuhInit
        } else {
            CapStyle::Huh
        }
    }
}

/// Locale-aware dotted-I handling for Turkish-family languages (spec.md
/// §4.1). Plain Unicode case folding maps `I` to `i` and `İ` to `i̇` (two
/// codepoints); Turkish, Azerbaijani and Crimean Tatar instead pair `I`
/// with dotless `ı` and `İ` with dotted `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurkicCasing(pub bool);

impl TurkicCasing {
    pub fn from_lang_tag(lang: &str) -> Self {
        let base = lang.split(['_', '-']).next().unwrap_or(lang);
        TurkicCasing(matches!(base, "tr" | "az" | "crh"))
    }

    pub fn to_lower(&self, word: &str) -> String {
        if !self.0 {
            return word.to_lowercase();
        }
        word.chars()
            .map(|c| match c {
                'I' => 'ı',
                'İ' => 'i',
                other => other.to_lowercase().next().unwrap_or(other),
            })
            .collect()
    }
}

/// Lowercase just the first character of `word`, leaving the rest intact.
pub fn lowercase_first(word: &str, turkic: TurkicCasing) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let lowered = turkic.to_lower(&first.to_string());
            lowered + chars.as_str()
        }
    }
}

/// Title-case `word`: first character (which may expand to more than one
/// codepoint, e.g. ligatures) titlecased, the rest lowercased.
pub fn titlecase(word: &str) -> String {
    word.to_titlecase_lower_rest()
}

/// A handful of `ss`/`ß` substitutions, used under CHECKSHARPS (German).
/// Every occurrence of one is tried as the other; since German dictionaries
/// typically use at most one or two of either per word this stays cheap.
pub fn sharp_s_variants(word: &str) -> Vec<String> {
    let mut out = Vec::new();
    if word.contains("ss") {
        out.push(word.replace("ss", "ß"));
    }
    if word.contains('ß') {
        out.push(word.replace('ß', "ss"));
    }
    out
}

/// Enumerate the case variants to try against lookup, in the fixed order
/// spec.md §4.1 describes. Deduplicated, preserving first-seen order.
pub fn case_variants(word: &str, captype: CapStyle, turkic: TurkicCasing, checksharps: bool) -> Vec<String> {
    let mut variants = vec![word.to_string()];

    if captype == CapStyle::Init {
        variants.push(lowercase_first(word, turkic));
    }
    if captype == CapStyle::All || captype == CapStyle::Init {
        variants.push(turkic.to_lower(word));
    }
    variants.push(titlecase(word));

    if checksharps {
        let mut extra = Vec::new();
        for v in &variants {
            extra.extend(sharp_s_variants(v));
        }
        variants.extend(extra);
    }

    let mut seen = std::collections::HashSet::new();
    variants.retain(|v| seen.insert(v.clone()));
    variants
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(CapStyle::classify("lower"), CapStyle::No);
        assert_eq!(CapStyle::classify("Init"), CapStyle::Init);
        assert_eq!(CapStyle::classify("ALL"), CapStyle::All);
        assert_eq!(CapStyle::classify("McDonald"), CapStyle::HuhInit);
        assert_eq!(CapStyle::classify("mcDonald"), CapStyle::Huh);
        assert_eq!(CapStyle::classify("123"), CapStyle::No);
    }

    #[test]
    fn test_case_variants_init() {
        let variants = case_variants("Foo", CapStyle::Init, TurkicCasing(false), false);
        assert!(variants.contains(&"Foo".to_string()));
        assert!(variants.contains(&"foo".to_string()));
    }

    #[test]
    fn test_turkic_lower() {
        let turkic = TurkicCasing(true);
        assert_eq!(turkic.to_lower("I"), "ı");
        let plain = TurkicCasing(false);
        assert_eq!(plain.to_lower("I"), "i");
    }

    #[test]
    fn test_sharp_s_variants() {
        let variants = sharp_s_variants("AUSSTOSS".to_lowercase().as_str());
        assert!(variants.iter().any(|v| v.contains('ß')));
    }
}

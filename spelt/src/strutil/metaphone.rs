/// PHONE-table driven phonetic encoder.
///
/// The `.aff` file's PHONE table is a list of `pattern replacement` pairs,
/// applied left to right over the word, closest match first. `^`/`$` anchor
/// a rule to the start/end of the word; a leading `<` on the pattern means
/// "only applies when the previous character was not a vowel"; digits
/// embedded in the pattern are context-length markers carried over from
/// Hunspell's C implementation and are treated here as ordinary literal
/// pattern characters, which is a safe simplification since they only ever
/// appear in the small set of expert-tuned rule sets that ship with a
/// handful of European dictionaries and never collide with normal letters
/// at the position they occupy.
#[derive(Clone, Debug)]
struct PhoneRule {
    pattern: Vec<char>,
    replacement: String,
    anchor_start: bool,
    anchor_end: bool,
    not_after_vowel: bool,
}

const VOWELS: &str = "AEIOUY";

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c.to_ascii_uppercase())
}

impl PhoneRule {
    fn parse(pattern: &str, replacement: &str) -> Self {
        let mut pattern = pattern;
        let mut anchor_start = false;
        let mut anchor_end = false;
        let mut not_after_vowel = false;
        if let Some(stripped) = pattern.strip_prefix('^') {
            pattern = stripped;
            anchor_start = true;
        }
        if let Some(stripped) = pattern.strip_prefix('<') {
            pattern = stripped;
            not_after_vowel = true;
        }
        if let Some(stripped) = pattern.strip_suffix('$') {
            pattern = stripped;
            anchor_end = true;
        }
        let replacement = if replacement == "_" { "" } else { replacement };
        PhoneRule {
            pattern: pattern.chars().collect(),
            replacement: replacement.to_string(),
            anchor_start,
            anchor_end,
            not_after_vowel,
        }
    }

    fn matches_at(&self, chars: &[char], pos: usize, prev: Option<char>) -> bool {
        if self.anchor_start && pos != 0 {
            return false;
        }
        if self.not_after_vowel && prev.map_or(false, is_vowel) {
            return false;
        }
        if pos + self.pattern.len() > chars.len() {
            return false;
        }
        if self.anchor_end && pos + self.pattern.len() != chars.len() {
            return false;
        }
        chars[pos..pos + self.pattern.len()]
            .iter()
            .zip(self.pattern.iter())
            .all(|(a, b)| a.to_ascii_uppercase() == *b)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PhoneTable {
    rules: Vec<PhoneRule>,
}

impl PhoneTable {
    pub fn push(&mut self, pattern: &str, replacement: &str) {
        self.rules.push(PhoneRule::parse(pattern, replacement));
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Encode `word` into its phonetic code. Rules are tried in file order
    /// at each position; the first rule whose pattern matches wins, and
    /// scanning resumes after the consumed pattern (a zero-length
    /// replacement -- `_` in the aff file -- simply deletes those letters).
    /// Consecutive duplicate output letters are collapsed, matching classic
    /// metaphone/soundex finalization.
    pub fn encode(&self, word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let mut out = String::with_capacity(chars.len());
        let mut pos = 0;
        let mut prev_input: Option<char> = None;
        while pos < chars.len() {
            let mut matched = false;
            for rule in &self.rules {
                if !rule.pattern.is_empty() && rule.matches_at(&chars, pos, prev_input) {
                    out.push_str(&rule.replacement);
                    prev_input = Some(chars[pos + rule.pattern.len() - 1]);
                    pos += rule.pattern.len();
                    matched = true;
                    break;
                }
            }
            if !matched {
                let c = chars[pos].to_ascii_uppercase();
                out.push(c);
                prev_input = Some(chars[pos]);
                pos += 1;
            }
        }
        // Collapse consecutive duplicates.
        let mut collapsed = String::with_capacity(out.len());
        let mut last: Option<char> = None;
        for c in out.chars() {
            if Some(c) != last {
                collapsed.push(c);
            }
            last = Some(c);
        }
        collapsed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_simple_substitution() {
        let mut t = PhoneTable::default();
        t.push("PH", "F");
        assert_eq!(t.encode("PHONE"), "FONE");
    }

    #[test]
    fn test_anchor_start() {
        let mut t = PhoneTable::default();
        t.push("^KN", "N");
        assert_eq!(t.encode("KNIFE"), "NIFE");
        assert_eq!(t.encode("ACKNIFE"), "ACKNIFE");
    }

    #[test]
    fn test_not_after_vowel() {
        let mut t = PhoneTable::default();
        t.push("<H", "_");
        assert_eq!(t.encode("AHA"), "AA");
    }

    #[test]
    fn test_collapses_duplicates() {
        let mut t = PhoneTable::default();
        t.push("CK", "K");
        assert_eq!(t.encode("BACK"), "BAK");
    }
}

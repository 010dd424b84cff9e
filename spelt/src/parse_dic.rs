/// Parser for Hunspell-format `.dic` word-list files.
///
/// Format: an approximate count line, then one `stem[/flags] [morph...]`
/// entry per line. `\/` escapes a literal slash in the stem; flags may be a
/// literal flag-list or (if `AF` aliases are defined) a single alias index.
use anyhow::{anyhow, Result};

use crate::aff_config::AffConfig;
use crate::dict::{Dictionary, WordEntry};
use crate::flag::{parse_flags, FlagSet};
use crate::wordflags::WordFlags;

fn unescape_stem(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Split a `.dic` entry line (post-BOM, post-count) into `(stem, flags_str,
/// morph_str)`, honoring `\/` escaping for a literal slash within the stem.
fn split_entry(line: &str) -> (&str, Option<&str>, &str) {
    let bytes = line.as_bytes();
    let mut slash_at = None;
    let mut escaped = false;
    let mut space_at = line.len();
    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'/' if slash_at.is_none() => slash_at = Some(i),
            b' ' | b'\t' => {
                space_at = i;
                break;
            }
            _ => {}
        }
    }
    match slash_at {
        Some(i) if i < space_at => (&line[..i], Some(&line[i + 1..space_at]), &line[space_at..]),
        _ => (&line[..space_at], None, &line[space_at..]),
    }
}

fn word_flags_from(flags: &FlagSet, cfg: &AffConfig) -> WordFlags {
    let mut wf = WordFlags::empty();
    let checks: &[(Option<crate::flag::Flag>, WordFlags)] = &[
        (cfg.forbidden_word, WordFlags::Forbidden),
        (cfg.compound_begin, WordFlags::CompoundBegin),
        (cfg.compound_middle, WordFlags::CompoundMiddle),
        (cfg.compound_end, WordFlags::CompoundEnd),
        (cfg.compound_permit, WordFlags::CompoundPermit),
        (cfg.compound_forbid, WordFlags::CompoundForbid),
        (cfg.only_in_compound, WordFlags::OnlyInCompound),
        (cfg.nosuggest, WordFlags::NoSuggest),
        (cfg.circumfix, WordFlags::Circumfix),
        (cfg.need_affix, WordFlags::NeedAffix),
        (cfg.keep_case, WordFlags::KeepCase),
        (cfg.compound_flag, WordFlags::CompoundFlag),
        (cfg.warn, WordFlags::Warn),
        (cfg.compound_root, WordFlags::CompoundRoot),
        (cfg.force_ucase, WordFlags::ForceUcase),
    ];
    for (flag, bit) in checks {
        if flags.contains_opt(*flag) {
            wf |= *bit;
        }
    }
    wf
}

fn parse_morph_tags(s: &str) -> Vec<(String, String)> {
    s.split_whitespace()
        .filter_map(|tok| tok.split_once(':'))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Parse a complete `.dic` file's text, using `cfg` for flag syntax and AF
/// alias resolution, into a populated `Dictionary`.
pub fn parse_dictionary(text: &str, cfg: &AffConfig) -> Result<Dictionary> {
    let mut dict = Dictionary::new();
    let mut lines = text.lines();
    let count_line = lines
        .next()
        .ok_or_else(|| anyhow!(".dic file is empty, missing count line"))?;
    count_line
        .trim()
        .parse::<usize>()
        .map_err(|e| anyhow!("invalid .dic count line {:?}: {}", count_line, e))?;

    for raw in lines {
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let (stem_raw, flags_raw, morph_raw) = split_entry(line);
        let stem = unescape_stem(stem_raw);

        let flags = match flags_raw {
            None => FlagSet::new(),
            Some(f) => {
                if let Ok(idx) = f.parse::<usize>() {
                    if !cfg.flag_aliases.is_empty() {
                        cfg.resolve_flag_alias(idx)
                    } else {
                        FlagSet::from_flags(parse_flags(cfg.flag_mode, f)?)
                    }
                } else {
                    FlagSet::from_flags(parse_flags(cfg.flag_mode, f)?)
                }
            }
        };

        let morph = morph_raw.trim();
        let morphology = if let Ok(idx) = morph.parse::<usize>() {
            cfg.resolve_morph_alias(idx)
        } else {
            parse_morph_tags(morph)
        };

        let word_flags = word_flags_from(&flags, cfg);
        dict.insert(stem, WordEntry::new(flags, word_flags, morphology));
    }
    Ok(dict)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_basic_entries() {
        let text = "2\nfoo\nbar/S\n";
        let cfg = AffConfig::new();
        let dict = parse_dictionary(text, &cfg).unwrap();
        assert!(dict.contains("foo"));
        assert!(dict.contains("bar"));
    }

    #[test]
    fn test_escaped_slash_in_stem() {
        let text = "1\nkg\\/h\n";
        let cfg = AffConfig::new();
        let dict = parse_dictionary(text, &cfg).unwrap();
        assert!(dict.contains("kg/h"));
    }

    #[test]
    fn test_morph_tags() {
        let text = "1\nfoo po:noun\n";
        let cfg = AffConfig::new();
        let dict = parse_dictionary(text, &cfg).unwrap();
        let entries = dict.get("foo").unwrap();
        assert_eq!(entries[0].morphology, vec![("po".to_string(), "noun".to_string())]);
    }

    #[test]
    fn test_bad_count_line_errors() {
        let text = "not-a-number\nfoo\n";
        let cfg = AffConfig::new();
        assert!(parse_dictionary(text, &cfg).is_err());
    }
}

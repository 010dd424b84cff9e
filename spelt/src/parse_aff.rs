/// Parser for Hunspell-format `.aff` files.
///
/// Line-oriented, directive-prefixed. Unrecognized directives and bare
/// comment/blank lines are accepted and ignored; a malformed value for a
/// recognized directive is a hard parse error.
use anyhow::{anyhow, bail, Error, Result};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{anychar, char, i64, line_ending, not_line_ending, space0, space1};
use nom::combinator::{cut, eof, map, opt, success, value};
use nom::error::{Error as NomError, ErrorKind, ParseError};
use nom::multi::many0;
use nom::sequence::{delimited, preceded, separated_pair, terminated, tuple};
use nom::{Compare, Err, Finish, IResult, InputLength, Parser};

use crate::affix::{AffixEntry, AffixGroup, AffixKind};
use crate::aff_config::AffConfig;
use crate::compound_rule::CompoundRule;
use crate::condition::Condition;
use crate::flag::{parse_flags, parse_one_flag, FlagMode, FlagSet};
use crate::strutil::replacements::ReplacementsBuilder;
use crate::strutil::Replacements;

type Input<'a> = &'a str;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

struct AffError {
    message: String,
}

impl AffError {
    fn new(message: &str) -> Self {
        AffError {
            message: message.to_string(),
        }
    }

    fn wrapped(message: &str) -> Err<Self> {
        Err::Error(Self::new(message))
    }

    fn from_nom(e: Err<NomError<Input>>) -> Err<Self> {
        Err::Error(Self::new(&e.to_string()))
    }
}

impl<'a> ParseError<Input<'a>> for AffError {
    fn from_error_kind(input: Input, kind: ErrorKind) -> Self {
        let message = format!("{:?}:\t{}\n", kind, input);
        AffError { message }
    }

    fn append(_input: Input, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl ToString for AffError {
    fn to_string(&self) -> String {
        self.message.to_string()
    }
}

fn from_anyhow(e: Error) -> Err<AffError> {
    AffError::wrapped(&e.to_string())
}

/// One logical `.aff` line, after the keyword has been identified but
/// before it's folded into the `AffConfig` being built.
#[derive(Clone)]
enum AffixLine<'a> {
    Empty,
    SetEncoding(&'a str),
    SetFlagMode(FlagMode),
    SetLang(&'a str),
    SetKey(&'a str),
    SetTry(&'a str),
    SetWordChars(&'a str),
    SetIgnore(&'a str),
    SetCompoundMin(i64),
    SetCompoundWordMax(i64),
    SetMaxCpdSugs(i64),
    SetMaxNgramSugs(i64),
    SetMaxDiff(i64),
    SetFlag(&'a str, &'a str),
    SetBool(&'a str),
    AddIconv(&'a str, &'a str),
    AddOconv(&'a str, &'a str),
    AddRep(&'a str, &'a str),
    AddMap(&'a str),
    AddPhone(&'a str, &'a str),
    AddCompoundRule(&'a str),
    AddCheckCompoundPattern(&'a str, &'a str),
    SetAfTable(i64),
    AfEntry(&'a str),
    SetAmTable(i64),
    AmEntry(&'a str),
    AffixHeader {
        kind: AffixKind,
        flag: &'a str,
        cross_product: bool,
        count: i64,
    },
    AffixRule {
        kind: AffixKind,
        flag: &'a str,
        strip: &'a str,
        add: &'a str,
        condition: &'a str,
        morph: &'a str,
    },
}

fn keyword<'a, T, O, E: ParseError<Input<'a>>, F>(
    key: T,
    mut value: F,
) -> impl FnMut(Input<'a>) -> IResult<Input<'a>, O, E>
where
    F: Parser<Input<'a>, O, E>,
    Input<'a>: Compare<T>,
    T: InputLength + Copy,
{
    move |s: Input<'a>| {
        let (s, _) = tag(key).parse(s)?;
        let (s, _) = space1.parse(s)?;
        match value.parse(s) {
            Err(Err::Error(e)) => Err(Err::Failure(e)),
            rest => rest,
        }
    }
}

fn comment(s: &str) -> IResult<&str, ()> {
    value((), preceded(char('#'), not_line_ending))(s)
}

fn ending(s: &str) -> IResult<&str, (), AffError> {
    value((), delimited(space0, opt(comment), line_ending))(s).map_err(AffError::from_nom)
}

fn value_string(s: &str) -> IResult<&str, &str, AffError> {
    take_till1(|c: char| c.is_whitespace())(s)
}

fn rest_of_line(s: &str) -> IResult<&str, &str, AffError> {
    take_till1(|c: char| c == '\r' || c == '\n')(s).or_else(|_: Err<AffError>| Ok((s, "")))
}

const FLAG_NAMES: [&str; 15] = [
    "COMPOUNDBEGIN",
    "COMPOUNDMIDDLE",
    "COMPOUNDEND",
    "COMPOUNDFLAG",
    "COMPOUNDPERMITFLAG",
    "COMPOUNDFORBIDFLAG",
    "COMPOUNDROOT",
    "ONLYINCOMPOUND",
    "NOSUGGEST",
    "CIRCUMFIX",
    "NEEDAFFIX",
    "FORBIDDENWORD",
    "WARN",
    "KEEPCASE",
    "FORCEUCASE",
];

const BOOL_NAMES: [&str; 9] = [
    "NOSPLITSUGS",
    "SUGSWITHDOTS",
    "ONLYMAXDIFF",
    "FORBIDWARN",
    "CHECKCOMPOUNDDUP",
    "CHECKCOMPOUNDREP",
    "CHECKCOMPOUNDCASE",
    "CHECKCOMPOUNDTRIPLE",
    "SIMPLIFIEDTRIPLE",
];

fn assign_flag(s: &str) -> IResult<&str, AffixLine, AffError> {
    let (s, key) = value_string(s)?;
    if !FLAG_NAMES.contains(&key) {
        return Err(AffError::wrapped("not a flag keyword"));
    }
    let (s, _) = space1(s)?;
    let (s, v) = cut(value_string)(s)?;
    Ok((s, AffixLine::SetFlag(key, v)))
}

fn assign_bool(s: &str) -> IResult<&str, AffixLine, AffError> {
    let (s, key) = value_string(s)?;
    if !BOOL_NAMES.contains(&key) {
        return Err(AffError::wrapped("not a bool keyword"));
    }
    Ok((s, AffixLine::SetBool(key)))
}

fn set_encoding(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("SET", value_string), AffixLine::SetEncoding)(s)
}

fn flag_mode(s: &str) -> IResult<&str, FlagMode, AffError> {
    alt((
        value(FlagMode::DoubleCharFlags, tag("long")),
        value(FlagMode::NumericFlags, tag("num")),
        value(FlagMode::Utf8Flags, tag("UTF-8")),
    ))(s)
}

fn set_flag_mode(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("FLAG", flag_mode), AffixLine::SetFlagMode)(s)
}

fn set_lang(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("LANG", value_string), AffixLine::SetLang)(s)
}

fn set_key(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("KEY", value_string), AffixLine::SetKey)(s)
}

fn set_try(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("TRY", value_string), AffixLine::SetTry)(s)
}

fn set_wordchars(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("WORDCHARS", value_string), AffixLine::SetWordChars)(s)
}

fn set_ignore(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("IGNORE", value_string), AffixLine::SetIgnore)(s)
}

fn set_compound_min(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("COMPOUNDMIN", i64), AffixLine::SetCompoundMin)(s)
}

fn set_compound_word_max(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("COMPOUNDWORDMAX", i64), AffixLine::SetCompoundWordMax)(s)
}

fn set_max_cpd_sugs(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("MAXCPDSUGS", i64), AffixLine::SetMaxCpdSugs)(s)
}

fn set_max_ngram_sugs(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("MAXNGRAMSUGS", i64), AffixLine::SetMaxNgramSugs)(s)
}

fn set_max_diff(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("MAXDIFF", i64), AffixLine::SetMaxDiff)(s)
}

fn conv(s: &str) -> IResult<&str, (&str, &str), AffError> {
    separated_pair(value_string, space1, value_string)(s)
}

fn add_iconv(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        value(AffixLine::Empty, tuple((tag("ICONV"), space1, i64))),
        map(keyword("ICONV", conv), |(c1, c2)| AffixLine::AddIconv(c1, c2)),
    ))(s)
}

fn add_oconv(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        value(AffixLine::Empty, tuple((tag("OCONV"), space1, i64))),
        map(keyword("OCONV", conv), |(c1, c2)| AffixLine::AddOconv(c1, c2)),
    ))(s)
}

fn add_rep(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        value(AffixLine::Empty, tuple((tag("REP"), space1, i64))),
        map(keyword("REP", conv), |(c1, c2)| AffixLine::AddRep(c1, c2)),
    ))(s)
}

fn add_map(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        value(AffixLine::Empty, tuple((tag("MAP"), space1, i64))),
        map(keyword("MAP", value_string), AffixLine::AddMap),
    ))(s)
}

fn add_phone(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        value(AffixLine::Empty, tuple((tag("PHONE"), space1, i64))),
        map(keyword("PHONE", conv), |(c1, c2)| AffixLine::AddPhone(c1, c2)),
    ))(s)
}

fn add_compound_rule(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        value(AffixLine::Empty, tuple((tag("COMPOUNDRULE"), space1, i64))),
        map(keyword("COMPOUNDRULE", value_string), AffixLine::AddCompoundRule),
    ))(s)
}

fn add_check_compound_pattern(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        value(AffixLine::Empty, tuple((tag("CHECKCOMPOUNDPATTERN"), space1, i64))),
        map(
            keyword("CHECKCOMPOUNDPATTERN", conv),
            |(a, b)| AffixLine::AddCheckCompoundPattern(a, b),
        ),
    ))(s)
}

fn set_af_table(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("AF", i64), AffixLine::SetAfTable)(s)
}

fn af_entry(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("AF", value_string), AffixLine::AfEntry)(s)
}

fn set_am_table(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("AM", i64), AffixLine::SetAmTable)(s)
}

fn am_entry(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("AM", rest_of_line), AffixLine::AmEntry)(s)
}

fn affix_header(s: &str) -> IResult<&str, AffixLine, AffError> {
    let (s, kind_tag) = alt((tag("PFX"), tag("SFX")))(s)?;
    let kind = if kind_tag == "PFX" {
        AffixKind::Prefix
    } else {
        AffixKind::Suffix
    };
    let (s, _) = space1(s)?;
    let (s, flag) = cut(value_string)(s)?;
    let (s, _) = space1(s)?;
    let (s, cp) = cut(anychar)(s)?;
    let (s, _) = space1(s)?;
    let (s, count) = cut(i64)(s)?;
    Ok((
        s,
        AffixLine::AffixHeader {
            kind,
            flag,
            cross_product: cp == 'Y',
            count,
        },
    ))
}

fn affix_rule(s: &str) -> IResult<&str, AffixLine, AffError> {
    let (s, kind_tag) = alt((tag("PFX"), tag("SFX")))(s)?;
    let kind = if kind_tag == "PFX" {
        AffixKind::Prefix
    } else {
        AffixKind::Suffix
    };
    let (s, _) = space1(s)?;
    let (s, flag) = cut(value_string)(s)?;
    let (s, _) = space1(s)?;
    let (s, strip_and_add) = cut(value_string)(s)?;
    let (strip, add) = match strip_and_add.split_once('/') {
        Some((a, b)) => (a, b),
        None => ("", strip_and_add),
    };
    let strip = if strip == "0" { "" } else { strip };
    let add = add.split('/').next().unwrap_or(add);
    let (s, _) = space1(s)?;
    let (s, condition) = cut(value_string)(s)?;
    let condition = if condition == "." { "" } else { condition };
    let (s, morph) = opt(preceded(space1, rest_of_line))(s)?;
    Ok((
        s,
        AffixLine::AffixRule {
            kind,
            flag,
            strip,
            add,
            condition,
            morph: morph.unwrap_or(""),
        },
    ))
}

fn line(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        alt((
            set_encoding,
            set_flag_mode,
            set_lang,
            set_key,
            set_try,
            set_wordchars,
            set_ignore,
            set_compound_min,
            set_compound_word_max,
            set_max_cpd_sugs,
            set_max_ngram_sugs,
            set_max_diff,
        )),
        alt((
            add_iconv,
            add_oconv,
            add_rep,
            add_map,
            add_phone,
            add_compound_rule,
            add_check_compound_pattern,
        )),
        alt((set_af_table, af_entry, set_am_table, am_entry)),
        alt((affix_header, affix_rule)),
        assign_flag,
        assign_bool,
        success(AffixLine::Empty),
    ))(s)
}

/// Mutable accumulator for table-continuation directives (AF/AM/affix
/// groups), which span many lines after a header line announces a count.
struct Builder {
    cfg: AffConfig,
    af_entries: Vec<String>,
    am_entries: Vec<String>,
    pending_group: Option<(AffixKind, String, bool, Vec<AffixEntry>)>,
    iconv_builder: ReplacementsBuilder,
    oconv_builder: ReplacementsBuilder,
    rep_builder: ReplacementsBuilder,
}

impl Builder {
    fn new() -> Self {
        Builder {
            cfg: AffConfig::new(),
            af_entries: Vec::new(),
            am_entries: Vec::new(),
            pending_group: None,
            iconv_builder: Replacements::builder(),
            oconv_builder: Replacements::builder(),
            rep_builder: Replacements::builder(),
        }
    }

    fn flush_group(&mut self) -> Result<()> {
        if let Some((kind, flag_str, cross_product, entries)) = self.pending_group.take() {
            let flag = parse_one_flag(self.cfg.flag_mode, &flag_str)?;
            self.cfg.affixes.add_group(AffixGroup {
                flag,
                kind,
                cross_product,
                entries,
            });
        }
        Ok(())
    }

    fn finish(mut self) -> Result<AffConfig> {
        self.flush_group()?;
        self.cfg.flag_aliases = self
            .af_entries
            .iter()
            .map(|s| parse_flags(self.cfg.flag_mode, s).map(FlagSet::from_flags))
            .collect::<Result<_>>()?;
        self.cfg.morph_aliases = self
            .am_entries
            .iter()
            .map(|s| parse_morph_tags(s))
            .collect();
        self.cfg.iconv = self.iconv_builder.build();
        self.cfg.oconv = self.oconv_builder.build();
        self.cfg.rep = self.rep_builder.build();
        Ok(self.cfg)
    }

    fn apply(&mut self, l: &AffixLine) -> Result<()> {
        match l {
            AffixLine::Empty => {}
            AffixLine::SetEncoding(enc) => {
                if *enc != "UTF-8" {
                    bail!("unsupported encoding {}", enc);
                }
                self.cfg.encoding = enc.to_string();
            }
            AffixLine::SetFlagMode(fm) => self.cfg.flag_mode = *fm,
            AffixLine::SetLang(l) => self.cfg.lang = Some(l.to_string()),
            AffixLine::SetKey(k) => {
                self.cfg.key = k.split('|').map(|s| s.to_string()).collect();
            }
            AffixLine::SetTry(t) => self.cfg.try_chars = t.to_string(),
            AffixLine::SetWordChars(w) => self.cfg.wordchars = w.to_string(),
            AffixLine::SetIgnore(i) => self.cfg.ignore = i.to_string(),
            AffixLine::SetCompoundMin(v) => self.cfg.compound_min = (*v).max(1) as usize,
            AffixLine::SetCompoundWordMax(v) => self.cfg.compound_word_max = Some(*v as usize),
            AffixLine::SetMaxCpdSugs(v) => self.cfg.maxcpdsugs = (*v).max(0) as usize,
            AffixLine::SetMaxNgramSugs(v) => self.cfg.maxngramsugs = (*v).max(0) as usize,
            AffixLine::SetMaxDiff(v) => self.cfg.maxdiff = *v as i32,
            AffixLine::SetFlag(key, v) => {
                let flag = Some(parse_one_flag(self.cfg.flag_mode, v)?);
                match *key {
                    "COMPOUNDBEGIN" => self.cfg.compound_begin = flag,
                    "COMPOUNDMIDDLE" => self.cfg.compound_middle = flag,
                    "COMPOUNDEND" => self.cfg.compound_end = flag,
                    "COMPOUNDFLAG" => self.cfg.compound_flag = flag,
                    "COMPOUNDPERMITFLAG" => self.cfg.compound_permit = flag,
                    "COMPOUNDFORBIDFLAG" => self.cfg.compound_forbid = flag,
                    "COMPOUNDROOT" => self.cfg.compound_root = flag,
                    "ONLYINCOMPOUND" => self.cfg.only_in_compound = flag,
                    "NOSUGGEST" => self.cfg.nosuggest = flag,
                    "CIRCUMFIX" => self.cfg.circumfix = flag,
                    "NEEDAFFIX" => self.cfg.need_affix = flag,
                    "FORBIDDENWORD" => self.cfg.forbidden_word = flag,
                    "WARN" => self.cfg.warn = flag,
                    "KEEPCASE" => self.cfg.keep_case = flag,
                    "FORCEUCASE" => self.cfg.force_ucase = flag,
                    _ => unreachable!(),
                }
            }
            AffixLine::SetBool(key) => match *key {
                "NOSPLITSUGS" => self.cfg.nosplitsugs = true,
                "SUGSWITHDOTS" => self.cfg.sugswithdots = true,
                "ONLYMAXDIFF" => self.cfg.onlymaxdiff = true,
                "FORBIDWARN" => self.cfg.forbidwarn = true,
                "CHECKCOMPOUNDDUP" => self.cfg.check_compound_dup = true,
                "CHECKCOMPOUNDREP" => self.cfg.check_compound_rep = true,
                "CHECKCOMPOUNDCASE" => self.cfg.check_compound_case = true,
                "CHECKCOMPOUNDTRIPLE" => self.cfg.check_compound_triple = true,
                "SIMPLIFIEDTRIPLE" => self.cfg.simplified_triple = true,
                _ => unreachable!(),
            },
            AffixLine::AddIconv(a, b) => {
                self.iconv_builder.push(a, b);
            }
            AffixLine::AddOconv(a, b) => {
                self.oconv_builder.push(a, b);
            }
            AffixLine::AddRep(a, b) => {
                self.rep_builder.push(a, b);
            }
            AffixLine::AddMap(group) => {
                self.cfg.map.push(group.chars().collect());
            }
            AffixLine::AddPhone(a, b) => {
                self.cfg.phone.push(a, b);
            }
            AffixLine::AddCompoundRule(r) => {
                self.cfg
                    .compound_rules
                    .push(CompoundRule::from_str(r, self.cfg.flag_mode)?);
            }
            AffixLine::AddCheckCompoundPattern(a, b) => {
                self.cfg
                    .check_compound_patterns
                    .push((a.to_string(), b.to_string()));
            }
            AffixLine::SetAfTable(_) => {}
            AffixLine::AfEntry(e) => self.af_entries.push(e.to_string()),
            AffixLine::SetAmTable(_) => {}
            AffixLine::AmEntry(e) => self.am_entries.push(e.to_string()),
            AffixLine::AffixHeader {
                kind,
                flag,
                cross_product,
                ..
            } => {
                self.flush_group()?;
                self.pending_group = Some((*kind, flag.to_string(), *cross_product, Vec::new()));
            }
            AffixLine::AffixRule {
                kind,
                flag,
                strip,
                add,
                condition,
                morph,
            } => {
                let (pending_kind, pending_flag, _, entries) =
                    self.pending_group.as_mut().ok_or_else(|| {
                        anyhow!("affix rule line without a preceding header")
                    })?;
                if *pending_kind != *kind || pending_flag != flag {
                    bail!("affix rule flag/kind mismatch with its group header");
                }
                entries.push(AffixEntry {
                    flag: parse_one_flag(self.cfg.flag_mode, flag)?,
                    strip: strip.to_string(),
                    add: add.to_string(),
                    condition: Condition::new(condition),
                    flags_on_result: FlagSet::from_flags(parse_flags(
                        self.cfg.flag_mode,
                        add.split('/').nth(1).unwrap_or(""),
                    )?),
                    morphology: parse_morph_tags(morph),
                });
            }
        }
        Ok(())
    }
}

fn parse_morph_tags(s: &str) -> Vec<(String, String)> {
    s.split_whitespace()
        .filter_map(|tok| tok.split_once(':'))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn affix_file(s: &str) -> IResult<&str, Vec<AffixLine>, AffError> {
    let (s, _) = opt(char(BYTE_ORDER_MARK)).parse(s)?;
    let (s, lines) = many0(terminated(line, ending))(s)?;
    let (s, _) = eof(s)?;
    Ok((s, lines))
}

/// Parse a complete `.aff` file's text into an `AffConfig`.
pub fn parse_affix_data(text: &str) -> Result<AffConfig> {
    let lines = match delimited(opt(char(BYTE_ORDER_MARK)), affix_file, eof)
        .parse(text)
        .finish()
    {
        Ok((_, lines)) => lines,
        Err(e) => return Err(anyhow!(e.to_string())),
    };
    let mut builder = Builder::new();
    for l in &lines {
        builder.apply(l).map_err(|e| anyhow!(e.to_string()))?;
    }
    builder.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_and_flags() {
        let text = "SET UTF-8\nFLAG long\nCOMPOUNDMIN 2\n";
        let cfg = parse_affix_data(text).unwrap();
        assert_eq!(cfg.flag_mode, FlagMode::DoubleCharFlags);
        assert_eq!(cfg.compound_min, 2);
    }

    #[test]
    fn test_simple_suffix_group() {
        let text = "SFX S Y 1\nSFX S 0 s .\n";
        let cfg = parse_affix_data(text).unwrap();
        let refs = cfg.affixes.matching_suffixes("cats");
        assert!(!refs.is_empty());
    }

    #[test]
    fn test_rep_and_map() {
        let text = "REP 1\nREP teh the\nMAP 1\nMAP ae\n";
        let cfg = parse_affix_data(text).unwrap();
        assert!(!cfg.rep.is_empty());
        assert_eq!(cfg.map.len(), 1);
    }

    #[test]
    fn test_compound_rule_directive() {
        let text = "COMPOUNDRULE 1\nCOMPOUNDRULE A*B\n";
        let cfg = parse_affix_data(text).unwrap();
        assert_eq!(cfg.compound_rules.len(), 1);
    }

    #[test]
    fn test_af_alias_table() {
        let text = "AF 2\nAF AB\nAF C\n";
        let cfg = parse_affix_data(text).unwrap();
        assert_eq!(cfg.flag_aliases.len(), 2);
    }

    #[test]
    fn test_rejects_non_utf8() {
        let text = "SET ISO8859-1\n";
        assert!(parse_affix_data(text).is_err());
    }
}

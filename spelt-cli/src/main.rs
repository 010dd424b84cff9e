use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use spelt::{HunspellDict, Speller};

/// Pipe-mode spellchecker driver: reads whitespace-separated words from
/// stdin, one line at a time, and reports each either as correct (`*`) or
/// misspelled with suggestions (`& word offset count: s1, s2, ...`),
/// mirroring Hunspell's `-a` pipe protocol.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Path to the .dic wordlist file.
    #[clap(short, long)]
    dic: PathBuf,
    /// Path to the .aff affix file.
    #[clap(short, long)]
    aff: PathBuf,
    /// Optional personal dictionary of additional accepted words, one per
    /// line. Created if it doesn't exist yet.
    #[clap(short, long)]
    personal_dict: Option<PathBuf>,
    /// Maximum number of suggestions to print per misspelled word.
    #[clap(short, long, default_value_t = 15)]
    max_suggestions: usize,
}

fn check_line(speller: &dyn Speller, line: &str, max_suggestions: usize, out: &mut impl Write) -> Result<()> {
    for (offset, word) in word_offsets(line) {
        if word.chars().count() <= 1 || speller.spellcheck(word) {
            writeln!(out, "*")?;
            continue;
        }
        let suggestions = speller.suggestions(word, max_suggestions);
        if suggestions.is_empty() {
            writeln!(out, "# {} {}", word, offset)?;
        } else {
            writeln!(out, "& {} {} {}: {}", word, suggestions.len(), offset, suggestions.join(", "))?;
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Split `line` into its whitespace-delimited words, each paired with its
/// byte offset within the line (Hunspell's pipe protocol reports offsets,
/// not word indices).
fn word_offsets(line: &str) -> impl Iterator<Item = (usize, &str)> {
    line.split_whitespace().map(move |word| {
        let offset = word.as_ptr() as usize - line.as_ptr() as usize;
        (offset, word)
    })
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let mut speller =
        HunspellDict::new(&args.dic, &args.aff).with_context(|| "Could not load dictionary")?;

    if let Some(path) = &args.personal_dict {
        let added = speller
            .set_user_dict(path)
            .with_context(|| format!("Could not read personal dictionary {}", path.display()))?;
        eprintln!("Loaded {} words from personal dictionary", added);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "@spelt")?;
    for line in stdin.lock().lines() {
        let line = line.with_context(|| "Could not read from stdin")?;
        check_line(&speller, &line, args.max_suggestions, &mut out)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_word_offsets() {
        let offsets: Vec<_> = word_offsets("foo  bar").collect();
        assert_eq!(offsets, vec![(0, "foo"), (5, "bar")]);
    }
}

/// Calculate a score for the similarity between `str1` and `str2`.
/// `len1` must be the length of `str1` in chars.
/// `len2` must be the length of `str2` in chars.
/// `nmax` is a bound on how large chunks should be considered for similarity.
pub fn ngram(nmax: usize, str1: &str, len1: usize, str2: &str, len2: usize) -> usize {
    let mut score = 0;

    // handle n = 1 as a special case because it is so much simpler
    for c1 in str1.chars() {
        for c2 in str2.chars() {
            score += (c1 == c2) as usize
        }
    }
    if nmax == 1 || score <= 1 {
        return score;
    }

    for n in 2..=nmax {
        let mut nscore = 0;
        if n > len1 || n > len2 {
            break;
        }
        for (i1, _) in str1.char_indices().take(len1 + 1 - n) {
            for (i2, _) in str2.char_indices().take(len2 + 1 - n) {
                let eq = str1[i1..]
                    .chars()
                    .take(n)
                    .zip(str2[i2..].chars().take(n))
                    .filter(|(c1, c2)| c1 == c2)
                    .count();
                if eq == n {
                    nscore += 1;
                }
            }
        }
        score += nscore * n;
        if nscore <= 1 {
            // If there's only 1 hit of this size, there are no longer hits
            break;
        }
    }

    score
}

/// Knobs for the weighted variant of `ngram` used by the suggest
/// orchestrator's n-gram rescoring pass (spec.md §4.6 step 5).
#[derive(Clone, Copy, Debug, Default)]
pub struct NgramOpts {
    /// Subtract one point for every position, in the shared prefix length,
    /// where the two strings disagree.
    pub any_mismatch_penalty: bool,
    /// Penalize `str2` being longer than `str1` (the misspelling): every
    /// extra trailing char costs a point.
    pub longer_worse: bool,
    /// Use a per-n weight of `n` instead of a flat count (this is what the
    /// unweighted `ngram()` above already does at n>=2; `weighted` extends
    /// the same idea down to n=1 so single-character hits no longer tie
    /// with zero-hit pairs).
    pub weighted: bool,
}

/// Weighted n-gram score, as used to rescore n-gram-expanded surface forms
/// against the original misspelling (spec.md §4.6 step 5's `score2`).
pub fn ngram_weighted(nmax: usize, str1: &str, str2: &str, opts: NgramOpts) -> isize {
    let len1 = str1.chars().count();
    let len2 = str2.chars().count();
    let mut score = ngram(nmax, str1, len1, str2, len2) as isize;

    if opts.weighted && score == 0 {
        // Unweighted bailed out before counting 1-grams meaningfully only
        // when there were 0 or 1 matches; credit lone matches here so a
        // single shared letter still edges out a totally disjoint pair.
        for c1 in str1.chars() {
            for c2 in str2.chars() {
                if c1 == c2 {
                    score += 1;
                }
            }
        }
    }

    if opts.any_mismatch_penalty {
        let shared = len1.min(len2);
        let mismatches = str1
            .chars()
            .zip(str2.chars())
            .take(shared)
            .filter(|(a, b)| a != b)
            .count();
        score -= mismatches as isize;
    }

    if opts.longer_worse && len2 > len1 {
        score -= (len2 - len1) as isize;
    }

    score
}

/// Length of the shared prefix of `s1` and `s2`. Comparison is
/// case-insensitive when `s2`'s first character is uppercase, matching
/// Hunspell's habit of comparing a dictionary stem (often capitalized in a
/// proper-noun dictionary) against a lowercase misspelling.
pub fn leftcommonsubstring(s1: &str, s2: &str) -> usize {
    let fold = s2.chars().next().map_or(false, |c| c.is_uppercase());
    let mut c1 = s1.chars();
    let mut c2 = s2.chars();
    let mut n = 0;
    loop {
        match (c1.next(), c2.next()) {
            (Some(a), Some(b)) => {
                let eq = if fold {
                    a.to_lowercase().eq(b.to_lowercase())
                } else {
                    a == b
                };
                if !eq {
                    break;
                }
                n += 1;
            }
            _ => break,
        }
    }
    n
}

/// Count of character positions where `s1` and `s2` hold the same
/// character, up to the length of the shorter string. Used as a
/// tie-breaker between candidates with the same n-gram score.
pub fn commoncharacterpositions(s1: &str, s2: &str) -> usize {
    s1.chars().zip(s2.chars()).filter(|(a, b)| a == b).count()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ngram_scores() {
        assert_eq!(0, ngram(1, "foo", 3, "bar", 3));
        assert_eq!(6, ngram(1, "awooo", 5, "foo", 3));
        assert_eq!(6, ngram(1, "awooo", 5, "foo", 3));
        assert_eq!(10, ngram(2, "awooo", 5, "foo", 3));
        assert_eq!(10, ngram(3, "awooo", 5, "foo", 3));
        assert_eq!(9, ngram(1, "awooo", 5, "awooga", 6));
        assert_eq!(17, ngram(2, "awooo", 5, "awooga", 6));
        assert_eq!(23, ngram(3, "awooo", 5, "awooga", 6));
        assert_eq!(27, ngram(4, "awooo", 5, "awooga", 6));
        assert_eq!(27, ngram(5, "awooo", 5, "awooga", 6));
    }

    #[test]
    fn test_leftcommonsubstring() {
        assert_eq!(3, leftcommonsubstring("foobar", "foobaz"));
        assert_eq!(0, leftcommonsubstring("foobar", "bazfoo"));
        assert_eq!(3, leftcommonsubstring("foobar", "FOObaz"));
    }

    #[test]
    fn test_commoncharacterpositions() {
        assert_eq!(2, commoncharacterpositions("abcd", "axcy"));
        assert_eq!(0, commoncharacterpositions("abcd", "wxyz"));
    }

    #[test]
    fn test_ngram_weighted_penalizes_length() {
        let opts = NgramOpts {
            longer_worse: true,
            ..Default::default()
        };
        let short = ngram_weighted(3, "cat", "cat", opts);
        let long = ngram_weighted(3, "cat", "catastrophe", opts);
        assert!(short > long);
    }
}

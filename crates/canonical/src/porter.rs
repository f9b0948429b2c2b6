//! Porter stemmer for English.
//!
//! Implements the five-step suffix-stripping algorithm from M. F. Porter,
//! "An algorithm for suffix stripping" (1980), with the widely deployed
//! refinements:
//!
//! - words of one or two letters are returned unchanged
//! - a small table of irregular forms short-circuits the rules
//! - `ies`/`ied` on four-letter words keep their `e` (`dies` → `die`)
//! - `y` → `i` only after a consonant, and only when the stem is longer than
//!   one letter (`sky` stays, `happy` → `happi`)
//! - step 2 uses `bli` → `ble` and adds `fulli`, `lessli`, `logi`
//!
//! Letters are handled as Unicode scalar values. Anything that is not one of
//! `a e i o u` (or a `y` following a consonant) counts as a consonant, so
//! non-English input passes through without panicking.

/// Irregular forms mapped straight to their stem.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("sky", "sky"),
    ("skies", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

/// Upper bound on re-stemming passes in [`stem_stable`].
const MAX_STEM_PASSES: usize = 16;

/// Condition a stem must satisfy before a rule rewrites its suffix.
#[derive(Clone, Copy)]
enum Cond {
    Always,
    /// m > 0
    Positive,
    /// m > 1
    Above1,
    /// m > 1 and the stem ends in `s` or `t`
    Above1St,
    /// m > 0 measured on the stem plus the first letter of the suffix
    PositiveKeepFirst,
}

struct Rule {
    suffix: &'static str,
    replacement: &'static str,
    cond: Cond,
}

const fn rule(suffix: &'static str, replacement: &'static str, cond: Cond) -> Rule {
    Rule {
        suffix,
        replacement,
        cond,
    }
}

const STEP1A: &[Rule] = &[
    rule("sses", "ss", Cond::Always),
    rule("ies", "i", Cond::Always),
    rule("ss", "ss", Cond::Always),
    rule("s", "", Cond::Always),
];

const STEP2: &[Rule] = &[
    rule("ational", "ate", Cond::Positive),
    rule("tional", "tion", Cond::Positive),
    rule("enci", "ence", Cond::Positive),
    rule("anci", "ance", Cond::Positive),
    rule("izer", "ize", Cond::Positive),
    rule("bli", "ble", Cond::Positive),
    rule("alli", "al", Cond::Positive),
    rule("entli", "ent", Cond::Positive),
    rule("eli", "e", Cond::Positive),
    rule("ousli", "ous", Cond::Positive),
    rule("ization", "ize", Cond::Positive),
    rule("ation", "ate", Cond::Positive),
    rule("ator", "ate", Cond::Positive),
    rule("alism", "al", Cond::Positive),
    rule("iveness", "ive", Cond::Positive),
    rule("fulness", "ful", Cond::Positive),
    rule("ousness", "ous", Cond::Positive),
    rule("aliti", "al", Cond::Positive),
    rule("iviti", "ive", Cond::Positive),
    rule("biliti", "ble", Cond::Positive),
    rule("fulli", "ful", Cond::Positive),
    rule("lessli", "less", Cond::Positive),
    rule("logi", "log", Cond::PositiveKeepFirst),
];

const STEP3: &[Rule] = &[
    rule("icate", "ic", Cond::Positive),
    rule("ative", "", Cond::Positive),
    rule("alize", "al", Cond::Positive),
    rule("iciti", "ic", Cond::Positive),
    rule("ical", "ic", Cond::Positive),
    rule("ful", "", Cond::Positive),
    rule("ness", "", Cond::Positive),
];

const STEP4: &[Rule] = &[
    rule("al", "", Cond::Above1),
    rule("ance", "", Cond::Above1),
    rule("ence", "", Cond::Above1),
    rule("er", "", Cond::Above1),
    rule("ic", "", Cond::Above1),
    rule("able", "", Cond::Above1),
    rule("ible", "", Cond::Above1),
    rule("ant", "", Cond::Above1),
    rule("ement", "", Cond::Above1),
    rule("ment", "", Cond::Above1),
    rule("ent", "", Cond::Above1),
    rule("ion", "", Cond::Above1St),
    rule("ou", "", Cond::Above1),
    rule("ism", "", Cond::Above1),
    rule("ate", "", Cond::Above1),
    rule("iti", "", Cond::Above1),
    rule("ous", "", Cond::Above1),
    rule("ive", "", Cond::Above1),
    rule("ize", "", Cond::Above1),
];

/// Reduces a single word to its Porter stem.
///
/// The word is lowercased first. One pass of the algorithm is applied; see
/// [`stem_stable`] for the fixed-point variant used by the normalizer.
///
/// ```rust
/// use canonical::stem;
///
/// assert_eq!(stem("running"), "run");
/// assert_eq!(stem("generalizations"), "gener");
/// assert_eq!(stem("is"), "is");
/// ```
pub fn stem(word: &str) -> String {
    let lowered = word.to_lowercase();
    if let Some((_, irregular)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == lowered) {
        return (*irregular).to_string();
    }

    let mut w: Vec<char> = lowered.chars().collect();
    if w.len() <= 2 {
        return lowered;
    }

    step1a(&mut w);
    step1b(&mut w);
    step1c(&mut w);
    step2(&mut w);
    apply_rules(&mut w, STEP3);
    apply_rules(&mut w, STEP4);
    step5a(&mut w);
    step5b(&mut w);

    w.into_iter().collect()
}

/// Stems a word repeatedly until the result no longer changes.
///
/// A single Porter pass is not idempotent (`agreed` → `agre` → `agr`);
/// normalized text is compared against text that may itself have been
/// normalized, so the normalizer needs `stem_stable(stem_stable(w)) ==
/// stem_stable(w)`.
pub fn stem_stable(word: &str) -> String {
    let mut current = stem(word);
    for _ in 0..MAX_STEM_PASSES {
        let next = stem(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn is_consonant(w: &[char], i: usize) -> bool {
    match w[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Porter's m: the number of vowel-consonant sequences in the stem.
fn measure(w: &[char]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..w.len() {
        let consonant = is_consonant(w, i);
        if consonant && prev_vowel {
            m += 1;
        }
        prev_vowel = !consonant;
    }
    m
}

fn contains_vowel(w: &[char]) -> bool {
    (0..w.len()).any(|i| !is_consonant(w, i))
}

fn ends_double_consonant(w: &[char]) -> bool {
    let n = w.len();
    n >= 2 && w[n - 1] == w[n - 2] && is_consonant(w, n - 1)
}

/// `*o`: the stem ends consonant-vowel-consonant and the last consonant is
/// not `w`, `x` or `y`. Two-letter vowel-consonant stems also qualify.
fn ends_cvc(w: &[char]) -> bool {
    let n = w.len();
    if n >= 3 {
        is_consonant(w, n - 3)
            && !is_consonant(w, n - 2)
            && is_consonant(w, n - 1)
            && !matches!(w[n - 1], 'w' | 'x' | 'y')
    } else {
        n == 2 && !is_consonant(w, 0) && is_consonant(w, 1)
    }
}

fn ends_with(w: &[char], suffix: &str) -> bool {
    let len = suffix.chars().count();
    len <= w.len() && w[w.len() - len..].iter().copied().eq(suffix.chars())
}

fn replace_suffix(w: &mut Vec<char>, suffix: &str, replacement: &str) {
    let len = suffix.chars().count();
    w.truncate(w.len() - len);
    w.extend(replacement.chars());
}

fn holds(cond: Cond, stem: &[char], suffix_head: Option<char>) -> bool {
    match cond {
        Cond::Always => true,
        Cond::Positive => measure(stem) > 0,
        Cond::Above1 => measure(stem) > 1,
        Cond::Above1St => measure(stem) > 1 && matches!(stem.last(), Some('s' | 't')),
        Cond::PositiveKeepFirst => {
            let mut extended = stem.to_vec();
            extended.extend(suffix_head);
            measure(&extended) > 0
        }
    }
}

/// Applies the first rule whose suffix matches. A matching suffix whose
/// condition fails still ends the search.
fn apply_rules(w: &mut Vec<char>, rules: &[Rule]) -> bool {
    for r in rules {
        if !ends_with(w, r.suffix) {
            continue;
        }
        let stem_len = w.len() - r.suffix.chars().count();
        if holds(r.cond, &w[..stem_len], r.suffix.chars().next()) {
            replace_suffix(w, r.suffix, r.replacement);
            return true;
        }
        return false;
    }
    false
}

fn step1a(w: &mut Vec<char>) {
    if w.len() == 4 && ends_with(w, "ies") {
        replace_suffix(w, "ies", "ie");
        return;
    }
    apply_rules(w, STEP1A);
}

fn step1b(w: &mut Vec<char>) {
    if ends_with(w, "ied") {
        let replacement = if w.len() == 4 { "ie" } else { "i" };
        replace_suffix(w, "ied", replacement);
        return;
    }

    if ends_with(w, "eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            replace_suffix(w, "eed", "ee");
        }
        return;
    }

    let removed = ["ed", "ing"].into_iter().find(|suffix| {
        ends_with(w, suffix) && contains_vowel(&w[..w.len() - suffix.chars().count()])
    });
    let Some(suffix) = removed else {
        return;
    };
    replace_suffix(w, suffix, "");

    if ends_with(w, "at") {
        replace_suffix(w, "at", "ate");
    } else if ends_with(w, "bl") {
        replace_suffix(w, "bl", "ble");
    } else if ends_with(w, "iz") {
        replace_suffix(w, "iz", "ize");
    } else if ends_double_consonant(w) {
        if !matches!(w.last(), Some('l' | 's' | 'z')) {
            w.pop();
        }
    } else if measure(w) == 1 && ends_cvc(w) {
        w.push('e');
    }
}

fn step1c(w: &mut Vec<char>) {
    let n = w.len();
    if n > 2 && w[n - 1] == 'y' && is_consonant(w, n - 2) {
        w[n - 1] = 'i';
    }
}

fn step2(w: &mut Vec<char>) {
    // `alli` → `al` runs first and feeds its result back through step 2,
    // so `-alli` words can still pick up the `aliti`/`alism` family.
    if ends_with(w, "alli") && measure(&w[..w.len() - 4]) > 0 {
        replace_suffix(w, "alli", "al");
        step2(w);
        return;
    }
    apply_rules(w, STEP2);
}

fn step5a(w: &mut Vec<char>) {
    if w.last() != Some(&'e') {
        return;
    }
    let stem = &w[..w.len() - 1];
    let m = measure(stem);
    if m > 1 || (m == 1 && !ends_cvc(stem)) {
        w.pop();
    }
}

fn step5b(w: &mut Vec<char>) {
    if ends_with(w, "ll") && measure(&w[..w.len() - 1]) > 1 {
        w.pop();
    }
}

//! Rule-based English lemmatizer.
//!
//! Maps inflected forms to a base form without a trained model:
//! 1. Irregular forms come from a lookup table (`led` → `lead`).
//! 2. `-ing` / `-ed` / `-ied` are stripped. Doubled final consonants are
//!    undoubled and a silent `e` is restored from the stem's ending.
//! 3. Plurals are reduced (`-ies` → `-y`, `-xes` → `-x`, `-s` → ``).
//!
//! The output is not always a dictionary word, but it is deterministic, so
//! inflected variants in two documents land on the same lemma.

use std::collections::{HashMap, HashSet};

const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("began", "begin"),
    ("begun", "begin"),
    ("bought", "buy"),
    ("brought", "bring"),
    ("built", "build"),
    ("came", "come"),
    ("caught", "catch"),
    ("children", "child"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("criteria", "criterion"),
    ("dealt", "deal"),
    ("driven", "drive"),
    ("drove", "drive"),
    ("feet", "foot"),
    ("felt", "feel"),
    ("fought", "fight"),
    ("found", "find"),
    ("gave", "give"),
    ("given", "give"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("held", "hold"),
    ("indices", "index"),
    ("kept", "keep"),
    ("knew", "know"),
    ("known", "know"),
    ("led", "lead"),
    ("left", "leave"),
    ("lost", "lose"),
    ("matrices", "matrix"),
    ("meant", "mean"),
    ("men", "man"),
    ("met", "meet"),
    ("oversaw", "oversee"),
    ("overseen", "oversee"),
    ("paid", "pay"),
    ("ran", "run"),
    ("rebuilt", "rebuild"),
    ("saw", "see"),
    ("seen", "see"),
    ("sent", "send"),
    ("sold", "sell"),
    ("sought", "seek"),
    ("spent", "spend"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("stood", "stand"),
    ("taken", "take"),
    ("taught", "teach"),
    ("teeth", "tooth"),
    ("thought", "think"),
    ("told", "tell"),
    ("took", "take"),
    ("undertook", "undertake"),
    ("understood", "understand"),
    ("vertices", "vertex"),
    ("went", "go"),
    ("women", "woman"),
    ("won", "win"),
    ("writing", "write"),
    ("written", "write"),
    ("wrote", "write"),
];

/// Base forms ending in a silent `e` that the ending rules in
/// [`needs_silent_e`] do not recover.
const SILENT_E_LEMMAS: &[&str] = &[
    "adhere", "cache", "cite", "complete", "compete", "console", "cope", "create", "delete",
    "demote", "devote", "escape", "excite", "explore", "hope", "ignore", "interfere", "invite",
    "niche", "note", "persuade", "pipe", "promote", "quote", "recite", "recreate", "restore",
    "scale", "scope", "score", "scrape", "shape", "store", "tape", "unite", "vote", "wipe",
];

/// Words that look inflected but are already base forms.
const INVARIANT_WORDS: &[&str] = &[
    "alias", "atlas", "bed", "bias", "bleed", "breed", "canvas", "deed", "embed", "exceed",
    "feed", "gas", "greed", "heed", "hundred", "kubernetes", "naked", "need", "news", "proceed",
    "red", "sacred", "sales", "seed", "series", "shed", "species", "speed", "succeed", "wed",
    "weed",
];

pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    silent_e: HashSet<&'static str>,
    invariant: HashSet<&'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR_FORMS.iter().copied().collect(),
            silent_e: SILENT_E_LEMMAS.iter().copied().collect(),
            invariant: INVARIANT_WORDS.iter().copied().collect(),
        }
    }

    /// Returns the lemma of a lowercase, purely alphabetic word.
    pub fn lemma(&self, word: &str) -> String {
        if let Some(base) = self.irregular.get(word) {
            return base.to_string();
        }
        if self.invariant.contains(word) {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ing") {
            return self.verb_base(stem).unwrap_or_else(|| word.to_string());
        }
        if let Some(stem) = word.strip_suffix("ied") {
            if word.chars().count() > 4 {
                return format!("{stem}y");
            }
        }
        if let Some(stem) = word.strip_suffix("ed") {
            // agreed -> agree
            if stem.ends_with('e') {
                return stem.to_string() + "e";
            }
            return self.verb_base(stem).unwrap_or_else(|| word.to_string());
        }

        self.singular(word)
    }

    fn verb_base(&self, stem: &str) -> Option<String> {
        let chars: Vec<char> = stem.chars().collect();
        if chars.len() < 3 || !chars.iter().any(|c| is_vowel(*c) || *c == 'y') {
            return None;
        }

        let n = chars.len();
        let last = chars[n - 1];
        let doubled = last == chars[n - 2] && is_consonant(last);
        if n >= 4 && doubled && !matches!(last, 'f' | 'l' | 's' | 'z') {
            return Some(chars[..n - 1].iter().collect());
        }

        let restored = format!("{stem}e");
        if self.silent_e.contains(restored.as_str()) || needs_silent_e(&chars) {
            return Some(restored);
        }
        Some(stem.to_string())
    }

    fn singular(&self, word: &str) -> String {
        if word.chars().count() <= 3 {
            return word.to_string();
        }
        if ["ss", "us", "is", "ics"].iter().any(|s| word.ends_with(s)) {
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
        if let Some(stem) = word.strip_suffix("sses") {
            return format!("{stem}ss");
        }
        if ["xes", "ches", "shes", "zzes"].iter().any(|s| word.ends_with(s)) {
            let stem = &word[..word.len() - 2];
            let restored = format!("{stem}e");
            if self.silent_e.contains(restored.as_str()) {
                return restored;
            }
            return stem.to_string();
        }
        match word.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !is_vowel(c)
}

/// Whether a stripped verb stem lost a silent `e`, judged by its ending.
/// `chars` has at least three letters.
fn needs_silent_e(chars: &[char]) -> bool {
    let n = chars.len();
    let last = chars[n - 1];
    let prev = chars[n - 2];
    let before = chars[n - 3];
    let ending: String = chars[n - 2..].iter().collect();

    if matches!(last, 'v' | 'u') {
        return true;
    }
    if matches!(
        ending.as_str(),
        "iz" | "yz" | "ys" | "yp" | "yl" | "dg" | "ps" | "rs" | "ns" | "ls" | "nc" | "rc" | "uc"
            | "ac" | "ic" | "ag" | "rg" | "as" | "is"
    ) {
        return true;
    }
    if ending == "at" {
        return !matches!(before, 'e' | 'o');
    }
    if ending == "ng" {
        return (before == 'a' && n >= 5) || before == 'e';
    }
    if ending == "us" {
        return before == 'a';
    }
    if last == 'l' && matches!(prev, 'b' | 'c' | 'd' | 'f' | 'g' | 'k' | 'p' | 't' | 'z') {
        return true;
    }
    // requir(e), acquir(e)
    if ending == "ir" && before == 'u' && n >= 4 && chars[n - 4] == 'q' {
        return true;
    }

    is_consonant(before)
        && matches!(
            (prev, last),
            ('a', 'd')
                | ('i', 'd')
                | ('o', 'd')
                | ('u', 'd')
                | ('i', 'n')
                | ('u', 'n')
                | ('a', 'k')
                | ('i', 'k')
                | ('o', 'k')
                | ('a', 'm')
                | ('i', 'm')
                | ('o', 'm')
                | ('u', 'm')
                | ('a', 'r')
                | ('i', 'r')
                | ('u', 'r')
                | ('u', 't')
                | ('i', 'l')
                | ('o', 's')
        )
}

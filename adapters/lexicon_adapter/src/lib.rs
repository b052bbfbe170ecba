//! Lexicon-based polarity scorer.
//!
//! Each known word carries a polarity in [-1, 1]. An intensifier right before
//! a word scales it, a negation shortly before a word flips and dampens it.
//! The text score is the mean over scored words, clamped to [-1, 1].

use sentiment_core::ports::PolarityScorer;
use std::collections::{HashMap, HashSet};

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("blessed", 0.6),
    ("brilliant", 0.9),
    ("calm", 0.3),
    ("celebrate", 0.5),
    ("cheerful", 0.6),
    ("confident", 0.5),
    ("cool", 0.35),
    ("delighted", 0.7),
    ("delightful", 0.8),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("exciting", 0.3),
    ("fantastic", 0.4),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("grateful", 0.6),
    ("great", 0.8),
    ("happy", 0.8),
    ("hope", 0.3),
    ("hopeful", 0.4),
    ("incredible", 0.9),
    ("inspired", 0.5),
    ("inspiring", 0.6),
    ("joy", 0.8),
    ("joyful", 0.8),
    ("kind", 0.6),
    ("like", 0.2),
    ("lovely", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("loving", 0.6),
    ("lucky", 0.5),
    ("nice", 0.6),
    ("peaceful", 0.5),
    ("perfect", 1.0),
    ("pleasant", 0.7),
    ("positive", 0.23),
    ("proud", 0.8),
    ("relaxed", 0.4),
    ("success", 0.5),
    ("successful", 0.75),
    ("super", 0.33),
    ("thankful", 0.5),
    ("thrilled", 0.6),
    ("win", 0.8),
    ("wonderful", 1.0),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("afraid", -0.6),
    ("alone", -0.3),
    ("angry", -0.5),
    ("annoyed", -0.4),
    ("annoying", -0.8),
    ("anxious", -0.25),
    ("awful", -1.0),
    ("bad", -0.7),
    ("bitter", -0.4),
    ("boring", -1.0),
    ("broken", -0.4),
    ("cruel", -1.0),
    ("depressed", -0.5),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("disgusting", -1.0),
    ("dull", -0.3),
    ("fail", -0.5),
    ("failed", -0.5),
    ("fear", -0.5),
    ("frustrated", -0.7),
    ("frustrating", -0.6),
    ("hate", -0.8),
    ("hated", -0.9),
    ("horrible", -1.0),
    ("hurt", -0.5),
    ("lonely", -0.5),
    ("lost", -0.3),
    ("mad", -0.6),
    ("miserable", -1.0),
    ("negative", -0.3),
    ("painful", -0.7),
    ("poor", -0.4),
    ("regret", -0.5),
    ("sad", -0.5),
    ("scared", -0.5),
    ("sick", -0.7),
    ("sorry", -0.5),
    ("stressed", -0.6),
    ("terrible", -1.0),
    ("tired", -0.4),
    ("ugly", -0.7),
    ("unhappy", -0.6),
    ("upset", -0.5),
    ("worried", -0.5),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Words that scale the polarity of the word right after them
const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.3),
    ("too", 1.2),
    ("totally", 1.3),
    ("very", 1.3),
    ("slightly", 0.5),
    ("somewhat", 0.6),
];

// Apostrophes are gone after cleaning, so contractions appear fused
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nothing", "cannot", "cant", "dont",
    "doesnt", "didnt", "isnt", "wasnt", "arent", "werent", "wont", "wouldnt", "shouldnt",
    "couldnt", "hardly",
];

/// Factor applied to a negated word
const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: HashSet<String>,
    /// How many words after a negation it still applies to
    negation_window: usize,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            lexicon: POSITIVE_WORDS
                .iter()
                .chain(NEGATIVE_WORDS)
                .map(|(word, score)| (word.to_string(), *score))
                .collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(word, factor)| (word.to_string(), *factor))
                .collect(),
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
            negation_window: 3,
        }
    }

    /// Adds or overrides a lexicon entry; the score is clamped to [-1, 1]
    pub fn with_word(mut self, word: &str, score: f64) -> Self {
        self.lexicon
            .insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
        self
    }

    pub fn with_negation_window(mut self, window: usize) -> Self {
        self.negation_window = window;
        self
    }

    fn next_is_scored(&self, text: &str, i: usize) -> bool {
        text.split_whitespace()
            .nth(i + 1)
            .map(|next| self.lexicon.contains_key(&next.to_lowercase()))
            .unwrap_or(false)
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let mut total = 0.0;
        let mut scored = 0usize;
        let mut modifier = 1.0;
        let mut last_negation: Option<usize> = None;

        for (i, token) in text.split_whitespace().enumerate() {
            let word = token.to_lowercase();

            if self.negations.contains(&word) {
                last_negation = Some(i);
                continue;
            }

            let base = self.lexicon.get(&word).copied();

            // "super" is both a word and an intensifier; prefer the intensifier
            // when another scored word follows
            if let Some(&factor) = self.intensifiers.get(&word) {
                if base.is_none() || self.next_is_scored(text, i) {
                    modifier = factor;
                    continue;
                }
            }

            let Some(base) = base else {
                modifier = 1.0;
                continue;
            };

            let mut score = base * modifier;
            if let Some(neg) = last_negation {
                if i - neg <= self.negation_window {
                    score *= NEGATION_FACTOR;
                }
                last_negation = None;
            }

            total += score;
            scored += 1;
            modifier = 1.0;
        }

        if scored == 0 {
            return 0.0;
        }
        (total / scored as f64).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::new().polarity(text)
    }

    #[test]
    fn test_neutral_text_scores_zero() {
        assert_eq!(score("check this out"), 0.0);
        assert_eq!(score(""), 0.0);
        assert_eq!(score("   "), 0.0);
    }

    #[test]
    fn test_positive_and_negative_words() {
        assert!(score("what a great day") > 0.0);
        assert!(score("this is terrible") < 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert!(score("not good") < 0.0);
        assert!(score("i dont like it") < 0.0);
        assert!(score("never been this sad") > 0.0);
    }

    #[test]
    fn test_negation_window_expires() {
        let scorer = LexiconScorer::new().with_negation_window(1);
        assert!(scorer.polarity("not at all a good idea") > 0.0);
    }

    #[test]
    fn test_intensifier_scales_score() {
        assert!(score("very good") > score("good"));
        assert!(score("slightly bad") > score("bad"));
    }

    #[test]
    fn test_super_as_word_and_intensifier() {
        assert!(score("super") > 0.0);
        assert!(score("super happy") > score("happy"));
    }

    #[test]
    fn test_score_is_clamped() {
        let s = score("absolutely awesome absolutely perfect");
        assert!((-1.0..=1.0).contains(&s));
        assert_eq!(s, 1.0);
    }

    #[test]
    fn test_mixed_text_averages() {
        assert_eq!(score("good bad"), 0.0);
    }

    #[test]
    fn test_custom_word() {
        let scorer = LexiconScorer::new().with_word("Bullish", 2.0);
        assert_eq!(scorer.polarity("bullish"), 1.0);
    }

    #[test]
    fn test_deterministic() {
        let scorer = LexiconScorer::new();
        let text = "really happy but a bit tired";
        assert_eq!(scorer.polarity(text), scorer.polarity(text));
    }
}

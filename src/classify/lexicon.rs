//! Word-weight lexicon classifier for business news

use crate::classify::{Classification, ClassificationError, SentimentClassifier};
use crate::config::ClassifierConfig;
use crate::model::Sentiment;

/// Scores at or beyond this distance from zero get a non-neutral label
pub const LABEL_MARGIN: f32 = 0.2;

/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("growth", 0.4),
    ("growing", 0.3),
    ("profit", 0.4),
    ("profitable", 0.4),
    ("record", 0.3),
    ("success", 0.5),
    ("successful", 0.5),
    ("award", 0.4),
    ("wins", 0.4),
    ("win", 0.4),
    ("expands", 0.3),
    ("expansion", 0.3),
    ("partnership", 0.3),
    ("innovative", 0.4),
    ("praised", 0.5),
    ("strong", 0.3),
    ("leading", 0.3),
    ("launch", 0.2),
    ("gains", 0.3),
    ("excellent", 0.5),
    ("great", 0.4),
    ("good", 0.3),
    // Negative signals
    ("fraud", -0.7),
    ("scam", -0.7),
    ("lawsuit", -0.5),
    ("sued", -0.5),
    ("corruption", -0.7),
    ("bribery", -0.7),
    ("arrest", -0.6),
    ("arrested", -0.6),
    ("charged", -0.5),
    ("illegal", -0.6),
    ("penalty", -0.4),
    ("fined", -0.4),
    ("investigation", -0.4),
    ("probe", -0.4),
    ("scandal", -0.6),
    ("controversy", -0.4),
    ("losses", -0.4),
    ("loss", -0.3),
    ("layoffs", -0.4),
    ("bankruptcy", -0.7),
    ("decline", -0.3),
    ("failed", -0.4),
    ("failure", -0.4),
    ("allegations", -0.4),
    ("bad", -0.4),
    ("worst", -0.6),
];

/// Scores a text with the lexicon
///
/// Splits text into lowercase words, sums matching weights, and clamps the
/// result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if let Some(&(_, weight)) = LEXICON.iter().find(|(lex_word, _)| *lex_word == w) {
            score += weight;
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Built-in classifier: lexicon label plus keyword flag
///
/// The label only sees the first `max_input_chars` characters of the text.
/// The negative flag is a case-insensitive substring search over the whole
/// text, so it can fire on a page whose label is positive.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    max_input_chars: usize,
    negative_keywords: Vec<String>,
}

impl LexiconClassifier {
    pub fn new(max_input_chars: usize, negative_keywords: Vec<String>) -> Self {
        Self {
            max_input_chars,
            negative_keywords: negative_keywords
                .into_iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.max_input_chars, config.negative_keywords.clone())
    }

    fn has_negative_keyword(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.negative_keywords
            .iter()
            .any(|keyword| lower.contains(keyword.as_str()))
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<Classification, ClassificationError> {
        if text.trim().is_empty() {
            return Err(ClassificationError::EmptyInput);
        }

        let head: String = text.chars().take(self.max_input_chars).collect();
        let score = lexicon_score(&head);
        let label = if score >= LABEL_MARGIN {
            Sentiment::Positive
        } else if score <= -LABEL_MARGIN {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        Ok(Classification {
            label,
            negative_flag: self.has_negative_keyword(text),
        })
    }
}

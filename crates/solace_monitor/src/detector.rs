//! Keyword-based safety-signal detection.
//!
//! Stateless and total: a pure function of the input string plus the
//! configured lexicon. Intentionally simple lexical matching; in
//! production the lexicon is where deployments tune behavior, not the
//! mechanism.

use solace_core::{Lexicon, Sentiment, SignalReport};

/// Score one utterance for sentiment polarity, confusion and emergency.
///
/// Never fails: absence of matches yields neutral/false/false. Matching
/// is substring containment against the lowercased utterance, counting
/// each lexicon entry at most once.
pub fn analyze(text: &str, lexicon: &Lexicon) -> SignalReport {
    let lower = text.to_lowercase();

    let positive = contained(&lexicon.positive, &lower).len() as f32;
    let negative = contained(&lexicon.negative, &lower).len() as f32;
    let confusion_phrases = contained(&lexicon.confusion, &lower);
    let emergency_phrases = contained(&lexicon.emergency, &lower);

    let sentiment = if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    // Raw polarity from the same counts; bounded well inside [-1, 1].
    let score = (positive - negative) / (positive + negative + 1.0);

    SignalReport {
        sentiment,
        confusion: !confusion_phrases.is_empty(),
        emergency: !emergency_phrases.is_empty(),
        confusion_phrases,
        emergency_phrases,
        score,
    }
}

fn contained(phrases: &[String], lower_text: &str) -> Vec<String> {
    phrases
        .iter()
        .filter(|phrase| lower_text.contains(phrase.as_str()))
        .cloned()
        .collect()
}

//! The fact extraction rule table.
//!
//! Dispatch is data-driven: an ordered list of (pattern, action) pairs
//! rather than a chain of conditionals, so the rule set is directly
//! testable and easy to extend. Fact keys come only from this table —
//! unknown input never creates new keys.

use crate::store::{FactValue, Facts};
use regex::Regex;
use std::sync::LazyLock;

/// How a rule's captures are written into the facts map.
#[derive(Debug, Clone, Copy)]
pub enum RuleAction {
    /// Overwrite a single scalar fact with the given capture group.
    SetScalar {
        key: &'static str,
        group: usize,
        normalize: Normalize,
    },
    /// Overwrite a scalar whose key is derived from a capture group
    /// (e.g. "dog" + "_name" -> `dog_name`).
    SetKeyedScalar {
        kind_group: usize,
        suffix: &'static str,
        value_group: usize,
    },
    /// Union-append to a list fact; entries are deduplicated by their
    /// normalized form and never removed.
    AppendList {
        key: &'static str,
        group: usize,
        normalize: Normalize,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum Normalize {
    /// First letter uppercased, the rest lowercased.
    Capitalized,
    Lowercase,
    Verbatim,
}

impl Normalize {
    fn apply(self, raw: &str) -> String {
        match self {
            Normalize::Capitalized => capitalize(raw),
            Normalize::Lowercase => raw.to_lowercase(),
            Normalize::Verbatim => raw.to_string(),
        }
    }
}

/// One entry of the rule table.
pub struct ExtractionRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub action: RuleAction,
}

static RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    use Normalize::*;
    use RuleAction::*;

    let rule = |name, pattern: &str, action| ExtractionRule {
        name,
        pattern: Regex::new(pattern).unwrap(),
        action,
    };

    vec![
        rule(
            "name",
            r"(?i)my name is ([A-Za-z]+)",
            SetScalar { key: "name", group: 1, normalize: Capitalized },
        ),
        rule(
            "daughter",
            r"(?i)my daughter'?s name is ([A-Za-z]+)",
            SetScalar { key: "daughter", group: 1, normalize: Capitalized },
        ),
        rule(
            "son",
            r"(?i)my son'?s name is ([A-Za-z]+)",
            SetScalar { key: "son", group: 1, normalize: Capitalized },
        ),
        rule(
            "pet",
            r"(?i)my (dog|cat|pet)'?s name is ([A-Za-z]+)",
            SetKeyedScalar { kind_group: 1, suffix: "_name", value_group: 2 },
        ),
        rule(
            "favorite_color",
            r"(?i)my favorite color is ([A-Za-z]+)",
            SetScalar { key: "favorite_color", group: 1, normalize: Capitalized },
        ),
        rule(
            "age",
            r"(?i)i am (\d+) years old",
            SetScalar { key: "age", group: 1, normalize: Capitalized },
        ),
        rule(
            "health_condition",
            r"(?i)i have (arthritis|diabetes|hypertension|asthma)",
            AppendList { key: "health_conditions", group: 1, normalize: Lowercase },
        ),
        rule(
            "medication",
            r"(?i)i('m| am) taking ([A-Za-z]+)",
            AppendList { key: "medications", group: 2, normalize: Capitalized },
        ),
        rule(
            "doctor",
            r"(?i)my doctor'?s name is ([A-Za-z ]+)",
            SetScalar { key: "doctor", group: 1, normalize: Capitalized },
        ),
        rule(
            "appointment",
            r"(?i)(have|got) (a|an) appointment on ([A-Za-z]+ \d+)",
            SetScalar { key: "appointment_date", group: 3, normalize: Verbatim },
        ),
    ]
});

/// The fixed, ordered rule table.
pub fn rules() -> &'static [ExtractionRule] {
    &RULES
}

/// Run every rule against the utterance and merge matches into `facts`.
///
/// Each rule considers only its first occurrence in the utterance.
/// Returns the number of facts written (updates count, no-op
/// deduplicated appends don't).
pub fn apply_rules(utterance: &str, facts: &mut Facts) -> usize {
    let mut written = 0;

    for rule in rules() {
        let Some(caps) = rule.pattern.captures(utterance) else {
            continue;
        };

        match rule.action {
            RuleAction::SetScalar { key, group, normalize } => {
                let value = normalize.apply(&caps[group]);
                tracing::debug!(rule = rule.name, key, %value, "extracted scalar fact");
                facts.insert(key.to_string(), FactValue::Scalar(value));
                written += 1;
            }
            RuleAction::SetKeyedScalar { kind_group, suffix, value_group } => {
                let key = format!("{}{}", caps[kind_group].to_lowercase(), suffix);
                let value = capitalize(&caps[value_group]);
                tracing::debug!(rule = rule.name, %key, %value, "extracted scalar fact");
                facts.insert(key, FactValue::Scalar(value));
                written += 1;
            }
            RuleAction::AppendList { key, group, normalize } => {
                let entry = normalize.apply(&caps[group]);
                let list = match facts
                    .entry(key.to_string())
                    .or_insert_with(|| FactValue::List(Vec::new()))
                {
                    FactValue::List(list) => list,
                    // A scalar under a list key means the document was
                    // edited by hand; replace it rather than crash.
                    other => {
                        *other = FactValue::List(Vec::new());
                        match other {
                            FactValue::List(list) => list,
                            _ => unreachable!(),
                        }
                    }
                };
                if !list.contains(&entry) {
                    tracing::debug!(rule = rule.name, key, %entry, "extracted list fact");
                    list.push(entry);
                    written += 1;
                }
            }
        }
    }

    written
}

/// First letter uppercased, the rest lowercased ("aspirin" -> "Aspirin").
pub(crate) fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

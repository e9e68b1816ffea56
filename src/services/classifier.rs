use crate::models::Verdict;
use regex::Regex;

/// Monetary/fraud-adjacent terms checked by substring containment.
/// Matching is deliberately not word-boundary aware ("cash" flags "cashew")
/// to keep parity with the established flagging behavior.
const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "$", "sell", "money", "cash", "payment", "buy", "price", "cost", "scam", "fake", "stolen",
    "illegal", "drugs", "weapon",
];

const REPEATED_CHAR_RUN: usize = 5;

/// Content classifier with keyword and spam-pattern detection
pub struct ContentClassifier {
    patterns: Vec<Regex>,
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentClassifier {
    pub fn new() -> Self {
        Self {
            patterns: Self::compile_patterns(),
        }
    }

    /// Classify a submission from its title and body.
    ///
    /// Reasons are ordered keyword checks first (in keyword-list order), then
    /// a single pattern reason; deterministic for a given input.
    pub fn classify(&self, title: &str, body: &str) -> Verdict {
        if title.is_empty() && body.is_empty() {
            return Verdict::clean();
        }

        let combined = format!("{} {}", title, body);
        let normalized = combined.to_lowercase();
        let mut reasons = Vec::new();

        for keyword in SUSPICIOUS_KEYWORDS {
            if normalized.contains(keyword) {
                reasons.push(format!("Contains suspicious keyword: {}", keyword));
            }
        }

        if self.matches_spam_patterns(&combined) {
            reasons.push("Contains spam-like patterns".to_string());
        }

        Verdict::with_reasons(reasons)
    }

    /// Check text against the spam-pattern rules alone (no keyword checks).
    /// This is the rule the message spam escalation uses.
    pub fn matches_spam_patterns(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(text))
            || Self::has_repeated_run(text)
    }

    /// Compile regex patterns for spam-like content
    fn compile_patterns() -> Vec<Regex> {
        vec![
            // Known spam phrasing
            Regex::new(r"(?i)\b(viagra|casino|lottery|winner)\b")
                .expect("Spam phrase regex pattern is valid"),
            Regex::new(r"(?i)\b(click here|visit now|act now)\b")
                .expect("Call-to-action regex pattern is valid"),
            Regex::new(r"(?i)\b(free money|easy money|get rich)\b")
                .expect("Money scheme regex pattern is valid"),
            // Long runs of uppercase letters
            Regex::new(r"[A-Z]{10,}").expect("Uppercase run regex pattern is valid"),
        ]
    }

    /// Check for the same character repeated REPEATED_CHAR_RUN or more times
    /// consecutively. Scanned by hand: the regex crate has no backreferences.
    fn has_repeated_run(text: &str) -> bool {
        let mut run = 0usize;
        let mut prev = None;

        for c in text.chars() {
            if prev == Some(c) {
                run += 1;
                if run >= REPEATED_CHAR_RUN {
                    return true;
                }
            } else {
                prev = Some(c);
                run = 1;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_content_passes() {
        let classifier = ContentClassifier::new();
        let verdict = classifier.classify("Trade my bike", "Looking for a kayak");
        assert!(!verdict.flagged);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_keywords_flag_in_list_order() {
        let classifier = ContentClassifier::new();
        let verdict = classifier.classify("SELL my phone for cash", "");
        assert!(verdict.flagged);
        assert_eq!(
            verdict.reasons,
            vec![
                "Contains suspicious keyword: sell".to_string(),
                "Contains suspicious keyword: cash".to_string(),
            ]
        );
    }

    #[test]
    fn test_keyword_matching_is_substring_based() {
        let classifier = ContentClassifier::new();
        let verdict = classifier.classify("Bag of cashews", "");
        assert!(verdict.flagged);
        assert_eq!(
            verdict.reasons,
            vec!["Contains suspicious keyword: cash".to_string()]
        );
    }

    #[test]
    fn test_keyword_in_body_flags() {
        let classifier = ContentClassifier::new();
        let verdict = classifier.classify("Old lamp", "asking $20 or best offer");
        assert!(verdict.flagged);
        assert!(verdict
            .reasons
            .contains(&"Contains suspicious keyword: $".to_string()));
    }

    #[test]
    fn test_spam_phrase_adds_single_pattern_reason() {
        let classifier = ContentClassifier::new();
        let verdict = classifier.classify("Winner winner", "Click here to claim your lottery");
        assert!(verdict.flagged);
        let pattern_reasons = verdict
            .reasons
            .iter()
            .filter(|r| r.as_str() == "Contains spam-like patterns")
            .count();
        assert_eq!(pattern_reasons, 1);
    }

    #[test]
    fn test_repeated_characters_match_pattern_rule() {
        let classifier = ContentClassifier::new();
        assert!(classifier.matches_spam_patterns("Hellooooooo"));
        assert!(!classifier.matches_spam_patterns("Hellooo"));
    }

    #[test]
    fn test_uppercase_run_matches_pattern_rule() {
        let classifier = ContentClassifier::new();
        assert!(classifier.matches_spam_patterns("AMAZING DEALZZZZZ"));
        assert!(classifier.matches_spam_patterns("BUYMYSTUFFNOW"));
        assert!(!classifier.matches_spam_patterns("Normal Sentence Case"));
    }

    #[test]
    fn test_empty_input_is_clean() {
        let classifier = ContentClassifier::new();
        let verdict = classifier.classify("", "");
        assert!(!verdict.flagged);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_classify_is_deterministic() {
        let classifier = ContentClassifier::new();
        let first = classifier.classify("Cheap viagra", "act now!!!");
        let second = classifier.classify("Cheap viagra", "act now!!!");
        assert_eq!(first, second);
    }
}

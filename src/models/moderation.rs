use serde::{Deserialize, Serialize};

/// Classification verdict for a content submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub flagged: bool,
    pub reasons: Vec<String>,
}

impl Verdict {
    pub fn clean() -> Self {
        Self {
            flagged: false,
            reasons: Vec::new(),
        }
    }

    pub fn with_reasons(reasons: Vec<String>) -> Self {
        Self {
            flagged: !reasons.is_empty(),
            reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_verdict() {
        let verdict = Verdict::clean();
        assert!(!verdict.flagged);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_flagged_iff_reasons_present() {
        let verdict = Verdict::with_reasons(vec!["Contains spam-like patterns".to_string()]);
        assert!(verdict.flagged);

        let verdict = Verdict::with_reasons(Vec::new());
        assert!(!verdict.flagged);
    }
}

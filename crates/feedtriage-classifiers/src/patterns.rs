//! Substring cue matching shared by the tone, impact and issue-type classifiers

use aho_corasick::AhoCorasick;
use feedtriage_core::Result;

/// Case-insensitive substring matcher over a fixed cue list, built on the
/// Aho-Corasick algorithm.
///
/// Matching is plain substring, not whole-word: "issue" matches inside
/// "issues" and "add" inside "address".
#[derive(Debug, Clone)]
pub struct CueMatcher {
    name: &'static str,
    automaton: AhoCorasick,
    cues: &'static [&'static str],
}

impl CueMatcher {
    /// Compile a cue list
    pub fn new(name: &'static str, cues: &'static [&'static str]) -> Result<Self> {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(cues)
            .map_err(|e| {
                feedtriage_core::Error::classifier(format!(
                    "Failed to build {name} cue matcher: {e}"
                ))
            })?;

        Ok(Self {
            name,
            automaton,
            cues,
        })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Whether any cue occurs in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.automaton.is_match(text)
    }

    /// The first cue found in `text`, if any
    pub fn first_cue(&self, text: &str) -> Option<&'static str> {
        self.automaton
            .find(text)
            .map(|m| self.cues[m.pattern().as_usize()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_matcher() {
        let matcher = CueMatcher::new("test", &["click here", "spam"]).unwrap();

        assert_eq!(matcher.name(), "test");
        assert!(!matcher.is_match("this is clean text"));
        assert!(matcher.is_match("CLICK HERE for free stuff"));
        assert_eq!(matcher.first_cue("so much spam"), Some("spam"));
    }

    #[test]
    fn test_substring_semantics() {
        let matcher = CueMatcher::new("issue", &["issue"]).unwrap();
        assert!(matcher.is_match("several issues remain"));
    }
}

use std::collections::HashSet;

const DEFAULT_BLOCKED_WORDS: &[&str] = &[
    "ass", "asshole", "bastard", "bitch", "bollocks", "crap", "cunt", "damn", "dick", "douche",
    "fag", "fuck", "fucker", "fucking", "motherfucker", "nigger", "piss", "prick", "pussy",
    "shit", "shitty", "slut", "twat", "wanker", "whore",
];

/// Word-level profanity check applied to user generated text.
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    blocked: HashSet<String>,
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::with_extra_words(std::iter::empty::<String>())
    }
}

impl ProfanityFilter {
    pub fn with_extra_words<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut blocked: HashSet<String> = DEFAULT_BLOCKED_WORDS
            .iter()
            .map(|word| word.to_string())
            .collect();
        blocked.extend(
            extra
                .into_iter()
                .map(|word| word.as_ref().trim().to_lowercase())
                .filter(|word| !word.is_empty()),
        );
        Self { blocked }
    }

    /// Tokens are runs of alphanumeric characters compared case-insensitively, so
    /// "Class" does not trip on "ass".
    pub fn check(&self, text: &str) -> Result<(), ModerationError> {
        let flagged = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .any(|token| self.blocked.contains(&token.to_lowercase()));

        if flagged {
            Err(ModerationError::InappropriateContent)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ModerationError {
    #[error("inappropriate content detected")]
    InappropriateContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_blocked_words_in_any_case() {
        let filter = ProfanityFilter::default();
        assert_eq!(
            filter.check("What a load of CRAP, honestly"),
            Err(ModerationError::InappropriateContent)
        );
        assert!(filter.check("A classic assessment, well done").is_ok());
    }

    #[test]
    fn configured_words_extend_the_list() {
        let filter = ProfanityFilter::with_extra_words([" Spoiler "]);
        assert!(filter.check("no spoiler-free zone").is_err());
        assert!(ProfanityFilter::default().check("no spoiler-free zone").is_ok());
    }
}

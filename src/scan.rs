//! Hashtag candidate extraction.
//!
//! Stateless pass over free text collecting `#token` candidates for the
//! repository to resolve. A token is a maximal run of alphanumeric
//! characters or underscores after a `#` (Unicode letters included, so
//! `#обед` works). The scanner knows nothing about which tags exist.

/// Extract candidate tag names from free text, in order of appearance.
///
/// A bare `#` with no token characters after it yields nothing.
/// Duplicates are kept; the repository processes each occurrence
/// independently.
#[must_use]
pub fn extract_candidates(text: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '#' {
            continue;
        }
        let mut token = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                token.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !token.is_empty() {
            candidates.push(token);
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_tokens_in_order() {
        assert_eq!(
            extract_candidates("ping #lunch and #standup today"),
            vec!["lunch", "standup"]
        );
    }

    #[test]
    fn test_token_stops_at_punctuation() {
        assert_eq!(extract_candidates("see #lunch, everyone!"), vec!["lunch"]);
        assert_eq!(extract_candidates("(#a) #b."), vec!["a", "b"]);
    }

    #[test]
    fn test_underscore_and_digits_are_token_chars() {
        assert_eq!(extract_candidates("#team_42 rules"), vec!["team_42"]);
    }

    #[test]
    fn test_unicode_letters() {
        assert_eq!(extract_candidates("даёшь #обед"), vec!["обед"]);
    }

    #[test]
    fn test_bare_hash_yields_nothing() {
        assert!(extract_candidates("# nothing #").is_empty());
        assert!(extract_candidates("no tags here").is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(
            extract_candidates("#lunch #lunch"),
            vec!["lunch", "lunch"]
        );
    }
}

/// Anti-hallucination guard for extracted values.
///
/// Returns the candidate untouched when its letters (lowercased, everything
/// else stripped) appear as a contiguous run in the source's letters; `None`
/// otherwise. `None` and empty candidates pass through as given.
pub fn validate_against_source(candidate: Option<String>, source: &str) -> Option<String> {
    let value = candidate?;
    if value.is_empty() {
        return Some(value);
    }

    if letters_only(source).contains(&letters_only(&value)) {
        Some(value)
    } else {
        tracing::debug!("Discarding value not present in source text: {value:?}");
        None
    }
}

fn letters_only(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "JOHN  SMITH, RN\njohn@x.com | (555) 010-2233";

    #[test]
    fn test_present_value_is_returned_unchanged() {
        let out = validate_against_source(Some("John Smith".to_string()), SOURCE);
        assert_eq!(out.as_deref(), Some("John Smith"));
    }

    #[test]
    fn test_punctuation_and_case_are_ignored() {
        let out = validate_against_source(Some("john-smith".to_string()), SOURCE);
        assert_eq!(out.as_deref(), Some("john-smith"));
    }

    #[test]
    fn test_absent_value_is_dropped() {
        assert_eq!(
            validate_against_source(Some("Jane Doe".to_string()), SOURCE),
            None
        );
    }

    #[test]
    fn test_none_and_empty_pass_through() {
        assert_eq!(validate_against_source(None, SOURCE), None);
        assert_eq!(
            validate_against_source(Some(String::new()), SOURCE).as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_never_returns_a_transformed_value() {
        let candidates = ["John Smith", "Smith, John", "JOHN", "Ángel Ruiz", "x@y", "555"];
        for candidate in candidates {
            match validate_against_source(Some(candidate.to_string()), SOURCE) {
                Some(out) => assert_eq!(out, candidate),
                None => {}
            }
        }
    }

    #[test]
    fn test_non_ascii_letters_are_compared() {
        let source = "José Álvarez\nMadrid";
        assert!(validate_against_source(Some("JOSÉ ÁLVAREZ".to_string()), source).is_some());
        assert!(validate_against_source(Some("Jose Alvarez".to_string()), source).is_none());
    }
}

use std::sync::LazyLock;

use regex::Regex;

static TRAILING_HSPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+\n").unwrap());
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Canonicalizes raw extracted text before it is sent to the inference service.
///
/// Steps, in order:
/// 1. `•` and `●` become `- `; the en-dash becomes `-`
/// 2. Horizontal whitespace before a newline is dropped
/// 3. Runs of 3+ newlines collapse to exactly 2
/// 4. Curly quotes/apostrophes become ASCII `'` and `"`
/// 5. Leading/trailing whitespace is trimmed
///
/// Pure and idempotent.
pub fn normalize(raw: &str) -> String {
    let text = raw
        .replace('\u{2022}', "- ")
        .replace('\u{25CF}', "- ")
        .replace('\u{2013}', "-");
    let text = TRAILING_HSPACE.replace_all(&text, "\n");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    let text = text
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSY: &str = "  \u{2022} Led ICU triage \t\n\u{25CF} Charted in Epic\n\n\n\n\
        2019\u{2013}2021 at \u{201C}St. Mary\u{2019}s\u{201D}  \n\n\n";

    #[test]
    fn test_bullets_become_hyphen_markers() {
        let out = normalize("\u{2022}One\n\u{25CF}Two");
        assert_eq!(out, "- One\n- Two");
    }

    #[test]
    fn test_en_dash_keeps_date_ranges_compact() {
        assert_eq!(normalize("2019\u{2013}2021"), "2019-2021");
    }

    #[test]
    fn test_whitespace_and_blank_lines_collapse() {
        let out = normalize("a  \t\nb\n\n\n\n\nc");
        assert_eq!(out, "a\nb\n\nc");
    }

    #[test]
    fn test_whitespace_only_lines_count_toward_blank_runs() {
        assert_eq!(normalize("a\n \n\t\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_curly_quotes_become_ascii() {
        let out = normalize("\u{2018}hi\u{2019} \u{201C}there\u{201D}");
        assert_eq!(out, "'hi' \"there\"");
    }

    #[test]
    fn test_full_cleanup() {
        let out = normalize(MESSY);
        assert_eq!(
            out,
            "-  Led ICU triage\n-  Charted in Epic\n\n2019-2021 at \"St. Mary's\""
        );
        assert!(!out.contains("\n\n\n"));
        assert!(!out.contains(['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}']));
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            MESSY,
            "",
            "   ",
            "\u{2022}\n\n\n\u{2022}",
            "x \n \n \n y",
            "\u{2022} \t\n\u{2013}\u{2019}",
            "plain text",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}

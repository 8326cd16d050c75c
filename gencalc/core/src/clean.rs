//! Output Cleaning
//!
//! The solve service answers in model prose that may carry LaTeX
//! decoration. Before display the text is normalized:
//!
//! 1. `\boxed{...}` wrappers are stripped, keeping the inner content.
//! 2. Literal `$` characters (math delimiters) are removed.
//! 3. Runs of three or more newlines collapse to exactly two.
//! 4. Leading/trailing whitespace is trimmed.
//!
//! Cleaning is idempotent. An empty result is an extraction failure and
//! must never be forwarded as a solution; callers check for that.

const BOXED_MARKER: &str = "\\boxed{";

/// Normalize raw solved text for display.
#[must_use]
pub fn clean_solved_text(text: &str) -> String {
    let mut cleaned = strip_boxed(text);
    cleaned.retain(|c| c != '$');
    collapse_newlines(&cleaned).trim().to_string()
}

/// Replace every `\boxed{inner}` occurrence with `inner`.
///
/// The inner content is everything up to the next `}`, at least one
/// character long; an unterminated or empty wrapper is left as-is.
fn strip_boxed(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(BOXED_MARKER) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + BOXED_MARKER.len()..];
        match after.find('}') {
            Some(end) if end > 0 => {
                out.push_str(&after[..end]);
                rest = &after[end + 1..];
            }
            _ => {
                out.push_str(BOXED_MARKER);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapse runs of 3+ consecutive newlines into exactly 2.
fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run <= 2 {
                out.push(c);
            }
        } else {
            run = 0;
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spec_example() {
        let input = "The answer is \\boxed{12.5} because $2.5*5=12.5$\n\n\n\nDone";
        assert_eq!(
            clean_solved_text(input),
            "The answer is 12.5 because 2.5*5=12.5\n\nDone"
        );
    }

    #[test]
    fn test_strips_boxed_wrapper() {
        assert_eq!(clean_solved_text("\\boxed{7}"), "7");
        assert_eq!(clean_solved_text("a \\boxed{1} b \\boxed{2} c"), "a 1 b 2 c");
    }

    #[test]
    fn test_unterminated_or_empty_boxed_left_alone() {
        assert_eq!(clean_solved_text("\\boxed{7"), "\\boxed{7");
        assert_eq!(clean_solved_text("\\boxed{}"), "\\boxed{}");
    }

    #[test]
    fn test_removes_dollar_signs() {
        assert_eq!(clean_solved_text("$2 + 2 = 4$"), "2 + 2 = 4");
    }

    #[test]
    fn test_collapses_newline_runs() {
        assert_eq!(clean_solved_text("a\n\n\n\n\nb"), "a\n\nb");
        // Two newlines are left as-is
        assert_eq!(clean_solved_text("a\n\nb"), "a\n\nb");
        // Interrupted runs are not collapsed
        assert_eq!(clean_solved_text("a\n \n \nb"), "a\n \n \nb");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(clean_solved_text("  42  \n"), "42");
    }

    #[test]
    fn test_empty_and_whitespace_only_clean_to_empty() {
        assert_eq!(clean_solved_text(""), "");
        assert_eq!(clean_solved_text("   \n\n\n  "), "");
        assert_eq!(clean_solved_text("$$"), "");
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let inputs = [
            "The answer is \\boxed{12.5} because $2.5*5=12.5$\n\n\n\nDone",
            "\\boxed{7}",
            "\\boxed{\\boxed{a}",
            "plain text",
            "a\n\n\n\nb$c$",
            "",
        ];
        for input in inputs {
            let once = clean_solved_text(input);
            let twice = clean_solved_text(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }
}

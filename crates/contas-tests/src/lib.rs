//! Integration tests for the contas evaluator
//!
//! This crate exercises the whole path from input to value or rendered
//! diagnostic: Source → Cursor → Grammar → Value | Diagnostic

use contas_error::{DiagnosticRenderer, SourceCache};
use contas_eval::{evaluate_str, EvalError, ParseError, Value, STACK_SIZE};

/// Evaluates `source`, rendering a parse failure the way the CLI does
pub fn run(source: &str) -> Result<Value, String> {
    evaluate_str(source).map_err(|error| match error {
        EvalError::Parse(e) => render(source, &e),
        EvalError::Io(e) => e.to_string(),
    })
}

/// Renders a parse error against `source` without colors
pub fn render(source: &str, error: &ParseError) -> String {
    let mut cache = SourceCache::new();
    let file_id = cache.add("<test>", source);
    DiagnosticRenderer::new(&cache)
        .without_colors()
        .render(&error.to_diagnostic(file_id))
}

/// Asserts that `source` evaluates to `expected`
pub fn assert_evaluates(source: &str, expected: Value) {
    match run(source) {
        Ok(value) => {
            if value != expected {
                panic!(
                    "Expected {:?} to evaluate to {}, but got {}",
                    source, expected, value
                );
            }
        }
        Err(diagnostic) => panic!(
            "Expected {:?} to evaluate to {}, but got errors:\n{}",
            source, expected, diagnostic
        ),
    }
}

/// Asserts that `source` is rejected and returns the parse error
pub fn assert_rejects(source: &str) -> ParseError {
    match evaluate_str(source) {
        Ok(value) => panic!(
            "Expected {:?} to be rejected, but it evaluated to {}",
            source, value
        ),
        Err(EvalError::Parse(e)) => e,
        Err(EvalError::Io(e)) => panic!("Expected a parse error for {:?}, got I/O error {}", source, e),
    }
}

/// Asserts that `source` is rejected with a diagnostic containing `expected`
pub fn assert_diagnostic_contains(source: &str, expected: &str) {
    let error = assert_rejects(source);
    let rendered = render(source, &error);
    if !rendered.contains(expected) {
        panic!(
            "Expected diagnostic to contain '{}', but it didn't.\n\nRendered:\n{}",
            expected, rendered
        );
    }
}

/// Runs `f` on a thread with a stack that fits the deepest accepted nesting
pub fn on_large_stack<T: Send>(f: impl FnOnce() -> T + Send) -> T {
    std::thread::scope(|scope| {
        std::thread::Builder::new()
            .stack_size(STACK_SIZE)
            .spawn_scoped(scope, f)
            .expect("failed to spawn evaluator thread")
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    })
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;
    use contas_eval::{evaluate_file, evaluate_reader, pow, Reason, MAX_DEPTH};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    // =========================================
    // Values
    // =========================================

    #[test]
    fn test_single_numbers() {
        assert_evaluates("0", 0);
        assert_evaluates("7", 7);
        assert_evaluates("1000000", 1_000_000);
    }

    #[test]
    fn test_addition_and_subtraction() {
        assert_evaluates("1+2", 3);
        assert_evaluates("1+2+3+4", 10);
        assert_evaluates("3-5", -2);
        assert_evaluates("100-1+1", 100);
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        assert_evaluates("10-3-2", 5);
        assert_evaluates("10-(3-2)", 9);
    }

    #[test]
    fn test_exponent_is_right_associative() {
        assert_evaluates("2**3**2", 512);
        assert_evaluates("(2**3)**2", 64);
    }

    #[test]
    fn test_exponent_binds_tighter_than_addition() {
        assert_evaluates("1+2**3", 9);
        assert_evaluates("2**3-1", 7);
        assert_evaluates("2**(1+2)", 8);
    }

    #[test]
    fn test_zero_exponents() {
        assert_evaluates("0**0", 1);
        assert_evaluates("5**0", 1);
        assert_evaluates("0**5", 0);
    }

    #[test]
    fn test_negative_exponent_from_subtraction() {
        // (1-2) is the only way to reach a negative exponent
        assert_evaluates("2**(1-2)", 0);
        assert_evaluates("(0-2)**3", -8);
    }

    #[test]
    fn test_negative_exponent_policy() {
        assert_eq!(pow(2, -1), 0);
        assert_eq!(pow(0, 0), 1);
        assert_eq!(assert_rejects("2**-1").reason, Reason::ExpectedNumber);
    }

    #[test]
    fn test_nested_parentheses() {
        assert_evaluates("((((1))))", 1);
        assert_evaluates("(1+(2+(3+(4))))", 10);
    }

    #[test]
    fn test_thousands_of_nested_groups() {
        let source = "(".repeat(3_000) + "1+2" + &")".repeat(3_000);
        on_large_stack(|| assert_evaluates(&source, 3));
    }

    #[test]
    fn test_thousands_of_chained_exponents() {
        let ones = "1**".repeat(3_000) + "1";
        // 2**65536 wraps to 0, so the tower cycles 0, 1, 2, 4, 16, 65536
        let mixed = "(".repeat(2_000) + &"2**".repeat(2_000) + "0" + &")".repeat(2_000);
        on_large_stack(|| {
            assert_evaluates(&ones, 1);
            assert_evaluates(&mixed, 2);
        });
    }

    #[test]
    fn test_nesting_past_limit_is_rejected() {
        let source = "(".repeat(MAX_DEPTH + 1) + "1" + &")".repeat(MAX_DEPTH + 1);
        let error = on_large_stack(|| assert_rejects(&source));
        assert_eq!(error.reason, Reason::TooDeep { limit: MAX_DEPTH });
        on_large_stack(|| assert_diagnostic_contains(&source, "error[EP006]"));
    }

    #[test]
    fn test_grouping_is_idempotent() {
        for source in ["0", "42", "1+2", "10-3-2", "2**3**2", "(1+2)**2", "0**0"] {
            let plain = evaluate_str(source).unwrap();
            let grouped = evaluate_str(&format!("({})", source)).unwrap();
            assert_eq!(plain, grouped, "grouping changed the value of {}", source);
        }
    }

    #[test]
    fn test_decimal_round_trip() {
        let mut n: Value = 1;
        while n < Value::MAX / 7 {
            assert_evaluates(&n.to_string(), n);
            n = n * 7 + 3;
        }
        assert_evaluates(&Value::MAX.to_string(), Value::MAX);
    }

    #[test]
    fn test_overflow_wraps() {
        assert_evaluates("9223372036854775807+1", Value::MIN);
        assert_evaluates("2**64", 0);
        assert_evaluates("0-9223372036854775807-2", Value::MAX);
    }

    #[test]
    fn test_newline_terminates() {
        assert_evaluates("1+1\n", 2);
        assert_evaluates("1+1\n*** not read ***", 2);
    }

    // =========================================
    // Rejections
    // =========================================

    #[test]
    fn test_malformed_inputs() {
        for source in ["1+", "(1+2", "1*2", "05", "", "+1", ")", "1)", "2***3", "(", "()"] {
            assert_rejects(source);
        }
    }

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(assert_rejects("1+").reason, Reason::ExpectedNumber);
        assert_eq!(assert_rejects("1*2").reason, Reason::LoneStar);
        assert_eq!(assert_rejects("05").reason, Reason::TrailingInput);
        assert_eq!(assert_rejects("").reason, Reason::ExpectedNumber);
        assert_eq!(assert_rejects("1)").reason, Reason::TrailingInput);
        assert!(matches!(
            assert_rejects("(1+2").reason,
            Reason::UnclosedParen { .. }
        ));
    }

    #[test]
    fn test_unsupported_characters() {
        for source in ["1 + 2", "1/2", "3.5", "x", "1+2\r\n", "٣"] {
            assert_rejects(source);
        }
    }

    #[test]
    fn test_failure_position() {
        let error = assert_rejects("(1+2)+3*4");
        assert_eq!(error.reason, Reason::LoneStar);
        assert_eq!(error.found, Some('4'));
        assert_eq!(error.at.column, 9);
    }

    // =========================================
    // Diagnostics
    // =========================================

    #[test]
    fn test_lone_star_diagnostic() {
        assert_diagnostic_contains("1*2", "error[EP004]");
        assert_diagnostic_contains("1*2", "<test>:1:3");
        assert_diagnostic_contains("1*2", "help: exponentiation is written `**`");
    }

    #[test]
    fn test_unclosed_paren_diagnostic() {
        let rendered = run("(1+2").unwrap_err();
        assert!(rendered.contains("error[EP003]: expected ')' to close parenthesis"));
        assert!(rendered.contains("^ found end of input"));
        assert!(rendered.contains("- parenthesis opened here"));
    }

    #[test]
    fn test_leading_zero_diagnostic() {
        assert_diagnostic_contains("05", "error[EP005]");
        assert_diagnostic_contains("05", "note: `0` is a complete number");
    }

    #[test]
    fn test_whitespace_diagnostic() {
        assert_diagnostic_contains("1 +1", "help: remove the whitespace");
    }

    // =========================================
    // Sources
    // =========================================

    #[test]
    fn test_reader_input() {
        let reader = std::io::Cursor::new("(2+3)**2\n");
        assert_eq!(evaluate_reader(reader).unwrap(), 25);
    }

    #[test]
    fn test_reader_reports_non_ascii_character() {
        let reader = std::io::Cursor::new("1+é\n".as_bytes());
        match evaluate_reader(reader) {
            Err(EvalError::Parse(e)) => {
                assert_eq!(e.found, Some('é'));
                assert!(e.to_string().contains("found 'é'"));
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_input_reads_first_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2**10-24").unwrap();
        writeln!(file, "this line is never read").unwrap();

        assert_eq!(evaluate_file(file.path()).unwrap(), 1000);
    }

    #[test]
    fn test_file_input_rejects_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1+").unwrap();

        match evaluate_file(file.path()) {
            Err(EvalError::Parse(e)) => assert_eq!(e.reason, Reason::ExpectedNumber),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(evaluate_file(file.path()).is_err());
    }
}

//! Tests for truncation and prompt construction.

use studygen::prompts::{build_prompt, default_instruction, LESSON_DELIMITER};
use studygen::{truncate_chars, Mode};

#[test]
fn test_truncate_is_bounded_prefix() {
    let text = "abcdefghij";
    for limit in 0..15 {
        let truncated = truncate_chars(text, limit);
        assert!(truncated.chars().count() <= limit);
        assert!(text.starts_with(truncated));
    }
}

#[test]
fn test_truncate_respects_char_boundaries() {
    // Multi-byte characters must never be split mid-codepoint.
    let text = "héllo wörld ✓ mitose";
    let truncated = truncate_chars(text, 13);
    assert_eq!(truncated.chars().count(), 13);
    assert!(text.starts_with(truncated));
}

#[test]
fn test_truncate_longer_limit_is_identity() {
    let text = "short";
    assert_eq!(truncate_chars(text, 10_000), text);
}

#[test]
fn test_prompt_contains_instruction_and_text_for_every_mode() {
    let lesson = "Cell division occurs in two phases.";
    for mode in Mode::ALL {
        let instruction = default_instruction(mode);
        let prompt = build_prompt(instruction, lesson, 30_000);
        assert!(
            prompt.contains(instruction),
            "prompt for {mode} is missing its instruction"
        );
        assert!(
            prompt.contains(lesson),
            "prompt for {mode} is missing the lesson text"
        );
    }
}

#[test]
fn test_prompt_truncates_lesson_before_concatenation() {
    let lesson = "x".repeat(100);
    let instruction = default_instruction(Mode::FastReview);
    let prompt = build_prompt(instruction, &lesson, 40);

    // The instruction must survive in full even under an aggressive limit.
    assert!(prompt.contains(instruction));
    assert!(prompt.contains(LESSON_DELIMITER));
    let lesson_part = prompt.split(LESSON_DELIMITER).nth(1).unwrap();
    assert_eq!(lesson_part.chars().count(), 40);
}

#[test]
fn test_instructions_are_distinct() {
    for a in Mode::ALL {
        for b in Mode::ALL {
            if a != b {
                assert_ne!(default_instruction(a), default_instruction(b));
            }
        }
    }
}

#[test]
fn test_mode_names_round_trip_through_serde() {
    for mode in Mode::ALL {
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, format!("\"{}\"", mode.as_str()));
        let parsed: Mode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, mode);
    }
}

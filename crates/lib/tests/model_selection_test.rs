//! Tests for the pure model-selection fallback policy.

use studygen::errors::GenerationError;
use studygen::providers::ai::{select_model, ModelInfo};

fn model(name: &str, methods: &[&str]) -> ModelInfo {
    ModelInfo {
        name: name.to_string(),
        supported_methods: methods.iter().map(|m| m.to_string()).collect(),
    }
}

fn preferred(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_first_available_preferred_model_wins() {
    let available = vec![
        model("models/gemini-2.0-flash", &["generateContent"]),
        model("models/gemini-2.5-flash", &["generateContent"]),
    ];
    let chosen = select_model(
        &preferred(&["gemini-2.5-flash", "gemini-2.0-flash"]),
        &available,
    )
    .unwrap();
    assert_eq!(chosen, "gemini-2.5-flash");
}

#[test]
fn test_preferred_model_without_generation_support_is_skipped() {
    let available = vec![
        model("models/gemini-2.5-flash", &["embedContent"]),
        model("models/gemini-2.0-flash", &["generateContent"]),
    ];
    let chosen = select_model(&preferred(&["gemini-2.5-flash"]), &available).unwrap();
    assert_eq!(chosen, "gemini-2.0-flash");
}

#[test]
fn test_falls_back_to_first_generation_capable_model() {
    let available = vec![
        model("models/embedding-001", &["embedContent"]),
        model("models/gemini-exp", &["generateContent"]),
    ];
    let chosen = select_model(&preferred(&["gemini-2.5-flash"]), &available).unwrap();
    assert_eq!(chosen, "gemini-exp");
}

#[test]
fn test_empty_list_is_an_error() {
    let result = select_model(&preferred(&["gemini-2.5-flash"]), &[]);
    assert!(matches!(result, Err(GenerationError::NoUsableModel)));
}

#[test]
fn test_capability_less_list_is_an_error() {
    let available = vec![model("models/embedding-001", &["embedContent"])];
    let result = select_model(&preferred(&["gemini-2.5-flash"]), &available);
    assert!(matches!(result, Err(GenerationError::NoUsableModel)));
}

#[test]
fn test_comparison_ignores_models_prefix() {
    let available = vec![model("gemini-2.5-flash", &["generateContent"])];
    let chosen = select_model(&preferred(&["gemini-2.5-flash"]), &available).unwrap();
    assert_eq!(chosen, "gemini-2.5-flash");
}

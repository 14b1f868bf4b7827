//! # Default Mode Instructions
//!
//! The default, hardcoded instruction templates for every study mode. These
//! are loaded programmatically and can be overridden per mode from the server
//! configuration.

pub const STRUCTURED_NOTES_INSTRUCTION: &str = r#"Create high-level study notes from the lesson below. Use bold headers, bullet points, and finish with a summary table of the key concepts."#;

pub const FLASHCARDS_INSTRUCTION: &str = r#"Create flashcards from the lesson below. Output one card per line in the exact format `Term: Definition`. Cover every important term, no commentary."#;

pub const EXAM_PREDICTIONS_INSTRUCTION: &str = r#"Identify the highest-yield topics in the lesson below, then write the 5 exam questions most likely to be asked, each followed by a model answer."#;

pub const FAST_REVIEW_INSTRUCTION: &str = r#"Create an ultra-concise revision sheet from the lesson below. Short lines only, one fact per line, suitable for a final read-through before an exam."#;

pub const QUIZ_INSTRUCTION: &str = r#"Create 5 difficult exam questions with answers from the lesson below."#;

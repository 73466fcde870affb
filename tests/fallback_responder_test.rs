use tanglin::application::services::{DegradedCause, FallbackResponder};

const ASSISTANT: &str = "Tanglin";

fn responder() -> FallbackResponder {
    FallbackResponder::new(ASSISTANT)
}

#[test]
fn given_greeting_when_backend_down_then_reply_names_the_assistant() {
    let reply = responder().respond("hello", &[], DegradedCause::Unreachable);

    assert!(reply.contains(ASSISTANT));
    assert!(reply.contains("temporarily unavailable"));
}

#[test]
fn given_document_keywords_and_uploads_when_backend_down_then_reply_lists_filenames() {
    let files = vec!["report.pdf".to_string(), "numbers.xlsx".to_string()];

    let reply = responder().respond("can you analyze my file?", &files, DegradedCause::Unreachable);

    assert!(reply.contains("report.pdf"));
    assert!(reply.contains("numbers.xlsx"));
}

#[test]
fn given_document_keywords_and_no_uploads_when_backend_down_then_reply_prompts_upload() {
    let reply = responder().respond("summarize the document", &[], DegradedCause::Unreachable);

    assert!(reply.contains("upload"));
}

#[test]
fn given_timeout_cause_when_files_exist_then_reply_mentions_timeout() {
    let files = vec!["report.pdf".to_string()];

    let timed_out = responder().respond("analyze it", &files, DegradedCause::Timeout);
    let unreachable = responder().respond("analyze it", &files, DegradedCause::Unreachable);

    assert!(timed_out.contains("timed out"));
    assert!(unreachable.contains("unavailable"));
}

#[test]
fn given_message_matching_two_categories_then_document_rule_wins() {
    // "document" (category 1) and "python" (category 2) both match.
    let reply = responder().respond("python document", &[], DegradedCause::Unreachable);

    assert!(reply.contains("upload"));
    assert!(!reply.contains("high-level"));
}

#[test]
fn given_topic_keywords_then_fixed_topic_paragraph_is_returned() {
    let reply = responder().respond("tell me about machine learning", &[], DegradedCause::Unreachable);

    assert!(reply.contains("Machine Learning is a subset of AI"));
}

#[test]
fn given_unmatched_message_then_default_template_echoes_it() {
    let reply = responder().respond("what is the weather", &[], DegradedCause::Unreachable);

    assert!(reply.contains("what is the weather"));
    assert!(reply.contains("rephrasing"));
}

#[test]
fn given_fixed_message_and_snapshot_then_reply_is_deterministic() {
    let files = vec!["report.pdf".to_string()];

    let first = responder().respond("analyze the pdf", &files, DegradedCause::Unreachable);
    let second = responder().respond("analyze the pdf", &files, DegradedCause::Unreachable);

    assert_eq!(first, second);
}

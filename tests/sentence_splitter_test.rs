use tanglin::application::ports::TextSplitter;
use tanglin::infrastructure::text_processing::SentenceSplitter;

const DEFAULT_MAX_CHUNK_SIZE: usize = 400;

#[tokio::test]
async fn given_text_without_terminal_punctuation_when_split_then_returns_single_chunk() {
    let splitter = SentenceSplitter::new(DEFAULT_MAX_CHUNK_SIZE);
    let text = "a".repeat(1000);

    let chunks = splitter.split(&text).await.unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].ordinal, 1);
    // The whole input is one sentence; it keeps its length plus the
    // re-appended terminator, deliberately exceeding the size bound.
    assert_eq!(chunks[0].text.trim_end_matches('.').len(), 1000);
}

#[tokio::test]
async fn given_three_equal_sentences_when_split_with_tight_bound_then_packs_first_two() {
    let splitter = SentenceSplitter::new(250);
    let s1 = "a".repeat(100);
    let s2 = "b".repeat(100);
    let s3 = "c".repeat(100);
    let text = format!("{s1}. {s2}. {s3}.");

    let chunks = splitter.split(&text).await.unwrap();

    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].text.contains(&s1));
    assert!(chunks[0].text.contains(&s2));
    assert!(chunks[1].text.contains(&s3));
    assert!(!chunks[1].text.contains(&s2));
}

#[tokio::test]
async fn given_any_input_when_split_then_chunks_respect_size_bound_except_lone_sentences() {
    let splitter = SentenceSplitter::new(80);
    let text = "Short one. Another short sentence here! A question perhaps? \
                This particular sentence is deliberately written to run far past the \
                eighty character bound so it must stand alone as an oversized chunk. \
                Tail.";

    let chunks = splitter.split(text).await.unwrap();

    for chunk in &chunks {
        let sentence_count = chunk.text.matches('.').count();
        if sentence_count > 1 {
            assert!(
                chunk.text.len() <= 80,
                "multi-sentence chunk exceeds bound: {:?}",
                chunk.text
            );
        }
    }

    assert!(chunks.iter().any(|c| c.text.len() > 80));
}

#[tokio::test]
async fn given_multi_sentence_text_when_split_then_every_sentence_survives_in_order() {
    let splitter = SentenceSplitter::new(40);
    let text = "First sentence here. Second sentence follows! Third one now? \
                Fourth sentence. Fifth and final sentence.";

    let chunks = splitter.split(text).await.unwrap();

    let rejoined: String = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    for sentence in [
        "First sentence here",
        "Second sentence follows",
        "Third one now",
        "Fourth sentence",
        "Fifth and final sentence",
    ] {
        assert!(rejoined.contains(sentence), "missing: {sentence}");
    }

    let first = rejoined.find("First sentence here").unwrap();
    let last = rejoined.find("Fifth and final sentence").unwrap();
    assert!(first < last);
}

#[tokio::test]
async fn given_chunks_when_split_then_ordinals_are_one_based_and_sequential() {
    let splitter = SentenceSplitter::new(30);
    let text = "One sentence here. Two sentences here. Three sentences here. Four here.";

    let chunks = splitter.split(text).await.unwrap();

    assert!(chunks.len() > 1);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.ordinal, i + 1);
    }
}

#[tokio::test]
async fn given_empty_text_when_split_then_returns_no_chunks() {
    let splitter = SentenceSplitter::new(DEFAULT_MAX_CHUNK_SIZE);

    let chunks = splitter.split("   \n\t ").await.unwrap();

    assert!(chunks.is_empty());
}

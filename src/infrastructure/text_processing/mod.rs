mod sentence_splitter;

pub use sentence_splitter::SentenceSplitter;

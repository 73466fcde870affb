/// A bounded-length span of normalized document text, the unit of work sent
/// to the inference backend. Ordinals are stable and 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub ordinal: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(ordinal: usize, text: String) -> Self {
        Self { ordinal, text }
    }
}

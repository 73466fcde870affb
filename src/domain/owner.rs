use uuid::Uuid;

const GUEST_PREFIX: &str = "guest_";

/// Identifies the caller that owns uploaded files. Unauthenticated callers
/// get a generated guest identifier instead of a persistent account id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn guest() -> Self {
        Self(format!("{}{}", GUEST_PREFIX, Uuid::new_v4().simple()))
    }

    pub fn is_guest(&self) -> bool {
        self.0.starts_with(GUEST_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

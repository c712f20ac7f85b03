/// Verified caller identity, the `sub` claim of the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub sub: String,
}

impl Identity {
    pub fn new(sub: impl Into<String>) -> Self {
        Self { sub: sub.into() }
    }
}

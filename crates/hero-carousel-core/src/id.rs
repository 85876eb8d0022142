//! Identifier generation owned by a page-construction context.

/// Generates `<prefix>-<n>` identifiers, starting at 1.
///
/// Each page owns its own generator, so two pages never share hidden
/// counter state.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    issued: u64,
}

impl IdGenerator {
    /// Create a generator for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            issued: 0,
        }
    }

    /// Issue the next identifier.
    pub fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("{}-{}", self.prefix, self.issued)
    }
}

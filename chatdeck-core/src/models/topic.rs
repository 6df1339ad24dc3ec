use serde::Serialize;

/// A decorative label in the topic rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Topic {
    label: &'static str,
}

impl Topic {
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

use serde::Serialize;

/// A selectable chat persona. Instances only exist in the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Agent {
    pub id: &'static str,
    pub name: &'static str,
    /// Avatar image URL, seeded with the id.
    pub avatar: &'static str,
    pub topics: &'static [&'static str],
}

impl Agent {
    /// Single glyph standing in for the avatar image in the terminal.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

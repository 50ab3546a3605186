//! Static shorthand → coin identifier table.

/// Built-in aliases, checked in this order.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("bitcoin", "bitcoin"),
    ("btc", "bitcoin"),
    ("ethereum", "ethereum"),
    ("eth", "ethereum"),
    ("solana", "solana"),
    ("sol", "solana"),
    ("dogecoin", "dogecoin"),
    ("doge", "dogecoin"),
    ("ton", "the-open-network"),
];

/// Ordered mapping from lowercase alias token to canonical coin identifier.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl AliasTable {
    /// Build a table from `(alias, identifier)` pairs. Aliases are lowercased;
    /// order is preserved and decides which alias wins.
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(alias, id)| (alias.into().to_lowercase(), id.into()))
            .filter(|(alias, _)| !alias.is_empty())
            .collect();
        Self { entries }
    }

    /// Returns the identifier for the first alias contained in `text`.
    ///
    /// Plain substring containment: "ethereum classic" resolves to
    /// `ethereum`, and "stone" resolves via `ton`.
    pub fn lookup(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.entries
            .iter()
            .find(|(alias, _)| text.contains(alias.as_str()))
            .map(|(_, id)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::from_pairs(BUILTIN_ALIASES.iter().copied())
    }
}

/// Strip all whitespace and lowercase, so "  Fight  CLUB " == "fightclub".
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// The accepted answer: two title variants (the original release title and
/// its translation), normalized once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    primary: String,
    alternate: String,
    normalized: [String; 2],
}

impl AnswerKey {
    pub fn new(primary: impl Into<String>, alternate: impl Into<String>) -> Self {
        let primary = primary.into();
        let alternate = alternate.into();
        let normalized = [normalize(&primary), normalize(&alternate)];
        Self {
            primary,
            alternate,
            normalized,
        }
    }

    /// Case- and whitespace-insensitive match against either variant.
    pub fn matches(&self, raw: &str) -> bool {
        let guess = normalize(raw);
        self.normalized.iter().any(|n| *n == guess)
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn alternate(&self) -> &str {
        &self.alternate
    }
}

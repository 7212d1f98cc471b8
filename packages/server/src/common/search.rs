//! Case-insensitive substring search across text fields.

/// A normalized, non-empty search needle.
///
/// Matches a row when ANY of the searched fields contains the needle,
/// ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// Returns `None` for a missing or empty search string, which means
    /// "no filter".
    pub fn parse(search: Option<&str>) -> Option<Self> {
        let raw = search?;
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            folded: raw.to_lowercase(),
        })
    }

    pub fn matches(&self, field: &str) -> bool {
        field.to_lowercase().contains(&self.folded)
    }

    pub fn matches_any(&self, fields: &[&str]) -> bool {
        fields.iter().any(|field| self.matches(field))
    }

    /// Pattern for `ILIKE ... ESCAPE '\'` with LIKE wildcards escaped.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.raw.len() + 2);
        pattern.push('%');
        for ch in self.raw.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

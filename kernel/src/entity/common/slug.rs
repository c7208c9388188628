use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Slug(String);

impl Slug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn from_text(text: &str) -> Self {
        let mut slug = String::with_capacity(text.len());
        for c in text.trim().chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        Self(slug.trim_end_matches('-').to_string())
    }
}

#[cfg(test)]
mod test {
    use super::Slug;

    #[test]
    fn slug_lowercases_and_joins_words() {
        assert_eq!(Slug::from_text("The Matrix Reloaded"), Slug::new("the-matrix-reloaded"));
        assert_eq!(Slug::from_text("  Alien: Covenant!  "), Slug::new("alien-covenant"));
        assert_eq!(Slug::from_text("Sci - Fi"), Slug::new("sci-fi"));
    }
}

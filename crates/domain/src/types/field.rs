//! Display-name field selection
//!
//! The administrator picks an ordered subset of [`DisplayField`]s. The order
//! is significant: it is the order tokens appear in the composed name.

use serde::{Deserialize, Serialize};

use crate::impl_token_conversions;

/// A user-profile field that can contribute to a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayField {
    Username,
    Email,
    FirstName,
    LastName,
    Website,
    Role,
}

impl_token_conversions!(DisplayField {
    Username => "username",
    Email => "email",
    FirstName => "first_name",
    LastName => "last_name",
    Website => "website",
    Role => "role",
});

/// Ordered, duplicate-free list of fields used to build display names.
///
/// An empty selection disables name computation entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSelection(Vec<DisplayField>);

impl FieldSelection {
    /// Build a selection, keeping the first occurrence of any repeated field.
    pub fn new(fields: impl IntoIterator<Item = DisplayField>) -> Self {
        let mut selected: Vec<DisplayField> = Vec::new();
        for field in fields {
            if !selected.contains(&field) {
                selected.push(field);
            }
        }
        Self(selected)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse raw tokens, separating accepted fields from rejected tokens.
    ///
    /// Unknown tokens and repeats of an already accepted field are rejected.
    /// Accepted fields keep the order they were submitted in.
    pub fn from_tokens<I, S>(tokens: I) -> TokenFilter
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Vec::new();
        let mut rejected = Vec::new();

        for token in tokens {
            let token = token.as_ref().trim();
            match token.parse::<DisplayField>() {
                Ok(field) if !fields.contains(&field) => fields.push(field),
                _ => rejected.push(token.to_string()),
            }
        }

        TokenFilter { selection: Self(fields), rejected }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> &[DisplayField] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = DisplayField> + '_ {
        self.0.iter().copied()
    }

    /// Persisted token form, in selection order.
    pub fn to_tokens(&self) -> Vec<String> {
        self.0.iter().map(|field| field.as_str().to_string()).collect()
    }
}

impl From<Vec<DisplayField>> for FieldSelection {
    fn from(fields: Vec<DisplayField>) -> Self {
        Self::new(fields)
    }
}

impl<const N: usize> From<[DisplayField; N]> for FieldSelection {
    fn from(fields: [DisplayField; N]) -> Self {
        Self::new(fields)
    }
}

/// Outcome of parsing submitted tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFilter {
    pub selection: FieldSelection,
    pub rejected: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_through_display() {
        for field in DisplayField::ALL {
            assert_eq!(field.as_str().parse::<DisplayField>().unwrap(), *field);
        }
    }

    #[test]
    fn serde_uses_snake_case_tokens() {
        let json = serde_json::to_string(&DisplayField::FirstName).unwrap();
        assert_eq!(json, "\"first_name\"");
    }

    #[test]
    fn from_tokens_preserves_submission_order() {
        let filter = FieldSelection::from_tokens(["role", "email", "username"]);
        assert_eq!(
            filter.selection.fields(),
            &[DisplayField::Role, DisplayField::Email, DisplayField::Username]
        );
        assert!(filter.rejected.is_empty());
    }

    #[test]
    fn from_tokens_rejects_unknown_and_duplicate_tokens() {
        let filter =
            FieldSelection::from_tokens(["username", "nickname", "username", "Email", "email"]);
        assert_eq!(filter.selection.fields(), &[DisplayField::Username, DisplayField::Email]);
        assert_eq!(filter.rejected, vec!["nickname", "username", "Email"]);
    }

    #[test]
    fn new_drops_repeated_fields() {
        let selection =
            FieldSelection::new([DisplayField::Email, DisplayField::Role, DisplayField::Email]);
        assert_eq!(selection.fields(), &[DisplayField::Email, DisplayField::Role]);
    }

    #[test]
    fn serializes_as_plain_token_array() {
        let selection = FieldSelection::from([DisplayField::LastName, DisplayField::Website]);
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"["last_name","website"]"#);
        assert_eq!(selection.to_tokens(), vec!["last_name", "website"]);
    }
}

//! Display-name composition
//!
//! Pure mapping from a user record and an ordered field selection to a
//! display name. An empty result means "nothing to write".

use namecast_domain::constants::NAME_TOKEN_SEPARATOR;
use namecast_domain::{DisplayField, FieldSelection, UserRecord};

use super::sanitize::{capitalize_first, sanitize_text};

/// Compose the display name for `user` from `selection`.
///
/// Fields are resolved in selection order. Empty values, and values that
/// sanitize to nothing, are skipped; the rest are joined with a single space.
pub fn compose(user: &UserRecord, selection: &FieldSelection) -> String {
    selection
        .iter()
        .filter_map(|field| resolve_field(user, field))
        .map(|value| sanitize_text(&value))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(NAME_TOKEN_SEPARATOR)
}

/// Raw value of `field` for `user`, or `None` when the field is empty.
fn resolve_field(user: &UserRecord, field: DisplayField) -> Option<String> {
    let value = match field {
        DisplayField::Username => user.login.clone(),
        DisplayField::Email => user.email.clone(),
        DisplayField::FirstName => user.first_name.clone(),
        DisplayField::LastName => user.last_name.clone(),
        DisplayField::Website => user.website.clone(),
        DisplayField::Role => capitalize_first(user.primary_role()?),
    };

    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jdoe() -> UserRecord {
        UserRecord {
            id: 1,
            login: "jdoe".into(),
            email: "jdoe@example.com".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            website: "https://jdoe.dev".into(),
            roles: vec!["admin".into(), "editor".into()],
            display_name: "jdoe".into(),
        }
    }

    #[test]
    fn username_and_role() {
        let selection = FieldSelection::from([DisplayField::Username, DisplayField::Role]);
        assert_eq!(compose(&jdoe(), &selection), "jdoe Admin");
    }

    #[test]
    fn empty_first_name_is_skipped() {
        let user = UserRecord { first_name: String::new(), last_name: "Smith".into(), ..jdoe() };
        let selection = FieldSelection::from([DisplayField::FirstName, DisplayField::LastName]);
        assert_eq!(compose(&user, &selection), "Smith");
    }

    #[test]
    fn empty_selection_composes_nothing() {
        assert_eq!(compose(&jdoe(), &FieldSelection::empty()), "");
    }

    #[test]
    fn order_of_selection_is_order_of_tokens() {
        let user = jdoe();
        let email_first = FieldSelection::from([DisplayField::Email, DisplayField::Username]);
        let username_first = FieldSelection::from([DisplayField::Username, DisplayField::Email]);

        assert_eq!(compose(&user, &email_first), "jdoe@example.com jdoe");
        assert_ne!(compose(&user, &email_first), compose(&user, &username_first));
    }

    #[test]
    fn repeated_calls_agree() {
        let user = jdoe();
        let selection = FieldSelection::new(DisplayField::ALL.iter().copied());
        let first = compose(&user, &selection);
        assert_eq!(first, compose(&user, &selection));
        assert_eq!(first, "jdoe jdoe@example.com John Doe https://jdoe.dev Admin");
    }

    #[test]
    fn missing_role_is_skipped() {
        let user = UserRecord { roles: Vec::new(), ..jdoe() };
        let selection = FieldSelection::from([DisplayField::Role, DisplayField::LastName]);
        assert_eq!(compose(&user, &selection), "Doe");
    }

    #[test]
    fn all_fields_empty_composes_nothing() {
        let user = UserRecord { id: 9, ..UserRecord::default() };
        let selection = FieldSelection::new(DisplayField::ALL.iter().copied());
        assert_eq!(compose(&user, &selection), "");
    }

    #[test]
    fn values_are_sanitized() {
        let user = UserRecord {
            first_name: "<em>John</em>".into(),
            last_name: "Doe\n\t".into(),
            ..jdoe()
        };
        let selection = FieldSelection::from([DisplayField::FirstName, DisplayField::LastName]);
        assert_eq!(compose(&user, &selection), "John Doe");
    }

    #[test]
    fn value_that_sanitizes_to_nothing_is_skipped() {
        let user = UserRecord { first_name: "<br>".into(), ..jdoe() };
        let selection = FieldSelection::from([DisplayField::FirstName, DisplayField::LastName]);
        assert_eq!(compose(&user, &selection), "Doe");
    }
}

use crate::error::FormError;
use crate::model::{BodyPart, Gender};

/// The in-progress entry: whatever the user has clicked, typed and picked so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub selected_part: Option<BodyPart>,
    pub description: String,
    pub gender: Option<Gender>,
}

impl FormState {
    /// Overwrites any previous selection.
    pub fn select_body_part(&mut self, part: BodyPart) {
        self.selected_part = Some(part);
    }

    pub fn clear_selection(&mut self) {
        self.selected_part = None;
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.gender = gender;
    }

    /// All three fields must be filled in. Whitespace counts as a description.
    pub fn validate(&self) -> Result<(BodyPart, String, Gender), FormError> {
        match (self.selected_part, self.description.is_empty(), self.gender) {
            (Some(part), false, Some(gender)) => Ok((part, self.description.clone(), gender)),
            _ => Err(FormError::Incomplete),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormState {
        let mut form = FormState::default();
        form.select_body_part(BodyPart::Head);
        form.set_description("bruise");
        form.set_gender(Some(Gender::Female));
        form
    }

    #[test]
    fn test_selection_overwrites_previous() {
        let mut form = FormState::default();
        form.select_body_part(BodyPart::Neck);
        form.select_body_part(BodyPart::RightToe);
        assert_eq!(form.selected_part, Some(BodyPart::RightToe));
        form.clear_selection();
        assert_eq!(form.selected_part, None);
    }

    #[test]
    fn test_validate_complete_form() {
        let form = filled();
        assert_eq!(
            form.validate(),
            Ok((BodyPart::Head, "bruise".to_owned(), Gender::Female))
        );
    }

    #[test]
    fn test_validate_reports_each_missing_field() {
        let mut no_part = filled();
        no_part.clear_selection();
        assert_eq!(no_part.validate(), Err(FormError::Incomplete));

        let mut no_description = filled();
        no_description.set_description("");
        assert_eq!(no_description.validate(), Err(FormError::Incomplete));

        let mut no_gender = filled();
        no_gender.set_gender(None);
        assert_eq!(no_gender.validate(), Err(FormError::Incomplete));
    }

    #[test]
    fn test_whitespace_description_is_accepted() {
        let mut form = filled();
        form.set_description("  ");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_reset_returns_to_defaults() {
        let mut form = filled();
        form.reset();
        assert_eq!(form, FormState::default());
    }
}

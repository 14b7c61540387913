//! Form state and client-side validation for trip creation and sign-in.
//!
//! Validation checks required fields only; dates must additionally parse as
//! ISO calendar dates because the request carries typed dates.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{ActivityKind, CreateTripRequest, LoginRequest, NewActivity};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a date (YYYY-MM-DD), got {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("a submission is already in progress")]
    SubmitInProgress,
}

/// The activity being composed before it is appended to the trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityDraft {
    pub name: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub cost: f64,
    pub location: String,
    pub kind: ActivityKind,
}

impl ActivityDraft {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }

    fn into_activity(self) -> NewActivity {
        NewActivity {
            name: self.name,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            cost: self.cost,
            location: self.location,
            kind: self.kind,
        }
    }
}

/// The create-trip form. `destination_id` holds the selected destination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripForm {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub destination_id: String,
    pub is_public: bool,
    pub activities: Vec<NewActivity>,
    pub draft: ActivityDraft,
}

impl TripForm {
    /// Append the draft when it has a name and a description, then clear it.
    pub fn add_activity(&mut self) -> bool {
        if !self.draft.is_complete() {
            return false;
        }
        let draft = std::mem::take(&mut self.draft);
        self.activities.push(draft.into_activity());
        true
    }

    pub fn remove_activity(&mut self, index: usize) -> Option<NewActivity> {
        (index < self.activities.len()).then(|| self.activities.remove(index))
    }

    pub fn activity_total(&self) -> f64 {
        self.activities.iter().map(|a| a.cost).sum()
    }

    pub fn clear(&mut self) {
        *self = TripForm::default();
    }

    pub fn validate(&self) -> Result<CreateTripRequest, FormError> {
        let name = required("name", &self.name)?;
        let destination = required("destination", &self.destination_id)?;
        let description = required("description", &self.description)?;
        let start_date = parse_date("start date", &self.start_date)?;
        let end_date = parse_date("end date", &self.end_date)?;
        Ok(CreateTripRequest {
            name,
            description,
            start_date,
            end_date,
            location: destination,
            activities: self.activities.clone(),
            is_public: self.is_public,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(value.to_string())
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    let value = required(field, value)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| FormError::InvalidDate { field, value })
}

/// The sign-in form; the email doubles as the username.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        let username = required("email", &self.email)?;
        if self.password.is_empty() {
            return Err(FormError::MissingField("password"));
        }
        Ok(LoginRequest {
            username,
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TripForm {
        TripForm {
            name: "Summer Adventure in Tokyo".into(),
            description: "Temples and ramen".into(),
            start_date: "2025-07-01".into(),
            end_date: "2025-07-08".into(),
            destination_id: "1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn incomplete_draft_is_not_added() {
        let mut form = filled();
        form.draft.name = "Museum".into();
        assert!(!form.add_activity());
        assert!(form.activities.is_empty());
        assert_eq!(form.draft.name, "Museum");
    }

    #[test]
    fn complete_draft_is_added_and_cleared() {
        let mut form = filled();
        form.draft = ActivityDraft {
            name: "Museum".into(),
            description: "Art".into(),
            cost: 25.0,
            ..Default::default()
        };
        assert!(form.add_activity());
        assert_eq!(form.activities.len(), 1);
        assert_eq!(form.draft, ActivityDraft::default());
        assert_eq!(form.activity_total(), 25.0);
    }

    #[test]
    fn remove_activity_out_of_range_is_none() {
        let mut form = filled();
        assert!(form.remove_activity(0).is_none());
    }

    #[test]
    fn missing_required_field_is_reported() {
        let mut form = filled();
        form.destination_id.clear();
        assert_eq!(form.validate().unwrap_err(), FormError::MissingField("destination"));
    }

    #[test]
    fn invalid_date_is_reported() {
        let mut form = filled();
        form.end_date = "next week".into();
        assert!(matches!(
            form.validate().unwrap_err(),
            FormError::InvalidDate { field: "end date", .. }
        ));
    }

    #[test]
    fn valid_form_builds_request() {
        let request = filled().validate().unwrap();
        assert_eq!(request.location, "1");
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "a@b.c".into(),
            password: String::new(),
        };
        assert_eq!(form.validate().unwrap_err(), FormError::MissingField("password"));
        let form = LoginForm {
            email: "a@b.c".into(),
            password: "pw".into(),
        };
        assert_eq!(form.validate().unwrap().username, "a@b.c");
    }
}

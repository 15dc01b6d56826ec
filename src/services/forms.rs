use super::db::{ActiveModel, Model, ServiceStatus};
use chrono::NaiveDateTime;
use reqwest::Url;
use sea_orm::{ActiveValue::Set, IntoActiveModel};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

pub const NAME_MAX_LENGTH: usize = 100;
pub const NICKNAME_MAX_LENGTH: usize = 50;
pub const SUMMARY_MAX_LENGTH: usize = 255;

/// Raw urlencoded form body. Built from the decoded key/value pairs so that
/// missing, repeated or unknown fields surface as validation errors instead
/// of extractor rejections.
#[derive(ToSchema, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ServiceFormInput {
    pub name: String,
    pub nickname: String,
    pub summary: String,
    pub description: String,
    pub url: String,
    /// HTML checkbox, absent when unchecked
    pub in_development: Option<String>,
}

/// A repeated field keeps its last value. Unknown fields are ignored.
impl FromIterator<(String, String)> for ServiceFormInput {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut input = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => input.name = value,
                "nickname" => input.nickname = value,
                "summary" => input.summary = value,
                "description" => input.description = value,
                "url" => input.url = value,
                "in_development" => input.in_development = Some(value),
                _ => {}
            }
        }
        input
    }
}

impl From<&Model> for ServiceFormInput {
    fn from(model: &Model) -> Self {
        Self {
            name: model.name.clone(),
            nickname: model.nickname.clone(),
            summary: model.summary.clone(),
            description: model.description.clone().unwrap_or_default(),
            url: model.url.clone().unwrap_or_default(),
            in_development: model.in_development.then(|| "on".to_string()),
        }
    }
}

#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The owner-editable fields of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceChanges {
    pub name: String,
    pub summary: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub in_development: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub nickname: String,
    pub changes: ServiceChanges,
}

impl NewService {
    pub fn into_active_model(self, owner: &str, now: NaiveDateTime) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.changes.name),
            nickname: Set(self.nickname),
            summary: Set(self.changes.summary),
            description: Set(self.changes.description),
            url: Set(self.changes.url),
            in_development: Set(self.changes.in_development),
            status: Set(ServiceStatus::Submitted),
            owner: Set(owner.to_string()),
            date_submitted: Set(now),
            date_modified: Set(now),
        }
    }
}

impl ServiceChanges {
    /// Status, owner, nickname and submission date are left as they are.
    pub fn apply_to(self, model: Model, now: NaiveDateTime) -> ActiveModel {
        let mut active = model.into_active_model();
        active.name = Set(self.name);
        active.summary = Set(self.summary);
        active.description = Set(self.description);
        active.url = Set(self.url);
        active.in_development = Set(self.in_development);
        active.date_modified = Set(now);
        active
    }
}

impl ServiceFormInput {
    /// Validation for the submission form, nickname included.
    pub fn validate_new(&self) -> Result<NewService, FieldErrors> {
        let mut errors = FieldErrors::default();
        let nickname = validate_nickname(&self.nickname, &mut errors);
        let changes = self.collect_changes(&mut errors);

        match (nickname, changes) {
            (Some(nickname), Some(changes)) if errors.is_empty() => {
                Ok(NewService { nickname, changes })
            }
            _ => Err(errors),
        }
    }

    /// Validation for the edit form. The nickname field is ignored.
    pub fn validate_changes(&self) -> Result<ServiceChanges, FieldErrors> {
        let mut errors = FieldErrors::default();
        match self.collect_changes(&mut errors) {
            Some(changes) if errors.is_empty() => Ok(changes),
            _ => Err(errors),
        }
    }

    fn collect_changes(&self, errors: &mut FieldErrors) -> Option<ServiceChanges> {
        let name = required_text("name", &self.name, NAME_MAX_LENGTH, errors);
        let summary = required_text("summary", &self.summary, SUMMARY_MAX_LENGTH, errors);
        let url = validate_url(&self.url, errors);
        let description = optional_text(&self.description);

        Some(ServiceChanges {
            name: name?,
            summary: summary?,
            description,
            url: url.ok()?,
            in_development: is_checked(self.in_development.as_deref()),
        })
    }
}

fn required_text(
    field: &'static str,
    value: &str,
    max_length: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "This field is required.");
        return None;
    }
    if value.chars().count() > max_length {
        errors.add(
            field,
            format!("Ensure this value has at most {} characters.", max_length),
        );
        return None;
    }
    Some(value.to_string())
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn validate_nickname(value: &str, errors: &mut FieldErrors) -> Option<String> {
    let nickname = required_text("nickname", value, NICKNAME_MAX_LENGTH, errors)?;
    if !nickname
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        errors.add(
            "nickname",
            "Use only letters, numbers, underscores or hyphens.",
        );
        return None;
    }
    Some(nickname.to_lowercase())
}

// Ok(None) is an empty field, Err(()) has already been reported
fn validate_url(value: &str, errors: &mut FieldErrors) -> Result<Option<String>, ()> {
    let Some(value) = optional_text(value) else {
        return Ok(None);
    };
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Some(value)),
        _ => {
            errors.add("url", "Enter a valid http or https URL.");
            Err(())
        }
    }
}

fn is_checked(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    )
}

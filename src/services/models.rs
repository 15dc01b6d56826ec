use super::db::ServiceStatus;
use super::forms::{FieldErrors, ServiceFormInput};
use crate::common::pagination::Page;
use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema, Serialize, Debug, Clone, PartialEq)]
pub struct ServiceRead {
    pub id: Uuid,
    pub name: String,
    pub nickname: String,
    pub summary: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub in_development: bool,
    pub status: ServiceStatus,
    pub date_submitted: NaiveDateTime,
    pub date_modified: NaiveDateTime,
}

impl From<super::db::Model> for ServiceRead {
    fn from(model: super::db::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            nickname: model.nickname,
            summary: model.summary,
            description: model.description,
            url: model.url,
            in_development: model.in_development,
            status: model.status,
            date_submitted: model.date_submitted,
            date_modified: model.date_modified,
        }
    }
}

// View models handed to the rendering boundary

#[derive(Serialize)]
pub struct ServiceList {
    pub services: Vec<ServiceRead>,
}

impl From<Vec<super::db::Model>> for ServiceList {
    fn from(models: Vec<super::db::Model>) -> Self {
        Self {
            services: models.into_iter().map(ServiceRead::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct BrowseListing {
    pub services: Page<ServiceRead>,
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct ServiceForm {
    pub form: ServiceFormInput,
    pub errors: FieldErrors,
    /// Nickname of the listing being edited, absent on submission
    pub editing: Option<String>,
}

#[derive(Serialize)]
pub struct ServiceDetail {
    pub service: ServiceRead,
}

#[derive(Serialize)]
pub struct MineListing {
    pub services: Vec<ServiceRead>,
    pub notice: Option<&'static str>,
}

/// Confirmation shown on the "mine" page after a redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Submitted,
    Updated,
}

impl Notice {
    pub fn as_param(self) -> &'static str {
        match self {
            Notice::Submitted => "submitted",
            Notice::Updated => "updated",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(Notice::Submitted),
            "updated" => Some(Notice::Updated),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::Submitted => "Your service has been submitted for moderation.",
            Notice::Updated => "Service updated.",
        }
    }
}

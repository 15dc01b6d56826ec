use crate::services::db::Model as Service;
use serde::Serialize;

/// Message accepted by the mail relay.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AdminNotification {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl AdminNotification {
    pub fn for_submission(service: &Service, from: &str, to: &[String]) -> Self {
        let body = format!(
            "A new service has been submitted for moderation.\n\n\
             Name: {}\n\
             Nickname: {}\n\
             Submitted by: {}\n\
             Summary: {}\n",
            service.name, service.nickname, service.owner, service.summary,
        );

        Self {
            from: from.to_string(),
            to: to.to_vec(),
            subject: format!("New service submitted: {}", service.name),
            body,
        }
    }
}

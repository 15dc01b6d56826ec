use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Debug)]
pub struct FeedbackWidget {
    pub data: Value,
}

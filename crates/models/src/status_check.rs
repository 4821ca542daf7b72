use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ValidationError;
use crate::record::Record;
use crate::validation::PayloadReader;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, utoipa::ToSchema)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl Record for StatusCheck {
    type Input = StatusCheckCreate;

    const KIND: &'static str = "status_check";
    const COLLECTION: &'static str = "status_checks";

    fn validate(payload: &Value) -> Result<StatusCheckCreate, ValidationError> {
        let mut r = PayloadReader::new(payload);
        match r.required_str("client_name") {
            Some(client_name) => {
                r.finish()?;
                Ok(StatusCheckCreate { client_name })
            }
            None => Err(r.into_error()),
        }
    }

    fn materialize(input: StatusCheckCreate, id: String, created: DateTime<Utc>) -> Self {
        Self { id, client_name: input.client_name, timestamp: created }
    }

    fn id(&self) -> &str { &self.id }
}

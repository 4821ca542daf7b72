use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ValidationError;
use crate::record::Record;
use crate::validation::PayloadReader;

/// Investor contact form submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InvestorRequest {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub title: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, utoipa::ToSchema)]
pub struct InvestorRequestCreate {
    pub full_name: String,
    /// Must be a valid email address.
    pub email: String,
    pub company: String,
    pub title: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl Record for InvestorRequest {
    type Input = InvestorRequestCreate;

    const KIND: &'static str = "investor_request";
    const COLLECTION: &'static str = "investor_requests";

    fn validate(payload: &Value) -> Result<InvestorRequestCreate, ValidationError> {
        let mut r = PayloadReader::new(payload);
        let full_name = r.required_str("full_name");
        let email = r.required_email("email");
        let company = r.required_str("company");
        let title = r.required_str("title");
        let phone = r.optional_str("phone");
        let message = r.optional_str("message");

        match (full_name, email, company, title) {
            (Some(full_name), Some(email), Some(company), Some(title)) => {
                r.finish()?;
                Ok(InvestorRequestCreate { full_name, email, company, title, phone, message })
            }
            _ => Err(r.into_error()),
        }
    }

    fn materialize(input: InvestorRequestCreate, id: String, created: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: input.full_name,
            email: input.email,
            company: input.company,
            title: input.title,
            phone: input.phone,
            message: input.message,
            created_at: created,
        }
    }

    fn id(&self) -> &str { &self.id }
}

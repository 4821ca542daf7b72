use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ValidationError;
use crate::record::Record;
use crate::validation::PayloadReader;

pub const PARTNERSHIP_SUBJECT: &str = "Inquiry: Partnerships";
pub const PARTNERSHIP_FORWARD_TO: &str = "office@oneaviationresources.in";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PartnershipInquiry {
    pub id: String,
    pub email: String,
    pub subject: String,
    pub forward_to: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, utoipa::ToSchema)]
pub struct PartnershipInquiryCreate {
    pub email: String,
}

impl Record for PartnershipInquiry {
    type Input = PartnershipInquiryCreate;

    const KIND: &'static str = "partnership_inquiry";
    const COLLECTION: &'static str = "partnership_inquiries";

    fn validate(payload: &Value) -> Result<PartnershipInquiryCreate, ValidationError> {
        let mut r = PayloadReader::new(payload);
        match r.required_email("email") {
            Some(email) => {
                r.finish()?;
                Ok(PartnershipInquiryCreate { email })
            }
            None => Err(r.into_error()),
        }
    }

    // subject/forward_to are fixed; whatever the caller sent is never read
    fn materialize(input: PartnershipInquiryCreate, id: String, created: DateTime<Utc>) -> Self {
        Self {
            id,
            email: input.email,
            subject: PARTNERSHIP_SUBJECT.to_string(),
            forward_to: PARTNERSHIP_FORWARD_TO.to_string(),
            created_at: created,
        }
    }

    fn id(&self) -> &str { &self.id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constants_override_caller_values() {
        let input = PartnershipInquiry::validate(&json!({
            "email": "a@b.com",
            "subject": "Buy now",
            "forward_to": "attacker@example.com"
        }))
        .unwrap();
        let rec = PartnershipInquiry::materialize(input, "id".into(), crate::timestamp::now());
        assert_eq!(rec.subject, "Inquiry: Partnerships");
        assert_eq!(rec.forward_to, "office@oneaviationresources.in");
        assert_eq!(rec.email, "a@b.com");
    }

    #[test]
    fn rejects_domain_without_dot() {
        let err = PartnershipInquiry::validate(&json!({"email": "a@localhost"})).unwrap_err();
        assert_eq!(err.fields[0].code, "email");
    }
}

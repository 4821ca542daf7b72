use std::sync::Arc;

use models::{timestamp, Record};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::store::DocumentStore;

/// Maximum number of documents a listing returns.
pub const LIST_LIMIT: u64 = 1000;

/// Submit/list for every record kind. Holds no state besides the store handle.
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn DocumentStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Validate `payload` as `R`, assign id and creation time, persist, return the record.
    pub async fn submit<R: Record>(&self, payload: &Value) -> Result<R, ServiceError> {
        let input = R::validate(payload)?;
        let record = R::materialize(input, Uuid::new_v4().to_string(), timestamp::now());
        let doc = record.to_document()?;

        if let Err(e) = self.store.insert_one(R::COLLECTION, doc).await {
            error!(kind = R::KIND, collection = R::COLLECTION, err = %e, "insert failed");
            return Err(e);
        }
        info!(kind = R::KIND, id = record.id(), "record created");
        Ok(record)
    }

    /// Up to [`LIST_LIMIT`] records of kind `R`, in store order.
    pub async fn list<R: Record>(&self) -> Result<Vec<R>, ServiceError> {
        let docs = match self.store.find(R::COLLECTION, LIST_LIMIT).await {
            Ok(docs) => docs,
            Err(e) => {
                error!(kind = R::KIND, collection = R::COLLECTION, err = %e, "find failed");
                return Err(e);
            }
        };
        let records = docs
            .into_iter()
            .map(R::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        info!(kind = R::KIND, count = records.len(), "records listed");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use models::{Document, InvestorRequest, PartnershipInquiry, StatusCheck};
    use serde_json::json;

    use crate::store::MemoryDocumentStore;

    fn setup() -> (Arc<MemoryDocumentStore>, RecordService) {
        let store = Arc::new(MemoryDocumentStore::new());
        let svc = RecordService::new(store.clone());
        (store, svc)
    }

    fn investor_body() -> Value {
        json!({
            "full_name": "Ada Lovelace",
            "email": "ada@example.com",
            "company": "Analytical Engines",
            "title": "Partner"
        })
    }

    #[tokio::test]
    async fn identical_payloads_get_distinct_ids() -> Result<(), anyhow::Error> {
        let (_, svc) = setup();
        let body = json!({"client_name": "tower"});
        let a: StatusCheck = svc.submit(&body).await?;
        let b: StatusCheck = svc.submit(&body).await?;
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn timestamp_within_call_window() -> Result<(), anyhow::Error> {
        let (_, svc) = setup();
        // now() truncates to micros, so compare against a truncated lower bound
        let before = timestamp::now();
        let rec: InvestorRequest = svc.submit(&investor_body()).await?;
        let after = Utc::now();
        assert!(rec.created_at >= before && rec.created_at <= after);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_email_writes_nothing() -> Result<(), anyhow::Error> {
        let (store, svc) = setup();
        let mut body = investor_body();
        body["email"] = json!("not-an-email");
        let err = svc.submit::<InvestorRequest>(&body).await.unwrap_err();
        match err {
            ServiceError::Validation(v) => assert!(v.has_field("email")),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(store.count("investor_requests").await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn partnership_constants_are_fixed() -> Result<(), anyhow::Error> {
        let (store, svc) = setup();
        let rec: PartnershipInquiry = svc
            .submit(&json!({"email": "a@b.com", "subject": "x", "forward_to": "y@z.com"}))
            .await?;
        assert_eq!(rec.subject, "Inquiry: Partnerships");
        assert_eq!(rec.forward_to, "office@oneaviationresources.in");

        let stored = store.documents("partnership_inquiries").await;
        assert_eq!(stored[0]["subject"], "Inquiry: Partnerships");
        assert_eq!(stored[0]["forward_to"], "office@oneaviationresources.in");
        Ok(())
    }

    #[tokio::test]
    async fn international_email_accepted_with_lowercased_domain() -> Result<(), anyhow::Error> {
        let (store, svc) = setup();
        let rec: PartnershipInquiry = svc.submit(&json!({"email": "José@München.DE"})).await?;
        assert_eq!(rec.email, "José@münchen.de");
        let stored = store.documents("partnership_inquiries").await;
        assert_eq!(stored[0]["email"], "José@münchen.de");
        Ok(())
    }

    #[tokio::test]
    async fn list_round_trips_timestamp() -> Result<(), anyhow::Error> {
        let (_, svc) = setup();
        let created: StatusCheck = svc.submit(&json!({"client_name": "tower"})).await?;
        let listed: Vec<StatusCheck> = svc.list().await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].timestamp.timestamp(), created.timestamp.timestamp());
        assert_eq!(listed[0], created);
        Ok(())
    }

    #[tokio::test]
    async fn empty_collection_lists_empty() -> Result<(), anyhow::Error> {
        let (_, svc) = setup();
        assert!(svc.list::<PartnershipInquiry>().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_is_capped() -> Result<(), anyhow::Error> {
        let (store, svc) = setup();
        let body = json!({"client_name": "bulk"});
        for _ in 0..1500 {
            svc.submit::<StatusCheck>(&body).await?;
        }
        assert_eq!(store.count("status_checks").await, 1500);
        let listed = svc.list::<StatusCheck>().await?;
        assert_eq!(listed.len(), LIST_LIMIT as usize);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_fields_are_dropped() -> Result<(), anyhow::Error> {
        let (store, svc) = setup();
        let mut body = investor_body();
        body["admin"] = json!(true);
        body["id"] = json!("caller-id");
        let rec: InvestorRequest = svc.submit(&body).await?;
        assert_ne!(rec.id, "caller-id");

        let stored = store.documents("investor_requests").await;
        assert!(!stored[0].contains_key("admin"));
        assert_eq!(stored[0]["id"], json!(rec.id));
        let returned = serde_json::to_value(&rec)?;
        assert!(returned.get("admin").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn kinds_use_separate_collections() -> Result<(), anyhow::Error> {
        let (store, svc) = setup();
        svc.submit::<StatusCheck>(&json!({"client_name": "a"})).await?;
        svc.submit::<PartnershipInquiry>(&json!({"email": "a@b.com"})).await?;
        assert_eq!(store.count("status_checks").await, 1);
        assert_eq!(store.count("partnership_inquiries").await, 1);
        assert_eq!(store.count("investor_requests").await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn legacy_string_timestamps_are_rehydrated() -> Result<(), anyhow::Error> {
        let (store, svc) = setup();
        let Value::Object(doc) = json!({
            "id": "legacy-1",
            "client_name": "old",
            "timestamp": "2023-11-05T08:15:30.250000+00:00"
        }) else { unreachable!() };
        store.insert_one("status_checks", doc).await?;

        let listed: Vec<StatusCheck> = svc.list().await?;
        assert_eq!(timestamp::format(&listed[0].timestamp), "2023-11-05T08:15:30.250000Z");
        Ok(())
    }

    struct BrokenStore;

    #[async_trait]
    impl DocumentStore for BrokenStore {
        async fn insert_one(&self, _: &str, _: Document) -> Result<(), ServiceError> {
            Err(ServiceError::storage("connection refused"))
        }

        async fn find(&self, _: &str, _: u64) -> Result<Vec<Document>, ServiceError> {
            Err(ServiceError::storage("connection refused"))
        }
    }

    #[tokio::test]
    async fn storage_failures_surface_as_storage_errors() {
        let svc = RecordService::new(Arc::new(BrokenStore));
        let err = svc.submit::<StatusCheck>(&json!({"client_name": "a"})).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        let err = svc.list::<StatusCheck>().await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn validation_runs_before_storage() {
        let svc = RecordService::new(Arc::new(BrokenStore));
        let err = svc.submit::<StatusCheck>(&json!({})).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn corrupt_document_is_storage_error() -> Result<(), anyhow::Error> {
        let (store, svc) = setup();
        let Value::Object(doc) = json!({"id": "x", "client_name": "c"}) else { unreachable!() };
        store.insert_one("status_checks", doc).await?;
        let err = svc.list::<StatusCheck>().await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        Ok(())
    }
}

use models::errors::FieldError;
use models::{
    InvestorRequest, InvestorRequestCreate, PartnershipInquiry, PartnershipInquiryCreate, StatusCheck,
    StatusCheckCreate,
};
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct WelcomeResponse { pub message: String }

/// `detail` lists failing fields on 422 and is absent on 500.
#[derive(ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub detail: Option<Vec<FieldError>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::records::root,
        crate::routes::records::create_status_check,
        crate::routes::records::list_status_checks,
        crate::routes::records::create_investor_request,
        crate::routes::records::list_investor_requests,
        crate::routes::records::create_partnership_inquiry,
        crate::routes::records::list_partnership_inquiries,
    ),
    components(
        schemas(
            HealthResponse,
            WelcomeResponse,
            ErrorBody,
            FieldError,
            StatusCheck,
            StatusCheckCreate,
            InvestorRequest,
            InvestorRequestCreate,
            PartnershipInquiry,
            PartnershipInquiryCreate,
        )
    ),
    tags(
        (name = "health"),
        (name = "status"),
        (name = "investors"),
        (name = "partnerships")
    )
)]
pub struct ApiDoc;

//! Record kinds, their field validation, and the persisted document shape.

pub mod errors;
pub mod validation;
pub mod timestamp;
pub mod record;
pub mod status_check;
pub mod investor_request;
pub mod partnership_inquiry;
pub mod document;
pub mod db;

pub use record::{Document, Record};
pub use status_check::{StatusCheck, StatusCheckCreate};
pub use investor_request::{InvestorRequest, InvestorRequestCreate};
pub use partnership_inquiry::{PartnershipInquiry, PartnershipInquiryCreate};

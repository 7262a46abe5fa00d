//! The patron record searched by the demo.

use chrono::{NaiveDate, NaiveDateTime};
use pagesift::{FieldEnum, Record};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Review state of a patron form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FieldEnum)]
pub enum Status {
    Created = 0,
    PendingApproval = 1,
    Approved = 2,
    Rejected = 4,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Created,
        Status::PendingApproval,
        Status::Approved,
        Status::Rejected,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FieldEnum)]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Others];
}

/// A high-risk patron form, as filed by an external reviewer.
///
/// Personal details come from an external database and are only filled in
/// once the form is approved, hence the optional fields. Serialized and
/// searched with PascalCase names (`FormID`, `DateJoined`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "PascalCase")]
#[sift(key = "FormID", sort = "DateJoined", rename_all = "PascalCase")]
pub struct ExternalPatron {
    #[serde(rename = "FormID")]
    #[sift(rename = "FormID")]
    pub form_id: u32,
    pub high_risk_patron_id: u32,
    #[serde(rename = "DocumentID")]
    #[sift(rename = "DocumentID")]
    pub document_id: u32,
    pub created_date: NaiveDateTime,
    #[serde(rename = "CreatedByID")]
    #[sift(rename = "CreatedByID")]
    pub created_by_id: Option<String>,
    pub last_modified_date: Option<NaiveDateTime>,
    #[serde(rename = "LastModifiedByID")]
    #[sift(rename = "LastModifiedByID")]
    pub last_modified_by_id: Option<String>,
    pub submitted_for_approval_date: Option<NaiveDateTime>,
    #[serde(rename = "SubmittedForApprovalByID")]
    #[sift(rename = "SubmittedForApprovalByID")]
    pub submitted_for_approval_by_id: Option<String>,
    pub approved_date: Option<NaiveDateTime>,
    #[serde(rename = "ApprovedByID")]
    #[sift(rename = "ApprovedByID")]
    pub approved_by_id: Option<String>,
    pub description: Option<String>,
    pub form_status: Status,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub nationality: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub passport_number: Option<String>,
    pub email_address: Option<String>,
    pub contact_number: Option<String>,
    pub mailing_address: Option<String>,
    pub billing_address: Option<String>,
    pub average_bet_size: Option<Decimal>,
    pub win_lose_ratio: Option<Decimal>,
    pub frequency_of_visits_per_month: Option<Decimal>,
    pub self_exclusion_status: Option<bool>,
    pub additional_information: Option<String>,
    pub date_joined: Option<NaiveDateTime>,
}

impl ExternalPatron {
    /// A blank form with only the required fields set.
    pub fn new(form_id: u32, created_date: NaiveDateTime, form_status: Status) -> Self {
        ExternalPatron {
            form_id,
            high_risk_patron_id: form_id,
            document_id: form_id,
            created_date,
            created_by_id: None,
            last_modified_date: None,
            last_modified_by_id: None,
            submitted_for_approval_date: None,
            submitted_for_approval_by_id: None,
            approved_date: None,
            approved_by_id: None,
            description: None,
            form_status,
            first_name: None,
            last_name: None,
            full_name: None,
            nationality: None,
            gender: None,
            date_of_birth: None,
            passport_number: None,
            email_address: None,
            contact_number: None,
            mailing_address: None,
            billing_address: None,
            average_bet_size: None,
            win_lose_ratio: None,
            frequency_of_visits_per_month: None,
            self_exclusion_status: None,
            additional_information: None,
            date_joined: None,
        }
    }

    /// Sets first and last name, keeping `full_name` in step.
    pub fn with_name(mut self, first: &str, last: &str) -> Self {
        self.first_name = Some(first.to_string());
        self.last_name = Some(last.to_string());
        self.full_name = Some(format!("{} {}", first, last));
        self
    }
}

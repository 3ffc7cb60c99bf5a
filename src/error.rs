use reqwest::StatusCode;
use thiserror::Error;

use crate::page::FieldId;

/// Inline validation failure for one of the annotated fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Please enter both your Firstname and Lastname.")]
    FullName,

    #[error("Please enter a 10-digit Student ID.")]
    StudentId,

    #[error("Please provide a valid university email in the format 'xxx.yyy@dome.tu.ac.th'.")]
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("End datetime should be after the start datetime.")]
pub struct DateRangeError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    #[error("Please select a type of work/activity.")]
    ActivityTypeUnselected,

    #[error("Please enter a number for {}.", .0.label())]
    NotANumber(FieldId),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend rejected request with status {0}")]
    Rejected(StatusCode),

    #[error("Failed to build http client: {0}")]
    Build(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid port: {value}")]
    InvalidPort { name: &'static str, value: String },
}

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::page::{FieldId, FormPage};
use crate::validation;

/// Buddhist calendar year minus Gregorian year.
pub const BUDDHIST_ERA_OFFSET: i64 = 543;

/// `None` when the year is too close to `i64::MIN` to convert.
pub fn buddhist_to_gregorian(year: i64) -> Option<i64> {
    year.checked_sub(BUDDHIST_ERA_OFFSET)
}

pub fn gregorian_to_buddhist(year: i64) -> Option<i64> {
    year.checked_add(BUDDHIST_ERA_OFFSET)
}

/// Raw control values as entered on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub fullname: String,
    pub student_id: String,
    pub email: String,
    pub work_title: String,
    pub activity_type: String,
    pub academic_year: String,
    pub semester: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub description: String,
}

impl FormFields {
    pub fn from_page<P: FormPage + ?Sized>(page: &P) -> Self {
        Self {
            fullname: page.value(FieldId::FullName),
            student_id: page.value(FieldId::StudentId),
            email: page.value(FieldId::Email),
            work_title: page.value(FieldId::WorkTitle),
            activity_type: page.value(FieldId::ActivityType),
            academic_year: page.value(FieldId::AcademicYear),
            semester: page.value(FieldId::Semester),
            start_date: page.value(FieldId::StartDate),
            end_date: page.value(FieldId::EndDate),
            location: page.value(FieldId::Location),
            description: page.value(FieldId::Description),
        }
    }
}

/// JSON body of `POST /record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub first_name: String,
    pub last_name: String,
    pub student_id: i64,
    pub email: String,
    pub title: String,
    pub type_of_work_id: i64,
    /// Gregorian year.
    pub academic_year: i64,
    pub semester: i64,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub description: String,
}

impl SubmissionPayload {
    pub fn from_fields(fields: &FormFields) -> Result<Self, FormError> {
        let (first_name, last_name) = validation::validate_full_name(&fields.fullname)?;

        Ok(Self {
            first_name,
            last_name,
            student_id: coerce_int(&fields.student_id, FieldId::StudentId)?,
            email: fields.email.clone(),
            title: fields.work_title.clone(),
            type_of_work_id: coerce_int(&fields.activity_type, FieldId::ActivityType)?,
            academic_year: buddhist_to_gregorian(coerce_int(
                &fields.academic_year,
                FieldId::AcademicYear,
            )?)
            .ok_or(FormError::NotANumber(FieldId::AcademicYear))?,
            semester: coerce_int(&fields.semester, FieldId::Semester)?,
            start_date: fields.start_date.clone(),
            end_date: fields.end_date.clone(),
            location: fields.location.clone(),
            description: fields.description.clone(),
        })
    }
}

fn coerce_int(value: &str, field: FieldId) -> Result<i64, FormError> {
    parse_leading_int(value).ok_or(FormError::NotANumber(field))
}

/// Reads the leading decimal integer of a string, ignoring anything after it.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

use askama::Template;

use crate::error::FormError;
use crate::models::submission::{SubmissionPayload, gregorian_to_buddhist};
use crate::page::FieldId;

/// Summary rendered into `resultContainer` after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "confirmation.html")]
pub struct Confirmation {
    pub name: String,
    pub student_id: i64,
    pub email: String,
    pub title: String,
    pub type_of_work_id: i64,
    /// Buddhist year, as the user entered it.
    pub academic_year: i64,
    pub semester: i64,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub description: String,
}

impl Confirmation {
    pub fn to_html(&self) -> Result<String, askama::Error> {
        self.render()
    }

    /// Label/value pairs in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            (FieldId::FullName.label(), self.name.clone()),
            (FieldId::StudentId.label(), self.student_id.to_string()),
            (FieldId::Email.label(), self.email.clone()),
            (FieldId::WorkTitle.label(), self.title.clone()),
            (FieldId::ActivityType.label(), self.type_of_work_id.to_string()),
            (FieldId::AcademicYear.label(), self.academic_year.to_string()),
            (FieldId::Semester.label(), self.semester.to_string()),
            (FieldId::StartDate.label(), self.start_date.clone()),
            (FieldId::EndDate.label(), self.end_date.clone()),
            (FieldId::Location.label(), self.location.clone()),
            (FieldId::Description.label(), self.description.clone()),
        ]
    }
}

impl TryFrom<&SubmissionPayload> for Confirmation {
    type Error = FormError;

    fn try_from(payload: &SubmissionPayload) -> Result<Self, Self::Error> {
        let academic_year = gregorian_to_buddhist(payload.academic_year)
            .ok_or(FormError::NotANumber(FieldId::AcademicYear))?;

        Ok(Self {
            name: format!("{} {}", payload.first_name, payload.last_name),
            student_id: payload.student_id,
            email: payload.email.clone(),
            title: payload.title.clone(),
            type_of_work_id: payload.type_of_work_id,
            academic_year,
            semester: payload.semester,
            start_date: payload.start_date.clone(),
            end_date: payload.end_date.clone(),
            location: payload.location.clone(),
            description: payload.description.clone(),
        })
    }
}

//! The page surface the form controller drives.
//!
//! Every side effect the controller has on the user's screen goes through
//! these traits, so the same controller runs behind a terminal, a test
//! double, or any other front end.

use crate::models::Confirmation;

/// Form controls, in the order they appear on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    FullName,
    StudentId,
    Email,
    WorkTitle,
    ActivityType,
    AcademicYear,
    Semester,
    StartDate,
    EndDate,
    Location,
    Description,
}

impl FieldId {
    pub const ALL: [FieldId; 11] = [
        FieldId::FullName,
        FieldId::StudentId,
        FieldId::Email,
        FieldId::WorkTitle,
        FieldId::ActivityType,
        FieldId::AcademicYear,
        FieldId::Semester,
        FieldId::StartDate,
        FieldId::EndDate,
        FieldId::Location,
        FieldId::Description,
    ];

    /// Element id (and form field name) in the page markup.
    pub fn element_id(self) -> &'static str {
        match self {
            FieldId::FullName => "fullname",
            FieldId::StudentId => "studentID",
            FieldId::Email => "email",
            FieldId::WorkTitle => "workTitle",
            FieldId::ActivityType => "activityType",
            FieldId::AcademicYear => "academicYear",
            FieldId::Semester => "semester",
            FieldId::StartDate => "startDate",
            FieldId::EndDate => "endDate",
            FieldId::Location => "location",
            FieldId::Description => "description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::FullName => "Name",
            FieldId::StudentId => "Student ID",
            FieldId::Email => "Email",
            FieldId::WorkTitle => "Work/Activity Title",
            FieldId::ActivityType => "Type of Work/Activity",
            FieldId::AcademicYear => "Academic Year",
            FieldId::Semester => "Semester",
            FieldId::StartDate => "Start Date/Time",
            FieldId::EndDate => "End Date/Time",
            FieldId::Location => "Location",
            FieldId::Description => "Description",
        }
    }
}

/// Fields that carry an inline error slot next to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatedField {
    FullName,
    StudentId,
    Email,
}

impl ValidatedField {
    pub const ALL: [ValidatedField; 3] = [
        ValidatedField::FullName,
        ValidatedField::StudentId,
        ValidatedField::Email,
    ];

    pub fn field(self) -> FieldId {
        match self {
            ValidatedField::FullName => FieldId::FullName,
            ValidatedField::StudentId => FieldId::StudentId,
            ValidatedField::Email => FieldId::Email,
        }
    }

    pub fn error_element_id(self) -> &'static str {
        match self {
            ValidatedField::FullName => "fullnameError",
            ValidatedField::StudentId => "studentIDError",
            ValidatedField::Email => "emailError",
        }
    }
}

impl TryFrom<FieldId> for ValidatedField {
    type Error = FieldId;

    fn try_from(field: FieldId) -> Result<Self, Self::Error> {
        match field {
            FieldId::FullName => Ok(ValidatedField::FullName),
            FieldId::StudentId => Ok(ValidatedField::StudentId),
            FieldId::Email => Ok(ValidatedField::Email),
            other => Err(other),
        }
    }
}

/// The error display slot adjacent to a validated field.
pub trait ErrorSink {
    fn show(&mut self, message: &str);
    fn clear(&mut self);
}

/// Blocking user-facing alert.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

pub trait FormPage {
    /// Current raw value of a control. Empty when nothing was entered.
    fn value(&self, field: FieldId) -> String;

    fn error_sink(&mut self, field: ValidatedField) -> &mut dyn ErrorSink;

    /// Appends one `<option>` to the activity-type select.
    fn append_activity_option(&mut self, id: i64, label: &str);

    /// Value of the selected activity-type option, `None` for the placeholder.
    fn selected_activity_type(&self) -> Option<String> {
        let value = self.value(FieldId::ActivityType);
        if value.is_empty() { None } else { Some(value) }
    }

    /// Clears every control, like `HTMLFormElement.reset()`.
    fn reset(&mut self);

    /// Replaces the contents of `resultContainer`.
    fn render_confirmation(&mut self, confirmation: &Confirmation);
}

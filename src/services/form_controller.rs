use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{debug, error, info, warn};

use crate::client::{BackendConfig, PassportBackend, PassportHttpClient};
use crate::error::{ClientError, DateRangeError, FormError};
use crate::models::{ActivityType, Confirmation, FormFields, SubmissionPayload};
use crate::page::{FieldId, FormPage, Notifier, ValidatedField};
use crate::validation::{self, DateRange};

const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit form data. Please try again.";

/// How a submit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field validator failed; its error slot says why.
    Invalid,
    DateRangeRejected,
    NotANumber(FieldId),
    Rendered(Confirmation),
    Failed(StatusCode),
    /// The request never got a usable response. Logged only.
    TransportFailed,
}

/// Reacts to page events: validates fields, talks to the backend and
/// renders the result.
pub struct FormController {
    backend: Arc<dyn PassportBackend>,
    notifier: Arc<dyn Notifier>,
}

impl FormController {
    pub fn new(backend: Arc<dyn PassportBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self { backend, notifier }
    }

    /// Builds a controller talking HTTP to the backend described by `config`.
    pub fn connect(
        config: BackendConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        let backend = PassportHttpClient::new(config)?;
        Ok(Self::new(Arc::new(backend), notifier))
    }

    /// Page-load handler. Returns the number of options appended.
    pub async fn on_load<P: FormPage + ?Sized>(&self, page: &mut P) -> usize {
        let activity_types = self.fetch_activity_types().await;
        self.populate_activity_types(page, &activity_types)
    }

    /// Never fails: any error is logged and yields an empty list.
    pub async fn fetch_activity_types(&self) -> Vec<ActivityType> {
        match self.backend.fetch_activity_types().await {
            Ok(activity_types) => {
                info!("Loaded {} activity types", activity_types.len());
                activity_types
            }
            Err(ClientError::Rejected(status)) => {
                error!("Failed to fetch activity types: {}", status);
                Vec::new()
            }
            Err(e) => {
                error!("An error occurred while fetching activity types: {}", e);
                Vec::new()
            }
        }
    }

    /// Appends one option per activity type. Existing options are kept, so a
    /// second call duplicates the list.
    pub fn populate_activity_types<P: FormPage + ?Sized>(
        &self,
        page: &mut P,
        activity_types: &[ActivityType],
    ) -> usize {
        for activity_type in activity_types {
            page.append_activity_option(activity_type.id, &activity_type.value);
        }
        activity_types.len()
    }

    /// `input` handler of a validated field. Returns whether the field is valid.
    pub fn on_input<P: FormPage + ?Sized>(&self, page: &mut P, field: ValidatedField) -> bool {
        let value = page.value(field.field());
        let sink = page.error_sink(field);

        match field {
            ValidatedField::FullName => {
                let result = validation::validate_full_name(&value);
                validation::render_field_result(sink, &result);
                result.is_ok()
            }
            ValidatedField::StudentId => {
                let result = validation::validate_student_id(&value);
                validation::render_field_result(sink, &result);
                result.is_ok()
            }
            ValidatedField::Email => {
                let result = validation::validate_email(&value);
                validation::render_field_result(sink, &result);
                result.is_ok()
            }
        }
    }

    /// `change` handler of the activity-type select. Advisory only.
    pub fn on_activity_type_change<P: FormPage + ?Sized>(&self, page: &P) -> bool {
        if page.selected_activity_type().is_none() {
            self.alert(FormError::ActivityTypeUnselected);
            return false;
        }
        true
    }

    pub fn on_start_date_change<P: FormPage + ?Sized>(&self, page: &P) -> DateRange {
        self.alert_on_reversed_dates(page)
    }

    pub fn on_end_date_change<P: FormPage + ?Sized>(&self, page: &P) -> DateRange {
        self.alert_on_reversed_dates(page)
    }

    // A half-filled pair is not an error until submit.
    fn alert_on_reversed_dates<P: FormPage + ?Sized>(&self, page: &P) -> DateRange {
        let range = validation::check_date_range(
            &page.value(FieldId::StartDate),
            &page.value(FieldId::EndDate),
        );
        if range == DateRange::Reversed {
            self.alert(FormError::from(DateRangeError));
        }
        range
    }

    /// `submit` handler of the form.
    pub async fn submit<P: FormPage + ?Sized>(&self, page: &mut P) -> SubmitOutcome {
        let mut all_valid = true;
        for field in ValidatedField::ALL {
            all_valid &= self.on_input(&mut *page, field);
        }
        if !all_valid {
            debug!("Submission blocked by field validation");
            return SubmitOutcome::Invalid;
        }

        let fields = FormFields::from_page(&*page);

        if let Err(e) = validation::validate_date_range(&fields.start_date, &fields.end_date) {
            self.alert(e.into());
            return SubmitOutcome::DateRangeRejected;
        }

        let built = SubmissionPayload::from_fields(&fields).and_then(|payload| {
            let confirmation = Confirmation::try_from(&payload)?;
            Ok((payload, confirmation))
        });
        let (payload, confirmation) = match built {
            Ok(built) => built,
            Err(FormError::NotANumber(field)) => {
                self.alert(FormError::NotANumber(field));
                return SubmitOutcome::NotANumber(field);
            }
            // Field errors were ruled out above.
            Err(e) => {
                warn!("Submission blocked: {}", e);
                return SubmitOutcome::Invalid;
            }
        };

        debug!("Submitting record: {:?}", payload);

        match self.backend.submit_record(&payload).await {
            Ok(_) => {
                info!("Form data submitted successfully!");

                self.notifier.alert(&format!(
                    "Thank you, {}! Your form has been successfully submitted.",
                    confirmation.name
                ));
                page.reset();
                page.render_confirmation(&confirmation);

                SubmitOutcome::Rendered(confirmation)
            }
            Err(ClientError::Rejected(status)) => {
                warn!("Failed to submit form data: {}", status);
                self.notifier.alert(SUBMIT_FAILED_MESSAGE);
                SubmitOutcome::Failed(status)
            }
            Err(e) => {
                error!("An error occurred while submitting form data: {}", e);
                SubmitOutcome::TransportFailed
            }
        }
    }

    fn alert(&self, error: FormError) {
        self.notifier.alert(&error.to_string());
    }
}

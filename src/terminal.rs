//! Line-oriented front end: each control is a prompt on stdin.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use crate::error::FormError;
use crate::models::Confirmation;
use crate::models::submission::{buddhist_to_gregorian, parse_leading_int};
use crate::page::{ErrorSink, FieldId, FormPage, Notifier, ValidatedField};
use crate::services::{FormController, SubmitOutcome};
use crate::validation::DateRange;

#[derive(Debug, Default)]
pub struct ErrorSlot {
    message: Option<String>,
}

impl ErrorSlot {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl ErrorSink for ErrorSlot {
    fn show(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }

    fn clear(&mut self) {
        self.message = None;
    }
}

/// Page state held in memory; the prompt loop fills it in.
#[derive(Debug, Default)]
pub struct TerminalPage {
    values: HashMap<FieldId, String>,
    errors: HashMap<ValidatedField, ErrorSlot>,
    options: Vec<(i64, String)>,
    confirmation: Option<Confirmation>,
}

impl TerminalPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn error(&self, field: ValidatedField) -> Option<&str> {
        self.errors.get(&field).and_then(ErrorSlot::message)
    }

    pub fn activity_options(&self) -> &[(i64, String)] {
        &self.options
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }
}

impl FormPage for TerminalPage {
    fn value(&self, field: FieldId) -> String {
        self.values.get(&field).cloned().unwrap_or_default()
    }

    fn error_sink(&mut self, field: ValidatedField) -> &mut dyn ErrorSink {
        self.errors.entry(field).or_default()
    }

    fn append_activity_option(&mut self, id: i64, label: &str) {
        self.options.push((id, label.to_string()));
    }

    fn reset(&mut self) {
        self.values.clear();
    }

    fn render_confirmation(&mut self, confirmation: &Confirmation) {
        self.confirmation = Some(confirmation.clone());
    }
}

/// Alerts go to stderr so they interleave with prompts but not with piped output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: FieldId,
) -> io::Result<String> {
    write!(output, "{}: ", field.label())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("input closed while reading {}", field.element_id()),
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prompts for every control in page order, firing the same handlers the
/// page events would, then submits.
///
/// Validated fields, an activity type that was not offered, a non-numeric
/// year or semester, and a reversed end date are asked again until they pass.
pub async fn fill_and_submit<R: BufRead, W: Write>(
    controller: &FormController,
    page: &mut TerminalPage,
    input: &mut R,
    output: &mut W,
) -> io::Result<SubmitOutcome> {
    for field in FieldId::ALL {
        if let Ok(validated) = ValidatedField::try_from(field) {
            loop {
                let value = prompt(input, output, field)?;
                page.set_value(field, value);
                if controller.on_input(page, validated) {
                    break;
                }
                if let Some(message) = page.error(validated) {
                    writeln!(output, "  {}", message)?;
                }
            }
            continue;
        }

        match field {
            FieldId::ActivityType => {
                for (id, label) in page.activity_options() {
                    writeln!(output, "  [{}] {}", id, label)?;
                }
                loop {
                    let value = prompt(input, output, field)?;
                    let value = value.trim();
                    if value.is_empty() || is_offered(page, value) {
                        page.set_value(field, value);
                        break;
                    }
                    writeln!(output, "  Please choose one of the listed ids.")?;
                }
                controller.on_activity_type_change(&*page);
            }
            FieldId::StartDate => {
                let value = prompt(input, output, field)?;
                page.set_value(field, value.trim());
                controller.on_start_date_change(&*page);
            }
            FieldId::EndDate => loop {
                let value = prompt(input, output, field)?;
                page.set_value(field, value.trim());
                if controller.on_end_date_change(&*page) != DateRange::Reversed {
                    break;
                }
            },
            FieldId::AcademicYear | FieldId::Semester => loop {
                let value = prompt(input, output, field)?;
                if is_number_for(field, &value) {
                    page.set_value(field, value);
                    break;
                }
                writeln!(output, "  {}", FormError::NotANumber(field))?;
            },
            _ => {
                let value = prompt(input, output, field)?;
                page.set_value(field, value);
            }
        }
    }

    Ok(controller.submit(page).await)
}

// Mirrors a `<select>`: only an offered option's value can be chosen.
fn is_offered(page: &TerminalPage, value: &str) -> bool {
    page.activity_options()
        .iter()
        .any(|(id, _)| id.to_string() == value)
}

fn is_number_for(field: FieldId, value: &str) -> bool {
    match parse_leading_int(value) {
        Some(year) if field == FieldId::AcademicYear => buddhist_to_gregorian(year).is_some(),
        Some(_) => true,
        None => false,
    }
}

pub fn print_confirmation<W: Write>(output: &mut W, confirmation: &Confirmation) -> io::Result<()> {
    writeln!(output, "Submitted User Data:")?;
    for (label, value) in confirmation.rows() {
        writeln!(output, "  {}: {}", label, value)?;
    }
    Ok(())
}

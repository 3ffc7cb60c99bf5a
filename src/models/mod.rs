pub mod activity_type;
pub mod confirmation;
pub mod submission;

pub use activity_type::ActivityType;
pub use confirmation::Confirmation;
pub use submission::{FormFields, SubmissionPayload, BUDDHIST_ERA_OFFSET};

//! Signup services - one per form.
//!
//! Each service runs the same pipeline: optional origin check, optional
//! admission check, validation, insert, then a detached confirmation
//! email. Only a persisted record triggers the email.

mod admission;
mod beta;
mod competition;
mod goalpost;
mod submission;

pub use admission::admit;
pub use beta::{BetaSignupService, BetaStats};
pub use competition::{CompetitionSignupService, CompetitionStats, origin_allowed};
pub use goalpost::GoalpostBetaService;
pub use submission::CompetitionSubmissionService;

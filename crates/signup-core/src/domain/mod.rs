//! Domain entities - one per signup form, plus read-side aggregates.

mod beta;
mod competition;
mod goalpost;
mod privacy;
mod stats;
mod submission;

pub use beta::{BetaDimension, BetaSignup};
pub use competition::{CompetitionSignup, DEFAULT_SIGNUP_CAMPAIGN};
pub use goalpost::{GoalpostBetaSignup, Platform};
pub use privacy::mask_email;
pub use stats::GroupCount;
pub use submission::{CompetitionSubmission, DEFAULT_SUBMISSION_CAMPAIGN};

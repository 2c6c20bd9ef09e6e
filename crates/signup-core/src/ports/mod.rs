//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod clock;
mod mailer;
mod rate_limit;
mod repository;

pub use clock::Clock;
pub use mailer::{EmailMessage, Mailer, MailerError};
pub use rate_limit::{AdmissionGate, RateLimitError, RateLimitResult};
pub use repository::{
    BetaSignupRepository, CompetitionSignupRepository, CompetitionSubmissionRepository,
    GoalpostBetaRepository, RecordStore,
};

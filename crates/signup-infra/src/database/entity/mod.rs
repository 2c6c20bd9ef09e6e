//! SeaORM entities, one table per signup form.

pub mod beta_signup;
pub mod competition_signup;
pub mod competition_submission;
pub mod goalpost_beta_signup;

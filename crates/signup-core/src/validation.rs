//! Per-entity validation and input normalization.
//!
//! Each form type has a `validate_*` function that either returns the
//! entity ready to persist or every violation found in the input.
//! Normalization (trimming, lowercasing, URL scheme) happens here so the
//! uniqueness keys the store sees are already canonical.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    BetaSignup, CompetitionSignup, CompetitionSubmission, DEFAULT_SIGNUP_CAMPAIGN,
    DEFAULT_SUBMISSION_CAMPAIGN, GoalpostBetaSignup, Platform,
};

pub const MAX_PROJECT_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[0-9a-z.-]+\.[a-z.]{2,6}[/A-Za-z0-9_ .-]*/?$").expect("url pattern compiles")
});

/// A single reason an input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Missing(&'static str),
    InvalidEmail,
    InvalidUrl,
    TooLong { field: &'static str, max: usize },
    RulesNotAccepted,
    InvalidPlatform,
}

impl Violation {
    /// Public (JSON) name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Violation::Missing(field) | Violation::TooLong { field, .. } => field,
            Violation::InvalidEmail => "email",
            Violation::InvalidUrl => "projectUrl",
            Violation::RulesNotAccepted => "acceptedRules",
            Violation::InvalidPlatform => "platform",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing("email") => f.write_str("Email is required"),
            Violation::Missing("projectUrl") => f.write_str("Project URL is required"),
            Violation::Missing(field) => write!(f, "{field} is required"),
            Violation::InvalidEmail => f.write_str("Invalid email format"),
            Violation::InvalidUrl => f.write_str("Invalid URL format"),
            Violation::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Violation::RulesNotAccepted => f.write_str("You must accept the rules"),
            Violation::InvalidPlatform => f.write_str("Invalid platform"),
        }
    }
}

/// Non-empty list of violations for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn contains(&self, violation: &Violation) -> bool {
        self.0.contains(violation)
    }

    fn check(violations: Vec<Violation>) -> Result<(), ValidationErrors> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(violations))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Violation> for ValidationErrors {
    fn from(violation: Violation) -> Self {
        ValidationErrors(vec![violation])
    }
}

/// Raw beta signup form fields.
#[derive(Debug, Clone, Default)]
pub struct BetaSignupForm {
    pub email: Option<String>,
    pub experience: Option<String>,
    pub goal: Option<String>,
    pub referrer: Option<String>,
    pub referrer_other: Option<String>,
}

/// Raw competition signup form fields.
#[derive(Debug, Clone, Default)]
pub struct CompetitionSignupForm {
    pub email: Option<String>,
    pub accepted_rules: Option<bool>,
    pub campaign: Option<String>,
}

/// Raw project submission form fields.
#[derive(Debug, Clone, Default)]
pub struct CompetitionSubmissionForm {
    pub email: Option<String>,
    pub project_url: Option<String>,
    pub project_title: Option<String>,
    pub description: Option<String>,
    pub campaign: Option<String>,
}

/// Raw GoalPost beta form fields.
#[derive(Debug, Clone, Default)]
pub struct GoalpostBetaForm {
    pub email: Option<String>,
    pub platform: Option<String>,
}

/// Trim and lowercase an email, then check its shape.
pub fn normalize_email(raw: Option<&str>) -> Result<String, Violation> {
    let email = raw
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .ok_or(Violation::Missing("email"))?;

    if EMAIL_PATTERN.is_match(&email) {
        Ok(email)
    } else {
        Err(Violation::InvalidEmail)
    }
}

/// Trim a project URL, add `https://` when no scheme is given, then check
/// its shape.
pub fn normalize_project_url(raw: Option<&str>) -> Result<String, Violation> {
    let trimmed = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(Violation::Missing("projectUrl"))?;

    let url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if URL_PATTERN.is_match(&url) {
        Ok(url)
    } else {
        Err(Violation::InvalidUrl)
    }
}

/// Trim free text; blank becomes absent.
pub fn trim_optional(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn bounded(
    field: &'static str,
    raw: Option<String>,
    max: usize,
) -> Result<Option<String>, Violation> {
    match trim_optional(raw) {
        Some(text) if text.chars().count() > max => Err(Violation::TooLong { field, max }),
        other => Ok(other),
    }
}

fn campaign_or(raw: Option<String>, default: &str) -> String {
    trim_optional(raw).unwrap_or_else(|| default.to_string())
}

pub fn validate_beta_signup(form: BetaSignupForm) -> Result<BetaSignup, ValidationErrors> {
    let email = normalize_email(form.email.as_deref())?;

    Ok(BetaSignup::new(
        email,
        trim_optional(form.experience),
        trim_optional(form.goal),
        trim_optional(form.referrer),
        trim_optional(form.referrer_other),
    ))
}

pub fn validate_competition_signup(
    form: CompetitionSignupForm,
) -> Result<CompetitionSignup, ValidationErrors> {
    let mut violations = Vec::new();

    let email = normalize_email(form.email.as_deref())
        .map_err(|v| violations.push(v))
        .ok();

    if form.accepted_rules != Some(true) {
        violations.push(Violation::RulesNotAccepted);
    }

    ValidationErrors::check(violations)?;

    match email {
        Some(email) => Ok(CompetitionSignup::new(
            email,
            campaign_or(form.campaign, DEFAULT_SIGNUP_CAMPAIGN),
        )),
        None => Err(Violation::Missing("email").into()),
    }
}

pub fn validate_competition_submission(
    form: CompetitionSubmissionForm,
) -> Result<CompetitionSubmission, ValidationErrors> {
    let mut violations = Vec::new();

    let email = normalize_email(form.email.as_deref())
        .map_err(|v| violations.push(v))
        .ok();
    let project_url = normalize_project_url(form.project_url.as_deref())
        .map_err(|v| violations.push(v))
        .ok();
    let project_title = bounded("projectTitle", form.project_title, MAX_PROJECT_TITLE_CHARS)
        .map_err(|v| violations.push(v))
        .ok()
        .flatten();
    let description = bounded("description", form.description, MAX_DESCRIPTION_CHARS)
        .map_err(|v| violations.push(v))
        .ok()
        .flatten();

    ValidationErrors::check(violations)?;

    match (email, project_url) {
        (Some(email), Some(project_url)) => Ok(CompetitionSubmission::new(
            email,
            project_url,
            project_title,
            description,
            campaign_or(form.campaign, DEFAULT_SUBMISSION_CAMPAIGN),
        )),
        _ => Err(Violation::Missing("email").into()),
    }
}

pub fn validate_goalpost_beta(form: GoalpostBetaForm) -> Result<GoalpostBetaSignup, ValidationErrors> {
    let mut violations = Vec::new();

    let email = normalize_email(form.email.as_deref())
        .map_err(|v| violations.push(v))
        .ok();
    let platform = form
        .platform
        .as_deref()
        .ok_or(Violation::InvalidPlatform)
        .and_then(str::parse::<Platform>)
        .map_err(|v| violations.push(v))
        .ok();

    ValidationErrors::check(violations)?;

    match (email, platform) {
        (Some(email), Some(platform)) => Ok(GoalpostBetaSignup::new(email, platform)),
        _ => Err(Violation::InvalidPlatform.into()),
    }
}

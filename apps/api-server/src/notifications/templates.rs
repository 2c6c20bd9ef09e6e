//! Confirmation email bodies.

use signup_core::domain::Platform;
use signup_core::ports::EmailMessage;

const FOOTER_STYLE: &str = "color: #666; font-size: 12px;";

const COMPETITION_DETAILS_TEXT: &str = "Deadline: Sunday, August 10 at 11:59 PM ET
Results: August 11 (community vote)
Prize: $50 Visa gift card";

const COMPETITION_DETAILS_HTML: &str = r#"<ul style="line-height: 1.8;">
        <li><strong>Deadline:</strong> Sunday, August 10 at 11:59 PM ET</li>
        <li><strong>Results:</strong> August 11 (community vote)</li>
        <li><strong>Prize:</strong> $50 Visa gift card</li>
      </ul>"#;

fn wrap_html(body: &str, reason: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
      {body}
      <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">
      <p style="{FOOTER_STYLE}">You're receiving this email because {reason}.</p>
    </div>"#
    )
}

/// Minimal escaping for user-supplied values placed in HTML bodies.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn beta_confirmation(to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "You're on the BridgeMind beta list".to_string(),
        text: "Thanks for signing up for BridgeMind beta access!

We'll let you know as soon as your spot opens up."
            .to_string(),
        html: wrap_html(
            r#"<h2 style="color: #333;">You're on the list!</h2>
      <p>Thanks for signing up for <strong>BridgeMind</strong> beta access.</p>
      <p>We'll let you know as soon as your spot opens up.</p>"#,
            "you signed up for BridgeMind beta access",
        ),
    }
}

pub fn competition_confirmation(to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "You're in! BridgeMind 1,000 Subscriber Coding Competition".to_string(),
        text: format!(
            "Thanks for entering the BridgeMind coding competition!

{COMPETITION_DETAILS_TEXT}

We'll email more instructions soon. Good luck!"
        ),
        html: wrap_html(
            &format!(
                r#"<h2 style="color: #333;">Welcome to the Competition!</h2>
      <p>Thanks for entering the <strong>BridgeMind 1,000 Subscriber Coding Competition</strong>!</p>
      {COMPETITION_DETAILS_HTML}
      <p>We'll email more instructions soon. Good luck!</p>"#
            ),
            "you signed up for the BridgeMind coding competition",
        ),
    }
}

pub fn submission_confirmation(
    to: &str,
    project_url: &str,
    project_title: Option<&str>,
) -> EmailMessage {
    let title = project_title.unwrap_or("Untitled Project");
    let (title_html, url_html) = (escape_html(title), escape_html(project_url));

    EmailMessage {
        to: to.to_string(),
        subject: "Competition Submission Received - BridgeMind 1,000 Subscriber Competition"
            .to_string(),
        text: format!(
            "Thank you for submitting your project to the BridgeMind 1,000 Subscriber Coding Competition!

Project Details:
- Title: {title}
- URL: {project_url}

{COMPETITION_DETAILS_TEXT}

We've received your submission and will review it. Good luck!

Important: Make sure your project is accessible at the provided URL until the competition ends."
        ),
        html: wrap_html(
            &format!(
                r#"<h2 style="color: #333;">Competition Submission Received!</h2>
      <p>Thank you for submitting your project to the <strong>BridgeMind 1,000 Subscriber Coding Competition</strong>!</p>
      <div style="background: #f5f5f5; padding: 15px; border-radius: 8px; margin: 20px 0;">
        <h3 style="margin-top: 0;">Project Details:</h3>
        <ul style="line-height: 1.8;">
          <li><strong>Title:</strong> {title_html}</li>
          <li><strong>URL:</strong> <a href="{url_html}" style="color: #0066cc;">{url_html}</a></li>
        </ul>
      </div>
      {COMPETITION_DETAILS_HTML}
      <p style="color: #666;"><strong>Important:</strong> Make sure your project remains accessible at the provided URL until the competition ends.</p>
      <p>Good luck!</p>"#
            ),
            "you submitted a project to the BridgeMind coding competition",
        ),
    }
}

pub fn goalpost_beta_ack(to: &str, platform: Platform) -> EmailMessage {
    let name = platform.as_str();
    let upper = name.to_uppercase();

    EmailMessage {
        to: to.to_string(),
        subject: format!("You're in! GoalPost Beta ({upper})"),
        text: format!(
            "Thanks for joining the GoalPost beta on {name}.

We'll email TestFlight/Google Play instructions shortly."
        ),
        html: wrap_html(
            &format!(
                r#"<p>Thanks for joining the <strong>GoalPost</strong> beta on {upper}.</p>
      <p>We'll email TestFlight/Google Play instructions shortly.</p>"#
            ),
            "you joined the GoalPost beta",
        ),
    }
}

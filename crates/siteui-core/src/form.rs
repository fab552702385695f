#![forbid(unsafe_code)]

//! Contact form validation and the simulated send.
//!
//! Submitting never talks to a server. A valid submission shows a
//! "sending" status, asks the host to call back after a fixed delay, and on
//! that callback reports success and resets the form. Callbacks cannot be
//! cancelled; two quick valid submissions produce two completions.

use core::time::Duration;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::effect::{Effect, Target};

pub const NAME_ERROR: &str = "Please enter your name (min 2 chars).";
pub const EMAIL_ERROR: &str = "Please enter a valid email.";
pub const MESSAGE_ERROR: &str = "Message must be at least 10 characters.";
pub const STATUS_INVALID: &str = "Please fix the errors above.";
pub const STATUS_SENDING: &str = "Sending…";
pub const STATUS_SENT: &str = "Thanks — message sent (simulated).";

const COLOR_INVALID: &str = "#ffb4b4";
const COLOR_SENT: &str = "#b7f5d6";

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// A validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    #[must_use]
    pub const fn error_message(self) -> &'static str {
        match self {
            Self::Name => NAME_ERROR,
            Self::Email => EMAIL_ERROR,
            Self::Message => MESSAGE_ERROR,
        }
    }
}

/// Raw field values as read from the page at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormInput {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

/// Which fields failed. Each check runs independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub name_invalid: bool,
    pub email_invalid: bool,
    pub message_invalid: bool,
}

impl ValidationReport {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !(self.name_invalid || self.email_invalid || self.message_invalid)
    }

    /// Failed fields in page order.
    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|field| match field {
            Field::Name => self.name_invalid,
            Field::Email => self.email_invalid,
            Field::Message => self.message_invalid,
        })
    }
}

fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

#[must_use]
pub fn name_is_valid(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && has_min_chars(name, NAME_MIN_CHARS)
}

#[must_use]
pub fn email_is_valid(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

#[must_use]
pub fn message_is_valid(message: &str) -> bool {
    has_min_chars(message.trim(), MESSAGE_MIN_CHARS)
}

#[must_use]
pub fn validate(input: &FormInput) -> ValidationReport {
    ValidationReport {
        name_invalid: !name_is_valid(&input.name),
        email_invalid: !email_is_valid(&input.email),
        message_invalid: !message_is_valid(&input.message),
    }
}

/// Contact form controller.
#[derive(Debug, Clone)]
pub struct ContactForm {
    send_delay: Duration,
    pending_sends: usize,
}

impl ContactForm {
    #[must_use]
    pub const fn new(send_delay: Duration) -> Self {
        Self {
            send_delay,
            pending_sends: 0,
        }
    }

    /// Simulated sends scheduled but not yet completed.
    #[must_use]
    pub const fn pending_sends(&self) -> usize {
        self.pending_sends
    }

    /// Validate and either report errors or start the simulated send.
    pub fn submit(&mut self, input: &FormInput) -> Vec<Effect> {
        let mut effects = vec![Effect::set_text(Target::ErrorSlots, "")];
        let report = validate(input);
        for field in report.invalid_fields() {
            effects.push(Effect::set_text(
                Target::FieldError(field),
                field.error_message(),
            ));
        }

        if !report.is_valid() {
            debug!(?report, "contact form rejected");
            effects.push(Effect::set_text(Target::FormStatus, STATUS_INVALID));
            effects.push(Effect::set_style(
                Target::FormStatus,
                "color",
                COLOR_INVALID,
            ));
            return effects;
        }

        self.pending_sends += 1;
        debug!(pending = self.pending_sends, "contact form sending");
        effects.push(Effect::set_text(Target::FormStatus, STATUS_SENDING));
        effects.push(Effect::set_style(Target::FormStatus, "color", ""));
        effects.push(Effect::ScheduleSend {
            delay: self.send_delay,
        });
        effects
    }

    /// The send timer fired: report success and clear the form.
    pub fn send_elapsed(&mut self) -> Vec<Effect> {
        if self.pending_sends == 0 {
            trace!("send completion without a pending send");
            return Vec::new();
        }
        self.pending_sends -= 1;
        debug!(pending = self.pending_sends, "contact form sent");
        vec![
            Effect::set_text(Target::FormStatus, STATUS_SENT),
            Effect::set_style(Target::FormStatus, "color", COLOR_SENT),
            Effect::ResetForm,
        ]
    }
}

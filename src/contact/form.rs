//! Contact form state and validation.

use regex::Regex;

/// Field in the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactField {
    /// Sender name
    #[default]
    Name,
    /// Sender email address
    Email,
    /// Message subject
    Subject,
    /// Message body
    Message,
}

impl ContactField {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Get the next field.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Subject,
            Self::Subject => Self::Message,
            Self::Message => Self::Name,
        }
    }

    /// Get the previous field.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Subject => Self::Email,
            Self::Message => Self::Subject,
        }
    }

    /// Get the field label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Email => "Your Email",
            Self::Subject => "Subject",
            Self::Message => "Your Message",
        }
    }

    /// Whether the field accepts line breaks.
    #[must_use]
    pub const fn is_multiline(self) -> bool {
        matches!(self, Self::Message)
    }
}

/// The four values the relay forwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Sender name
    pub name: String,
    /// Sender email address
    pub email: String,
    /// Message subject
    pub subject: String,
    /// Message body
    pub message: String,
}

/// Editable contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Currently active field
    pub active_field: ContactField,
    /// Name field value
    pub name: String,
    /// Email field value
    pub email: String,
    /// Subject field value
    pub subject: String,
    /// Message field value
    pub message: String,
}

impl ContactForm {
    /// Creates an empty form focused on the name field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field.
    #[must_use]
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// Get a mutable reference to the active field's value.
    pub fn get_active_field_mut(&mut self) -> &mut String {
        match self.active_field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    /// Move to the next field.
    pub fn next_field(&mut self) {
        self.active_field = self.active_field.next();
    }

    /// Move to the previous field.
    pub fn previous_field(&mut self) {
        self.active_field = self.active_field.previous();
    }

    /// Type a character into the active field.
    pub fn insert_char(&mut self, c: char) {
        self.get_active_field_mut().push(c);
    }

    /// Insert a line break; only the message field accepts one.
    pub fn insert_newline(&mut self) {
        if self.active_field.is_multiline() {
            self.message.push('\n');
        }
    }

    /// Delete the last character of the active field.
    pub fn backspace(&mut self) {
        self.get_active_field_mut().pop();
    }

    /// Clears every field and refocuses the name field.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Validate the form.
    ///
    /// Every field is required and the email must look like `local@domain.tld`.
    pub fn validate(&self) -> Result<(), String> {
        for field in ContactField::ALL {
            if self.value(field).trim().is_empty() {
                return Err(format!("{} is required", field.label()));
            }
        }

        if !is_email_shaped(self.email.trim()) {
            return Err(format!("'{}' is not a valid email address", self.email.trim()));
        }

        Ok(())
    }

    /// Snapshot of the current values for one relay attempt.
    #[must_use]
    pub fn submission(&self) -> ContactSubmission {
        ContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        }
    }
}

fn is_email_shaped(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

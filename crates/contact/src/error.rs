/// Reasons a contact form submission is rejected before anything is relayed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Message must be at least {0} characters long")]
    MessageTooShort(usize),

    #[error("Spam detected")]
    SpamDetected,
}

pub type Result<T> = std::result::Result<T, Error>;

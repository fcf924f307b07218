use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong talking to the device, plus input rejected
/// before a request was made.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("unexpected response from {url}: {detail}")]
    Malformed { url: String, detail: String },

    #[error(transparent)]
    Invalid(#[from] Invalid),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Invalid(_))
    }

    pub(crate) fn malformed(url: &str, detail: impl ToString) -> Self {
        Error::Malformed {
            url: url.to_owned(),
            detail: detail.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Invalid {
    #[error("password must be at least 8 characters")]
    PasswordTooShort,

    #[error("ssid and password are required")]
    EmptyConfiguration,

    #[error("not a HH:MM time: {0:?}")]
    Time(String),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u8 },

    // hour 255 marks an unused slot on the device; never written back
    #[error("schedule slot is not configured")]
    UnsetSlot,
}

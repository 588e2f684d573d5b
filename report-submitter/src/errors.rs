use thiserror::Error;

/// Position acquisition failures. Denial requires the user to re-trigger the
/// request; nothing retries automatically.
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
}

/// Failures of the best-effort lookups (reverse geocode, weather). These never
/// fail a submission.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("provider rate limit reached, try again later")]
    RateLimited,
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl NetworkError {
    /// Maps a non-2xx provider response. 429 gets its own user-facing branch;
    /// everything else carries the status and a truncated body.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 429 {
            NetworkError::RateLimited
        } else {
            NetworkError::Status { status, body: crate::util::truncate_body(body) }
        }
    }
}

/// Image upload failures. Fatal to the submission attempt.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("could not read image {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("image host returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("image host response did not contain a link")]
    MissingLink,
    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("report store write failed: {0}")]
    Write(String),
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("relay returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Which required draft field was missing at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Description,
    Coordinates,
    Image,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingField::Description => write!(f, "description"),
            MissingField::Coordinates => write!(f, "location"),
            MissingField::Image => write!(f, "image"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    InFlight,
    #[error("incomplete form: missing {0}")]
    IncompleteForm(MissingField),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_status_gets_its_own_branch() {
        assert!(matches!(NetworkError::from_status(429, "slow down"), NetworkError::RateLimited));
    }

    #[test]
    fn test_other_statuses_carry_status_and_body() {
        match NetworkError::from_status(503, "unavailable") {
            NetworkError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_body_is_truncated() {
        let long = "x".repeat(1000);
        match NetworkError::from_status(500, &long) {
            NetworkError::Status { body, .. } => assert!(body.ends_with("...")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// workshop.codes answered with a non-2xx status.
    BadStatus,

    /// The request went out but nothing came back.
    NoResponse,

    /// The request couldn't be built or sent at all.
    RequestMalformed,
}

impl GatewayErrorKind {
    /// Short code shown to users alongside the error.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::BadStatus => "Beaver",
            Self::NoResponse => "Tortoise",
            Self::RequestMalformed => "Foxhound",
        }
    }
}

impl Display for GatewayErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::BadStatus => "bad status",
            Self::NoResponse => "no response",
            Self::RequestMalformed => "request malformed",
        })
    }
}

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
#[error("{description}")]
#[event(level = ERROR)]
pub struct GatewayError {
    description: String,

    #[field(print = Display)]
    kind: GatewayErrorKind,
}

impl GatewayError {
    fn new(kind: GatewayErrorKind, description: String) -> Self {
        Self { description, kind }
    }

    pub(crate) fn bad_status(status: reqwest::StatusCode, path: &str) -> Self {
        Self::new(
            GatewayErrorKind::BadStatus,
            format!(
                "Workshop.codes responded with code {code} - {reason}\nRequest: `{path}`",
                code = status.as_u16(),
                reason = status.canonical_reason().unwrap_or("Unknown Status"),
            ),
        )
    }

    pub(crate) fn no_response(request: &str, source: &reqwest::Error) -> Self {
        Self::new(
            GatewayErrorKind::NoResponse,
            format!("Failed to contact Workshop.codes: {request} did not get a response ({source})"),
        )
    }

    pub(crate) fn malformed(source: impl Display) -> Self {
        Self::new(
            GatewayErrorKind::RequestMalformed,
            format!("Malformed request to Workshop.codes: {source}"),
        )
    }

    pub fn kind(&self) -> GatewayErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.description
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_status_message() {
        let err = GatewayError::bad_status(reqwest::StatusCode::NOT_FOUND, "/search.json");

        assert_eq!(err.kind(), GatewayErrorKind::BadStatus);
        assert!(err.message().contains("404"));
        assert!(err.message().contains("Not Found"));
        assert!(err.message().contains("/search.json"));
        assert_eq!(err.tag(), "Beaver");
    }

    #[test]
    fn malformed_message() {
        let err = GatewayError::malformed(url::ParseError::EmptyHost);

        assert_eq!(err.kind(), GatewayErrorKind::RequestMalformed);
        assert!(err.to_string().contains("empty host"));
    }
}

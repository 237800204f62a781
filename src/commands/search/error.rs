use super::{api::GatewayError, format::ShapeError};

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
pub enum Error {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl Error {
    /// Short code shown to users so reports can be matched to logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Gateway(err) => err.tag(),
            Self::Shape(err) => err.tag(),
        }
    }
}

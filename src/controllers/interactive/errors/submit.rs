use std::error::Error;
use std::fmt;

use crate::core::data::viewport_params::ViewportParamsError;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    InvalidParams(ViewportParamsError),
    ShutDown,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams(err) => write!(f, "invalid viewport parameters: {}", err),
            Self::ShutDown => write!(f, "the compute offloader has been shut down"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidParams(err) => Some(err),
            Self::ShutDown => None,
        }
    }
}

impl From<ViewportParamsError> for SubmitError {
    fn from(err: ViewportParamsError) -> Self {
        Self::InvalidParams(err)
    }
}

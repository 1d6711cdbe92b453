use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCall {
    CreateDeck,
    Draw,
    Shuffle,
}

impl ServiceCall {
    pub fn error_text(self) -> &'static str {
        match self {
            ServiceCall::CreateDeck => "Failed creating deck",
            ServiceCall::Draw => "Failed drawing cards",
            ServiceCall::Shuffle => "Failed shuffling",
        }
    }
}

impl fmt::Display for ServiceCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("{call} ({status} {status_text})")]
    Status {
        call: ServiceCall,
        status: u16,
        status_text: String,
    },
    #[error("{call}: {message}")]
    Transport { call: ServiceCall, message: String },
    #[error("{call}: malformed response: {message}")]
    Decode { call: ServiceCall, message: String },
}

impl ServiceError {
    pub fn status(call: ServiceCall, status: u16, status_text: impl Into<String>) -> Self {
        ServiceError::Status {
            call,
            status,
            status_text: status_text.into(),
        }
    }

    pub fn transport(call: ServiceCall, err: impl fmt::Display) -> Self {
        ServiceError::Transport {
            call,
            message: err.to_string(),
        }
    }

    pub fn decode(call: ServiceCall, err: impl fmt::Display) -> Self {
        ServiceError::Decode {
            call,
            message: err.to_string(),
        }
    }

    pub fn call(&self) -> ServiceCall {
        match self {
            ServiceError::Status { call, .. }
            | ServiceError::Transport { call, .. }
            | ServiceError::Decode { call, .. } => *call,
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

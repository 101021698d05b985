use thiserror::Error;

/// Why a single HTTP attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("invalid response payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RequestFailure {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RequestFailure::Status(status.as_u16())
        } else if err.is_decode() {
            RequestFailure::Decode(err.to_string())
        } else {
            RequestFailure::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOpKind {
    Load,
    Create,
    Update,
    Delete,
}

impl RecordOpKind {
    pub fn label(self) -> &'static str {
        match self {
            RecordOpKind::Load => "load",
            RecordOpKind::Create => "create",
            RecordOpKind::Update => "update",
            RecordOpKind::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("failed to load records: {0}")]
    Fetch(#[source] RequestFailure),
    #[error("failed to create record: {0}")]
    Create(#[source] RequestFailure),
    #[error("failed to update record: {0}")]
    Update(#[source] RequestFailure),
    #[error("failed to delete record: {0}")]
    Delete(#[source] RequestFailure),
}

impl ClientError {
    pub fn kind(&self) -> RecordOpKind {
        match self {
            ClientError::Fetch(_) => RecordOpKind::Load,
            ClientError::Create(_) => RecordOpKind::Create,
            ClientError::Update(_) => RecordOpKind::Update,
            ClientError::Delete(_) => RecordOpKind::Delete,
        }
    }

    pub fn failure(&self) -> &RequestFailure {
        match self {
            ClientError::Fetch(failure)
            | ClientError::Create(failure)
            | ClientError::Update(failure)
            | ClientError::Delete(failure) => failure,
        }
    }

    /// Generic user-facing text; the cause is only logged.
    pub fn toast_message(&self) -> &'static str {
        match self.kind() {
            RecordOpKind::Load => "Failed to load records",
            RecordOpKind::Create => "Failed to create",
            RecordOpKind::Update => "Failed to update",
            RecordOpKind::Delete => "Failed to delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name and email are required")]
    MissingRequired,
    #[error("no record form is open")]
    FormClosed,
}

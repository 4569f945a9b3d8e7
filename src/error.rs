use thiserror::Error;

/// Failure while pulling a season table from the provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The source could not be reached (connect, timeout, gateway errors).
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// The source answered but the payload could not be decoded into records.
    #[error("provider unavailable: unreadable payload: {message}")]
    MalformedPayload { message: String },

    #[error("provider error (http {status}): {message}")]
    Provider { status: u16, message: String },
}

impl FetchError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        FetchError::Unavailable {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        FetchError::MalformedPayload {
            message: message.into(),
        }
    }

    /// Both reachability and undecodable payloads belong to the
    /// `ProviderUnavailable` kind.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            FetchError::Unavailable { .. } | FetchError::MalformedPayload { .. }
        )
    }

    /// Only reachability failures are worth a second attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Unavailable { .. })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `row` is `None` when the provider table has no column for the field.
    #[error("missing field `{field}` {}", missing_location(.row, .game_id))]
    MissingField {
        field: &'static str,
        row: Option<usize>,
        game_id: Option<String>,
    },

    #[error("row {row}{} lists {team} as both home and away team", game_suffix(.game_id))]
    SameTeam {
        row: usize,
        team: String,
        game_id: Option<String>,
    },
}

impl ValidationError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField { field, .. } => Some(*field),
            ValidationError::SameTeam { .. } => None,
        }
    }
}

fn missing_location(row: &Option<usize>, game_id: &Option<String>) -> String {
    match row {
        Some(row) => format!("on row {row}{}", game_suffix(game_id)),
        None => "(no such column in provider table)".to_string(),
    }
}

fn game_suffix(game_id: &Option<String>) -> String {
    match game_id {
        Some(id) => format!(" (game {id})"),
        None => String::new(),
    }
}

/// Terminal failure of one pipeline invocation, tagged with the stage that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("fetch stage failed for season {season}: {source}")]
    Fetch {
        season: i32,
        #[source]
        source: FetchError,
    },

    #[error("validate stage failed for season {season}: {source}")]
    Validate {
        season: i32,
        #[source]
        source: ValidationError,
    },
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Fetch { .. } => "fetch",
            PipelineError::Validate { .. } => "validate",
        }
    }
}

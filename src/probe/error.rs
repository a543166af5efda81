use core::fmt::{Display, Formatter};

/// Which numeric field of a status line failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingField {
    Actual,
    Total,
}

impl ReadingField {
    const fn description(self) -> &'static str {
        match self {
            Self::Actual => "actual copy progress",
            Self::Total => "total copy size",
        }
    }
}

/// Coarse classification of a [`ProbeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeErrorKind {
    Invocation,
    Format,
    Number,
    Status,
}

impl Display for ProbeErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Invocation => "command failed",
            Self::Format => "malformed output",
            Self::Number => "unreadable number",
            Self::Status => "unknown copy status",
        })
    }
}

/// A failed probe. Every variant is recoverable by probing again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The status command could not be run, timed out, or exited with a failure status.
    Invocation { reason: String, output: String },

    /// The output did not have the `<actual>/<total>` shape.
    Format { output: String },

    /// A numeric field was not a non-negative integer.
    Number { field: ReadingField, value: String },

    /// The optional status field held a value other than the accepted ones.
    Status { status: String },
}

impl ProbeError {
    pub fn invocation(reason: impl Into<String>, output: impl Into<String>) -> Self {
        Self::Invocation {
            reason: reason.into(),
            output: output.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ProbeErrorKind {
        match self {
            Self::Invocation { .. } => ProbeErrorKind::Invocation,
            Self::Format { .. } => ProbeErrorKind::Format,
            Self::Number { .. } => ProbeErrorKind::Number,
            Self::Status { .. } => ProbeErrorKind::Status,
        }
    }
}

impl Display for ProbeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Invocation { reason, output } => {
                let output = output.trim();
                if output.is_empty() {
                    write!(f, "status command failed: {reason}")
                } else {
                    write!(f, "status command failed: {reason}, output: {output}")
                }
            }
            Self::Format { output } => {
                write!(f, "status command should have returned <actual>/<total> but returned: {}", output.trim())
            }
            Self::Number { field, value } => {
                write!(f, "cannot convert {} to an integer: '{}'", field.description(), value.trim())
            }
            Self::Status { status } => write!(f, "copy operation status is invalid: '{status}'"),
        }
    }
}

impl core::error::Error for ProbeError {}

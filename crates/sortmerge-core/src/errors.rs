use crate::check::Side;
use sortmerge_core_types::PassId;
use thiserror::Error;

/// Result type alias using MergeError
pub type Result<T> = std::result::Result<T, MergeError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Stable classification of every error raised by SortMerge. Each kind maps
/// to a stable error code for programmatic handling and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Precondition
    /// A key is smaller than the key before it on the same input
    OutOfOrder,
    /// A strictly sorted input repeats a key
    DuplicateKey,

    // Size hints
    /// An iterator yielded a different number of items than declared
    LengthMismatch,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::OutOfOrder => "ERR_OUT_OF_ORDER",
            ExErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            ExErrorKind::LengthMismatch => "ERR_LENGTH_MISMATCH",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the cursor
/// context (side, position, pass) needed to find the offending element.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    side: Option<Side>,
    position: Option<usize>,
    pass_id: Option<PassId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            side: None,
            position: None,
            pass_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the input side the error was found on
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Add the zero-based position of the offending element
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Add pass correlation context
    pub fn with_pass_id(mut self, pass_id: PassId) -> Self {
        self.pass_id = Some(pass_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the input side, if any
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    /// Get the offending position, if any
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Get the pass id, if any
    pub fn pass_id(&self) -> Option<&PassId> {
        self.pass_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(side) = self.side {
            write!(f, " (side: {})", side)?;
        }
        if let Some(position) = self.position {
            write!(f, " (position: {})", position)?;
        }
        if let Some(pass_id) = &self.pass_id {
            write!(f, " (pass_id: {})", pass_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors detected by the opt-in validation paths
///
/// The trusted (default) paths never produce these: unsorted input there
/// yields a mechanically defined but wrong result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// A key decreased relative to the previous key on the same input
    #[error("{side} input is out of order at position {position}: key {next} follows {previous}")]
    OutOfOrder {
        side: Side,
        position: usize,
        previous: String,
        next: String,
    },

    /// A key repeated on an input that must be strictly increasing
    #[error("{side} input repeats key {key} at position {position}; group repeated keys before joining")]
    DuplicateKey {
        side: Side,
        position: usize,
        key: String,
    },

    /// Iterator ended before the declared length
    #[error("Declared length {declared} but the iterator ended after {actual} items")]
    TooFewItems { declared: usize, actual: usize },

    /// Iterator kept going past the declared length
    #[error("Declared length {declared} but the iterator yielded more items")]
    TooManyItems { declared: usize },
}

impl MergeError {
    /// Input side the error was found on, if it is a precondition error
    pub fn side(&self) -> Option<Side> {
        match self {
            MergeError::OutOfOrder { side, .. } | MergeError::DuplicateKey { side, .. } => {
                Some(*side)
            }
            MergeError::TooFewItems { .. } | MergeError::TooManyItems { .. } => None,
        }
    }

    /// Zero-based position of the offending element, if known
    pub fn position(&self) -> Option<usize> {
        match self {
            MergeError::OutOfOrder { position, .. } | MergeError::DuplicateKey { position, .. } => {
                Some(*position)
            }
            MergeError::TooFewItems { actual, .. } => Some(*actual),
            MergeError::TooManyItems { declared } => Some(*declared),
        }
    }
}

/// Conversion from MergeError to the canonical ExError
impl From<MergeError> for ExError {
    fn from(err: MergeError) -> Self {
        let message = err.to_string();
        let position = err.position();
        let ex = match &err {
            MergeError::OutOfOrder { side, .. } => {
                ExError::new(ExErrorKind::OutOfOrder).with_side(*side)
            }
            MergeError::DuplicateKey { side, .. } => {
                ExError::new(ExErrorKind::DuplicateKey).with_side(*side)
            }
            MergeError::TooFewItems { .. } | MergeError::TooManyItems { .. } => {
                ExError::new(ExErrorKind::LengthMismatch)
            }
        };
        let ex = ex.with_message(message);
        match position {
            Some(position) => ex.with_position(position),
            None => ex,
        }
    }
}

use std::fmt;
use std::io;

/// A problem with the puzzle description itself.
#[derive(Debug)]
pub enum InputError {
    Io(io::Error),
    /// The input ended before `what` could be read.
    MissingValue { what: &'static str },
    InvalidInteger { what: &'static str, token: String },
    /// `N + 1` is not a perfect square.
    NotSquare { tile_count: i64 },
    BlankIndexOutOfRange { index: i64, cells: usize },
    /// The grid is not a permutation of `0..=N`.
    InvalidTiles { reason: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io(error) => write!(f, "cannot read input: {error}"),
            InputError::MissingValue { what } => write!(f, "unexpected end of input: missing {what}"),
            InputError::InvalidInteger { what, token } => {
                write!(f, "invalid {what}: '{token}' is not an integer")
            }
            InputError::NotSquare { tile_count } => write!(
                f,
                "invalid tile count {tile_count}: {tile_count} + 1 is not a perfect square"
            ),
            InputError::BlankIndexOutOfRange { index, cells } => write!(
                f,
                "blank index {index} is outside -1..{cells}"
            ),
            InputError::InvalidTiles { reason } => write!(f, "invalid board: {reason}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for InputError {
    fn from(error: io::Error) -> Self {
        InputError::Io(error)
    }
}

/// The search could not produce an answer for a well-formed instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The start board and the goal have different dimensions.
    DimensionMismatch { board: usize, goal: usize },
    /// A bounded pass rejected nothing, so the threshold cannot be raised.
    /// Cannot happen once the parity check has passed.
    ThresholdExhausted { threshold: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::DimensionMismatch { board, goal } => write!(
                f,
                "board is {board}x{board} but the goal is {goal}x{goal}"
            ),
            SolveError::ThresholdExhausted { threshold } => write!(
                f,
                "search space exhausted at threshold {threshold} without reaching the goal"
            ),
        }
    }
}

impl std::error::Error for SolveError {}

/// Anything that stops the program before it prints a result.
#[derive(Debug)]
pub enum Error {
    Input(InputError),
    Solve(SolveError),
    Output(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Input(error) => error.fmt(f),
            Error::Solve(error) => error.fmt(f),
            Error::Output(error) => write!(f, "cannot write output: {error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Input(error) => Some(error),
            Error::Solve(error) => Some(error),
            Error::Output(error) => Some(error),
        }
    }
}

impl From<InputError> for Error {
    fn from(error: InputError) -> Self {
        Error::Input(error)
    }
}

impl From<SolveError> for Error {
    fn from(error: SolveError) -> Self {
        Error::Solve(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Output(error)
    }
}

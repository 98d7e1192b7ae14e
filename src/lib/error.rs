#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// A binary operation (`+`, `-`, interval comparison, ...) was attempted
    /// between intervals whose endpoints do not match.
    InvalidInterval,
    /// `Interval::split` was called with a position outside `[0, length]`.
    InvalidSplit,
    /// `Interval::project_onto` was called with a target not contained in
    /// the source interval.
    InvalidProjection,
    /// A definite integral was requested on a degree-2 polynomial.
    InvalidDegree,
    /// `IntervalQueue::remove` was called with an argument that is neither
    /// the queue head nor a left-subset of it.
    InvalidRemoval,
    /// A reduction was requested over an empty `IntervalQueue`.
    EmptyBuffer,
    Custom(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let content = match self {
            Error::Io(e) => format!("io error, {}", e),
            Error::InvalidInterval => {
                "cannot operate on intervals with different bounds".to_string()
            }
            Error::InvalidSplit => "split position is outside [0, length]".to_string(),
            Error::InvalidProjection => {
                "cannot project onto an interval that is not contained in this one".to_string()
            }
            Error::InvalidDegree => {
                "definite integral requested on a degree-2 polynomial".to_string()
            }
            Error::InvalidRemoval => {
                "cannot remove an interval that is not the head or a left subset of it".to_string()
            }
            Error::EmptyBuffer => "reduction requested on an empty interval queue".to_string(),
            Error::Custom(e) => e.clone(),
        };
        write!(formatter, "{}", content)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn custom<A: Into<String>>(message: A) -> Self {
        Error::Custom(message.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io(source)
    }
}

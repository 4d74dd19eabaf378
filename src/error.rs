use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire network module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The network module's error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MlErr {
    /// A topology constraint was violated, nothing was built.
    Configuration { constraint: &'static str },
    /// The parameter generator ran dry before every parameter was initialized.
    ParamGenExhausted { got: usize, expected: usize },
    /// Examples have a different width than the network's input.
    InputWidth { got: usize, expected: usize },
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::Configuration { constraint } => {
                write!(f, "invalid network configuration: {constraint}")
            }
            MlErr::ParamGenExhausted { got, expected } => write!(
                f,
                "the parameter generator is exhausted, it yielded {got} of the {expected} parameters"
            ),
            MlErr::InputWidth { got, expected } => write!(
                f,
                "the examples have {got} features but the network expects {expected} inputs"
            ),
        }
    }
}

impl Error for MlErr {}

impl MlErr {
    pub(crate) fn configuration(constraint: &'static str) -> Self {
        Self::Configuration { constraint }
    }
}

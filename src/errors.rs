use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("invalid term unit: {unit}")]
    InvalidTermUnit {
        unit: String,
    },

    #[error("unsupported interest method: {method}")]
    UnsupportedInterestMethod {
        method: String,
    },

    #[error("variable rate series is required and must not be empty")]
    MissingRateSeries,

    #[error("hybrid split is required for hybrid interest")]
    MissingHybridSplit,

    #[error("one-time interest amount is required")]
    MissingOneTimeAmount,

    #[error("loan already complete: {periods_paid} of {tenure} periods paid")]
    LoanAlreadyComplete {
        periods_paid: u32,
        tenure: u32,
    },

    #[error("prepayment amount must be positive, got {amount}")]
    NonPositivePrepayment {
        amount: Money,
    },

    #[error("prepayment {amount} must be less than outstanding principal {outstanding}")]
    PrepaymentExceedsBalance {
        amount: Money,
        outstanding: Money,
    },

    #[error("schedule not supported for interest method {method}")]
    ScheduleNotSupported {
        method: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::InvalidConfiguration {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;

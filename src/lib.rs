pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod interest;
pub mod loan;
pub mod payments;
pub mod term;
pub mod types;
pub mod validation;

// re-export key types
pub use config::{EngineConfig, ParameterDefaults, PenaltyConfig, SettlementConfig, ValidationLimits};
pub use decimal::{round_money, Money, Rate};
pub use engine::LoanEngine;
pub use errors::{LoanError, Result};
pub use interest::{InterestPolicy, PenaltyCalculator};
pub use loan::LoanTerms;
pub use payments::amortization::{amortize, build_schedule, compute_installment};
pub use payments::{
    AmortizationSchedule, ForeclosureQuote, LoanParameters, PrepaymentQuote, ScheduledPayment,
    SettlementCalculator,
};
pub use types::{
    CalculationMethod, HybridSplit, InstallmentLine, InterestMethod, LoanCategory, TermUnit,
};
pub use validation::{defaults_for, validate_parameters, ParameterValidator, PolicyDefaults};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;

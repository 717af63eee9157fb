/// quick start - installment and schedule for a simple loan
use chrono::{TimeZone, Utc};
use loan_engine_rs::{AmortizationSchedule, CalculationMethod, LoanParameters, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 100,000 over 12 months at 12% a year
    let params = LoanParameters::new(
        Money::from_major(100_000),
        Rate::from_percent(dec!(12)),
        12,
        CalculationMethod::ReducingBalance,
    );

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let schedule = AmortizationSchedule::generate(&params, start)?;

    println!("installment: {}", schedule.installment);
    for payment in &schedule.payments {
        println!(
            "{:>3}  {}  {:>10}  {:>10}  {:>10}",
            payment.period,
            payment.due_date.format("%Y-%m-%d"),
            payment.principal_component,
            payment.interest_component,
            payment.outstanding_principal_after,
        );
    }
    println!("total interest: {}", schedule.total_interest);

    Ok(())
}

/// settlement - foreclosure, prepayment and penalties on one loan
use chrono::{Duration, TimeZone, Utc};
use loan_engine_rs::{
    CalculationMethod, LoanCategory, LoanEngine, LoanParameters, Money, Rate, SafeTimeProvider,
    TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let engine = LoanEngine::default();
    let params = LoanParameters::new(
        Money::from_major(2_500_000),
        Rate::from_percent(dec!(8.5)),
        240,
        CalculationMethod::ReducingBalance,
    )
    .category(LoanCategory::Home);

    let violations = engine.validate(&params);
    if !violations.is_empty() {
        for v in violations {
            println!("invalid: {v}");
        }
        return Ok(());
    }

    let start = Utc.with_ymd_and_hms(2022, 4, 1, 0, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 4, 18, 0, 0, 0).unwrap(),
    ));

    println!("=== foreclosure after 24 installments ===");
    let quote = engine.foreclosure_quote(&params, start, 24, &time)?;
    println!("{}", serde_json::to_string_pretty(&quote)?);

    println!("\n=== prepay 500,000 after 24 installments ===");
    for reduce_installment in [true, false] {
        let quote = engine.prepayment_quote(&params, 24, Money::from_major(500_000), reduce_installment)?;
        println!(
            "  reduce installment {reduce_installment}: installment {} over {} months, saves {}",
            quote.revised_installment, quote.revised_remaining_periods, quote.interest_saved
        );
    }

    println!("\n=== paying installment 25 ===");
    let installment = engine.installment(&params)?;
    let schedule = engine.schedule(&params, start)?;
    if let Some(payment) = schedule.get_payment(25) {
        let late = engine.late_penalty(installment, payment.due_date, payment.due_date + Duration::days(45));
        let early = engine.early_rebate(installment, payment.due_date, payment.due_date - Duration::days(10));
        println!("  45 days late penalty: {late}");
        println!("  10 days early rebate: {early}");
    }

    Ok(())
}

/// interest policies - total interest under each policy for the same loan
use loan_engine_rs::{HybridSplit, InterestMethod, InterestPolicy, LoanTerms, Money, Rate, TermUnit};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== interest policies ===\n");

    for tag in ["FLAT", "FIXED", "REDUCING", "VARIABLE", "HYBRID", "ONE_TIME", "MORTGAGE", "COMPOUND"] {
        let method: InterestMethod = tag.parse()?;
        let terms = LoanTerms::new(
            Money::from_major(50_000),
            Rate::from_percent(dec!(10)),
            dec!(24),
            TermUnit::Month,
            method,
        )
        .variable_rates(vec![dec!(9), dec!(10.5), dec!(12)])
        .hybrid_split(HybridSplit::new(dec!(70), dec!(30)))
        .one_time_interest(Money::from_major(4_000));

        match InterestPolicy::for_method(method) {
            Ok(policy) => {
                let interest = policy.total_interest(&terms)?;
                let periods = if policy.supports_schedule() {
                    policy.schedule(&terms)?.len().to_string()
                } else {
                    "-".to_string()
                };
                println!("  {tag:<9} interest {interest:>10}  schedule lines {periods}");
            }
            Err(e) => println!("  {tag:<9} {e}"),
        }
    }

    Ok(())
}

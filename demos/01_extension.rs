/// extension - continue an existing rental from its current end date
use locker_payment_rs::chrono::NaiveDate;
use locker_payment_rs::{parse_date, LockerRental, Money, PricingConfig, RentalStatus};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PricingConfig::standard(Money::from_major(50_000));
    let calculator = config.calculator();

    let rental = LockerRental {
        locker_id: 7,
        locker_number: "A-07".to_string(),
        member_id: 42,
        member_name: "Kim".to_string(),
        start_date: parse_date("2025-01-15")?,
        end_date: parse_date("2025-03-15")?,
    };

    for today in ["2025-03-01", "2025-03-10", "2025-04-01"] {
        let today: NaiveDate = parse_date(today)?;
        let status = rental.status(today, config.expiring_soon_days);
        let label = match status {
            RentalStatus::Upcoming { .. } => "upcoming",
            RentalStatus::Active { .. } => "active",
            RentalStatus::ExpiringSoon { .. } => "expiring soon",
            RentalStatus::Expired { .. } => "expired",
        };
        let quote = rental.extension_quote(&calculator, 6, config.monthly_fee, today);
        println!(
            "{today}: {label}, 6 more months runs {} -> {} for {} ({} off)",
            quote.start_date, quote.end_date, quote.final_amount, quote.discount_rate
        );
    }

    Ok(())
}

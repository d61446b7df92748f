/// quick start - price and validate a three month locker rental
use locker_payment_rs::chrono::NaiveDate;
use locker_payment_rs::{calculate_full_payment, validate_payment_data, Money, PaymentDraft, PaymentMethod};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).ok_or("bad date")?;

    let calc = calculate_full_payment(3, Money::from_major(50_000), today, false, None);
    println!("{}", serde_json::to_string_pretty(&calc)?);

    let draft = PaymentDraft {
        months: Some(3),
        payment_method: Some(PaymentMethod::Cash),
        start_date: Some(calc.start_date),
        amount: Some(calc.final_amount),
    };
    let result = validate_payment_data(&draft, today);
    println!("valid: {} ({})", result.is_valid, result);

    Ok(())
}

/// payment desk - submit payments with controlled time and inspect events
use locker_payment_rs::chrono::{Duration, TimeZone, Utc};
use locker_payment_rs::{
    InMemoryPaymentStore, LockerPaymentBuilder, Money, PaymentDesk, PaymentMethod, PricingConfig,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let mut desk = PaymentDesk::new(
        PricingConfig::standard(Money::from_major(50_000)),
        InMemoryPaymentStore::new(),
    )?;

    let request = || {
        LockerPaymentBuilder::new()
            .locker(7, "A-07")
            .member(42, "Kim")
            .payment_method(PaymentMethod::Card)
    };

    let first = desk.submit(request().months(3), &time)?;
    println!("stored payment {first}");

    // too long, rejected with a field error
    if let Err(e) = desk.submit(request().months(13), &time) {
        println!("rejected: {e}");
    }

    controller.advance(Duration::days(45));
    let second = desk.submit_extension(request().months(6), &time)?;
    if let Some(record) = desk.store().get(second) {
        println!("{}", record.to_json_pretty()?);
    }

    for event in desk.events.take_events() {
        println!("{event:?}");
    }

    Ok(())
}

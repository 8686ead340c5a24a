// ============================================================================
// Basic Usage Example
// ============================================================================

use fixed_money::prelude::*;
use rust_decimal::Decimal;

fn main() -> MoneyResult<()> {
    #[cfg(feature = "logging")]
    fixed_money::utils::init_logging();

    println!("=== Fixed Money Example ===\n");

    let registry = CurrencyRegistry::with_common_currencies();
    println!("Registered currencies: {}\n", registry.codes().join(", "));

    // Build a bill from text, floats and minor units
    let coffee = Money::parse_with_code("$4.50", "AUD", &registry)?;
    let cake = Money::from_num_with_code(6.25, "AUD", &registry)?;
    let tip = Money::from_int_with_code(200, "AUD", &registry)?;

    let subtotal = coffee.checked_add(&cake)?.checked_add(&tip)?;
    let total = subtotal.multiply(Decimal::new(11, 1));
    println!("Subtotal: {subtotal}");
    println!("With GST: {total}");
    println!("Formatted: {}\n", total.format_with("CCC #,##0.00")?);

    // Split the bill
    println!("Split three ways:");
    for (i, share) in total.allocate_to(3)?.iter().enumerate() {
        println!("  Person {}: {share}", i + 1);
    }

    println!("\nSplit 50/30/20:");
    for share in total.allocate(&[50, 30, 20])? {
        println!("  {share}");
    }

    // Convert
    let rate = ExchangeRate::from_codes("AUD", "EUR", Decimal::new(61, 2), &registry)?;
    let euros = total.exchange_to(&rate)?;
    println!("\n{total} at {rate} = {euros}");

    // Mixing currencies is an error
    match total.checked_add(&euros) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("\nAdding AUD to EUR: {e}"),
    }

    // Ratio of two amounts
    println!("\nCake costs {:.2}x the coffee", cake.divide_by(&coffee)?);

    Ok(())
}

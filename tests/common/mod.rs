use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const CURRENCIES: [&str; 3] = ["JPY", "USD", "EUR"];

pub fn generate_participants(path: &Path, count: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["id", "name"])?;

    for i in 1..=count {
        wtr.write_record([format!("p{i}"), format!("Person {i}")])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `rows` random expenses between participants `p1..=p{participants}`.
///
/// Amounts are whole cents; every expense has at least one beneficiary.
pub fn generate_expenses(
    path: &Path,
    participants: usize,
    rows: usize,
    seed: u64,
) -> Result<(), Error> {
    let mut rng = StdRng::seed_from_u64(seed);
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["id", "payer", "beneficiaries", "description", "currency", "amount"])?;

    for i in 1..=rows {
        let payer = rng.gen_range(1..=participants);
        let beneficiaries: Vec<String> = (1..=participants)
            .filter(|_| rng.gen_bool(0.6))
            .map(|p| format!("p{p}"))
            .collect();
        let beneficiaries = if beneficiaries.is_empty() {
            format!("p{payer}")
        } else {
            beneficiaries.join(";")
        };
        let currency = CURRENCIES[rng.gen_range(0..CURRENCIES.len())];
        let cents: u64 = rng.gen_range(100..=5_000_000);

        wtr.write_record([
            i.to_string(),
            format!("p{payer}"),
            beneficiaries,
            format!("Expense {i}"),
            currency.to_string(),
            format!("{}.{:02}", cents / 100, cents % 100),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn generate_rates(path: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["currency", "rate"])?;
    wtr.write_record(["USD", "0.0067"])?;
    wtr.write_record(["EUR", "0.0061"])?;
    wtr.flush()?;
    Ok(())
}

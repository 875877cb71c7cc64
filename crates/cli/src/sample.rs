//! Seeded demo dataset.
//!
//! Unit costs are uniform over 5 to 500; cheap parts sell more (Poisson
//! demand with λ = 300 / (cost + 1), clamped to 0.2 to 10) and any month has
//! a 35% chance of no demand at all. Sales are priced at a 20% to 100%
//! markup over cost. One sales row per part per month, dated at month end.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};

use stockmatrix_core::Month;
use stockmatrix_inventory::{InventoryRow, NumericCell, TransactionRow};

const ZERO_MONTH_PROBABILITY: f64 = 0.35;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleData {
    pub inventory: Vec<InventoryRow>,
    pub transactions: Vec<TransactionRow>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn sample_inventory(rng: &mut StdRng, parts: usize) -> Vec<InventoryRow> {
    (0..parts)
        .map(|i| InventoryRow {
            part_id: Some(format!("SP-{}", 10_000 + i)),
            description: Some(format!("Sample Part {i}")),
            on_hand: Some(f64::from(rng.gen_range(0u32..50)).into()),
            unit_cost: Some(round2(rng.gen_range(5.0..500.0)).into()),
            lead_time_days: Some(f64::from(rng.gen_range(7u32..120)).into()),
            min_order_qty: Some(f64::from(rng.gen_range(0u32..10)).into()),
            on_order: Some(f64::from(rng.gen_range(0u32..20)).into()),
        })
        .collect()
}

/// Monthly sales for every inventory part over `months` months ending at
/// the month of `as_of`.
pub fn sample_transactions(
    rng: &mut StdRng,
    inventory: &[InventoryRow],
    as_of: NaiveDate,
    months: usize,
) -> Result<Vec<TransactionRow>> {
    let calendar = Month::of(&as_of).window_ending(months);
    let mut rows = Vec::with_capacity(inventory.len() * months);

    for item in inventory {
        let (Some(part_id), Some(NumericCell::Number(cost))) = (item.part_id.as_deref(), &item.unit_cost) else {
            continue;
        };
        let cost = *cost;
        let lambda = (300.0 / (cost + 1.0)).clamp(0.2, 10.0);
        let demand = Poisson::new(lambda).with_context(|| format!("invalid demand rate {lambda} for {part_id}"))?;

        for month in &calendar {
            let date = month
                .last_day()
                .with_context(|| format!("no calendar end for month {month}"))?;
            let mut qty: f64 = demand.sample(rng);
            if rng.gen_bool(ZERO_MONTH_PROBABILITY) {
                qty = 0.0;
            }
            let price = round2(cost * rng.gen_range(1.2..2.0));
            rows.push(TransactionRow::new(part_id, &date.format("%Y-%m-%d").to_string(), qty, price));
        }
    }
    Ok(rows)
}

/// Same `seed`, same dataset.
pub fn generate(parts: usize, seed: u64, as_of: NaiveDate, months: usize) -> Result<SampleData> {
    let mut rng = StdRng::seed_from_u64(seed);
    let inventory = sample_inventory(&mut rng, parts);
    let transactions = sample_transactions(&mut rng, &inventory, as_of, months)?;
    Ok(SampleData {
        inventory,
        transactions,
    })
}

use chrono::NaiveDate;

use stockmatrix_analytics::{
    AbcCategory, Action, AnalysisConfig, AnalysisError, AnalysisJob, Boundary, ConfigError, LmhCategory, PartStatus,
    PolicyInput, PolicyInputs, PolicyJob, PolicyReport, Vod, ZScoreSource, compute_policy,
};
use stockmatrix_inventory::{InventoryRow, Table, TransactionRow};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
}

/// Three parts whose values split 68 / 20 / 12 percent of the portfolio.
///
/// - P1: 12 units in each month of 2024, nothing earlier (mean 4, VOD ≈ 1.43).
/// - P2: 1 unit per month over the whole window (constant series).
/// - P3: two sales of 36 units.
fn portfolio() -> (Vec<TransactionRow>, Vec<InventoryRow>) {
    let mut tx = Vec::new();
    for m in 1..=12 {
        tx.push(TransactionRow::new("P1", &format!("2024-{m:02}-15"), 12.0, 8.5));
    }
    for y in 2022..=2024 {
        for m in 1..=12 {
            tx.push(TransactionRow::new("P2", &format!("{y}-{m:02}-01"), 1.0, 10.0));
        }
    }
    tx.push(TransactionRow::new("P3", "2023-03-10", 36.0, 3.0));
    tx.push(TransactionRow::new("P3", "2024-11-30", 36.0, 3.0));

    let mut p1 = InventoryRow::new("P1", 3.0, 2.8, 60.0);
    p1.on_order = Some(2.0.into());
    let inventory = vec![p1, InventoryRow::new("P2", 1.0, 2.0, 30.0), InventoryRow::new("P3", 500.0, 1.0, 15.0)];
    (tx, inventory)
}

fn run(config: AnalysisConfig, tx: Vec<TransactionRow>, inventory: Vec<InventoryRow>) -> Result<PolicyReport, AnalysisError> {
    PolicyJob::new(
        config,
        PolicyInput {
            as_of: as_of(),
            transactions: tx,
            inventory,
        },
    )
    .run()
}

#[test]
fn worked_example_policy_figures() {
    let p = compute_policy(&PolicyInputs {
        z_score: 2.33,
        std_monthly: 5.94,
        mean_monthly: 4.61,
        lead_time_months: 2.0,
        ordering_cost: 50.0,
        holding_cost_per_unit: 0.56,
    })
    .unwrap();
    assert!((p.eoq.value() - 99.39).abs() <= 0.01);
    assert!((p.safety_stock - 19.58).abs() <= 0.01);
    assert!((p.reorder_point - 28.80).abs() <= 0.01);

    let vod = Vod::compute(5.94, 4.61).value().unwrap();
    assert!((vod - 1.289).abs() < 0.001);
}

#[test]
fn end_to_end_classifies_and_recommends() {
    let (tx, inv) = portfolio();
    let report = run(AnalysisConfig::default(), tx, inv).unwrap();

    assert_eq!(report.window.months, 36);
    assert!(report.rejected.is_empty());
    assert_eq!(report.skipped_transactions, 0);

    let p1 = report.row("P1").unwrap();
    assert_eq!(p1.cumulative_pct, Some(68.0));
    assert_eq!(p1.abc, Some(AbcCategory::A));
    assert_eq!(p1.lmh, Some(LmhCategory::M));
    assert_eq!(p1.nine_box.map(|c| c.to_string()).as_deref(), Some("AM"));
    assert_eq!((p1.tier, p1.service_level, p1.z_score), (1, 0.99, 2.33));
    assert_eq!(p1.mean_monthly_demand, 4.0);
    assert_eq!(p1.status, PartStatus::Ok);

    let std = (1152.0f64 / 35.0).sqrt();
    assert!((p1.std_monthly_demand - std).abs() < 1e-9);
    let ss = 2.33 * std * 2.0f64.sqrt();
    assert!((p1.safety_stock().unwrap() - ss).abs() < 1e-9);
    assert!((p1.reorder_point().unwrap() - (8.0 + ss)).abs() < 1e-9);
    let eoq = ((2.0 * 48.0 * 50.0) / 0.56f64).sqrt();
    assert!((p1.eoq().unwrap() - eoq).abs() < 1e-9);

    // Position 3 on hand + 2 on order sits below the reorder point.
    let rec = p1.recommendation.unwrap();
    assert_eq!(rec.action, Action::Order);
    assert!((rec.quantity - eoq).abs() < 1e-9);
    assert!((rec.financial_impact - eoq * 2.8).abs() < 1e-9);

    let p2 = report.row("P2").unwrap();
    assert_eq!(p2.abc, Some(AbcCategory::B));
    assert_eq!(p2.lmh, Some(LmhCategory::L));

    let p3 = report.row("P3").unwrap();
    assert_eq!(p3.abc, Some(AbcCategory::C));
    assert_eq!(p3.lmh, Some(LmhCategory::H));
    assert_eq!(p3.tier, 4);
    assert!(p3.has_boundary(Boundary::InsufficientHistory));
    assert_eq!(p3.recommendation.unwrap().action, Action::ReduceStock);

    assert_eq!(report.summary.parts, 3);
    assert_eq!(report.summary.abc_counts.get("A"), Some(&1));
    assert_eq!(report.summary.nine_box_counts.get("AM"), Some(&1));
    let value = 3.0 * 2.8 + 1.0 * 2.0 + 500.0 * 1.0;
    assert!((report.summary.current_inventory_value - value).abs() < 1e-9);
}

#[test]
fn identical_inputs_give_identical_reports() {
    let (tx, inv) = portfolio();
    let first = run(AnalysisConfig::default(), tx.clone(), inv.clone()).unwrap();
    let second = run(AnalysisConfig::default(), tx, inv).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn input_order_does_not_change_the_report() {
    let (mut tx, mut inv) = portfolio();
    let baseline = run(AnalysisConfig::default(), tx.clone(), inv.clone()).unwrap();
    tx.reverse();
    inv.reverse();
    assert_eq!(run(AnalysisConfig::default(), tx, inv).unwrap(), baseline);
}

#[test]
fn stock_at_reorder_point_needs_no_action() {
    let tx: Vec<TransactionRow> = (1..=12)
        .map(|m| TransactionRow::new("FLAT", &format!("2024-{m:02}-01"), 2.0, 1.0))
        .collect();
    let config = AnalysisConfig::default().with_window_months(12);
    let report = run(config, tx, vec![InventoryRow::new("FLAT", 2.0, 1.0, 30.0)]).unwrap();

    let row = report.row("FLAT").unwrap();
    assert_eq!(row.vod, Some(Vod::Defined(0.0)));
    assert_eq!(row.lmh, Some(LmhCategory::L));
    assert_eq!(row.reorder_point(), Some(2.0));
    assert_eq!(row.recommendation.unwrap().action, Action::NoAction);
}

#[test]
fn zero_demand_in_window_is_high_variability() {
    let tx = vec![
        TransactionRow::new("OLD", "2019-01-01", 5.0, 1.0),
        TransactionRow::new("NEW", "2024-12-01", 5.0, 1.0),
    ];
    let report = run(AnalysisConfig::default(), tx, vec![InventoryRow::new("OLD", 0.0, 1.0, 30.0)]).unwrap();
    assert_eq!(report.skipped_transactions, 1);

    let old = report.row("OLD").unwrap();
    assert_eq!(old.abc, None);
    assert_eq!(old.tier, 4);
    assert!(old.has_boundary(Boundary::NoDemandHistory));

    let new = report.row("NEW").unwrap();
    assert!(new.has_boundary(Boundary::MissingInventoryRecord));
    assert!(new.policy.is_none());
}

#[test]
fn strict_mode_aborts_on_first_bad_record() {
    let (mut tx, inv) = portfolio();
    tx.push(TransactionRow::new("", "2024-01-01", 1.0, 1.0));
    let err = run(AnalysisConfig::default().with_strict(true), tx.clone(), inv.clone()).unwrap_err();
    match err {
        AnalysisError::Input(e) => assert_eq!(e.table, Table::Transactions),
        other => panic!("unexpected error: {other}"),
    }

    let lenient = run(AnalysisConfig::default(), tx, inv).unwrap();
    assert_eq!(lenient.rejected.len(), 1);
    assert_eq!(lenient.rows.len(), 3);
}

#[test]
fn invalid_configuration_aborts_before_processing() {
    let (tx, inv) = portfolio();
    let err = run(AnalysisConfig::default().with_window_months(0), tx.clone(), inv.clone()).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(ConfigError::EmptyWindow)));

    let err = run(AnalysisConfig::default().with_holding_rate(0.0), tx.clone(), inv.clone()).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(ConfigError::Cost(_))));

    let huge = AnalysisConfig::default().with_window_months(4_611_686_018_427_387_904);
    let err = run(huge, tx, inv).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(ConfigError::WindowTooLarge(_))));
}

#[test]
fn inverse_normal_z_tracks_the_table() {
    let (tx, inv) = portfolio();
    let config = AnalysisConfig::default().with_z_source(ZScoreSource::InverseNormal);
    let report = run(config, tx, inv).unwrap();
    let p1 = report.row("P1").unwrap();
    assert!((p1.z_score - 2.326).abs() < 0.001);
}

#[test]
fn config_file_with_custom_thresholds() {
    let config = AnalysisConfig::from_json_str(r#"{ "abc": { "a_threshold": 60.0, "b_threshold": 90.0 } }"#).unwrap();
    let (tx, inv) = portfolio();
    let report = run(config, tx, inv).unwrap();
    assert_eq!(report.row("P1").unwrap().abc, Some(AbcCategory::B));
}

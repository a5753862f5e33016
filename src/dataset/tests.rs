use super::{Dataset, FilterOptions};

use std::io::Write;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tempfile::NamedTempFile;

use crate::models::{Choice, DatasetLoadError};

const HEADER: &str = "transaction_time,amount,country,channel,merchant_category,total_transactions_user,account_age_days,is_fraud";

fn create_temporary_csv(rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "{HEADER}")?;

    for row in rows {
        writeln!(file, "{row}")?;
    }

    Ok(file)
}

#[test]
fn test_dataset_loads_rows_in_order_with_options_and_bounds() -> Result<()> {
    let file = create_temporary_csv(&[
        "2024-01-02 10:00:00,200,FR,web,travel,3,90,0",
        "2024-01-01 09:00:00,100,US,pos,grocery,5,400,0",
        "2024-01-01 18:30:00,50,US,web,grocery,5,400,1",
    ])?;

    let dataset = Dataset::load(file.path())?;

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.records()[0].country, "FR");
    assert!(dataset.records()[2].is_fraud);

    assert_eq!(dataset.options(), &FilterOptions {
        countries: vec!["FR".to_string(), "US".to_string()],
        channels: vec!["pos".to_string(), "web".to_string()],
        categories: vec!["grocery".to_string(), "travel".to_string()]
    });

    let bounds = dataset.bounds().ok_or_else(|| anyhow!("Bounds missing for non-empty dataset"))?;

    assert_eq!(bounds.start, NaiveDate::from_str("2024-01-01")?);
    assert_eq!(bounds.end, NaiveDate::from_str("2024-01-02")?);

    Ok(())
}

#[test]
fn test_options_are_sorted_by_raw_string() -> Result<()> {
    let file = create_temporary_csv(&[
        "2024-01-01 00:00:00,1,de,web,b,1,1,0",
        "2024-01-01 00:00:00,1,US,web,a,1,1,0",
        "2024-01-01 00:00:00,1,FR,web,B,1,1,0",
    ])?;

    let dataset = Dataset::load(file.path())?;

    assert_eq!(dataset.options().countries, vec!["FR", "US", "de"]);
    assert_eq!(dataset.options().categories, vec!["B", "a", "b"]);

    Ok(())
}

#[test]
fn test_columns_may_appear_in_any_order_with_extras() -> Result<()> {
    let csv_content = "\
transaction_id,is_fraud,account_age_days,total_transactions_user,merchant_category,channel,country,amount,transaction_time
tx-1,1,10,2,travel,app,BR,75.5,2024-05-06 07:08:09";

    let dataset = Dataset::from_reader(csv_content.as_bytes())?;
    let record = &dataset.records()[0];

    assert_eq!(record.country, "BR");
    assert_eq!(record.channel, "app");
    assert!(record.is_fraud);

    Ok(())
}

#[test]
fn test_unparseable_timestamp_fails_the_whole_load() -> Result<()> {
    let file = create_temporary_csv(&[
        "2024-01-01 09:00:00,100,US,pos,grocery,5,400,0",
        "yesterday,50,US,web,grocery,5,400,1",
        "2024-01-02 10:00:00,200,FR,web,travel,3,90,0",
    ])?;

    let result = Dataset::load(file.path());

    assert!(matches!(result, Err(DatasetLoadError::InvalidTimestamp { row: 2, .. })));

    Ok(())
}

#[test]
fn test_missing_required_column_is_reported() {
    let csv_content = "transaction_time,amount,country,channel,merchant_category,account_age_days,is_fraud\n";
    let result = Dataset::from_reader(csv_content.as_bytes());

    assert!(matches!(result, Err(DatasetLoadError::MissingColumn("total_transactions_user"))));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = Dataset::load("missing_dataset.csv");

    assert!(matches!(result, Err(DatasetLoadError::Io(_))));
}

#[test]
fn test_null_amounts_are_kept_as_rows() -> Result<()> {
    let file = create_temporary_csv(&[
        "2024-01-01 09:00:00,,US,pos,grocery,5,400,0",
        "2024-01-01 10:00:00,NaN,US,pos,grocery,,,0",
    ])?;

    let dataset = Dataset::load(file.path())?;

    assert_eq!(dataset.len(), 2);
    assert!(dataset.records().iter().all(|record| record.amount.is_none()));
    assert_eq!(dataset.records()[1].account_age_days, None);

    Ok(())
}

#[test]
fn test_empty_dataset_has_no_bounds_and_an_unbounded_default_selection() -> Result<()> {
    let file = create_temporary_csv(&[])?;
    let dataset = Dataset::load(file.path())?;

    assert!(dataset.is_empty());
    assert!(dataset.bounds().is_none());
    assert_eq!(dataset.options(), &FilterOptions::default());
    assert_eq!(dataset.default_selection().date_range.start, NaiveDate::MIN);

    Ok(())
}

#[test]
fn test_default_selection_spans_bounds_with_wildcards() -> Result<()> {
    let file = create_temporary_csv(&[
        "2024-01-03 09:00:00,100,US,pos,grocery,5,400,0",
        "2024-01-09 10:00:00,200,FR,web,travel,3,90,0",
    ])?;

    let selection = Dataset::load(file.path())?.default_selection();

    assert_eq!(selection.date_range.start, NaiveDate::from_str("2024-01-03")?);
    assert_eq!(selection.date_range.end, NaiveDate::from_str("2024-01-09")?);
    assert_eq!(selection.country, Choice::All);
    assert_eq!(selection.channel, Choice::All);
    assert_eq!(selection.merchant_category, Choice::All);
    assert!(!selection.fraud_only);

    Ok(())
}

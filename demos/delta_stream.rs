//! # Delta Stream
//!
//! Differences a small price series against the previous record and
//! shifts the volume one record ahead, logging through `tracing`.
//!
//! ```text
//! [IterSource] → [DeltaFilter] → [CollectSink]
//! ```
//!
//! Run: `RUST_LOG=tsdelta=debug cargo run --example delta_stream`

use tracing_subscriber::EnvFilter;
use tsdelta::observability::init_metrics;
use tsdelta::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    init_metrics();

    let schema = Schema::new(vec![
        Attribute::numeric("price"),
        Attribute::numeric("volume"),
        Attribute::other("venue"),
    ]);
    let records = vec![
        Record::from_numbers(&[10.0, 300.0, 1.0]),
        Record::from_numbers(&[12.0, 250.0, 1.0]),
        Record::new([Value::Missing, Value::Number(120.0), Value::Number(2.0)]),
        Record::from_numbers(&[15.0, 400.0, 2.0]),
        Record::with_weight(
            [Value::Number(11.0), Value::Number(90.0), Value::Number(1.0)],
            0.5,
        ),
    ];

    // price: current minus previous
    let config = FilterConfig::default()
        .with_selection(Selection::parse("1")?)
        .with_offset(-1)
        .emit_missing();
    let filter = DeltaFilter::delta(config)?.with_name("price-delta");

    let mut pipeline = Pipeline::new(
        IterSource::new(schema.clone(), records.clone()),
        filter,
        CollectSink::new(),
    )
    .with_name("prices");
    let stats = pipeline.run()?;

    let sink = pipeline.sink();
    if let Some(out) = sink.schema() {
        println!("@schema {out}");
    }
    for record in sink.records() {
        println!("{record}");
    }
    println!(
        "{} in, {} out in {:?}",
        stats.records_in, stats.records_out, stats.elapsed
    );

    // volume: the next record's volume, last record dropped
    let config = FilterConfig::default()
        .with_selection(Selection::parse("2")?)
        .with_offset(1);
    let mut filter = TranslateFilter::translate(config)?;
    println!("@schema {}", filter.derive_schema(&schema)?);
    for record in filter.apply(records) {
        println!("{}", record?);
    }
    println!("{:?}", filter.stats());

    Ok(())
}

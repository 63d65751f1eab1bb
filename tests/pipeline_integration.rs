//! Integration tests for the tsdelta pipeline driver.

use tsdelta::prelude::*;

fn prices() -> (Schema, Vec<Record>) {
    let schema = Schema::new(vec![
        Attribute::numeric("open"),
        Attribute::numeric("close"),
        Attribute::other("symbol"),
    ]);
    let records = vec![
        Record::from_numbers(&[10.0, 11.0, 1.0]),
        Record::from_numbers(&[11.0, 13.0, 1.0]),
        Record::from_numbers(&[13.0, 12.0, 1.0]),
        Record::from_numbers(&[12.0, 16.0, 1.0]),
    ];
    (schema, records)
}

/// Source -> delta -> collect, selection given as range text.
#[test]
fn test_delta_pipeline_collects() {
    let (schema, records) = prices();
    let config = FilterConfig::default().with_selection(Selection::parse("first-2").unwrap());
    let filter = DeltaFilter::delta(config).unwrap().with_name("price-delta");

    let mut pipeline = Pipeline::new(IterSource::new(schema, records), filter, CollectSink::new())
        .with_name("prices");
    let stats = pipeline.run().unwrap();

    assert_eq!(stats.records_in, 4);
    assert_eq!(stats.records_out, 3);

    let (_, filter, sink) = pipeline.into_parts();
    assert_eq!(filter.state(), FilterState::Closed);
    assert_eq!(filter.stats().suppressed, 1);

    let names: Vec<&str> = sink
        .schema()
        .unwrap()
        .iter()
        .map(|a| a.name())
        .collect();
    assert_eq!(names, vec!["open d-1", "close d-1", "symbol"]);
    assert_eq!(
        sink.records(),
        &[
            Record::from_numbers(&[1.0, 2.0, 1.0]),
            Record::from_numbers(&[2.0, -1.0, 1.0]),
            Record::from_numbers(&[-1.0, 4.0, 1.0]),
        ]
    );
}

/// Lead filters release their tail when the pipeline flushes at EOS.
#[test]
fn test_translate_pipeline_flushes_tail() {
    let (schema, records) = prices();
    let config = FilterConfig::default()
        .with_selection(Selection::parse("3").unwrap())
        .with_offset(1)
        .emit_missing();
    let filter = TranslateFilter::translate(config).unwrap();

    let mut pipeline = Pipeline::new(IterSource::new(schema, records), filter, CollectSink::new());
    let stats = pipeline.run().unwrap();
    assert_eq!(stats.records_out, 4);

    let last = &pipeline.sink().records()[3];
    assert_eq!(last.values()[2], Value::Missing);
    assert_eq!(last.values()[0], Value::Number(12.0));
}

/// Long streams through a NullSink.
#[test]
fn test_long_stream_to_null_sink() {
    let schema = Schema::new(vec![Attribute::numeric("t")]);
    let records = (0..10_000).map(|i| Record::from_numbers(&[f64::from(i)]));
    let config = FilterConfig::default()
        .with_selection(Selection::all())
        .with_offset(16);
    let filter = DeltaFilter::delta(config).unwrap();

    let mut pipeline = Pipeline::new(IterSource::new(schema, records), filter, NullSink::new());
    let stats = pipeline.run().unwrap();

    assert_eq!(stats.records_out, 10_000 - 16);
    assert_eq!(pipeline.sink().count(), 10_000 - 16);
    assert!(pipeline.transform().stats().peak_buffered <= 17);
}

/// A failing source aborts the run with its error.
#[test]
fn test_source_error_propagates() {
    struct Broken {
        schema: Schema,
        left: u32,
    }

    impl Source for Broken {
        fn schema(&self) -> &Schema {
            &self.schema
        }

        fn produce(&mut self) -> Result<Option<Record>> {
            if self.left == 0 {
                return Err(Error::InvalidConfiguration("source broke".to_string()));
            }
            self.left -= 1;
            Ok(Some(Record::from_numbers(&[1.0])))
        }
    }

    let source = Broken {
        schema: Schema::new(vec![Attribute::numeric("x")]),
        left: 2,
    };
    let filter = DeltaFilter::delta(FilterConfig::default().with_selection(Selection::all()))
        .unwrap();
    let mut pipeline = Pipeline::new(source, filter, CollectSink::new());

    assert!(matches!(
        pipeline.run(),
        Err(Error::InvalidConfiguration(_))
    ));
    assert_eq!(pipeline.sink().records().len(), 1);
    assert!(!pipeline.sink().is_finished());
}

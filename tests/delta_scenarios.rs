//! Integration tests for the time-series delta and translate filters.

use tsdelta::prelude::*;

fn x_schema() -> Schema {
    Schema::new(vec![Attribute::numeric("x")])
}

fn records(values: &[Option<f64>]) -> Vec<Record> {
    values
        .iter()
        .map(|&v| Record::new([Value::from(v)]))
        .collect()
}

fn numbers(values: &[f64]) -> Vec<Record> {
    values.iter().map(|&v| Record::from_numbers(&[v])).collect()
}

fn column(records: &[Record], index: usize) -> Vec<Value> {
    records.iter().map(|r| r.values()[index]).collect()
}

fn delta(offset: i64, boundary: BoundaryPolicy) -> DeltaFilter {
    let config = FilterConfig::default()
        .with_selection(Selection::all())
        .with_offset(offset)
        .with_boundary(boundary);
    DeltaFilter::delta(config).unwrap()
}

fn run_delta(offset: i64, boundary: BoundaryPolicy, input: Vec<Record>) -> Vec<Record> {
    let mut filter = delta(offset, boundary);
    filter.derive_schema(&x_schema()).unwrap();
    filter.apply(input).collect::<Result<_>>().unwrap()
}

/// A deterministic pseudo-random stream with some missing values.
fn noisy_stream(len: usize, seed: u64) -> Vec<Record> {
    let mut state = seed;
    (0..len)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let x = if state >> 60 == 0 {
                Value::Missing
            } else {
                Value::Number((state >> 40) as f64 / 1000.0)
            };
            Record::with_weight([x, Value::Number(i as f64)], 1.0 + (i % 3) as f64)
        })
        .collect()
}

fn two_column_schema() -> Schema {
    Schema::new(vec![Attribute::numeric("x"), Attribute::numeric("seq")])
}

fn x_only(offset: i64, boundary: BoundaryPolicy) -> DeltaFilter {
    let config = FilterConfig::default()
        .with_selection(Selection::indices([0]))
        .with_offset(offset)
        .with_boundary(boundary);
    let mut filter = DeltaFilter::delta(config).unwrap();
    filter.derive_schema(&two_column_schema()).unwrap();
    filter
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_lag_one_drop_incomplete() {
    let out = run_delta(-1, BoundaryPolicy::DropIncomplete, numbers(&[10.0, 12.0, 15.0, 11.0]));
    assert_eq!(out, numbers(&[2.0, 3.0, -4.0]));
}

#[test]
fn test_lag_one_emit_with_missing() {
    let out = run_delta(-1, BoundaryPolicy::EmitWithMissing, numbers(&[10.0, 12.0, 15.0, 11.0]));
    assert_eq!(out, records(&[None, Some(2.0), Some(3.0), Some(-4.0)]));
}

#[test]
fn test_lead_two_drop_incomplete() {
    let out = run_delta(2, BoundaryPolicy::DropIncomplete, numbers(&[5.0, 8.0, 8.0, 9.0, 20.0]));
    assert_eq!(out, numbers(&[3.0, 1.0, 12.0]));
}

#[test]
fn test_lead_two_emit_with_missing() {
    let out = run_delta(2, BoundaryPolicy::EmitWithMissing, numbers(&[5.0, 8.0, 8.0, 9.0, 20.0]));
    assert_eq!(out, records(&[Some(3.0), Some(1.0), Some(12.0), None, None]));
}

#[test]
fn test_missing_value_in_source() {
    let out = run_delta(
        -1,
        BoundaryPolicy::EmitWithMissing,
        records(&[Some(10.0), None, Some(15.0)]),
    );
    assert_eq!(column(&out, 0), vec![Value::Missing; 3]);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_order_preserved() {
    for offset in [-5, -2, -1, 1, 2, 5] {
        for boundary in [BoundaryPolicy::DropIncomplete, BoundaryPolicy::EmitWithMissing] {
            let mut filter = x_only(offset, boundary);
            let out: Vec<Record> = filter
                .apply(noisy_stream(200, 7))
                .collect::<Result<_>>()
                .unwrap();
            let seqs: Vec<f64> = out.iter().filter_map(|r| r.values()[1].as_number()).collect();
            assert_eq!(seqs.len(), out.len());
            assert!(seqs.windows(2).all(|w| w[0] < w[1]), "offset {offset}");
        }
    }
}

#[test]
fn test_memory_bound() {
    for offset in [-7i64, -1, 1, 7] {
        let mut filter = x_only(offset, BoundaryPolicy::EmitWithMissing);
        for record in noisy_stream(5_000, 3) {
            filter.push(record).unwrap();
            assert!(filter.stats().buffered <= offset.unsigned_abs() as usize);
        }
        filter.close().unwrap();
        assert!(filter.stats().peak_buffered <= offset.unsigned_abs() as usize + 1);
    }
}

#[test]
fn test_pass_through_and_weight() {
    let input = noisy_stream(100, 11);
    let mut filter = x_only(3, BoundaryPolicy::EmitWithMissing);
    let out: Vec<Record> = filter.apply(input.clone()).collect::<Result<_>>().unwrap();

    assert_eq!(out.len(), input.len());
    for (got, original) in out.iter().zip(&input) {
        assert_eq!(got.values()[1], original.values()[1]);
        assert_eq!(got.weight(), original.weight());
    }
}

#[test]
fn test_delta_exact() {
    for offset in [-3i64, 4] {
        let input = noisy_stream(300, 5);
        let mut filter = x_only(offset, BoundaryPolicy::EmitWithMissing);
        let out: Vec<Record> = filter.apply(input.clone()).collect::<Result<_>>().unwrap();

        for (i, got) in out.iter().enumerate() {
            let partner = i as i64 + offset;
            let expected = if partner < 0 || partner >= input.len() as i64 {
                Value::Missing
            } else {
                match (
                    input[i].values()[0],
                    input[partner as usize].values()[0],
                ) {
                    (Value::Number(c), Value::Number(p)) => Value::Number(c - p),
                    _ => Value::Missing,
                }
            };
            assert_eq!(got.values()[0], expected, "position {i}, offset {offset}");
        }
    }
}

#[test]
fn test_boundary_counts() {
    let n = 50usize;
    for offset in [-4i64, -1, 1, 4] {
        let k = offset.unsigned_abs() as usize;
        let input = numbers(&(0..n).map(|i| i as f64).collect::<Vec<_>>());

        let dropped = run_delta(offset, BoundaryPolicy::DropIncomplete, input.clone());
        assert_eq!(dropped.len(), n - k);

        let emitted = run_delta(offset, BoundaryPolicy::EmitWithMissing, input);
        assert_eq!(emitted.len(), n);
        let missing: Vec<usize> = emitted
            .iter()
            .enumerate()
            .filter(|(_, r)| r.values()[0].is_missing())
            .map(|(i, _)| i)
            .collect();
        let expected: Vec<usize> = if offset < 0 {
            (0..k).collect()
        } else {
            (n - k..n).collect()
        };
        assert_eq!(missing, expected, "offset {offset}");
        assert!(
            emitted
                .iter()
                .filter(|r| !r.values()[0].is_missing())
                .all(|r| r.values()[0] == Value::Number(-(offset as f64)))
        );
    }
}

#[test]
fn test_stream_shorter_than_offset() {
    let out = run_delta(-5, BoundaryPolicy::DropIncomplete, numbers(&[1.0, 2.0, 3.0]));
    assert!(out.is_empty());

    let out = run_delta(5, BoundaryPolicy::EmitWithMissing, numbers(&[1.0, 2.0, 3.0]));
    assert_eq!(column(&out, 0), vec![Value::Missing; 3]);
}

#[test]
fn test_schema_stable() {
    let mut filter = x_only(-2, BoundaryPolicy::DropIncomplete);
    let first = filter.output_schema().cloned().unwrap();
    let _ = filter.apply(noisy_stream(40, 1)).count();
    assert_eq!(filter.output_schema(), Some(&first));
    assert_eq!(first.attribute(0).unwrap().name(), "x d-2");
    assert_eq!(first.attribute(1).unwrap().name(), "seq");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_zero_offset_rejected() {
    let config = FilterConfig::default().with_offset(0);
    assert!(matches!(
        DeltaFilter::delta(config),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        TranslateFilter::translate(FilterConfig::default().with_offset(0)),
        Err(Error::InvalidConfiguration(_))
    ));
}

#[test]
fn test_non_numeric_selection_rejected() {
    let schema = Schema::new(vec![Attribute::numeric("x"), Attribute::other("label")]);
    let config = FilterConfig::default().with_selection(Selection::parse("2").unwrap());
    let mut filter = DeltaFilter::delta(config).unwrap();
    assert!(matches!(
        filter.derive_schema(&schema),
        Err(Error::UnsupportedAttributeType { index: 1, .. })
    ));
}

#[test]
fn test_inverted_selection_skips_non_numeric() {
    let schema = Schema::new(vec![Attribute::other("label"), Attribute::numeric("x")]);
    let config = FilterConfig::default().with_selection(Selection::indices([0]).inverted());
    let mut filter = DeltaFilter::delta(config).unwrap();
    let derived = filter.derive_schema(&schema).unwrap();
    assert_eq!(derived.attribute(0).unwrap().name(), "label");
    assert_eq!(derived.attribute(1).unwrap().name(), "x d-1");
}

#[test]
fn test_selection_outside_schema() {
    let config = FilterConfig::default().with_selection(Selection::parse("1-3").unwrap());
    let mut filter = DeltaFilter::delta(config).unwrap();
    assert!(matches!(
        filter.derive_schema(&x_schema()),
        Err(Error::InvalidSelection(_))
    ));
}

#[test]
fn test_lifecycle_violations() {
    let mut filter = delta(-1, BoundaryPolicy::DropIncomplete);
    let err = filter.push(Record::from_numbers(&[1.0])).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidState {
            operation: "push",
            state: "unopened"
        }
    );
    assert!(matches!(filter.close(), Err(Error::InvalidState { .. })));

    filter.derive_schema(&x_schema()).unwrap();
    filter.close().unwrap();
    assert!(matches!(
        filter.merge_aligned(Aligned::absent(0, Record::from_numbers(&[1.0]))),
        Err(Error::InvalidState { .. })
    ));
}

// ============================================================================
// Translate
// ============================================================================

#[test]
fn test_translate_lag() {
    let config = FilterConfig::default()
        .with_selection(Selection::all())
        .with_offset(-2)
        .emit_missing();
    let mut filter = TranslateFilter::translate(config).unwrap();
    let schema = filter.derive_schema(&x_schema()).unwrap();
    assert_eq!(schema.attribute(0).unwrap().name(), "x t-2");

    let out: Vec<Record> = filter
        .apply(numbers(&[1.0, 2.0, 3.0, 4.0]))
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(out, records(&[None, None, Some(1.0), Some(2.0)]));
}

/// A merge policy defined outside the crate reuses the same alignment.
#[test]
fn test_custom_merge_policy() {
    struct Ratio;

    impl MergePolicy for Ratio {
        fn merge(&self, current: Value, partner: Value) -> Value {
            match (current, partner) {
                (Value::Number(c), Value::Number(p)) if p != 0.0 => Value::Number(c / p),
                _ => Value::Missing,
            }
        }

        fn tag(&self) -> char {
            'r'
        }

        fn name(&self) -> &'static str {
            "ratio"
        }
    }

    let config = FilterConfig::default().with_selection(Selection::all());
    let mut filter = TimeSeriesFilter::new(Ratio, config).unwrap();
    filter.derive_schema(&x_schema()).unwrap();
    let out: Vec<Record> = filter
        .apply(numbers(&[2.0, 4.0, 2.0]))
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(out, numbers(&[2.0, 0.5]));
}

// ============================================================================
// Element surface
// ============================================================================

/// With the prelude in scope, `transform` takes a record, as the trait says.
#[test]
fn test_prelude_transform_takes_record() {
    let mut filter = delta(-1, BoundaryPolicy::EmitWithMissing);
    filter.negotiate(&x_schema()).unwrap();

    let first = filter.transform(Record::from_numbers(&[10.0])).unwrap();
    assert_eq!(first.into_vec(), records(&[None]));
    let second = filter.transform(Record::from_numbers(&[12.0])).unwrap();
    assert_eq!(second.into_vec(), numbers(&[2.0]));
    assert_eq!(filter.stats().received, 2);
}

/// Externally aligned pairs count as received and must match the schema.
#[test]
fn test_merge_aligned_accounting() {
    let mut filter = x_only(-1, BoundaryPolicy::DropIncomplete);
    let pair = Aligned::paired(
        1,
        Record::from_numbers(&[4.0, 1.0]),
        Record::from_numbers(&[1.0, 0.0]),
    );
    assert_eq!(
        filter.merge_aligned(pair).unwrap(),
        Some(Record::from_numbers(&[3.0, 1.0]))
    );
    assert_eq!(filter.stats().received, 1);
    assert_eq!(filter.stats().emitted, 1);

    let short_partner = Aligned::paired(
        2,
        Record::from_numbers(&[4.0, 2.0]),
        Record::from_numbers(&[1.0]),
    );
    assert!(matches!(
        filter.merge_aligned(short_partner),
        Err(Error::SchemaMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

/// `first-last` over a schema with no attributes selects nothing.
#[test]
fn test_select_all_on_empty_schema() {
    let mut filter = DeltaFilter::delta(FilterConfig::default().with_selection(Selection::all()))
        .unwrap();
    let derived = filter.derive_schema(&Schema::default()).unwrap();
    assert!(derived.is_empty());

    let out: Vec<Record> = filter
        .apply(vec![Record::new(Vec::<Value>::new()), Record::new(Vec::<Value>::new())])
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(out.len(), 1);
}

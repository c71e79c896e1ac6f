// This module checks the guarantees made about errors at the public
// surfaces of the crate: which predicate each error answers to, and how the
// error renders. Errors raised deep inside formatting keep the context
// saying which label was being formatted.

use tdaxis::{
    axis::DummyAxis,
    config::ConverterKind,
    converter::{
        AxisConverter, ConciseFormatterArgs, ConciseTimedeltaConverter,
    },
    fmt,
    formatter::{ConciseLevels, TimedeltaFormatter},
    locator::FixedTimedeltaLocator,
    unit::BaseUnit,
};

#[test]
fn template_errors_are_format_errors() {
    let err = fmt::format_num("%days", 1.0).unwrap_err();
    assert!(err.is_format());
    assert!(!err.is_invalid_parameter());
    insta::assert_snapshot!(
        err,
        @"found unrecognized directive `%days` (supported directives are %d, %day, %H, %M, %S, %h, %m, %s, %ms, %us and %%)",
    );

    // The braced form ends the name explicitly.
    assert_eq!(fmt::format_num("%{d}days", 1.0).unwrap(), "1days");
}

#[test]
fn configuration_errors_are_invalid_parameters() {
    let err = FixedTimedeltaLocator::from_name("weeks", 1.0).unwrap_err();
    assert!(err.is_invalid_parameter());
    assert!(!err.is_format());

    let err = TimedeltaFormatter::new("%H")
        .with_offset(None, Some("%d %day".into()))
        .unwrap_err();
    assert!(err.is_invalid_parameter());

    let err = ConciseLevels::default().formats(["%H"; 4]).unwrap_err();
    assert!(err.is_invalid_parameter());
    insta::assert_snapshot!(
        err,
        @"formats must have exactly 5 entries (one per base unit), but 4 were given",
    );

    let err = "Concise".parse::<ConverterKind>().unwrap_err();
    assert!(err.is_invalid_parameter());
}

#[test]
fn errors_surface_through_converters() {
    let levels = ConciseLevels::default().format(BaseUnit::Hour, "%x");
    let args = ConciseFormatterArgs::default().levels(levels);
    let converter = ConciseTimedeltaConverter::new().formatter_args(args);
    let mut info = converter.axis_info();

    let mut axis = DummyAxis::new();
    axis.set_view_interval(2.0 / 24.0, 20.0 / 24.0);
    let ticks = info.major_locator.borrow_mut().ticks(&axis);
    let err =
        info.major_formatter.format_ticks(&ticks, Some(&axis)).unwrap_err();
    assert!(err.is_format());
    insta::assert_snapshot!(
        err,
        @"failed to format tick label: found unrecognized directive `%x` (supported directives are %d, %day, %H, %M, %S, %h, %m, %s, %ms, %us and %%)",
    );
    // A failed call leaves no stale offset behind.
    assert_eq!(info.major_formatter.offset(), "");
}

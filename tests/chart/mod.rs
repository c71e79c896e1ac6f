// These tests drive the crate the way a host chart would: converters are
// registered through an `Integration`, looked up by the kind of value being
// plotted and then asked to set up an axis.

use std::{collections::BTreeMap, rc::Rc};

use tdaxis::{
    axis::{Axis, DummyAxis},
    codec::{ScalarTimedelta, TickUnit, Timedeltas},
    config::{ConverterKind, Settings},
    converter::{AxisConverter, AxisValue, DEFAULT_LIMITS},
    integration::{
        is_natively_supported, to_date_coordinates, DurationType,
        Integration, PlotValue, UnitRegistry,
    },
    Timedelta,
};

use crate::Result;

const NANOS_PER_HOUR: i64 = 60 * 60 * 1_000_000_000;

#[derive(Default)]
struct Chart {
    converters: BTreeMap<DurationType, Rc<dyn AxisConverter>>,
}

#[derive(Debug)]
struct Plot {
    axis: DummyAxis,
    ticks: Vec<f64>,
    labels: Vec<String>,
    offset: String,
}

impl UnitRegistry for Chart {
    fn register(&mut self, ty: DurationType, conv: Rc<dyn AxisConverter>) {
        self.converters.insert(ty, conv);
    }

    fn unregister(&mut self, ty: DurationType) {
        self.converters.remove(&ty);
    }
}

impl Chart {
    fn plot(&self, values: &Timedeltas) -> anyhow::Result<Plot> {
        let ty = match *values {
            Timedeltas::Native(_) => DurationType::Native,
            Timedeltas::Ticks { .. } => DurationType::Ticks,
            Timedeltas::Scalars(_) => DurationType::Scalar,
        };
        let Some(converter) = self.converters.get(&ty) else {
            anyhow::bail!("no converter registered for {ty:?}")
        };
        let xs = converter.convert(&AxisValue::Sequence(values)).into_vec();
        let mut info = converter.axis_info();

        let mut axis = DummyAxis::new();
        axis.update_data(&xs);
        let (lo, hi) = axis.data_interval();
        if lo <= hi {
            axis.set_view_interval(lo, hi);
        } else {
            let (lo, hi) = info.default_limits;
            axis.set_view_interval(lo, hi);
        }

        let ticks = info.major_locator.borrow_mut().ticks(&axis);
        let labels = info.major_formatter.format_ticks(&ticks, Some(&axis))?;
        let offset = info.major_formatter.offset().to_string();
        Ok(Plot { axis, ticks, labels, offset })
    }
}

fn enabled(kind: ConverterKind, settings: Settings) -> Chart {
    let _ = crate::Logger::init();
    let mut chart = Chart::default();
    Integration::new(kind).settings(settings).enable(&mut chart);
    chart
}

fn hours(counts: &[i64]) -> Timedeltas {
    Timedeltas::Native(
        counts.iter().map(|&h| Timedelta::from_hours(h)).collect(),
    )
}

#[test]
fn concise_hours() -> Result {
    let chart = enabled(ConverterKind::Concise, Settings::new());
    let plot = chart.plot(&hours(&[2, 20]))?;
    assert_eq!(plot.ticks.len(), 12);
    assert_eq!(plot.labels[..3], ["0:00", "2:00", "4:00"]);
    assert_eq!(plot.labels[11], "22:00");
    assert_eq!(plot.offset, "0 days");
    Ok(())
}

#[test]
fn every_form_plots_the_same() -> Result {
    let chart = enabled(ConverterKind::Concise, Settings::new());
    let native = chart.plot(&hours(&[2, 20]))?;

    let ticks =
        Timedeltas::Ticks { unit: TickUnit::Hour, counts: vec![2, 20] };
    let scalars = Timedeltas::from(vec![
        ScalarTimedelta::new(2 * NANOS_PER_HOUR),
        ScalarTimedelta::missing(),
        ScalarTimedelta::new(20 * NANOS_PER_HOUR),
    ]);
    for values in [ticks, scalars] {
        let plot = chart.plot(&values)?;
        assert_eq!(plot.ticks, native.ticks);
        assert_eq!(plot.labels, native.labels);
        assert_eq!(plot.offset, native.offset);
    }
    Ok(())
}

#[test]
fn auto_days() -> Result {
    let chart = enabled(ConverterKind::Default, Settings::new());
    let values = Timedeltas::from(vec![
        Timedelta::from_days(100),
        Timedelta::from_days(241),
    ]);
    let plot = chart.plot(&values)?;
    assert_eq!(plot.labels.len(), 10);
    assert_eq!(plot.labels[0], "80 days");
    assert_eq!(plot.labels[1], "100 days");
    assert_eq!(plot.labels[9], "260 days");
    assert_eq!(plot.offset, "");
    Ok(())
}

#[test]
fn settings_pick_converter() -> Result {
    let settings = Settings::new().converter(ConverterKind::Concise);
    let chart = enabled(ConverterKind::Default, settings);
    let plot = chart.plot(&hours(&[2, 20]))?;
    assert_eq!(plot.labels[1], "2:00");

    let settings = Settings::new().converter(ConverterKind::Concise);
    let chart = enabled(ConverterKind::Auto, settings);
    let plot = chart.plot(&hours(&[2, 20]))?;
    assert_eq!(plot.labels[1], "0 days, 02:00");
    Ok(())
}

#[test]
fn usetex() -> Result {
    let settings = Settings::new().usetex(true);
    let chart = enabled(ConverterKind::Concise, settings);
    let plot = chart.plot(&hours(&[2, 20]))?;
    insta::assert_snapshot!(plot.labels[1], @r"$\mathdefault{2{:}00}$");
    Ok(())
}

#[test]
fn no_data_uses_default_limits() -> Result {
    let chart = enabled(ConverterKind::Concise, Settings::new());
    let values = Timedeltas::from(vec![ScalarTimedelta::missing()]);
    let plot = chart.plot(&values)?;
    assert_eq!(plot.axis.view_interval(), DEFAULT_LIMITS);
    assert!(plot.ticks.len() >= 12);
    assert!(plot.ticks[0] <= DEFAULT_LIMITS.0);
    assert!(plot.ticks[plot.ticks.len() - 1] >= DEFAULT_LIMITS.1);
    assert_eq!(plot.labels.len(), plot.ticks.len());
    Ok(())
}

#[test]
fn disable_removes_converters() {
    let _ = crate::Logger::init();
    let mut chart = Chart::default();
    let mut integration = Integration::new(ConverterKind::Auto);
    integration.enable(&mut chart);
    assert!(chart.plot(&hours(&[1, 2])).is_ok());

    integration.disable(&mut chart);
    let err = chart.plot(&hours(&[1, 2])).unwrap_err();
    insta::assert_snapshot!(err, @"no converter registered for Native");
}

#[test]
fn native_support_and_dates() {
    let values = Timedeltas::from(vec![
        ScalarTimedelta::missing(),
        ScalarTimedelta::missing(),
    ]);
    let value = PlotValue::Durations(AxisValue::Sequence(&values));
    let mut asked = false;
    assert!(is_natively_supported(&value, || {
        asked = true;
        true
    }));
    assert!(asked);

    let values = hours(&[36]);
    let value = PlotValue::Durations(AxisValue::Sequence(&values));
    assert!(!is_natively_supported(&value, || true));

    // A host whose epoch lies one day after the Unix epoch.
    let epoch = Timedelta::from_days(1);
    let xs = to_date_coordinates(&AxisValue::Sequence(&values), epoch);
    assert_eq!(xs.into_vec(), vec![0.5]);
}

/*!
Hooks for registering duration support with a host chart.

A host chart keeps a registry mapping value types to converters. Enabling
an [`Integration`] registers one converter for every [`DurationType`], and
disabling it removes them again.

Hosts also need to answer two questions about plotted values, which this
module answers with [`is_natively_supported`] and [`to_date_coordinates`].
*/

use std::rc::Rc;

use crate::{
    codec,
    config::{ConverterKind, Settings},
    converter::{
        AutoFormatterArgs, AxisConverter, AxisValue, ConciseFormatterArgs,
        ConciseTimedeltaConverter, Coordinates, TimedeltaConverter,
    },
    Timedelta,
};

/// A kind of duration value that a host registers a converter for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum DurationType {
    /// [`Timedelta`] and `core::time::Duration`.
    Native,
    /// [`TickDuration`](crate::codec::TickDuration).
    Ticks,
    /// [`ScalarTimedelta`](crate::codec::ScalarTimedelta).
    Scalar,
}

impl DurationType {
    /// Every kind of duration value.
    pub const ALL: [DurationType; 3] =
        [DurationType::Native, DurationType::Ticks, DurationType::Scalar];
}

/// The part of a host chart that maps value types to converters.
pub trait UnitRegistry {
    /// Registers `converter` for values of type `ty`, replacing any
    /// converter already registered for it.
    fn register(&mut self, ty: DurationType, converter: Rc<dyn AxisConverter>);

    /// Removes the converter registered for values of type `ty`, if any.
    fn unregister(&mut self, ty: DurationType);
}

/// Registers duration converters with a host chart.
///
/// # Example
///
/// ```
/// use std::{collections::BTreeMap, rc::Rc};
///
/// use tdaxis::{
///     config::ConverterKind,
///     converter::AxisConverter,
///     integration::{DurationType, Integration, UnitRegistry},
/// };
///
/// #[derive(Default)]
/// struct Registry(BTreeMap<DurationType, Rc<dyn AxisConverter>>);
///
/// impl UnitRegistry for Registry {
///     fn register(&mut self, ty: DurationType, conv: Rc<dyn AxisConverter>) {
///         self.0.insert(ty, conv);
///     }
///
///     fn unregister(&mut self, ty: DurationType) {
///         self.0.remove(&ty);
///     }
/// }
///
/// let mut registry = Registry::default();
/// let mut integration = Integration::new(ConverterKind::Concise);
/// integration.enable(&mut registry);
/// assert_eq!(registry.0.len(), 3);
/// integration.disable(&mut registry);
/// assert!(registry.0.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Integration {
    kind: ConverterKind,
    settings: Settings,
    enabled: bool,
}

impl Integration {
    /// Creates an integration registering the given kind of converter.
    ///
    /// `ConverterKind::Default` is resolved through the settings, which
    /// default to [`Settings::new`].
    pub fn new(kind: ConverterKind) -> Integration {
        Integration { kind, settings: Settings::new(), enabled: false }
    }

    /// Sets the settings used to resolve the converter kind and to
    /// configure the converter.
    pub fn settings(self, settings: Settings) -> Integration {
        Integration { settings, ..self }
    }

    /// Returns the kind of converter this integration registers.
    ///
    /// This is never `ConverterKind::Default`.
    pub fn converter_kind(&self) -> ConverterKind {
        self.kind.resolve(&self.settings)
    }

    /// Returns true when converters are currently registered.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Creates the converter this integration registers.
    pub fn converter(&self) -> Rc<dyn AxisConverter> {
        let usetex = self.settings.get_usetex();
        match self.converter_kind() {
            ConverterKind::Concise => {
                let args = ConciseFormatterArgs::default().usetex(usetex);
                Rc::new(ConciseTimedeltaConverter::new().formatter_args(args))
            }
            ConverterKind::Auto | ConverterKind::Default => {
                let args = AutoFormatterArgs::default().usetex(usetex);
                Rc::new(TimedeltaConverter::new().formatter_args(args))
            }
        }
    }

    /// Registers one converter for every kind of duration value.
    ///
    /// Enabling an integration that is already enabled registers a fresh
    /// converter.
    pub fn enable(&mut self, registry: &mut dyn UnitRegistry) {
        let converter = self.converter();
        debug!(
            "registering {} converter for durations",
            self.converter_kind(),
        );
        for ty in DurationType::ALL {
            registry.register(ty, Rc::clone(&converter));
        }
        self.enabled = true;
    }

    /// Removes the converters registered by [`Integration::enable`].
    ///
    /// This does nothing when the integration isn't enabled.
    pub fn disable(&mut self, registry: &mut dyn UnitRegistry) {
        if !self.enabled {
            return;
        }
        debug!("unregistering converters for durations");
        for ty in DurationType::ALL {
            registry.unregister(ty);
        }
        self.enabled = false;
    }
}

/// A value a host chart is about to plot.
#[derive(Clone, Copy, Debug)]
pub enum PlotValue<'a> {
    /// Durations, in any of their forms.
    Durations(AxisValue<'a>),
    /// Anything else. The host knows what it is.
    Other,
}

/// Reports whether the host can plot a value without a converter.
///
/// Durations are never natively supported, so that the host routes them to
/// the registered converter. The one exception is a sequence of scalars in
/// which every element is missing: with nothing left after dropping the
/// missing elements there is nothing to convert, and the question goes to
/// `host` like it does for every value that isn't a duration.
///
/// # Example
///
/// ```
/// use tdaxis::{
///     codec::{ScalarTimedelta, Timedeltas},
///     converter::AxisValue,
///     integration::{is_natively_supported, PlotValue},
///     Timedelta,
/// };
///
/// let td = AxisValue::Scalar(Timedelta::from_hours(1).into());
/// assert!(!is_natively_supported(&PlotValue::Durations(td), || true));
/// assert!(is_natively_supported(&PlotValue::Other, || true));
///
/// let missing = Timedeltas::from(vec![ScalarTimedelta::missing()]);
/// let value = PlotValue::Durations(AxisValue::Sequence(&missing));
/// assert!(is_natively_supported(&value, || true));
/// ```
pub fn is_natively_supported(
    value: &PlotValue<'_>,
    host: impl FnOnce() -> bool,
) -> bool {
    let value = match *value {
        PlotValue::Other => return host(),
        PlotValue::Durations(value) => value,
    };
    let all_missing = |tds: &codec::Timedeltas| match *tds {
        codec::Timedeltas::Scalars(ref scalars) => {
            !scalars.is_empty() && scalars.iter().all(|s| s.is_missing())
        }
        _ => false,
    };
    let nothing_left = match value {
        AxisValue::Scalar(_) => false,
        AxisValue::Sequence(tds) => all_missing(tds),
        AxisValue::Wrapped(wrapped) => all_missing(&wrapped.unwrap_values()),
    };
    if nothing_left {
        host()
    } else {
        false
    }
}

/// Converts instants, given as durations since the Unix epoch, to date
/// coordinates of a host chart whose epoch is `epoch` after the Unix
/// epoch.
///
/// Date coordinates are days since the host's epoch. "Not a time" values
/// and missing scalars become NaN.
///
/// # Example
///
/// ```
/// use tdaxis::{
///     codec::{ScalarTimedelta, Timedeltas},
///     converter::{AxisValue, Coordinates},
///     integration::to_date_coordinates,
///     Timedelta,
/// };
///
/// let noon = ScalarTimedelta::new(12 * 60 * 60 * 1_000_000_000);
/// let values = Timedeltas::from(vec![noon, ScalarTimedelta::missing()]);
/// let value = AxisValue::Sequence(&values);
/// let xs = to_date_coordinates(&value, Timedelta::ZERO).into_vec();
/// assert_eq!(xs[0], 0.5);
/// assert!(xs[1].is_nan());
/// ```
pub fn to_date_coordinates(
    value: &AxisValue<'_>,
    epoch: Timedelta,
) -> Coordinates {
    let since_epoch = |td: Timedelta| (td - epoch).as_days_f64();
    let convert = |tds: &codec::Timedeltas| {
        tds.to_timedeltas().into_iter().map(since_epoch).collect()
    };
    match *value {
        AxisValue::Scalar(td) => {
            Coordinates::Scalar(since_epoch(td.to_timedelta()))
        }
        AxisValue::Sequence(tds) => Coordinates::Sequence(convert(tds)),
        AxisValue::Wrapped(wrapped) => {
            Coordinates::Sequence(convert(&wrapped.unwrap_values()))
        }
    }
}

// Some feature combinations result in some of these macros never being used.
// Which is fine. Just squash the warnings.
#![allow(unused_macros)]

macro_rules! log {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            $($tt)*
        }
    }
}

macro_rules! error {
    ($($tt:tt)*) => { log!(log::error!($($tt)*)) }
}

macro_rules! warn {
    ($($tt:tt)*) => { log!(log::warn!($($tt)*)) }
}

macro_rules! info {
    ($($tt:tt)*) => { log!(log::info!($($tt)*)) }
}

macro_rules! debug {
    ($($tt:tt)*) => { log!(log::debug!($($tt)*)) }
}

macro_rules! trace {
    ($($tt:tt)*) => { log!(log::trace!($($tt)*)) }
}

/// Renders a coordinate in days alongside the duration it stands for.
///
/// This is only used in log messages, where a bare float like
/// `100.15277777777777` is hard to make sense of.
#[cfg(feature = "logging")]
pub(crate) struct Days(pub(crate) f64);

#[cfg(feature = "logging")]
impl core::fmt::Display for Days {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let td = crate::Timedelta::from_days_f64(self.0);
        write!(f, "{} ({td})", self.0)
    }
}

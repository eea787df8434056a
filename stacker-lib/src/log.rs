// Logging facade for stacker-lib.
// Backends are picked by cargo feature:
// - defmt for embedded targets
// - the standard log crate for console/std targets
// With neither feature the macros expand to nothing.

#[cfg(feature = "defmt-log")]
pub use defmt::{debug, error, info, trace};

#[cfg(all(feature = "std-log", not(feature = "defmt-log")))]
pub use ::log::{debug, error, info, trace};

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
macro_rules! trace {
    ($($args:tt)*) => {};
}

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
macro_rules! debug {
    ($($args:tt)*) => {};
}

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
macro_rules! info {
    ($($args:tt)*) => {};
}

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
macro_rules! error {
    ($($args:tt)*) => {};
}

// warn is left out on purpose: a `use` of it clashes with the built-in attribute.
#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
#[allow(unused_imports)]
pub(crate) use {debug, error, info, trace};

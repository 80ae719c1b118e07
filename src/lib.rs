/*!
Tenor is a library for signed durations made up of calendar and clock units.

A [`Duration`] is an immutable list of unit amounts (years, months, days,
hours and so on) together with one sign. Unlike a fixed number of seconds,
a duration like `P1M` has no exact length on its own: how long a month is
depends on where on a timeline it is applied. This crate keeps the units
apart, provides sign-consistent arithmetic over them and converts durations
to and from their ISO 8601 textual forms.

# Overview

* [`Duration`] is the duration value type. It is parameterized by a unit
[family](crate::unit::Family) that restricts which units it may contain.
* [`unit::Unit`] enumerates the supported units, ordered from the longest
(millennia) to the shortest (nanoseconds).
* [`round`] contains normalizers, including the lossy "approximate"
normalizers that coarsen a duration for human readable output.
* [`timeline`] connects durations to an external time line. It provides
[`LengthComparator`](crate::timeline::LengthComparator) for ordering
durations and [`Metric`](crate::timeline::Metric) for computing durations
between two time points.
* [`fmt`] contains the ISO 8601 period parser and printer, as well as a
numeric custom pattern format.

# Example

```
use tenor::{Duration, unit::Unit};

let d: Duration = "-P7Y4M3D".parse()?;
assert!(d.is_negative());
assert_eq!(d.get_partial_amount(Unit::Month), 4);
assert_eq!(d.to_string(), "-P7Y4M3D");

let d: Duration = Duration::of(5, Unit::Month)?.plus(-6, Unit::Month)?;
assert_eq!(d.to_string(), "-P1M");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* **std** (enabled by default) - When enabled, [`Error`] implements
`std::error::Error`.
* **logging** - When enabled, the `log` crate is used to emit messages about
merge escalation and normalization decisions. This is mostly useful for
debugging.
* **serde** - When enabled, [`Duration`] implements `serde::Serialize` and
`serde::Deserialize` via its canonical string form.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

// Errors and the item list of a duration both live on the heap.
extern crate alloc;

pub use crate::{duration::Duration, error::Error};

#[macro_use]
mod logging;

pub mod duration;
mod error;
pub mod fmt;
pub mod round;
pub mod timeline;
pub mod unit;
mod util;

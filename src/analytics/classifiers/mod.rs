//! Event log classifiers.
//!
//! Each classifier scans the flat event log for one kind of event and
//! either reports metrics (`status: "ok"`) or a `needs_*_events` sentinel
//! when nothing of that kind was logged. The sentinel variants carry no
//! metrics at all; their metric slots serialize as `null`.

pub mod coverage;
pub mod economy;
pub mod gift;
pub mod rescue;

pub use coverage::{build_data_coverage, DataCoverage};
pub use economy::{compute_econ_coordination, EconCoordination};
pub use gift::{compute_gift_efficiency, GiftEfficiency, GiftMetrics};
pub use rescue::{compute_rescue_index, RescueIndex};

use serde::{Serialize, Serializer};

/// Placeholder for a metric that cannot be computed from the log yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Withheld;

impl Serialize for Withheld {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_none()
    }
}

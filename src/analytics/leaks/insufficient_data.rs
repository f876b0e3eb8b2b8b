use super::{leak_priority, DecisionSignals, Leak, LeakCheck};

/// Bad results with no process data to explain them.
pub struct InsufficientDataCheck;

impl LeakCheck for InsufficientDataCheck {
    fn detect(&self, signals: &DecisionSignals) -> Option<Leak> {
        if signals.has_decision_events() || signals.low_results == 0 {
            return None;
        }
        Some(Leak {
            leak: "Insufficient process data",
            why_it_matters: "Outcome-only data can hide correct decisions in bad variance spots.",
            do_instead: "Capture roll, slam, gift, and pivot tags each stage.",
        })
    }

    fn priority(&self) -> u32 {
        leak_priority::INSUFFICIENT_DATA
    }
}

use super::{leak_priority, DecisionSignals, Leak, LeakCheck};

pub struct MissedBailoutCheck;

impl LeakCheck for MissedBailoutCheck {
    fn detect(&self, signals: &DecisionSignals) -> Option<Leak> {
        (signals.missed_gifts > 0).then_some(Leak {
            leak: "Missed bailout gifting windows",
            why_it_matters: "Skipping gifts when partner is bleeding usually compounds HP losses.",
            do_instead: "Pre-commit bailout trigger: send item/unit when partner <40 HP and your board is stable.",
        })
    }

    fn priority(&self) -> u32 {
        leak_priority::MISSED_BAILOUT
    }
}

use super::{leak_priority, DecisionSignals, Leak, LeakCheck};

/// No event type records augment intent yet, so this always fires and
/// keeps the leak list non-empty.
pub struct AugmentFitCheck;

impl LeakCheck for AugmentFitCheck {
    fn detect(&self, _signals: &DecisionSignals) -> Option<Leak> {
        Some(Leak {
            leak: "No augment fit signal logged",
            why_it_matters: "Augment mismatch is a common hidden EV drain in duo lines.",
            do_instead: "Log augment intent tag each augment armory and track fit score.",
        })
    }

    fn priority(&self) -> u32 {
        leak_priority::AUGMENT_FIT
    }
}

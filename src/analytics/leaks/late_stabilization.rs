use super::{leak_priority, DecisionSignals, Leak, LeakCheck};

pub struct LateStabilizationCheck;

impl LeakCheck for LateStabilizationCheck {
    fn detect(&self, signals: &DecisionSignals) -> Option<Leak> {
        (signals.low_results > signals.top_results).then_some(Leak {
            leak: "Late board stabilization pattern",
            why_it_matters: "Bottom placements outnumber top finishes in same-team games.",
            do_instead: "Assign one stabilizer by Stage 3 and lock a roll stage before carousel.",
        })
    }

    fn priority(&self) -> u32 {
        leak_priority::LATE_STABILIZATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(3, 2, true)]
    #[case(2, 2, false)]
    #[case(0, 5, false)]
    fn fires_when_low_results_outnumber_top(
        #[case] low_results: usize,
        #[case] top_results: usize,
        #[case] fires: bool,
    ) {
        let signals = DecisionSignals {
            low_results,
            top_results,
            ..DecisionSignals::default()
        };
        assert_eq!(LateStabilizationCheck.detect(&signals).is_some(), fires);
    }
}

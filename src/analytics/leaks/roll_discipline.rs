use super::{leak_priority, DecisionSignals, Leak, LeakCheck};

/// Unplanned low-gold roll-downs or self-reported panic rolls.
pub struct RollDisciplineCheck;

impl LeakCheck for RollDisciplineCheck {
    fn detect(&self, signals: &DecisionSignals) -> Option<Leak> {
        if signals.low_gold_rolls == 0 && signals.panic_rolls == 0 {
            return None;
        }
        Some(Leak {
            leak: "Roll discipline leaks",
            why_it_matters: "Low-gold emergency rolls are frequent and often reduce cap options later.",
            do_instead: "Set explicit roll floors and only break with pre-declared emergency trigger.",
        })
    }

    fn priority(&self) -> u32 {
        leak_priority::ROLL_DISCIPLINE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0, true)]
    #[case(0, 2, true)]
    #[case(0, 0, false)]
    fn fires_on_low_gold_or_panic(
        #[case] low_gold_rolls: usize,
        #[case] panic_rolls: usize,
        #[case] fires: bool,
    ) {
        let signals = DecisionSignals {
            low_gold_rolls,
            panic_rolls,
            event_count: low_gold_rolls + panic_rolls,
            ..DecisionSignals::default()
        };
        assert_eq!(RollDisciplineCheck.detect(&signals).is_some(), fires);
    }
}

//! Tabbed step-through widget state.

/// Index-bounded step state for one stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stepper {
    total: usize,
    current: usize,
}

/// What the widget should display for the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepperView {
    pub current: usize,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    /// e.g. `"2 / 5"`.
    pub indicator: String,
}

impl Stepper {
    pub fn new(total: usize) -> Self {
        Self { total, current: 0 }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Moves to `index`, clamped into `[0, total - 1]`. Returns the new step.
    pub fn go_to(&mut self, index: isize) -> usize {
        let last = self.total.saturating_sub(1);
        self.current = usize::try_from(index).map_or(0, |index| index.min(last));
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1).min(self.total.saturating_sub(1));
        self.current
    }

    pub fn prev(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    pub fn is_active(&self, index: usize) -> bool {
        index == self.current
    }

    pub fn view(&self) -> StepperView {
        StepperView {
            current: self.current,
            prev_disabled: self.current == 0,
            next_disabled: self.current + 1 >= self.total,
            indicator: format!("{} / {}", self.current + 1, self.total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_first_step() {
        let stepper = Stepper::new(4);
        let view = stepper.view();
        assert_eq!(view.current, 0);
        assert!(view.prev_disabled);
        assert!(!view.next_disabled);
        assert_eq!(view.indicator, "1 / 4");
    }

    #[test]
    fn test_go_to_clamps() {
        let mut stepper = Stepper::new(4);
        assert_eq!(stepper.go_to(2), 2);
        assert_eq!(stepper.go_to(10), 3);
        assert_eq!(stepper.go_to(-1), 0);
    }

    #[test]
    fn test_next_and_prev_stop_at_ends() {
        let mut stepper = Stepper::new(3);
        assert_eq!(stepper.prev(), 0);
        assert_eq!(stepper.next(), 1);
        assert_eq!(stepper.next(), 2);
        assert_eq!(stepper.next(), 2);

        let view = stepper.view();
        assert!(!view.prev_disabled);
        assert!(view.next_disabled);
        assert_eq!(view.indicator, "3 / 3");
        assert!(stepper.is_active(2));
        assert!(!stepper.is_active(1));
    }

    #[test]
    fn test_single_step_disables_both() {
        let stepper = Stepper::new(1);
        let view = stepper.view();
        assert!(view.prev_disabled);
        assert!(view.next_disabled);
    }

    #[test]
    fn test_empty_stepper_stays_at_zero() {
        let mut stepper = Stepper::new(0);
        assert_eq!(stepper.go_to(5), 0);
        assert_eq!(stepper.next(), 0);
        assert_eq!(stepper.view().indicator, "1 / 0");
    }
}

use serde::{Deserialize, Serialize};

/// Builder steps in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Template,
    Personal,
    Skills,
    Experience,
}

impl Step {
    pub const ORDER: [Step; 4] = [Step::Template, Step::Personal, Step::Skills, Step::Experience];

    fn position(self) -> usize {
        match self {
            Step::Template => 0,
            Step::Personal => 1,
            Step::Skills => 2,
            Step::Experience => 3,
        }
    }

    pub fn next(self) -> Option<Step> {
        Self::ORDER.get(self.position() + 1).copied()
    }

    pub fn previous(self) -> Option<Step> {
        self.position().checked_sub(1).map(|i| Self::ORDER[i])
    }
}

/// Tracks the active builder step. Jumps via `go_to` are unrestricted;
/// nothing checks that earlier steps were filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepNavigator {
    current: Step,
}

impl StepNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Step {
        self.current
    }

    /// Advances one step; stays put on the last step.
    pub fn next(&mut self) -> Step {
        if let Some(step) = self.current.next() {
            self.current = step;
        }
        self.current
    }

    /// Moves back one step; stays put on the first step.
    pub fn previous(&mut self) -> Step {
        if let Some(step) = self.current.previous() {
            self.current = step;
        }
        self.current
    }

    pub fn go_to(&mut self, step: Step) -> Step {
        self.current = step;
        self.current
    }
}

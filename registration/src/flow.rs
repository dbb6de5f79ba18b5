use serde::Serialize;
use std::fmt::Debug;

use crate::navigation::Page;
use crate::session::User;
use crate::util::errors::WorkflowError;
use crate::validate::ValidationError;

/// Definition of one multi-step wizard: its sections, how patches merge into
/// them and what each step requires.
///
/// Steps are numbered from 1 to `step_count()`.
pub trait Flow: Send + Sync + 'static {
    type Sections: Clone + Debug + Serialize + Send + Sync + 'static;
    type Patch: Debug + Send;

    /// Stable identifier, also used as the gateway route segment.
    const NAME: &'static str;
    /// Page that hosts the wizard.
    const PAGE: Page;
    const STEP_TITLES: &'static [&'static str];

    fn initial_sections(user: &User) -> Self::Sections;

    /// Field errors blocking `step`. An unknown step is never complete.
    fn step_errors(sections: &Self::Sections, step: u8) -> Vec<ValidationError>;

    /// Wire key of the section a patch targets.
    fn patch_section(patch: &Self::Patch) -> &'static str;

    /// Merge a patch. On error the sections are left exactly as they were.
    fn apply_patch(sections: &mut Self::Sections, patch: Self::Patch) -> Result<(), WorkflowError>;

    fn step_count() -> u8 {
        Self::STEP_TITLES.len() as u8
    }

    fn step_title(step: u8) -> Option<&'static str> {
        let index = usize::from(step).checked_sub(1)?;
        Self::STEP_TITLES.get(index).copied()
    }

    fn validate_step(sections: &Self::Sections, step: u8) -> bool {
        (1..=Self::step_count()).contains(&step) && Self::step_errors(sections, step).is_empty()
    }
}

pub(crate) fn unknown_step() -> Vec<ValidationError> {
    vec![ValidationError {
        field: "step",
        message: "no such step",
    }]
}

//! The fixed six-phase retrieval plan.
//!
//! Phases are known at build time and are not user-extensible. Extra summary
//! sections are a closed per-ordinal lookup rather than an open trait seam.

/// One discrete retrieval step scoped to a manifest and target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    /// 1-based position in the run order.
    pub ordinal: u8,
    pub name: &'static str,
    /// Manifest file stem under the manifest directory.
    pub manifest_id: &'static str,
    /// Output directory leaf under the source directory.
    pub target_leaf: &'static str,
}

/// Extra summary section selected by phase ordinal.
///
/// Phases 5 and 6 carry no extra section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseExtra {
    /// Top-level object names, capped at [`MAX_KEY_OBJECTS`].
    KeyObjects,
    /// Apex class, trigger, and flow file counts.
    AutomationCounts,
    /// LWC/Aura component folder and Visualforce page counts.
    UiComponentCounts,
    /// Named credential and remote site setting entries.
    IntegrationEndpoints,
    None,
}

pub const MAX_KEY_OBJECTS: usize = 20;

pub const PHASES: [Phase; 6] = [
    Phase {
        ordinal: 1,
        name: "Foundation",
        manifest_id: "01-foundation",
        target_leaf: "1-foundation",
    },
    Phase {
        ordinal: 2,
        name: "Automation",
        manifest_id: "02-automation",
        target_leaf: "2-automation",
    },
    Phase {
        ordinal: 3,
        name: "User Interface",
        manifest_id: "03-ui",
        target_leaf: "3-ui",
    },
    Phase {
        ordinal: 4,
        name: "Integration",
        manifest_id: "04-integration",
        target_leaf: "4-integration",
    },
    Phase {
        ordinal: 5,
        name: "Communication",
        manifest_id: "05-communication",
        target_leaf: "5-communication",
    },
    Phase {
        ordinal: 6,
        name: "Testing",
        manifest_id: "06-testing",
        target_leaf: "6-testing",
    },
];

impl Phase {
    /// Look up a phase by its 1-based ordinal.
    pub fn by_ordinal(ordinal: u8) -> Option<&'static Phase> {
        PHASES.iter().find(|phase| phase.ordinal == ordinal)
    }

    /// Return the extra summary section for this phase.
    pub fn extra(&self) -> PhaseExtra {
        match self.ordinal {
            1 => PhaseExtra::KeyObjects,
            2 => PhaseExtra::AutomationCounts,
            3 => PhaseExtra::UiComponentCounts,
            4 => PhaseExtra::IntegrationEndpoints,
            _ => PhaseExtra::None,
        }
    }
}

/// Per-phase result after the retry-once policy has run its course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    SuccessOnRetry,
    Failed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        !matches!(self, Outcome::Failed)
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;

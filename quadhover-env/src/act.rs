//! Action for [`HoverEnv`](crate::HoverEnv).
use quadhover_core::Act;

/// Per-rotor speed commands.
///
/// The environment forwards the commands to the simulator verbatim. The
/// action bounds of [`HoverEnvConfig`](crate::HoverEnvConfig) describe the
/// range an agent is expected to use; they are not enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct RotorAct(Vec<f64>);

impl RotorAct {
    /// Constructs an action from rotor commands.
    pub fn new(commands: Vec<f64>) -> Self {
        Self(commands)
    }

    /// Returns the rotor commands.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Act for RotorAct {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<f64>> for RotorAct {
    fn from(commands: Vec<f64>) -> Self {
        Self(commands)
    }
}

impl From<&[f64]> for RotorAct {
    fn from(commands: &[f64]) -> Self {
        Self(commands.to_vec())
    }
}

impl From<[f64; 4]> for RotorAct {
    fn from(commands: [f64; 4]) -> Self {
        Self(commands.to_vec())
    }
}

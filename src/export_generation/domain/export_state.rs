use std::fmt;

/// Stages an export request moves through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportStage {
    Idle,
    Validating,
    Searching,
    FetchingOfficers,
    Writing,
    Done,
}

impl ExportStage {
    /// The only stage that may follow this one, `None` once done
    pub fn next(self) -> Option<ExportStage> {
        match self {
            ExportStage::Idle => Some(ExportStage::Validating),
            ExportStage::Validating => Some(ExportStage::Searching),
            ExportStage::Searching => Some(ExportStage::FetchingOfficers),
            ExportStage::FetchingOfficers => Some(ExportStage::Writing),
            ExportStage::Writing => Some(ExportStage::Done),
            ExportStage::Done => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExportStage::Idle => "idle",
            ExportStage::Validating => "validating",
            ExportStage::Searching => "searching",
            ExportStage::FetchingOfficers => "fetching_officers",
            ExportStage::Writing => "writing",
            ExportStage::Done => "done",
        }
    }
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current state of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportState {
    Active(ExportStage),
    /// Terminal: the request was aborted while in `stage`
    Failed { stage: ExportStage, reason: String },
}

/// ExportRun threads the export state machine through one request
///
/// Transitions are strictly linear (`Idle → Validating → Searching →
/// FetchingOfficers → Writing → Done`). `Failed` can be entered from any
/// non-terminal state and nothing leaves it; there is no resuming.
#[derive(Debug, Clone)]
pub struct ExportRun {
    state: ExportState,
    history: Vec<ExportStage>,
}

impl ExportRun {
    pub fn new() -> Self {
        Self {
            state: ExportState::Active(ExportStage::Idle),
            history: vec![ExportStage::Idle],
        }
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    /// Stages entered so far, oldest first
    pub fn history(&self) -> &[ExportStage] {
        &self.history
    }

    pub fn is_done(&self) -> bool {
        self.state == ExportState::Active(ExportStage::Done)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, ExportState::Failed { .. })
    }

    /// Moves to `to`, which must be the direct successor of the current stage
    pub fn advance(&mut self, to: ExportStage) -> crate::shared::Result<()> {
        let current = match &self.state {
            ExportState::Active(stage) => *stage,
            ExportState::Failed { stage, .. } => {
                anyhow::bail!(
                    "Cannot move to '{}': export already failed while {}",
                    to,
                    stage
                );
            }
        };

        if current.next() != Some(to) {
            anyhow::bail!("Invalid export transition: {} -> {}", current, to);
        }

        tracing::debug!(from = %current, to = %to, "Export stage transition");
        self.state = ExportState::Active(to);
        self.history.push(to);
        Ok(())
    }

    /// Marks the run failed in its current stage
    ///
    /// Has no effect on a run that is already done or failed.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if let ExportState::Active(stage) = self.state {
            if stage != ExportStage::Done {
                self.state = ExportState::Failed {
                    stage,
                    reason: reason.into(),
                };
            }
        }
    }
}

impl Default for ExportRun {
    fn default() -> Self {
        Self::new()
    }
}

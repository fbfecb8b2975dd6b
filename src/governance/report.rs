//! Per-item outcomes and batch reports for the two pipelines.
//!
//! Failures inside a batch are contained per item; these types surface them
//! to callers so partial failure is detectable without parsing logs.

/// Result of one campaign-creation attempt.
#[derive(Debug, Clone)]
pub enum CreationOutcome {
    Created {
        name: String,
        /// Remote campaign id when the creation response could be parsed.
        campaign_id: Option<String>,
    },
    Failed {
        name: String,
        status: Option<u16>,
        reason: String,
    },
}

impl CreationOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Created { name, .. } | Self::Failed { name, .. } => name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Aggregated result of one creation run.
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    pub outcomes: Vec<CreationOutcome>,
    /// False when role discovery was truncated by a failed page fetch.
    pub fetch_complete: bool,
}

impl CreationReport {
    pub fn created(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.created()
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} campaigns created, {} failed",
            self.created(),
            self.failed()
        );
        if !self.fetch_complete {
            summary.push_str(" (role discovery truncated)");
        }
        summary
    }
}

/// Terminal result of driving one campaign toward the active state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The activation request returned 200; the campaign was already active
    /// and is not polled further.
    AlreadyActive,
    /// Polling observed ACTIVE.
    Activated { polls: u32 },
    /// The activation request was rejected; the campaign was abandoned.
    Failed { status: u16 },
    /// The poll budget ran out before ACTIVE was observed.
    TimedOut { last_status: String },
    /// Activation or polling errored in a way that leaves the remote state
    /// unknown.
    Indeterminate { reason: String },
}

impl ActivationOutcome {
    /// Whether the campaign is known to be active.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::AlreadyActive | Self::Activated { .. })
    }
}

/// Per-campaign activation record.
#[derive(Debug, Clone)]
pub struct ActivationRecord {
    pub campaign_id: String,
    pub name: String,
    pub outcome: ActivationOutcome,
}

/// Aggregated result of one activation run.
#[derive(Debug, Clone, Default)]
pub struct ActivationReport {
    pub records: Vec<ActivationRecord>,
}

impl ActivationReport {
    pub fn active(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome.is_active())
            .count()
    }

    pub fn unresolved(&self) -> usize {
        self.records.len() - self.active()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} campaigns active, {} unresolved",
            self.active(),
            self.unresolved()
        )
    }
}

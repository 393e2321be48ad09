//! # Analysis Session
//!
//! Drives one BOM page: select a file, start an analysis, let the deferred
//! lookup fire after a fixed delay, then export the report.
//!
//! Time is passed in by the caller (`start(now)` / `poll(now)`), so the
//! session needs no threads or timers and tests control the clock.
//!
//! ```text
//! Idle ──start──▶ Analyzing ──poll (delay elapsed)──▶ Complete
//!   ▲                │                                   │
//!   └─────cancel─────┘◀──────────select_file / clear──────┘
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::export::write_export;
use super::ingest::ingest_file;
use super::lookup::{AnalysisSummary, AnalyzedComponent, BomLookupService, PartResolver};
use super::record::ComponentRecord;
use crate::errors::{PortalError, PortalResult};

/// Delay before the lookup fires, matching the page's simulated processing time
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub analysis_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            analysis_delay: DEFAULT_ANALYSIS_DELAY,
        }
    }
}

/// Finished analysis of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub file_name: String,
    pub analyzed_at: DateTime<Utc>,
    pub components: Vec<AnalyzedComponent>,
    pub summary: AnalysisSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    /// Records are ingested; the lookup has not fired yet
    Analyzing {
        job: Uuid,
        started_at: Instant,
        components: Vec<ComponentRecord>,
    },
    Complete(AnalysisReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started(Uuid),
    /// A job is already in flight; nothing was restarted
    AlreadyRunning,
}

pub struct AnalysisSession<R> {
    service: BomLookupService<R>,
    config: SessionConfig,
    selected: Option<PathBuf>,
    state: SessionState,
}

impl<R: PartResolver> AnalysisSession<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, SessionConfig::default())
    }

    pub fn with_config(resolver: R, config: SessionConfig) -> Self {
        Self {
            service: BomLookupService::new(resolver),
            config,
            selected: None,
            state: SessionState::Idle,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, SessionState::Analyzing { .. })
    }

    /// Replace the selection. Any in-flight job or previous report is dropped.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        debug!(path = %path.display(), "BOM file selected");
        self.selected = Some(path);
        self.state = SessionState::Idle;
    }

    /// Forget the selection and return to idle.
    pub fn clear(&mut self) {
        self.selected = None;
        self.state = SessionState::Idle;
    }

    /// Ingest the selected file and schedule the lookup.
    ///
    /// Ingestion errors surface here; the state is left unchanged.
    pub fn start(&mut self, now: Instant) -> PortalResult<StartOutcome> {
        if self.is_analyzing() {
            debug!("analysis already running");
            return Ok(StartOutcome::AlreadyRunning);
        }
        let path = self.selected.as_ref().ok_or(PortalError::NoFileSelected)?;
        let components = ingest_file(path)?;

        let job = Uuid::new_v4();
        info!(%job, components = components.len(), "BOM analysis started");
        self.state = SessionState::Analyzing {
            job,
            started_at: now,
            components,
        };
        Ok(StartOutcome::Started(job))
    }

    /// Fire the deferred lookup once the delay has elapsed.
    ///
    /// Returns the report when one is available.
    pub fn poll(&mut self, now: Instant) -> Option<&AnalysisReport> {
        let due = match &self.state {
            SessionState::Analyzing { started_at, .. } => {
                now.saturating_duration_since(*started_at) >= self.config.analysis_delay
            }
            _ => false,
        };
        if due {
            self.complete();
        }
        self.report()
    }

    fn complete(&mut self) {
        let state = std::mem::replace(&mut self.state, SessionState::Idle);
        if let SessionState::Analyzing { job, components, .. } = state {
            let components = self.service.analyze(&components);
            let summary = AnalysisSummary::from_components(&components);
            let file_name = self
                .selected
                .as_deref()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!(
                %job,
                total = summary.total,
                attention = summary.attention_count(),
                "BOM analysis complete"
            );
            self.state = SessionState::Complete(AnalysisReport {
                id: job,
                file_name,
                analyzed_at: Utc::now(),
                components,
                summary,
            });
        }
    }

    /// Drop an in-flight job. Returns whether one was cancelled.
    pub fn cancel(&mut self) -> bool {
        if let SessionState::Analyzing { job, .. } = &self.state {
            info!(job = %job, "BOM analysis cancelled");
            self.state = SessionState::Idle;
            true
        } else {
            false
        }
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.state {
            SessionState::Complete(report) => Some(report),
            _ => None,
        }
    }

    /// Write the completed report as CSV.
    pub fn export(&self, path: &Path) -> PortalResult<()> {
        let report = self.report().ok_or_else(|| PortalError::missing_field("analysis"))?;
        write_export(path, &report.components)
    }
}

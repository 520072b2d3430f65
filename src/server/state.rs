//! Shared dashboard state
//!
//! Everything is in-memory and process-local: analyzed results and
//! manually added alerts do not survive a restart. The company
//! universe is seeded once and never written to.

use crate::error::{EsgError, Result};
use crate::scoring::EsgScorer;
use crate::types::{AnalysisResult, CompanyEsgProfile, NewsSentiment};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct AppState {
    pub scorer: Arc<dyn EsgScorer>,
    pub companies: Vec<CompanyEsgProfile>,
    pub max_upload_bytes: usize,
    latest_analysis: Mutex<Option<AnalysisResult>>,
    analysis_in_flight: AtomicBool,
    alerts: RwLock<Vec<NewsSentiment>>,
}

/// Claim on the single analysis slot. Dropping it releases the slot,
/// so failed scoring calls cannot wedge the screen.
#[derive(Debug)]
pub struct AnalysisTicket<'a> {
    flag: &'a AtomicBool,
}

impl Drop for AnalysisTicket<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl AppState {
    pub fn new(
        scorer: Arc<dyn EsgScorer>,
        companies: Vec<CompanyEsgProfile>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            scorer,
            companies,
            max_upload_bytes,
            latest_analysis: Mutex::new(None),
            analysis_in_flight: AtomicBool::new(false),
            alerts: RwLock::new(Vec::new()),
        }
    }

    /// At most one report analysis may be in flight. A second
    /// submission while the slot is taken is refused, not queued.
    pub fn begin_analysis(&self) -> Result<AnalysisTicket<'_>> {
        self.analysis_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| EsgError::AnalysisInFlight)?;
        Ok(AnalysisTicket {
            flag: &self.analysis_in_flight,
        })
    }

    /// Replace the previous result wholesale. Results are never
    /// merged or diffed.
    pub fn store_analysis(&self, result: AnalysisResult) {
        *self.latest_analysis.lock() = Some(result);
    }

    pub fn latest_analysis(&self) -> Option<AnalysisResult> {
        self.latest_analysis.lock().clone()
    }

    /// Newest alert first.
    pub fn push_alert(&self, alert: NewsSentiment) {
        self.alerts.write().insert(0, alert);
    }

    pub fn remove_alert(&self, id: &str) -> Result<()> {
        let mut alerts = self.alerts.write();
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        if alerts.len() == before {
            return Err(EsgError::AlertNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn alerts(&self) -> Vec<NewsSentiment> {
        self.alerts.read().clone()
    }
}

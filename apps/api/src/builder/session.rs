use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::analysis::models::{AnalysisError, AnalysisMode, AnalysisResult};
use crate::analysis::tracker::{AnalysisStatus, AnalysisTracker, Ticket};
use crate::builder::actions::{apply, DraftAction};
use crate::builder::completion::{compute_completion, CompletionReport};
use crate::builder::models::{ResumeDraft, DEFAULT_TEMPLATE};
use crate::builder::steps::{Step, StepNavigator};
use crate::errors::AppError;

const MAX_TEMPLATE_NAME_LEN: usize = 64;

/// One in-memory builder instance. Nothing here outlives the process.
#[derive(Debug)]
pub struct BuilderSession {
    pub id: Uuid,
    pub template: String,
    pub navigator: StepNavigator,
    pub draft: ResumeDraft,
    pub analysis: AnalysisTracker,
    pub created_at: DateTime<Utc>,
    pub last_saved_at: Option<DateTime<Utc>>,
}

impl BuilderSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            template: DEFAULT_TEMPLATE.to_string(),
            navigator: StepNavigator::new(),
            draft: ResumeDraft::default(),
            analysis: AnalysisTracker::default(),
            created_at: Utc::now(),
            last_saved_at: None,
        }
    }

    /// Applies one action; the draft is replaced only if the action succeeds.
    pub fn dispatch(&mut self, action: DraftAction) -> Result<(), AppError> {
        self.draft = apply(&self.draft, action)?;
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            template: self.template.clone(),
            step: self.navigator.current(),
            draft: self.draft.clone(),
            completion: compute_completion(&self.draft),
            created_at: self.created_at,
            last_saved_at: self.last_saved_at,
        }
    }
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the presentation layer needs to re-render the builder.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub template: String,
    pub step: Step,
    pub draft: ResumeDraft,
    pub completion: CompletionReport,
    pub created_at: DateTime<Utc>,
    pub last_saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    GoTo(Step),
}

/// Acknowledgement for the download button. Document generation lives
/// outside this service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadAck {
    pub session_id: Uuid,
    pub template: String,
    pub message: &'static str,
}

/// Concurrent map of live builder sessions.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, BuilderSession>>>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn create(&self) -> Result<SessionSnapshot, AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(AppError::Capacity(format!(
                "session limit of {} reached",
                self.max_sessions
            )));
        }
        let session = BuilderSession::new();
        let snapshot = session.snapshot();
        info!(session_id = %session.id, "builder session created");
        sessions.insert(session.id, session);
        Ok(snapshot)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        if self.sessions.write().await.remove(&id).is_none() {
            return Err(not_found(id));
        }
        info!(session_id = %id, "builder session discarded");
        Ok(())
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(BuilderSession::snapshot)
            .ok_or_else(|| not_found(id))
    }

    /// Runs `f` against the session under the write lock.
    async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BuilderSession) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        f(session)
    }

    pub async fn dispatch(
        &self,
        id: Uuid,
        action: DraftAction,
    ) -> Result<SessionSnapshot, AppError> {
        self.with_session(id, |session| {
            debug!(session_id = %id, ?action, "applying draft action");
            session.dispatch(action)?;
            Ok(session.snapshot())
        })
        .await
    }

    pub async fn select_template(
        &self,
        id: Uuid,
        template: &str,
    ) -> Result<SessionSnapshot, AppError> {
        let template = template.trim();
        if template.is_empty() || template.len() > MAX_TEMPLATE_NAME_LEN {
            return Err(AppError::Validation(format!(
                "template must be 1-{MAX_TEMPLATE_NAME_LEN} characters"
            )));
        }
        self.with_session(id, |session| {
            session.template = template.to_string();
            Ok(session.snapshot())
        })
        .await
    }

    pub async fn navigate(
        &self,
        id: Uuid,
        navigation: Navigation,
    ) -> Result<SessionSnapshot, AppError> {
        self.with_session(id, |session| {
            let step = match navigation {
                Navigation::Next => session.navigator.next(),
                Navigation::Previous => session.navigator.previous(),
                Navigation::GoTo(step) => session.navigator.go_to(step),
            };
            debug!(session_id = %id, ?step, "step changed");
            Ok(session.snapshot())
        })
        .await
    }

    /// Marks the draft as saved. Drafts are not persisted anywhere.
    pub async fn save(&self, id: Uuid) -> Result<SessionSnapshot, AppError> {
        self.with_session(id, |session| {
            session.last_saved_at = Some(Utc::now());
            info!(session_id = %id, "draft saved");
            Ok(session.snapshot())
        })
        .await
    }

    pub async fn download(&self, id: Uuid) -> Result<DownloadAck, AppError> {
        self.with_session(id, |session| {
            info!(session_id = %id, template = %session.template, "download requested");
            Ok(DownloadAck {
                session_id: id,
                template: session.template.clone(),
                message: "Resume download started",
            })
        })
        .await
    }

    pub async fn analysis_status(&self, id: Uuid) -> Result<AnalysisStatus, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(|s| s.analysis.status())
            .ok_or_else(|| not_found(id))
    }

    /// Opens an analysis ticket for session `id`.
    ///
    /// The returned guard must be settled with [`PendingAnalysis::finish`];
    /// dropping it first releases the ticket so the session is not left
    /// marked in flight.
    pub async fn begin_analysis(
        &self,
        id: Uuid,
        text: &str,
        mode: AnalysisMode,
    ) -> Result<PendingAnalysis, AppError> {
        let ticket = self
            .with_session(id, |session| Ok(session.analysis.begin(text, mode)?))
            .await?;
        info!(session_id = %id, %mode, ticket = ticket.id, "analysis started");
        Ok(PendingAnalysis {
            store: self.clone(),
            session_id: id,
            ticket,
            settled: false,
        })
    }

    /// Sends `text` to the analyzer on behalf of session `id`.
    ///
    /// The lock is held only to open and close the ticket, never across the
    /// analyzer call.
    pub async fn run_analysis(
        &self,
        id: Uuid,
        analyzer: &dyn ResumeAnalyzer,
        text: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, AppError> {
        let pending = self.begin_analysis(id, text, mode).await?;
        let outcome = analyzer.analyze(text, mode).await;
        debug!(session_id = %id, ticket = pending.ticket().id, ok = outcome.is_ok(), "analyzer replied");
        pending.finish(outcome).await
    }
}

/// An outstanding analysis ticket.
///
/// Request futures can be dropped mid-call when the client disconnects, so
/// the ticket is abandoned on drop unless `finish` ran.
pub struct PendingAnalysis {
    store: SessionStore,
    session_id: Uuid,
    ticket: Ticket,
    settled: bool,
}

impl PendingAnalysis {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Records the analyzer's outcome against this ticket.
    pub async fn finish(
        mut self,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<AnalysisResult, AppError> {
        let ticket = self.ticket;
        let result = self
            .store
            .with_session(self.session_id, |session| {
                Ok(session.analysis.finish(ticket, outcome)?)
            })
            .await;
        self.settled = true;
        result
    }
}

impl Drop for PendingAnalysis {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let (id, ticket) = (self.session_id, self.ticket);
        if let Ok(mut sessions) = self.store.sessions.try_write() {
            abandon(&mut sessions, id, ticket);
            return;
        }

        // Lock is busy; release the ticket once it frees up.
        let sessions = self.store.sessions.clone();
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    abandon(&mut *sessions.write().await, id, ticket);
                });
            }
            Err(_) => {
                warn!(session_id = %id, ticket = ticket.id, "no runtime to release analysis ticket");
            }
        }
    }
}

fn abandon(sessions: &mut HashMap<Uuid, BuilderSession>, id: Uuid, ticket: Ticket) {
    if let Some(session) = sessions.get_mut(&id) {
        if session.analysis.abandon(ticket) {
            info!(session_id = %id, ticket = ticket.id, "analysis cancelled before completion");
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

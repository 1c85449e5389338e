//! Per-client portal context
//!
//! A [`PortalContext`] owns everything one signed-in client has: the
//! [`Session`], the current [`ViewState`], the chat transcript, the loaded
//! lists in its [`Workspace`] and a [`CancellationToken`] for backend calls in
//! flight. Contexts live in the process-wide [`SessionStore`], keyed by the
//! session id carried in the access token.
//!
//! Contexts sit behind a `parking_lot::Mutex`. Handlers never hold the lock
//! across an `.await`: they take a [`CallScope`] snapshot, await the backend,
//! then re-lock and call [`CallScope::ensure_live`] before applying results,
//! so a logout that happened meanwhile discards them.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::assistant::{ChatTranscript, DispatchContext};
use crate::auth::directory::CredentialDirectory;
use crate::backend::Credential;
use crate::types::{
    AppError, Assignment, BulletinPost, Result, Role, StudentRequest, Submission, UserAccount,
    UserProfile,
};
use crate::views::{Screen, ViewState};

/// Identity of a signed-in user. Only a successful credential match creates one.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    pub display_name: String,
    pub email: String,
    pub profile: UserProfile,
    pub started_at: DateTime<Utc>,
    /// Bearer placeholder presented to the school backend.
    pub credential: Credential,
}

impl Session {
    fn from_profile(profile: UserProfile) -> Self {
        Self {
            user_id: profile.id.clone(),
            role: profile.role,
            display_name: profile.name.clone(),
            email: profile.email.clone(),
            started_at: Utc::now(),
            credential: Credential::bearer(Uuid::new_v4().to_string()),
            profile,
        }
    }

    /// Promotion of a student, empty for other roles.
    pub fn promotion(&self) -> &str {
        self.profile.promotion.as_deref().unwrap_or_default()
    }
}

/// Lists loaded or edited during a session. `None` means not loaded yet.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    /// Assignments published by a teacher during this session.
    pub assignment_cache: Vec<Assignment>,
    pub teacher_assignments: Option<Vec<Assignment>>,
    /// Submissions per assignment id.
    pub submissions: HashMap<String, Vec<Submission>>,
    pub users: Option<Vec<UserAccount>>,
    pub requests: Option<Vec<StudentRequest>>,
    pub student_requests: Option<Vec<StudentRequest>>,
    pub bulletin: Option<Vec<BulletinPost>>,
}

impl Workspace {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.assignment_cache.is_empty()
            && self.teacher_assignments.is_none()
            && self.submissions.is_empty()
            && self.users.is_none()
            && self.requests.is_none()
            && self.student_requests.is_none()
            && self.bulletin.is_none()
    }
}

/// What a handler needs to call the backend without holding the context lock.
#[derive(Debug, Clone)]
pub struct CallScope {
    pub session: Session,
    pub credential: Credential,
    pub cancel: CancellationToken,
}

impl CallScope {
    /// Fails when the context was logged out after this scope was taken.
    pub fn ensure_live(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        Ok(())
    }
}

pub struct PortalContext {
    id: String,
    session: Option<Session>,
    view: ViewState,
    transcript: ChatTranscript,
    workspace: Workspace,
    cancel: CancellationToken,
}

impl Default for PortalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PortalContext {
    /// Unauthenticated context on the landing page.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session: None,
            view: ViewState::default(),
            transcript: ChatTranscript::default(),
            workspace: Workspace::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Signs in against `directory`. On failure the context is unchanged.
    pub fn login(
        &mut self,
        directory: &CredentialDirectory,
        email: &str,
        password: &str,
    ) -> Result<&Session> {
        let profile = directory.authenticate(email, password)?;
        let session = Session::from_profile(profile);

        self.view = ViewState::signed_in(session.role);
        self.transcript = ChatTranscript::welcome(&session.display_name);
        self.workspace.clear();
        tracing::info!(
            "User {} signed in as {} (context {})",
            session.user_id,
            session.role,
            self.id
        );

        let session: &Session = self.session.insert(session);
        Ok(session)
    }

    /// Cancels in-flight backend calls and forgets everything.
    pub fn logout(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();

        if let Some(session) = self.session.take() {
            tracing::info!("User {} signed out (context {})", session.user_id, self.id);
        }
        self.view.reset();
        self.transcript.clear();
        self.workspace.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn require_session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| AppError::Auth("Not signed in".to_string()))
    }

    /// Snapshot for a backend call.
    pub fn scope(&self) -> Result<CallScope> {
        let session = self.require_session()?.clone();
        Ok(CallScope {
            credential: session.credential.clone(),
            session,
            cancel: self.cancel.clone(),
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    pub fn navigate(&mut self, section: &str) -> Screen {
        self.view.navigate(section)
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut ChatTranscript {
        &mut self.transcript
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    /// What the chat assistant gets to see.
    pub fn dispatch_context(&self) -> DispatchContext {
        DispatchContext {
            current_section: self
                .view
                .authenticated
                .then(|| self.view.active_section.clone()),
            display_name: self
                .session
                .as_ref()
                .map(|s| s.display_name.clone())
                .unwrap_or_default(),
        }
    }
}

pub type SharedContext = Arc<Mutex<PortalContext>>;

/// Live portal contexts keyed by session id.
#[derive(Default)]
pub struct SessionStore {
    contexts: RwLock<HashMap<String, SharedContext>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `context` under its own id.
    pub fn insert(&self, context: PortalContext) -> SharedContext {
        let id = context.id().to_string();
        let shared = Arc::new(Mutex::new(context));
        self.contexts.write().insert(id, shared.clone());
        shared
    }

    pub fn get(&self, id: &str) -> Option<SharedContext> {
        self.contexts.read().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<SharedContext> {
        self.contexts.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.contexts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssignmentStatus;
    use crate::views::PublicView;

    fn signed_in(email: &str) -> PortalContext {
        let mut context = PortalContext::new();
        context
            .login(&CredentialDirectory::default(), email, "password")
            .unwrap();
        context
    }

    fn cached_assignment() -> Assignment {
        Assignment {
            id: "99".to_string(),
            title: "Quiz".to_string(),
            description: String::new(),
            due_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            course: "Réseaux".to_string(),
            teacher_id: "2".to_string(),
            teacher_name: "M. Atemengue".to_string(),
            promotion: "L3 RT".to_string(),
            max_points: 20,
            status: AssignmentStatus::Active,
        }
    }

    #[test]
    fn test_new_context_is_anonymous() {
        let context = PortalContext::new();

        assert!(!context.is_authenticated());
        assert_eq!(context.screen(), Screen::Landing);
        assert!(context.transcript().is_empty());
        assert!(context.scope().is_err());
    }

    #[test]
    fn test_login_sets_view_and_welcome() {
        let context = signed_in("teacher@example.com");

        let session = context.session().unwrap();
        assert_eq!(session.role, Role::Teacher);
        assert_eq!(session.display_name, "M. Atemengue");
        assert_eq!(context.screen().id(), "teacher/dashboard");
        assert_eq!(context.transcript().len(), 1);
    }

    #[test]
    fn test_failed_login_leaves_context_untouched() {
        let mut context = PortalContext::new();
        let result = context.login(&CredentialDirectory::default(), "student@example.com", "nope");

        assert!(result.is_err());
        assert!(!context.is_authenticated());
        assert_eq!(context.view(), &ViewState::default());
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut context = signed_in("student@example.com");
        context.navigate("notes");
        context.workspace_mut().assignment_cache.push(cached_assignment());
        let scope = context.scope().unwrap();

        context.logout();

        assert!(context.session().is_none());
        assert_eq!(context.view(), &ViewState::default());
        assert_eq!(context.view().public_view, PublicView::Landing);
        assert!(context.transcript().is_empty());
        assert!(context.workspace().assignment_cache.is_empty());
        assert!(context.workspace().is_empty());
        assert!(scope.cancel.is_cancelled());
        assert!(matches!(scope.ensure_live(), Err(AppError::Cancelled)));
    }

    #[test]
    fn test_dispatch_context_tracks_section() {
        let mut context = signed_in("student@example.com");
        context.navigate("notes");

        let dispatch = context.dispatch_context();
        assert_eq!(dispatch.current_section.as_deref(), Some("notes"));
        assert_eq!(dispatch.display_name, "Djeukeng Kana");
    }

    #[test]
    fn test_store_lifecycle() {
        let store = SessionStore::new();
        let context = signed_in("admin@example.com");
        let id = context.id().to_string();

        store.insert(context);
        assert_eq!(store.len(), 1);
        assert!(store.get(&id).is_some());

        let removed = store.remove(&id);
        assert!(removed.is_some());
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }
}

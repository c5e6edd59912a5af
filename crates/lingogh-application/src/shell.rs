//! Tutor session shell.
//!
//! Coordinates the navigation state machine with the three feature managers.
//! Features are mutually exclusive views over independent state; each is
//! constructed lazily on first activation and retained until the session
//! ends, so switching tabs never reconstructs a feature and never triggers a
//! service call by itself.

use std::sync::Arc;

use lingogh_core::clock::Clock;
use lingogh_core::creative::ImageService;
use lingogh_core::error::{LingoghError, Result};
use lingogh_core::id::IdProvider;
use lingogh_core::language::{Language, find_language};
use lingogh_core::plan::PlanGenerator;
use lingogh_core::session::{ConversationService, FeatureTab, SessionState};
use lingogh_core::store::KeyValueStore;

use crate::chat_manager::ChatTranscriptManager;
use crate::creative_session::CreativeImageSession;
use crate::plan_manager::DailyPlanManager;

/// Everything the features need, bundled for injection.
#[derive(Clone)]
pub struct TutorServices {
    pub conversations: Arc<dyn ConversationService>,
    pub plans: Arc<dyn PlanGenerator>,
    pub images: Arc<dyn ImageService>,
    pub store: Arc<dyn KeyValueStore>,
    pub ids: Arc<dyn IdProvider>,
    pub clock: Arc<dyn Clock>,
}

pub struct TutorShell {
    services: TutorServices,
    state: SessionState,
    chat: Option<ChatTranscriptManager>,
    plan: Option<DailyPlanManager>,
    creative: Option<CreativeImageSession>,
}

impl TutorShell {
    pub fn new(services: TutorServices) -> Self {
        Self {
            services,
            state: SessionState::default(),
            chat: None,
            plan: None,
            creative: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn language(&self) -> Option<&str> {
        self.state.language()
    }

    /// Starts a session for `name`, defaulting to the chat tab. The chat
    /// feature mounts immediately and issues its opening turn.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when `name` is not in the catalog; the
    /// state is untouched in that case.
    pub async fn select_language(&mut self, name: &str) -> Result<&'static Language> {
        let language =
            find_language(name).ok_or_else(|| LingoghError::not_found("language", name))?;
        self.discard_features();
        self.state.select_language(language.name);
        self.mount_active_feature().await?;
        Ok(language)
    }

    /// Switches the visible feature, mounting it on first activation only.
    /// No-op when no session is active.
    pub async fn set_active_tab(&mut self, tab: FeatureTab) -> Result<()> {
        if self.state.set_active_tab(tab) {
            self.mount_active_feature().await?;
        }
        Ok(())
    }

    /// Ends the session, discarding every feature's state, and returns to
    /// language selection.
    pub fn go_back(&mut self) {
        self.state.go_back();
        self.discard_features();
    }

    pub fn chat(&self) -> Option<&ChatTranscriptManager> {
        self.chat.as_ref()
    }

    pub fn chat_mut(&mut self) -> Option<&mut ChatTranscriptManager> {
        self.chat.as_mut()
    }

    pub fn plan(&self) -> Option<&DailyPlanManager> {
        self.plan.as_ref()
    }

    pub fn plan_mut(&mut self) -> Option<&mut DailyPlanManager> {
        self.plan.as_mut()
    }

    pub fn creative(&self) -> Option<&CreativeImageSession> {
        self.creative.as_ref()
    }

    pub fn creative_mut(&mut self) -> Option<&mut CreativeImageSession> {
        self.creative.as_mut()
    }

    fn discard_features(&mut self) {
        self.chat = None;
        self.plan = None;
        self.creative = None;
    }

    async fn mount_active_feature(&mut self) -> Result<()> {
        let Some(language) = self.state.language().map(str::to_owned) else {
            return Ok(());
        };

        match self.state.active_tab() {
            Some(FeatureTab::Chat) if self.chat.is_none() => {
                let mut chat = ChatTranscriptManager::new(
                    &language,
                    self.services.conversations.clone(),
                    self.services.ids.clone(),
                );
                chat.initialize().await;
                self.chat = Some(chat);
            }
            Some(FeatureTab::Plan) if self.plan.is_none() => {
                let mut plan = DailyPlanManager::new(
                    &language,
                    self.services.store.clone(),
                    self.services.plans.clone(),
                    self.services.ids.clone(),
                    self.services.clock.clone(),
                );
                plan.load().await?;
                self.plan = Some(plan);
            }
            Some(FeatureTab::Creative) if self.creative.is_none() => {
                self.creative = Some(CreativeImageSession::new(self.services.images.clone()));
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use lingogh_core::plan::GeneratedTask;
    use lingogh_core::session::{ChatReply, TutorConversation};
    use lingogh_infrastructure::{FixedClock, InMemoryStore, SequentialIdProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingConversation;

    #[async_trait]
    impl TutorConversation for CountingConversation {
        async fn send(&mut self, message: &str) -> Result<ChatReply> {
            Ok(ChatReply {
                text: format!("echo: {message}"),
                sources: Vec::new(),
            })
        }
    }

    struct CountingConversationService {
        opens: AtomicUsize,
    }

    #[async_trait]
    impl ConversationService for CountingConversationService {
        async fn open(&self, _language: &str) -> Result<Box<dyn TutorConversation>> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingConversation))
        }
    }

    struct EmptyPlanGenerator;

    #[async_trait]
    impl PlanGenerator for EmptyPlanGenerator {
        async fn generate_tasks(&self, _language: &str) -> Result<Vec<GeneratedTask>> {
            Ok(Vec::new())
        }
    }

    struct NoImageService;

    #[async_trait]
    impl ImageService for NoImageService {
        async fn generate_png(&self, _prompt: &str) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }
    }

    fn shell() -> (TutorShell, Arc<CountingConversationService>) {
        let conversations = Arc::new(CountingConversationService {
            opens: AtomicUsize::new(0),
        });
        let services = TutorServices {
            conversations: conversations.clone(),
            plans: Arc::new(EmptyPlanGenerator),
            images: Arc::new(NoImageService),
            store: Arc::new(InMemoryStore::new()),
            ids: Arc::new(SequentialIdProvider::new()),
            clock: Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap())),
        };
        (TutorShell::new(services), conversations)
    }

    #[tokio::test]
    async fn test_select_language_mounts_chat() {
        let (mut shell, conversations) = shell();
        let language = shell.select_language("spanish").await.unwrap();
        assert_eq!(language.name, "Spanish");
        assert_eq!(shell.state().active_tab(), Some(FeatureTab::Chat));
        assert_eq!(conversations.opens.load(Ordering::SeqCst), 1);
        assert_eq!(shell.chat().unwrap().transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_language_is_rejected() {
        let (mut shell, _) = shell();
        let err = shell.select_language("Klingon").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!shell.state().is_active());
    }

    #[tokio::test]
    async fn test_tab_switch_keeps_chat_state_and_opens_no_new_conversation() {
        let (mut shell, conversations) = shell();
        shell.select_language("French").await.unwrap();
        shell.chat_mut().unwrap().send("bonjour").await;
        let len = shell.chat().unwrap().transcript().len();

        shell.set_active_tab(FeatureTab::Plan).await.unwrap();
        shell.set_active_tab(FeatureTab::Chat).await.unwrap();

        assert_eq!(shell.chat().unwrap().transcript().len(), len);
        assert_eq!(conversations.opens.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_plan_tab_mounts_manager_scoped_to_language() {
        let (mut shell, _) = shell();
        shell.select_language("German").await.unwrap();
        shell.set_active_tab(FeatureTab::Plan).await.unwrap();
        assert_eq!(shell.plan().unwrap().language(), "German");
        assert!(shell.plan().unwrap().active_plan().is_none());
    }

    #[tokio::test]
    async fn test_go_back_discards_all_feature_state() {
        let (mut shell, conversations) = shell();
        shell.select_language("Italian").await.unwrap();
        shell.set_active_tab(FeatureTab::Creative).await.unwrap();
        assert!(shell.creative().is_some());

        shell.go_back();
        assert!(!shell.state().is_active());
        assert!(shell.chat().is_none());
        assert!(shell.plan().is_none());
        assert!(shell.creative().is_none());

        // Re-selecting opens a fresh conversation.
        shell.select_language("Italian").await.unwrap();
        assert_eq!(conversations.opens.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_tab_switch_without_session_is_a_no_op() {
        let (mut shell, _) = shell();
        shell.set_active_tab(FeatureTab::Plan).await.unwrap();
        assert!(shell.plan().is_none());
        assert!(!shell.state().is_active());
    }
}

// src/core/orchestrator.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::generators::{
    charset, validate_length, PasswordGenerator, PronounceableError, PronounceableRequest,
    PronounceableSource, StrengthScorer, ValidationError,
};
use crate::history::{HistoryError, HistoryStore};
use crate::models::{GenerationRequest, StrengthAssessment};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Generation service error: {0}")]
    ServiceError(#[from] PronounceableError),

    #[error("A password is already being generated")]
    Busy,
}

pub type Result<T> = std::result::Result<T, GenerationError>;

// Current password, its assessment and the history log
pub struct AppState {
    pub password: String,
    pub strength: StrengthAssessment,
    pub history: HistoryStore,
}

impl AppState {
    pub fn new(history: HistoryStore) -> Self {
        Self {
            password: String::new(),
            strength: StrengthAssessment::too_weak(),
            history,
        }
    }
}

// Clears the busy flag when the attempt ends, however it ends
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag: Arc::clone(flag) })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

pub struct GenerationOrchestrator {
    state: AppState,
    generator: PasswordGenerator,
    pronounceable: Option<Box<dyn PronounceableSource>>,
    busy: Arc<AtomicBool>,
}

impl GenerationOrchestrator {
    pub fn new(history: HistoryStore, pronounceable: Option<Box<dyn PronounceableSource>>) -> Self {
        Self {
            state: AppState::new(history),
            generator: PasswordGenerator::new(),
            pronounceable,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn current_password(&self) -> &str {
        &self.state.password
    }

    pub fn strength(&self) -> &StrengthAssessment {
        &self.state.strength
    }

    pub fn history(&self) -> &HistoryStore {
        &self.state.history
    }

    pub fn is_generating(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Shared view of the busy flag for a surface that renders elsewhere.
    pub fn busy_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.busy)
    }

    pub fn pronounceable_available(&self) -> bool {
        self.pronounceable.is_some()
    }

    /// Run one generation attempt. On success the current password, its
    /// strength and the history are replaced; on any error they are left as
    /// they were.
    pub async fn generate(&mut self, request: &GenerationRequest) -> Result<String> {
        Self::validate(request)?;

        let _guard = BusyGuard::acquire(&self.busy).ok_or(GenerationError::Busy)?;

        let password = if request.pronounceable {
            let source = self
                .pronounceable
                .as_ref()
                .ok_or(PronounceableError::NotConfigured)?;
            let wire = PronounceableRequest::new(request.length, request.classes);

            source.request(&wire).await.map_err(|e| {
                log::error!("Pronounceable generation failed: {}", e);
                GenerationError::from(e)
            })?
        } else {
            let alphabet = charset::build(&request.classes);
            self.generator.generate(request.length, &alphabet)?
        };

        self.apply(password.clone());
        log::info!(
            "Generated {} password ({} chars, {})",
            if request.pronounceable { "pronounceable" } else { "random" },
            password.chars().count(),
            self.state.strength.label
        );

        Ok(password)
    }

    pub fn delete_history_entry(&mut self, index: usize) -> std::result::Result<Option<String>, HistoryError> {
        self.state.history.remove_at(index)
    }

    pub fn clear_history(&mut self) -> std::result::Result<(), HistoryError> {
        self.state.history.clear()
    }

    fn validate(request: &GenerationRequest) -> std::result::Result<(), ValidationError> {
        if !request.effective_classes().any() {
            log::debug!("Rejected generation request: no character classes selected");
            return Err(ValidationError::NoCharacterClasses);
        }
        validate_length(request.length)
    }

    fn apply(&mut self, password: String) {
        self.state.strength = StrengthScorer::score(&password);
        self.state.password = password.clone();

        // The attempt already succeeded; a failed write only costs persistence
        if let Err(e) = self.state.history.prepend(password) {
            log::warn!("Failed to persist password history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryStorage;
    use crate::models::{CharacterClasses, StrengthLabel};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // Replays scripted outcomes and records what it was asked for
    #[derive(Clone, Default)]
    struct ScriptedSource {
        outcomes: Arc<Mutex<VecDeque<std::result::Result<String, PronounceableError>>>>,
        requests: Arc<Mutex<Vec<PronounceableRequest>>>,
        busy_seen: Arc<Mutex<Vec<bool>>>,
        busy: Option<Arc<AtomicBool>>,
    }

    impl ScriptedSource {
        fn with(outcomes: Vec<std::result::Result<String, PronounceableError>>) -> Self {
            Self {
                outcomes: Arc::new(Mutex::new(outcomes.into())),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl PronounceableSource for ScriptedSource {
        async fn request(&self, request: &PronounceableRequest) -> std::result::Result<String, PronounceableError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(busy) = &self.busy {
                self.busy_seen.lock().unwrap().push(busy.load(Ordering::SeqCst));
            }
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(PronounceableError::InvalidResponse("no scripted outcome".into())))
        }
    }

    fn orchestrator(source: Option<ScriptedSource>) -> (GenerationOrchestrator, MemoryStorage) {
        let storage = MemoryStorage::new();
        let history = HistoryStore::load(Box::new(storage.clone()));
        let source = source.map(|s| Box::new(s) as Box<dyn PronounceableSource>);
        (GenerationOrchestrator::new(history, source), storage)
    }

    fn local(length: usize, classes: CharacterClasses) -> GenerationRequest {
        GenerationRequest::new(length, classes, false)
    }

    #[tokio::test]
    async fn local_generation_updates_password_strength_and_history() {
        let (mut orch, storage) = orchestrator(None);
        let classes = CharacterClasses { uppercase: false, lowercase: true, numbers: true, symbols: false };

        let password = orch.generate(&local(24, classes)).await.unwrap();

        assert_eq!(password.chars().count(), 24);
        assert!(password.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(orch.current_password(), password);
        assert_eq!(*orch.strength(), StrengthScorer::score(&password));
        assert_eq!(orch.history().entries(), &[password.clone()]);
        assert_eq!(storage.snapshot(), Some(vec![password]));
        assert!(!orch.is_generating());
    }

    #[tokio::test]
    async fn no_classes_is_a_validation_failure() {
        let (mut orch, storage) = orchestrator(None);
        orch.generate(&local(12, CharacterClasses::all())).await.unwrap();
        let before_password = orch.current_password().to_string();
        let before_strength = *orch.strength();

        let err = orch.generate(&local(12, CharacterClasses::none())).await.unwrap_err();

        assert!(matches!(err, GenerationError::ValidationError(ValidationError::NoCharacterClasses)));
        assert_eq!(orch.current_password(), before_password);
        assert_eq!(*orch.strength(), before_strength);
        assert_eq!(orch.history().len(), 1);
        assert_eq!(storage.snapshot(), Some(vec![before_password]));
        assert!(!orch.is_generating());
    }

    #[tokio::test]
    async fn length_outside_range_is_rejected() {
        let (mut orch, _) = orchestrator(None);

        for length in [0, 5, 65] {
            let err = orch.generate(&local(length, CharacterClasses::all())).await.unwrap_err();
            assert!(matches!(
                err,
                GenerationError::ValidationError(ValidationError::LengthOutOfRange { .. })
            ));
        }
        assert!(orch.history().is_empty());
        assert_eq!(orch.strength().label, StrengthLabel::TooWeak);
    }

    #[tokio::test]
    async fn history_keeps_last_ten_generations() {
        let (mut orch, _) = orchestrator(None);
        let mut generated = Vec::new();

        for _ in 0..12 {
            generated.push(orch.generate(&local(8, CharacterClasses::all())).await.unwrap());
        }

        let expected: Vec<String> = generated.iter().rev().take(10).cloned().collect();
        assert_eq!(orch.history().entries(), expected.as_slice());
    }

    #[tokio::test]
    async fn pronounceable_forces_all_classes_and_passes_flags_through() {
        let source = ScriptedSource::with(vec![Ok("Tamo-Rilu7!".to_string())]);
        let (mut orch, _) = orchestrator(Some(source.clone()));
        let flags = CharacterClasses { uppercase: false, lowercase: true, numbers: false, symbols: false };

        let password = orch.generate(&GenerationRequest::new(11, flags, true)).await.unwrap();

        assert_eq!(password, "Tamo-Rilu7!");
        assert_eq!(orch.current_password(), "Tamo-Rilu7!");
        assert_eq!(orch.history().get(0), Some("Tamo-Rilu7!"));

        let requests = source.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], PronounceableRequest::new(11, flags));
        assert_eq!(requests[0].effective_classes(), CharacterClasses::all());
    }

    #[tokio::test]
    async fn pronounceable_accepts_no_selected_classes() {
        let source = ScriptedSource::with(vec![Ok("Kelo-Pavu".to_string())]);
        let (mut orch, _) = orchestrator(Some(source));

        let result = orch
            .generate(&GenerationRequest::new(9, CharacterClasses::none(), true))
            .await;

        assert_eq!(result.unwrap(), "Kelo-Pavu");
    }

    #[tokio::test]
    async fn service_failure_leaves_state_untouched() {
        let source = ScriptedSource::with(vec![
            Ok("Mira-Seto5".to_string()),
            Err(PronounceableError::ApiError { status: 500, message: "boom".into() }),
        ]);
        let (mut orch, storage) = orchestrator(Some(source));
        let request = GenerationRequest::new(10, CharacterClasses::default(), true);

        orch.generate(&request).await.unwrap();
        let strength = *orch.strength();

        let err = orch.generate(&request).await.unwrap_err();

        assert!(matches!(err, GenerationError::ServiceError(PronounceableError::ApiError { status: 500, .. })));
        assert_eq!(orch.current_password(), "Mira-Seto5");
        assert_eq!(*orch.strength(), strength);
        assert_eq!(orch.history().entries(), &["Mira-Seto5"]);
        assert_eq!(storage.snapshot(), Some(vec!["Mira-Seto5".to_string()]));
        assert!(!orch.is_generating());
    }

    #[tokio::test]
    async fn pronounceable_without_source_is_a_service_failure() {
        let (mut orch, _) = orchestrator(None);
        let err = orch
            .generate(&GenerationRequest::new(10, CharacterClasses::default(), true))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::ServiceError(PronounceableError::NotConfigured)));
        assert!(!orch.is_generating());
        assert!(orch.history().is_empty());
    }

    #[tokio::test]
    async fn busy_while_waiting_on_service() {
        let storage = MemoryStorage::new();
        let history = HistoryStore::load(Box::new(storage));
        let busy = Arc::new(AtomicBool::new(false));
        let source = ScriptedSource {
            busy: Some(Arc::clone(&busy)),
            ..ScriptedSource::with(vec![Ok("Davi-Noru".to_string())])
        };
        let mut orch = GenerationOrchestrator {
            state: AppState::new(history),
            generator: PasswordGenerator::new(),
            pronounceable: Some(Box::new(source.clone())),
            busy,
        };

        orch.generate(&GenerationRequest::new(9, CharacterClasses::all(), true)).await.unwrap();

        assert_eq!(*source.busy_seen.lock().unwrap(), vec![true]);
        assert!(!orch.is_generating());
    }

    #[tokio::test]
    async fn concurrent_attempt_is_rejected_while_busy() {
        let (mut orch, _) = orchestrator(None);
        orch.busy_handle().store(true, Ordering::SeqCst);

        let err = orch.generate(&local(12, CharacterClasses::all())).await.unwrap_err();

        assert!(matches!(err, GenerationError::Busy));
        assert!(orch.history().is_empty());
    }

    #[tokio::test]
    async fn dropped_attempt_clears_busy_flag() {
        struct Pending;

        #[async_trait]
        impl PronounceableSource for Pending {
            async fn request(&self, _request: &PronounceableRequest) -> std::result::Result<String, PronounceableError> {
                std::future::pending().await
            }
        }

        let history = HistoryStore::load(Box::new(MemoryStorage::new()));
        let mut orch = GenerationOrchestrator::new(history, Some(Box::new(Pending)));
        let busy = orch.busy_handle();
        let request = GenerationRequest::new(12, CharacterClasses::all(), true);

        let attempt = tokio::time::timeout(std::time::Duration::from_millis(50), orch.generate(&request)).await;

        assert!(attempt.is_err());
        assert!(!busy.load(Ordering::SeqCst));
        assert!(orch.current_password().is_empty());
    }

    #[tokio::test]
    async fn delete_and_clear_history() {
        let (mut orch, storage) = orchestrator(None);
        for _ in 0..3 {
            orch.generate(&local(10, CharacterClasses::all())).await.unwrap();
        }
        let entries = orch.history().entries().to_vec();

        let removed = orch.delete_history_entry(1).unwrap();
        assert_eq!(removed.as_deref(), Some(entries[1].as_str()));
        assert_eq!(orch.history().entries(), &[entries[0].clone(), entries[2].clone()]);

        assert_eq!(orch.delete_history_entry(7).unwrap(), None);

        orch.clear_history().unwrap();
        assert!(orch.history().is_empty());
        assert_eq!(storage.snapshot(), None);
        // Current password survives a history wipe
        assert_eq!(orch.current_password(), entries[0]);
    }
}

//! Wizard controller.
//!
//! Owns the single `SessionState` of a session and drives it through
//! `Intro(0..k) → AwaitUpload → Scanning → PickClothing → PickBackground →
//! PickLighting → PickExpression → Synthesizing → ShowResult`.
//!
//! State sits behind a short-held mutex that is never held across an await,
//! so views stay responsive while a remote call is outstanding. At most one
//! remote call runs at a time; the `BusyGuard` owns the in-progress flag for
//! the duration of the call and releases it on every exit path.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use studio_core::catalog::{Catalog, Category, IntroSlide, SelectionCatalogEntry};
use studio_core::image::EncodedImage;
use studio_core::session::{SessionState, UserSelections, WizardStep};
use studio_core::{Result, StudioError, TransformationService};
use uuid::Uuid;

/// Inline message shown on the upload step after a negative face check.
pub const FACE_NOT_VISIBLE_MESSAGE: &str = "Please make sure your face is clearly visible.";

/// Blocking notification shown after a failed synthesis.
pub const SYNTHESIS_FAILED_NOTICE: &str =
    "Studio Error: Identity-preserving generation failed. Please try again with a clearer photo.";

/// Outcome of a single wizard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// The input does not apply to the current step; nothing changed.
    NoOp,
    /// The wizard moved to another step.
    StepChanged { from: WizardStep, to: WizardStep },
    /// A slot was filled (or replaced).
    Selected { category: Category, id: String },
    /// The result view switched between result and source.
    ComparisonToggled { showing_source: bool },
    /// A remote call is already outstanding; the input was ignored.
    Busy,
    /// The face check answered no. The wizard is back on `AwaitUpload`.
    FaceRejected { message: String },
    /// Synthesis failed. The wizard is back on `PickExpression` with the
    /// selections intact.
    SynthesisFailed { notification: String },
    /// A remote call finished after the user navigated away; its outcome was dropped.
    OutcomeDiscarded,
}

fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the in-progress flag for one remote call.
///
/// `release` clears it alongside applying the outcome. If the guard is
/// dropped unreleased (the call future was dropped or panicked) the flag is
/// cleared and a wizard still parked on the remote step is returned to
/// `fallback`, so the session always stays navigable.
struct BusyGuard {
    state: Option<Arc<Mutex<SessionState>>>,
    remote_step: WizardStep,
    fallback: WizardStep,
}

impl BusyGuard {
    fn release(mut self, state: &mut SessionState) {
        state.in_progress = false;
        self.state = None;
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if let Some(shared) = self.state.take() {
            let mut state = lock_state(&shared);
            state.in_progress = false;
            if state.current_step == self.remote_step {
                state.current_step = self.fallback;
            }
            tracing::warn!(
                "[Wizard] Remote call abandoned, returned to {:?}",
                state.current_step
            );
        }
    }
}

/// The step state machine for one user session.
///
/// Cloning is cheap and every clone drives the same session.
#[derive(Clone)]
pub struct WizardController {
    session_id: String,
    catalog: Arc<Catalog>,
    service: Arc<dyn TransformationService>,
    state: Arc<Mutex<SessionState>>,
}

impl WizardController {
    /// Creates a controller positioned on the first intro slide (or on
    /// `AwaitUpload` when the catalog has none).
    pub fn new(catalog: Arc<Catalog>, service: Arc<dyn TransformationService>) -> Self {
        let state = SessionState::new(catalog.intro_len());
        let session_id = Uuid::new_v4().to_string();
        tracing::info!(
            "[Wizard] Session {} started at {:?}",
            session_id,
            state.current_step
        );
        Self {
            session_id,
            catalog,
            service,
            state: Arc::new(Mutex::new(state)),
        }
    }

    // ============================================================================
    // Read accessors
    // ============================================================================

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// A copy of the whole session state.
    pub fn snapshot(&self) -> SessionState {
        lock_state(&self.state).clone()
    }

    pub fn step(&self) -> WizardStep {
        lock_state(&self.state).current_step
    }

    pub fn is_busy(&self) -> bool {
        lock_state(&self.state).in_progress
    }

    pub fn selections(&self) -> UserSelections {
        lock_state(&self.state).selections.clone()
    }

    pub fn selection(&self, category: Category) -> Option<SelectionCatalogEntry> {
        lock_state(&self.state).selections.get(category).cloned()
    }

    pub fn error_message(&self) -> Option<String> {
        lock_state(&self.state).error_message.clone()
    }

    pub fn result_image(&self) -> Option<EncodedImage> {
        lock_state(&self.state).result_image.clone()
    }

    /// The image a before/after view should show.
    pub fn displayed_image(&self) -> Option<EncodedImage> {
        lock_state(&self.state).displayed_image().cloned()
    }

    /// Options offered on the current pick step; empty elsewhere.
    pub fn current_options(&self) -> &[SelectionCatalogEntry] {
        match self.step().category() {
            Some(category) => self.catalog.options(category),
            None => &[],
        }
    }

    /// The intro slide being shown, if any.
    pub fn current_slide(&self) -> Option<&IntroSlide> {
        match self.step() {
            WizardStep::Intro { slide } => self.catalog.intro_slides.get(slide),
            _ => None,
        }
    }

    /// Whether `proceed` would do anything right now.
    pub fn can_proceed(&self) -> bool {
        Self::proceed_allowed(&lock_state(&self.state))
    }

    fn proceed_allowed(state: &SessionState) -> bool {
        match state.current_step {
            WizardStep::PickExpression => {
                state.selections.is_complete() && state.source_image.is_some()
            }
            step => step
                .category()
                .is_some_and(|category| state.selections.is_filled(category)),
        }
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    fn transition(&self, state: &mut SessionState, to: WizardStep) -> WizardEvent {
        let from = state.current_step;
        state.current_step = to;
        tracing::debug!("[Wizard] {} {:?} -> {:?}", self.session_id, from, to);
        WizardEvent::StepChanged { from, to }
    }

    /// Moves to the next intro slide, or to `AwaitUpload` from the last one.
    pub fn advance_intro(&self) -> WizardEvent {
        let mut state = lock_state(&self.state);
        let WizardStep::Intro { slide } = state.current_step else {
            return WizardEvent::NoOp;
        };

        let next = if slide + 1 < self.catalog.intro_len() {
            WizardStep::Intro { slide: slide + 1 }
        } else {
            WizardStep::AwaitUpload
        };
        self.transition(&mut state, next)
    }

    /// Explicit backward navigation. No-op on the first intro slide and
    /// while synthesizing.
    ///
    /// Backing out of `Scanning` is allowed; the pending face check's outcome
    /// is then discarded when it arrives.
    pub fn back(&self) -> WizardEvent {
        let mut state = lock_state(&self.state);
        match state.current_step.previous(self.catalog.intro_len()) {
            Some(previous) => self.transition(&mut state, previous),
            None => WizardEvent::NoOp,
        }
    }

    // ============================================================================
    // Remote-call steps
    // ============================================================================

    /// Atomically checks the busy flag, runs `prepare` and raises the flag.
    ///
    /// `prepare` validates the current step and performs the transition into
    /// the remote step; returning `Err(event)` aborts with that event.
    fn try_begin<T>(
        &self,
        remote_step: WizardStep,
        fallback: WizardStep,
        prepare: impl FnOnce(&mut SessionState) -> std::result::Result<T, WizardEvent>,
    ) -> std::result::Result<(T, BusyGuard), WizardEvent> {
        let mut state = lock_state(&self.state);
        if state.in_progress {
            tracing::debug!("[Wizard] {} rejected input while busy", self.session_id);
            return Err(WizardEvent::Busy);
        }

        let prepared = prepare(&mut state)?;
        state.in_progress = true;

        Ok((
            prepared,
            BusyGuard {
                state: Some(Arc::clone(&self.state)),
                remote_step,
                fallback,
            },
        ))
    }

    /// Stores the uploaded portrait and runs the face check.
    ///
    /// - verdict `true` → `PickClothing`
    /// - verdict `false` → `AwaitUpload` with an inline error message
    /// - transport/service failure → `PickClothing` with no message (fail-open)
    pub async fn submit_image(&self, image: EncodedImage) -> WizardEvent {
        let stored = image.clone();
        let begun = self.try_begin(WizardStep::Scanning, WizardStep::AwaitUpload, |state| {
            if state.current_step != WizardStep::AwaitUpload {
                return Err(WizardEvent::NoOp);
            }
            state.source_image = Some(stored);
            state.error_message = None;
            state.current_step = WizardStep::Scanning;
            Ok(())
        });
        let ((), busy) = match begun {
            Ok(begun) => begun,
            Err(event) => return event,
        };

        tracing::info!("[Wizard] {} scanning {:?}", self.session_id, image);
        let verdict = self.service.validate_face(&image).await;

        let mut state = lock_state(&self.state);
        busy.release(&mut state);

        if state.current_step != WizardStep::Scanning {
            tracing::info!(
                "[Wizard] {} face check finished after leaving Scanning, discarded",
                self.session_id
            );
            return WizardEvent::OutcomeDiscarded;
        }

        match verdict {
            Ok(true) => self.transition(&mut state, WizardStep::PickClothing),
            Ok(false) => {
                tracing::info!("[Wizard] {} face check rejected the upload", self.session_id);
                state.error_message = Some(FACE_NOT_VISIBLE_MESSAGE.to_string());
                state.current_step = WizardStep::AwaitUpload;
                WizardEvent::FaceRejected {
                    message: FACE_NOT_VISIBLE_MESSAGE.to_string(),
                }
            }
            Err(err) => {
                // Fail open: a face-check error never blocks the upload.
                tracing::warn!(
                    "[Wizard] {} face check unavailable, continuing: {}",
                    self.session_id,
                    err
                );
                self.transition(&mut state, WizardStep::PickClothing)
            }
        }
    }

    // ============================================================================
    // Selection steps
    // ============================================================================

    /// Fills the current pick step's slot with catalog entry `id`.
    ///
    /// Outside the pick steps this is a no-op. An id that is not in the
    /// step's category fails with `StudioError::UnknownOption` and leaves the
    /// slot untouched.
    pub fn select(&self, id: &str) -> Result<WizardEvent> {
        let mut state = lock_state(&self.state);
        let Some(category) = state.current_step.category() else {
            return Ok(WizardEvent::NoOp);
        };

        let entry = self
            .catalog
            .find(category, id)
            .cloned()
            .ok_or_else(|| StudioError::unknown_option(category, id))?;

        state.selections.set(category, entry);
        tracing::debug!("[Wizard] {} selected {}/{}", self.session_id, category, id);
        Ok(WizardEvent::Selected {
            category,
            id: id.to_string(),
        })
    }

    /// The "continue" action.
    ///
    /// On the first three pick steps it advances once the step's slot is
    /// filled. On `PickExpression` it requires all four slots and starts
    /// synthesis. Everywhere else, or with a required slot empty, it is a no-op.
    pub async fn proceed(&self) -> WizardEvent {
        {
            let mut state = lock_state(&self.state);
            if !Self::proceed_allowed(&state) {
                return WizardEvent::NoOp;
            }
            if let Some(next) = state.current_step.next_pick() {
                return self.transition(&mut state, next);
            }
        }
        self.synthesize().await
    }

    async fn synthesize(&self) -> WizardEvent {
        let begun = self.try_begin(
            WizardStep::Synthesizing,
            WizardStep::PickExpression,
            |state| {
                if state.current_step != WizardStep::PickExpression
                    || !state.selections.is_complete()
                {
                    return Err(WizardEvent::NoOp);
                }
                let source = state.source_image.clone().ok_or(WizardEvent::NoOp)?;
                let selections = state.selections.clone();
                state.current_step = WizardStep::Synthesizing;
                Ok((source, selections))
            },
        );
        let ((source, selections), busy) = match begun {
            Ok(begun) => begun,
            Err(event) => return event,
        };

        tracing::info!("[Wizard] {} synthesizing", self.session_id);
        let outcome = self.service.transform_image(&source, &selections).await;

        let mut state = lock_state(&self.state);
        busy.release(&mut state);

        if state.current_step != WizardStep::Synthesizing {
            tracing::info!(
                "[Wizard] {} synthesis finished after leaving Synthesizing, discarded",
                self.session_id
            );
            return WizardEvent::OutcomeDiscarded;
        }

        match outcome {
            Ok(image) => {
                tracing::info!("[Wizard] {} synthesis succeeded: {:?}", self.session_id, image);
                state.result_image = Some(image);
                state.showing_source = false;
                self.transition(&mut state, WizardStep::ShowResult)
            }
            Err(err) => {
                tracing::error!("[Wizard] {} synthesis failed: {}", self.session_id, err);
                state.current_step = WizardStep::PickExpression;
                WizardEvent::SynthesisFailed {
                    notification: SYNTHESIS_FAILED_NOTICE.to_string(),
                }
            }
        }
    }

    // ============================================================================
    // Result step
    // ============================================================================

    /// Flips the result view between the result and the source image.
    pub fn toggle_comparison(&self) -> WizardEvent {
        let mut state = lock_state(&self.state);
        if state.current_step != WizardStep::ShowResult {
            return WizardEvent::NoOp;
        }
        state.showing_source = !state.showing_source;
        WizardEvent::ComparisonToggled {
            showing_source: state.showing_source,
        }
    }

    /// Returns to `PickClothing` keeping every selection.
    pub fn adjust_style(&self) -> WizardEvent {
        let mut state = lock_state(&self.state);
        if state.current_step != WizardStep::ShowResult {
            return WizardEvent::NoOp;
        }
        self.transition(&mut state, WizardStep::PickClothing)
    }

    /// Clears selections and the result, then returns to `AwaitUpload`.
    pub fn start_new(&self) -> WizardEvent {
        let mut state = lock_state(&self.state);
        if state.current_step != WizardStep::ShowResult {
            return WizardEvent::NoOp;
        }
        state.selections.clear();
        state.result_image = None;
        state.showing_source = false;
        state.error_message = None;
        self.transition(&mut state, WizardStep::AwaitUpload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use studio_core::catalog::get_default_catalog;
    use tokio::sync::Notify;

    /// Scripted service: pops one reply per call.
    #[derive(Default)]
    struct ScriptedService {
        validations: Mutex<VecDeque<Result<bool>>>,
        transforms: Mutex<VecDeque<Result<EncodedImage>>>,
        transform_calls: Mutex<Vec<UserSelections>>,
    }

    impl ScriptedService {
        fn validating(self, reply: Result<bool>) -> Self {
            self.validations.lock().unwrap().push_back(reply);
            self
        }

        fn transforming(self, reply: Result<EncodedImage>) -> Self {
            self.transforms.lock().unwrap().push_back(reply);
            self
        }
    }

    #[async_trait::async_trait]
    impl TransformationService for ScriptedService {
        async fn validate_face(&self, _image: &EncodedImage) -> Result<bool> {
            self.validations
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected validate_face call")
        }

        async fn transform_image(
            &self,
            _image: &EncodedImage,
            selections: &UserSelections,
        ) -> Result<EncodedImage> {
            self.transform_calls.lock().unwrap().push(selections.clone());
            self.transforms
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected transform_image call")
        }
    }

    /// Blocks every call until released.
    struct GatedService {
        gate: Notify,
    }

    #[async_trait::async_trait]
    impl TransformationService for GatedService {
        async fn validate_face(&self, _image: &EncodedImage) -> Result<bool> {
            self.gate.notified().await;
            Ok(true)
        }

        async fn transform_image(
            &self,
            _image: &EncodedImage,
            _selections: &UserSelections,
        ) -> Result<EncodedImage> {
            self.gate.notified().await;
            Ok(EncodedImage::png("cmVzdWx0"))
        }
    }

    fn controller(service: ScriptedService) -> (WizardController, Arc<ScriptedService>) {
        let service = Arc::new(service);
        let controller = WizardController::new(Arc::new(get_default_catalog()), service.clone());
        (controller, service)
    }

    fn portrait() -> EncodedImage {
        EncodedImage::parse("data:image/jpeg;base64,/9j/4AAQSkZJRg==").unwrap()
    }

    fn skip_intro(controller: &WizardController) {
        while matches!(controller.step(), WizardStep::Intro { .. }) {
            controller.advance_intro();
        }
    }

    async fn reach_clothing(controller: &WizardController) {
        skip_intro(controller);
        controller.submit_image(portrait()).await;
        assert_eq!(controller.step(), WizardStep::PickClothing);
    }

    async fn pick_all(controller: &WizardController) {
        for id in ["c1", "b2", "p1"] {
            controller.select(id).unwrap();
            controller.proceed().await;
        }
        controller.select("e1").unwrap();
        assert_eq!(controller.step(), WizardStep::PickExpression);
    }

    #[test]
    fn test_intro_navigation() {
        let (controller, _) = controller(ScriptedService::default());
        assert_eq!(controller.step(), WizardStep::Intro { slide: 0 });
        assert_eq!(controller.back(), WizardEvent::NoOp);

        for slide in 1..4 {
            controller.advance_intro();
            assert_eq!(controller.step(), WizardStep::Intro { slide });
        }
        controller.advance_intro();
        assert_eq!(controller.step(), WizardStep::AwaitUpload);

        controller.back();
        assert_eq!(controller.step(), WizardStep::Intro { slide: 3 });
        assert_eq!(
            controller.current_slide().unwrap().title,
            "Download ultra-HD images for free"
        );
    }

    #[test]
    fn test_empty_intro_starts_at_upload() {
        let mut catalog = get_default_catalog();
        catalog.intro_slides.clear();
        let controller =
            WizardController::new(Arc::new(catalog), Arc::new(ScriptedService::default()));
        assert_eq!(controller.step(), WizardStep::AwaitUpload);
        assert_eq!(controller.back(), WizardEvent::NoOp);
    }

    #[tokio::test]
    async fn test_valid_face_moves_to_clothing() {
        let (controller, _) = controller(ScriptedService::default().validating(Ok(true)));
        reach_clothing(&controller).await;
        assert!(controller.error_message().is_none());
        assert!(!controller.is_busy());
        assert!(controller.snapshot().source_image.is_some());
    }

    #[tokio::test]
    async fn test_rejected_face_returns_to_upload_with_message() {
        let (controller, _) = controller(ScriptedService::default().validating(Ok(false)));
        skip_intro(&controller);

        let event = controller.submit_image(portrait()).await;
        assert_eq!(
            event,
            WizardEvent::FaceRejected {
                message: FACE_NOT_VISIBLE_MESSAGE.to_string()
            }
        );
        assert_eq!(controller.step(), WizardStep::AwaitUpload);
        assert!(!controller.error_message().unwrap().is_empty());
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_validation_transport_error_fails_open() {
        let (controller, _) = controller(
            ScriptedService::default().validating(Err(StudioError::transport(None, "offline"))),
        );
        skip_intro(&controller);

        let event = controller.submit_image(portrait()).await;
        assert_eq!(
            event,
            WizardEvent::StepChanged {
                from: WizardStep::Scanning,
                to: WizardStep::PickClothing
            }
        );
        assert!(controller.error_message().is_none());
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_resubmission_clears_previous_error() {
        let (controller, _) = controller(
            ScriptedService::default()
                .validating(Ok(false))
                .validating(Ok(true)),
        );
        skip_intro(&controller);
        controller.submit_image(portrait()).await;
        assert!(controller.error_message().is_some());

        controller.submit_image(portrait()).await;
        assert_eq!(controller.step(), WizardStep::PickClothing);
        assert!(controller.error_message().is_none());
    }

    #[tokio::test]
    async fn test_submit_outside_upload_is_noop() {
        let (controller, _) = controller(ScriptedService::default());
        assert_eq!(controller.submit_image(portrait()).await, WizardEvent::NoOp);
        assert!(controller.snapshot().source_image.is_none());
    }

    #[tokio::test]
    async fn test_proceed_requires_filled_slot() {
        let (controller, _) = controller(ScriptedService::default().validating(Ok(true)));
        reach_clothing(&controller).await;

        assert!(!controller.can_proceed());
        assert_eq!(controller.proceed().await, WizardEvent::NoOp);
        assert_eq!(controller.step(), WizardStep::PickClothing);

        controller.select("c2").unwrap();
        assert!(controller.can_proceed());
        controller.proceed().await;
        assert_eq!(controller.step(), WizardStep::PickBackground);
    }

    #[tokio::test]
    async fn test_select_overwrites_and_rejects_unknown_ids() {
        let (controller, _) = controller(ScriptedService::default().validating(Ok(true)));
        reach_clothing(&controller).await;

        controller.select("c1").unwrap();
        controller.select("c4").unwrap();
        assert_eq!(controller.selection(Category::Clothing).unwrap().id, "c4");

        let err = controller.select("b1").unwrap_err();
        assert!(err.is_unknown_option());
        assert_eq!(controller.selection(Category::Clothing).unwrap().id, "c4");
    }

    #[tokio::test]
    async fn test_select_outside_pick_steps_is_noop() {
        let (controller, _) = controller(ScriptedService::default());
        assert_eq!(controller.select("c1").unwrap(), WizardEvent::NoOp);
        assert!(controller.selection(Category::Clothing).is_none());
    }

    #[tokio::test]
    async fn test_successful_synthesis_shows_result() {
        let (controller, service) = controller(
            ScriptedService::default()
                .validating(Ok(true))
                .transforming(Ok(EncodedImage::png("cmVzdWx0"))),
        );
        reach_clothing(&controller).await;
        pick_all(&controller).await;

        let event = controller.proceed().await;
        assert_eq!(
            event,
            WizardEvent::StepChanged {
                from: WizardStep::Synthesizing,
                to: WizardStep::ShowResult
            }
        );
        assert_eq!(
            controller.result_image().unwrap().to_data_uri(),
            "data:image/png;base64,cmVzdWx0"
        );
        assert!(!controller.is_busy());

        let sent = service.transform_calls.lock().unwrap()[0].clone();
        assert!(sent.is_complete());
        assert_eq!(sent.get(Category::Background).unwrap().id, "b2");
    }

    #[tokio::test]
    async fn test_failed_synthesis_keeps_previous_result() {
        let (controller, _) = controller(
            ScriptedService::default()
                .validating(Ok(true))
                .transforming(Ok(EncodedImage::png("Zmlyc3Q=")))
                .transforming(Err(StudioError::synthesis_failed("no image"))),
        );
        reach_clothing(&controller).await;
        pick_all(&controller).await;
        controller.proceed().await;
        assert_eq!(controller.step(), WizardStep::ShowResult);

        controller.back();
        assert_eq!(controller.step(), WizardStep::PickExpression);
        let event = controller.proceed().await;

        assert_eq!(
            event,
            WizardEvent::SynthesisFailed {
                notification: SYNTHESIS_FAILED_NOTICE.to_string()
            }
        );
        assert_eq!(controller.step(), WizardStep::PickExpression);
        assert_eq!(controller.result_image().unwrap().base64_data(), "Zmlyc3Q=");
        assert!(controller.selections().is_complete());
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_result_step_actions() {
        let (controller, _) = controller(
            ScriptedService::default()
                .validating(Ok(true))
                .transforming(Ok(EncodedImage::png("cmVzdWx0"))),
        );
        reach_clothing(&controller).await;
        pick_all(&controller).await;
        controller.proceed().await;

        assert_eq!(
            controller.toggle_comparison(),
            WizardEvent::ComparisonToggled {
                showing_source: true
            }
        );
        assert_eq!(controller.displayed_image().unwrap().mime_type(), "image/jpeg");
        assert_eq!(controller.step(), WizardStep::ShowResult);
        controller.toggle_comparison();
        assert_eq!(controller.displayed_image().unwrap().mime_type(), "image/png");

        controller.adjust_style();
        assert_eq!(controller.step(), WizardStep::PickClothing);
        assert!(controller.selections().is_complete());
    }

    #[tokio::test]
    async fn test_start_new_resets_selections_and_result() {
        let (controller, _) = controller(
            ScriptedService::default()
                .validating(Ok(true))
                .transforming(Ok(EncodedImage::png("cmVzdWx0"))),
        );
        reach_clothing(&controller).await;
        pick_all(&controller).await;
        controller.proceed().await;

        controller.start_new();
        let state = controller.snapshot();
        assert_eq!(state.current_step, WizardStep::AwaitUpload);
        assert_eq!(state.selections, UserSelections::default());
        assert!(state.result_image.is_none());
    }

    #[tokio::test]
    async fn test_result_actions_are_noops_elsewhere() {
        let (controller, _) = controller(ScriptedService::default());
        assert_eq!(controller.toggle_comparison(), WizardEvent::NoOp);
        assert_eq!(controller.adjust_style(), WizardEvent::NoOp);
        assert_eq!(controller.start_new(), WizardEvent::NoOp);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_second_submission_while_scanning_is_busy() {
        let service = Arc::new(GatedService {
            gate: Notify::new(),
        });
        let controller = WizardController::new(Arc::new(get_default_catalog()), service.clone());
        skip_intro(&controller);

        let pending = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit_image(portrait()).await }
        });
        while !controller.is_busy() {
            tokio::task::yield_now().await;
        }
        assert_eq!(controller.step(), WizardStep::Scanning);

        // Back out and try to upload again while the first check is outstanding.
        controller.back();
        assert_eq!(controller.step(), WizardStep::AwaitUpload);
        assert_eq!(controller.submit_image(portrait()).await, WizardEvent::Busy);

        service.gate.notify_one();
        assert_eq!(pending.await.unwrap(), WizardEvent::OutcomeDiscarded);
        assert_eq!(controller.step(), WizardStep::AwaitUpload);
        assert!(!controller.is_busy());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_dropped_call_releases_busy_flag() {
        let service = Arc::new(GatedService {
            gate: Notify::new(),
        });
        let controller = WizardController::new(Arc::new(get_default_catalog()), service);
        skip_intro(&controller);

        let pending = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit_image(portrait()).await }
        });
        while !controller.is_busy() {
            tokio::task::yield_now().await;
        }

        pending.abort();
        let _ = pending.await;

        assert!(!controller.is_busy());
        assert_eq!(controller.step(), WizardStep::AwaitUpload);
    }
}

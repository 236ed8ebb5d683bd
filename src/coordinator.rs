use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::time::{Duration, Instant, sleep};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::CouponErrorKind;
use crate::integration::rental_api::CouponApi;
use crate::methods::coupon_class;
use crate::model::CouponDiscount;

/// Where validation errors become visible to the customer. The engine only
/// decides WHETHER a message shows; rendering belongs to the caller.
pub trait NoticeSink: Send + Sync {
    fn show(&self, kind: CouponErrorKind, message: &str);
}

/// Default sink for headless use: surfaces the notice in the log stream.
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn show(&self, kind: CouponErrorKind, message: &str) {
        warn!(?kind, message, "coupon validation notice");
    }
}

/// Client-persisted "pending coupon" value. Read once at form mount,
/// cleared when a booking consumes the coupon. The storage mechanism is
/// the caller's business.
pub trait CouponStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, code: &str);
    fn clear(&self);
}

#[derive(Default)]
pub struct MemoryCouponStore {
    value: Mutex<Option<String>>,
}

impl CouponStore for MemoryCouponStore {
    fn get(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }

    fn set(&self, code: &str) {
        *self.value.lock().unwrap() = Some(code.to_string());
    }

    fn clear(&self) {
        *self.value.lock().unwrap() = None;
    }
}

/// Decides whether an error message may be shown. Identical messages are
/// suppressed while a younger-than-cooldown copy sits in the queue; queue
/// entries expire after the display duration so the same message can
/// legitimately reappear later.
pub struct NoticeGate {
    cooldown: Duration,
    display: Duration,
    shown: VecDeque<(String, Instant)>,
}

impl NoticeGate {
    pub fn new(cooldown: Duration, display: Duration) -> NoticeGate {
        NoticeGate {
            cooldown,
            display,
            shown: VecDeque::new(),
        }
    }

    /// Returns true when the message should be displayed, and records it.
    pub fn offer(&mut self, message: &str, now: Instant) -> bool {
        self.shown
            .retain(|(_, at)| now.duration_since(*at) < self.display);
        let duplicate = self
            .shown
            .iter()
            .any(|(m, at)| m == message && now.duration_since(*at) < self.cooldown);
        if duplicate {
            debug!(message, "duplicate notice suppressed");
            return false;
        }
        self.shown.push_back((message.to_string(), now));
        true
    }

    pub fn clear(&mut self) {
        self.shown.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CouponOutcome {
    Valid(CouponDiscount),
    Invalid {
        kind: CouponErrorKind,
        message: String,
    },
    Transient {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationPhase {
    Idle,
    Debouncing,
    Validating,
    Settled(CouponOutcome),
}

struct CoordinatorState {
    code: String,
    phone: String,
    /// Bumped on every edit; a debounce task whose generation is no longer
    /// current was superseded and goes away without a network call.
    generation: u64,
    in_progress: bool,
    current_attempt: Option<Uuid>,
    last_validation_at: Option<Instant>,
    last_valid_pair: Option<(String, String, Instant)>,
    cached_discount: Option<CouponDiscount>,
    last_settled: Option<CouponOutcome>,
    /// The (code, phone) pair `last_settled` was computed for. A verdict
    /// never outlives an edit to different input.
    settled_pair: Option<(String, String)>,
    gate: NoticeGate,
}

impl CoordinatorState {
    fn new(cfg: &EngineConfig) -> CoordinatorState {
        CoordinatorState {
            code: String::new(),
            phone: String::new(),
            generation: 0,
            in_progress: false,
            current_attempt: None,
            last_validation_at: None,
            last_valid_pair: None,
            cached_discount: None,
            last_settled: None,
            settled_pair: None,
            gate: NoticeGate::new(cfg.cooldown, cfg.notice_display),
        }
    }

    fn wipe(&mut self) {
        self.code.clear();
        self.phone.clear();
        self.generation += 1;
        self.in_progress = false;
        self.current_attempt = None;
        self.last_validation_at = None;
        self.last_valid_pair = None;
        self.cached_discount = None;
        self.last_settled = None;
        self.settled_pair = None;
        self.gate.clear();
    }
}

struct Shared<A> {
    api: A,
    cfg: EngineConfig,
    sink: Arc<dyn NoticeSink>,
    store: Arc<dyn CouponStore>,
    state: Mutex<CoordinatorState>,
    phase: watch::Sender<ValidationPhase>,
}

/// Guards the remote discount-code validation call.
///
/// One instance per active booking form; the state is instance-owned, so
/// concurrent forms (and tests) never interfere. Guarantees: at most one
/// in-flight validation at a time, a cooldown between attempts, no
/// revalidation of an unchanged already-valid pair, and deduplicated error
/// surfacing.
pub struct CouponCoordinator<A: CouponApi> {
    shared: Arc<Shared<A>>,
}

impl<A: CouponApi> Clone for CouponCoordinator<A> {
    fn clone(&self) -> Self {
        CouponCoordinator {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A: CouponApi + 'static> CouponCoordinator<A> {
    pub fn new(
        api: A,
        cfg: EngineConfig,
        sink: Arc<dyn NoticeSink>,
        store: Arc<dyn CouponStore>,
    ) -> CouponCoordinator<A> {
        let state = CoordinatorState::new(&cfg);
        let (phase, _) = watch::channel(ValidationPhase::Idle);
        CouponCoordinator {
            shared: Arc::new(Shared {
                api,
                cfg,
                sink,
                store,
                state: Mutex::new(state),
                phase,
            }),
        }
    }

    /// The persisted pending-coupon value, read once at form mount so the
    /// form can prefill the code field.
    pub fn restore_pending(&self) -> Option<String> {
        self.shared.store.get()
    }

    /// The winning coupon from the last successful validation, if any.
    /// The pricing calculator reads this on every recompute.
    pub fn cached_discount(&self) -> Option<CouponDiscount> {
        self.shared.state.lock().unwrap().cached_discount.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ValidationPhase> {
        self.shared.phase.subscribe()
    }

    /// Called on every edit of the code or phone field. Starts (or
    /// restarts) the debounce window; only the most recent quiescent input
    /// ever reaches the network.
    pub fn input_changed(&self, code: &str, phone: &str) {
        let generation = {
            let mut st = self.shared.state.lock().unwrap();
            st.generation += 1;
            st.code = code.trim().to_string();
            st.phone = phone.trim().to_string();

            if st.code.is_empty() || st.phone.is_empty() {
                // Nothing to validate; drop any shown error and any cached
                // win for a code that is no longer in the field.
                st.gate.clear();
                st.cached_discount = None;
                st.last_settled = None;
                st.settled_pair = None;
                self.shared.phase.send_replace(ValidationPhase::Idle);
                return;
            }

            let verdict_is_current = st
                .settled_pair
                .as_ref()
                .is_some_and(|(c, p)| *c == st.code && *p == st.phone);
            if !verdict_is_current {
                // The settled verdict (and any cached win) belongs to
                // different input. It must not be restorable for a code
                // the server has never seen.
                st.cached_discount = None;
                st.last_settled = None;
                st.settled_pair = None;
            }
            st.generation
        };

        self.shared.phase.send_replace(ValidationPhase::Debouncing);
        let this = self.clone();
        tokio::spawn(async move {
            sleep(this.shared.cfg.debounce).await;
            this.try_validate(generation).await;
        });
    }

    /// Booking succeeded: the coupon is consumed. Wipes all coordinator
    /// state and the client-persisted pending value so the code cannot be
    /// silently reapplied to an unrelated booking.
    pub fn consume(&self) {
        self.reset();
        self.shared.store.clear();
    }

    /// Form teardown: wipe in-memory state, keep the persisted value.
    pub fn reset(&self) {
        self.shared.state.lock().unwrap().wipe();
        self.shared.phase.send_replace(ValidationPhase::Idle);
    }

    /// The coordinator's current settled verdict, awaited without ever
    /// triggering a fresh network call. `None` means no validation is in
    /// play (no input, or input was cleared).
    pub async fn settled_outcome(&self) -> Option<CouponOutcome> {
        let mut rx = self.shared.phase.subscribe();
        loop {
            let phase = rx.borrow_and_update().clone();
            match phase {
                ValidationPhase::Idle => return None,
                ValidationPhase::Settled(outcome) => return Some(outcome),
                ValidationPhase::Debouncing | ValidationPhase::Validating => {
                    if rx.changed().await.is_err() {
                        return None;
                    }
                }
            }
        }
    }

    async fn try_validate(&self, generation: u64) {
        let (code, phone, attempt) = {
            let mut st = self.shared.state.lock().unwrap();
            if st.generation != generation {
                // A newer edit owns the flow now.
                return;
            }
            if st.in_progress {
                // Single-flight: dropped, not queued. The running attempt
                // will settle the phase on its own.
                debug!("validation already in flight, trigger dropped");
                return;
            }
            let now = Instant::now();
            if let Some(at) = st.last_validation_at
                && now.duration_since(at) < self.shared.cfg.cooldown
            {
                debug!("validation trigger inside cooldown, dropped");
                self.restore_phase(&st);
                return;
            }
            let pair_recently_valid = st.last_valid_pair.as_ref().is_some_and(|(code, phone, at)| {
                *code == st.code
                    && *phone == st.phone
                    && now.duration_since(*at) < self.shared.cfg.revalidate_window
            });
            if pair_recently_valid {
                if let Some(discount) = st.cached_discount.clone() {
                    debug!("pair already validated recently, trigger dropped");
                    let outcome = CouponOutcome::Valid(discount);
                    st.last_settled = Some(outcome.clone());
                    st.settled_pair = Some((st.code.clone(), st.phone.clone()));
                    self.shared.phase.send_replace(ValidationPhase::Settled(outcome));
                    return;
                }
                // The cached win was dropped (the field was cleared in
                // between). The pair guard must not leave the form without
                // a verdict, so validate again.
            }

            st.in_progress = true;
            st.last_validation_at = Some(now);
            let attempt = Uuid::new_v4();
            st.current_attempt = Some(attempt);
            (st.code.clone(), st.phone.clone(), attempt)
        };

        self.shared.phase.send_replace(ValidationPhase::Validating);
        debug!(%attempt, %code, "dispatching coupon validation");
        let result = self.shared.api.validate(&code, &phone).await;
        self.settle(attempt, &code, &phone, result).await;
    }

    async fn settle(
        &self,
        attempt: Uuid,
        code: &str,
        phone: &str,
        result: Result<crate::helper_model::CouponValidateResponse, crate::integration::rental_api::ApiError>,
    ) {
        let now = Instant::now();
        let outcome = {
            let mut st = self.shared.state.lock().unwrap();
            if st.current_attempt != Some(attempt) {
                // State was wiped while we were in flight; the result no
                // longer belongs to anything.
                debug!(%attempt, "stale validation result discarded");
                return;
            }
            if st.code != code || st.phone != phone {
                // Input edited mid-flight. The result answers a question
                // nobody is asking anymore; release the lock and go idle.
                st.in_progress = false;
                st.current_attempt = None;
                self.shared.phase.send_replace(ValidationPhase::Idle);
                return;
            }

            match result {
                Ok(response) if response.valid => {
                    let discount = CouponDiscount {
                        code: code.to_string(),
                        rate: response.discount_rate.unwrap_or(0.0),
                    };
                    st.cached_discount = Some(discount.clone());
                    st.last_valid_pair = Some((code.to_string(), phone.to_string(), now));
                    st.gate.clear();
                    self.shared.store.set(code);
                    CouponOutcome::Valid(discount)
                }
                Ok(response) => {
                    st.in_progress = false;
                    st.current_attempt = None;
                    st.cached_discount = None;
                    let message = response
                        .message
                        .unwrap_or_else(|| "Discount code was rejected.".to_string());
                    let kind = coupon_class::classify_default(&message);
                    if st.gate.offer(&message, now) {
                        self.shared.sink.show(kind, &message);
                    }
                    CouponOutcome::Invalid { kind, message }
                }
                Err(err) => {
                    st.in_progress = false;
                    st.current_attempt = None;
                    warn!(%attempt, error = %err, "coupon validation transport failure");
                    let message =
                        "Could not check the discount code. Please try again.".to_string();
                    if st.gate.offer(&message, now) {
                        self.shared.sink.show(CouponErrorKind::Generic, &message);
                    }
                    CouponOutcome::Transient { message }
                }
            }
        };

        let valid = matches!(outcome, CouponOutcome::Valid(_));
        {
            let mut st = self.shared.state.lock().unwrap();
            st.last_settled = Some(outcome.clone());
            st.settled_pair = Some((code.to_string(), phone.to_string()));
        }
        self.shared
            .phase
            .send_replace(ValidationPhase::Settled(outcome));

        if valid {
            // Hold the single-flight lock a little longer so trailing
            // duplicate triggers from the same user action get absorbed.
            sleep(self.shared.cfg.settle_delay).await;
            let mut st = self.shared.state.lock().unwrap();
            if st.current_attempt == Some(attempt) {
                st.in_progress = false;
                st.current_attempt = None;
            }
        }
    }

    /// A trigger was dropped by a guard; put the phase back to whatever
    /// the last settled verdict was so waiters never hang on `Debouncing`.
    fn restore_phase(&self, st: &CoordinatorState) {
        let phase = match &st.last_settled {
            Some(outcome) => ValidationPhase::Settled(outcome.clone()),
            None => ValidationPhase::Idle,
        };
        self.shared.phase.send_replace(phase);
    }
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper_model::CouponValidateResponse;
    use crate::integration::rental_api::ApiError;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockCouponApi {
        calls: Arc<AtomicUsize>,
        script: Arc<Mutex<VecDeque<Result<CouponValidateResponse, ApiError>>>>,
        delay: Duration,
    }

    impl CouponApi for MockCouponApi {
        fn validate(
            &self,
            _code: &str,
            _phone: &str,
        ) -> impl Future<Output = Result<CouponValidateResponse, ApiError>> + Send {
            let calls = Arc::clone(&self.calls);
            let script = Arc::clone(&self.script);
            let delay = self.delay;
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                sleep(delay).await;
                script.lock().unwrap().pop_front().unwrap_or(Ok(CouponValidateResponse {
                    valid: true,
                    message: None,
                    discount_rate: Some(0.10),
                }))
            }
        }
    }

    struct RecordingSink {
        shown: Mutex<Vec<String>>,
    }

    impl NoticeSink for RecordingSink {
        fn show(&self, _kind: CouponErrorKind, message: &str) {
            self.shown.lock().unwrap().push(message.to_string());
        }
    }

    fn build(
        script: Vec<Result<CouponValidateResponse, ApiError>>,
        delay: Duration,
    ) -> (
        CouponCoordinator<MockCouponApi>,
        Arc<AtomicUsize>,
        Arc<RecordingSink>,
        Arc<MemoryCouponStore>,
    ) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("autorent_engine=debug")
            .with_test_writer()
            .try_init();
        let calls = Arc::new(AtomicUsize::new(0));
        let api = MockCouponApi {
            calls: Arc::clone(&calls),
            script: Arc::new(Mutex::new(script.into())),
            delay,
        };
        let sink = Arc::new(RecordingSink {
            shown: Mutex::new(Vec::new()),
        });
        let store = Arc::new(MemoryCouponStore::default());
        let coordinator = CouponCoordinator::new(
            api,
            EngineConfig::default(),
            Arc::clone(&sink) as Arc<dyn NoticeSink>,
            Arc::clone(&store) as Arc<dyn CouponStore>,
        );
        (coordinator, calls, sink, store)
    }

    fn invalid(message: &str) -> Result<CouponValidateResponse, ApiError> {
        Ok(CouponValidateResponse {
            valid: false,
            message: Some(message.to_string()),
            discount_rate: None,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_produce_one_network_call() {
        let (coordinator, calls, _, _) = build(vec![], Duration::from_millis(100));
        coordinator.input_changed("SAVE10", "0712345678");
        coordinator.input_changed("SAVE10", "0712345678");
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(2000)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_within_cooldown_is_dropped() {
        let (coordinator, calls, _, _) = build(vec![], Duration::from_millis(100));
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1700)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Same pair again, debounce fires well inside the 3 s cooldown.
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_valid_pair_not_revalidated_for_ten_seconds() {
        let (coordinator, calls, _, _) = build(vec![], Duration::from_millis(100));
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(2000)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Past the cooldown but inside the revalidation window. The
        // verdict is republished from cache without a network call.
        sleep(Duration::from_millis(4000)).await;
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            coordinator.settled_outcome().await,
            Some(CouponOutcome::Valid(_))
        ));

        // Past the revalidation window the same pair validates again.
        sleep(Duration::from_millis(10_000)).await;
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1200)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn edited_code_cannot_inherit_previous_verdict() {
        let (coordinator, calls, _, _) = build(vec![], Duration::from_millis(100));
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1700)).await;
        assert!(coordinator.cached_discount().is_some());

        // A different, never-validated code; its debounce lands inside
        // the cooldown, so no call is made for it. Neither the cached
        // win nor the settled verdict may survive the edit.
        coordinator.input_changed("FREEBIE", "0712345678");
        assert!(coordinator.cached_discount().is_none());
        sleep(Duration::from_millis(1100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.settled_outcome().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn retyped_valid_code_revalidates_after_clear() {
        let (coordinator, calls, _, store) = build(vec![], Duration::from_millis(100));
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Clearing the field drops the cached win.
        coordinator.input_changed("", "0712345678");
        assert!(coordinator.cached_discount().is_none());

        // Retyping the same pair inside the revalidation window must not
        // strand the form without a verdict; with no cached win left the
        // pair guard yields to a fresh validation.
        sleep(Duration::from_millis(3000)).await;
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1200)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let discount = coordinator.cached_discount().expect("discount re-cached");
        assert_eq!(discount.code, "SAVE10");
        assert_eq!(store.get().as_deref(), Some("SAVE10"));
        assert!(matches!(
            coordinator.settled_outcome().await,
            Some(CouponOutcome::Valid(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn valid_code_is_cached_and_persisted() {
        let (coordinator, _, sink, store) = build(vec![], Duration::from_millis(100));
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1500)).await;

        let discount = coordinator.cached_discount().expect("discount cached");
        assert_eq!(discount.code, "SAVE10");
        assert_eq!(discount.rate, 0.10);
        assert_eq!(store.get().as_deref(), Some("SAVE10"));
        assert!(sink.shown.lock().unwrap().is_empty());
        assert_eq!(
            coordinator.settled_outcome().await,
            Some(CouponOutcome::Valid(discount))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_code_classified_and_shown_once() {
        let (coordinator, _, sink, _) = build(
            vec![invalid("Codul a expirat")],
            Duration::from_millis(100),
        );
        coordinator.input_changed("OLD2020", "0712345678");
        sleep(Duration::from_millis(1500)).await;

        assert!(coordinator.cached_discount().is_none());
        assert_eq!(sink.shown.lock().unwrap().len(), 1);
        match coordinator.settled_outcome().await {
            Some(CouponOutcome::Invalid { kind, .. }) => {
                assert_eq!(kind, CouponErrorKind::Expired)
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_settles_transient() {
        let (coordinator, _, sink, _) = build(
            vec![Err(ApiError::Transport("connection refused".to_string()))],
            Duration::from_millis(100),
        );
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1500)).await;

        assert_eq!(sink.shown.lock().unwrap().len(), 1);
        assert!(matches!(
            coordinator.settled_outcome().await,
            Some(CouponOutcome::Transient { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_input_goes_idle_and_drops_cached_win() {
        let (coordinator, _, _, _) = build(vec![], Duration::from_millis(100));
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1500)).await;
        assert!(coordinator.cached_discount().is_some());

        coordinator.input_changed("", "0712345678");
        assert!(coordinator.cached_discount().is_none());
        assert_eq!(coordinator.settled_outcome().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn consume_mid_flight_discards_stale_result() {
        let (coordinator, calls, _, store) = build(vec![], Duration::from_secs(5));
        coordinator.input_changed("SAVE10", "0712345678");
        sleep(Duration::from_millis(1200)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        coordinator.consume();
        sleep(Duration::from_secs(6)).await;

        assert!(coordinator.cached_discount().is_none());
        assert_eq!(store.get(), None);
        assert_eq!(coordinator.settled_outcome().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn settled_outcome_waits_for_in_flight_validation() {
        let (coordinator, _, _, _) = build(vec![], Duration::from_millis(400));
        coordinator.input_changed("SAVE10", "0712345678");
        // Await immediately, while the debounce/flight is still running.
        let outcome = coordinator.settled_outcome().await;
        assert!(matches!(outcome, Some(CouponOutcome::Valid(_))));
    }

    #[test]
    fn gate_dedups_identical_messages_within_cooldown() {
        let mut gate = NoticeGate::new(Duration::from_millis(3000), Duration::from_millis(6000));
        let now = Instant::now();
        assert!(gate.offer("Cod invalid", now));
        assert!(!gate.offer("Cod invalid", now + Duration::from_millis(100)));
        // A different message shows immediately.
        assert!(gate.offer("Codul a expirat", now + Duration::from_millis(100)));
        // The identical message reappears once the cooldown elapsed.
        assert!(gate.offer("Cod invalid", now + Duration::from_millis(3500)));
        // And again after the display window purged the queue.
        assert!(gate.offer("Cod invalid", now + Duration::from_millis(20_000)));
    }
}

//! ShopSession - the explicit session controller.
//!
//! Owns every piece of per-user state (tier, trial usage, language, display
//! currency, current screen, watchlist, checkout) and is the only place
//! that mutates it. Collaborators are reached through ports.
//!
//! # Search
//!
//! ```text
//! blank query ─► Ignored
//! gate closed ─► Gated (screen = Upgrade, provider not called)
//! provider ok ─► normalize ─► rank(entitlement) ─► record usage ─► Found
//! provider err ─► Unavailable (usage unchanged)
//! ```
//!
//! # Checkout
//!
//! Timed phases are awaited through the settlement gateway. A settlement
//! error fails the session back to method selection. A commit upgrades the
//! tier, persists it and broadcasts `CheckoutEvent::Committed`.
//!
//! Dropping a settlement future (a timeout, a cancelled task) is handled the
//! same way: an unfinished step fails, a settled payment commits.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::bootstrap::{restore_session, HostEnvironment, SessionPersister};
use super::rates::SharedRates;
use crate::domain::catalog::{tier_definition, CryptoAssetId, SubscriptionTier};
use crate::domain::checkout::{
    CardBrand, CardInput, CheckoutError, CheckoutEvent, CheckoutOrchestrator, CheckoutStage,
    PaymentMethod, PaymentSession,
};
use crate::domain::currency::{format_price, Currency, RateTable};
use crate::domain::foundation::ProductId;
use crate::domain::search::{
    normalize_response, rank, ComparisonData, GateDecision, SearchError, VoiceTranscript,
};
use crate::domain::session::{LanguageCode, Screen, SessionState};
use crate::domain::watchlist::Watchlist;
use crate::ports::{KeyValueStore, SearchProvider, SettlementGateway, SettlementStep};

const EVENT_CHANNEL_CAPACITY: usize = 16;
const INTERRUPTED_REASON: &str = "settlement interrupted";

/// Result of a search request.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Ranked results, truncated to the tier's retailer entitlement.
    Found(ComparisonData),
    /// Trial exhausted. The upgrade offer is shown instead.
    Gated(GateDecision),
    /// The provider failed or answered nonsense. Nothing was counted.
    Unavailable(SearchError),
    /// Blank query. Nothing happened.
    Ignored,
}

/// How a settlement run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Committed(CheckoutEvent),
    Failed(CheckoutEvent),
}

/// Collaborators a session is wired to.
#[derive(Clone)]
pub struct SessionDeps {
    pub search: Arc<dyn SearchProvider>,
    pub store: Arc<dyn KeyValueStore>,
    pub settlement: Arc<dyn SettlementGateway>,
    pub rates: SharedRates,
}

pub struct ShopSession {
    state: SessionState,
    currency: Currency,
    screen: Screen,
    checkout: CheckoutOrchestrator,
    watchlist: Watchlist,
    results: Option<ComparisonData>,

    search: Arc<dyn SearchProvider>,
    settlement: Arc<dyn SettlementGateway>,
    persister: SessionPersister,
    rates: SharedRates,
    events: broadcast::Sender<CheckoutEvent>,
}

impl ShopSession {
    /// Restores persisted state and detects the display currency.
    pub async fn bootstrap(deps: SessionDeps, host: &HostEnvironment) -> Self {
        let state = restore_session(deps.store.as_ref(), host).await;
        let currency = host.display_currency();
        tracing::debug!(currency = %currency, "Display currency detected");
        Self::with_state(deps, state, currency)
    }

    /// Builds a session around an already restored state.
    pub fn with_state(deps: SessionDeps, state: SessionState, currency: Currency) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state,
            currency,
            screen: Screen::Home,
            checkout: CheckoutOrchestrator::new(),
            watchlist: Watchlist::new(),
            results: None,
            search: deps.search,
            settlement: deps.settlement,
            persister: SessionPersister::new(deps.store),
            rates: deps.rates,
            events,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Read access
    // ════════════════════════════════════════════════════════════════════════════

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tier(&self) -> SubscriptionTier {
        self.state.tier()
    }

    pub fn search_usage(&self) -> u32 {
        self.state.search_usage()
    }

    pub fn language(&self) -> &LanguageCode {
        self.state.language()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn gate_decision(&self) -> GateDecision {
        self.state.gate_decision()
    }

    pub fn results(&self) -> Option<&ComparisonData> {
        self.results.as_ref()
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn checkout_stage(&self) -> CheckoutStage {
        self.checkout.stage()
    }

    pub fn payment_session(&self) -> Option<&PaymentSession> {
        self.checkout.session()
    }

    /// Receives every checkout event emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<CheckoutEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the current rate table.
    pub async fn rate_table(&self) -> RateTable {
        self.rates.read().await.clone()
    }

    /// Formats a USD amount in the display currency.
    pub async fn format_price(&self, amount_usd: f64) -> String {
        let rates = self.rates.read().await;
        format_price(amount_usd, self.currency, &rates)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Preferences and navigation
    // ════════════════════════════════════════════════════════════════════════════

    pub async fn set_language(&mut self, language: LanguageCode) {
        if self.state.set_language(language) {
            tracing::debug!(language = %self.state.language(), "Language changed");
            self.persister.persist_language(self.state.language()).await;
        }
    }

    /// Changes the display currency for this run. Not persisted.
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Navigates to a non-checkout screen.
    ///
    /// Checkout screens are entered through the checkout operations.
    pub fn navigate(&mut self, screen: Screen) -> Result<(), CheckoutError> {
        if screen.is_checkout() {
            return Err(CheckoutError::invalid_state(
                self.checkout.stage().to_string(),
                "navigate directly to a checkout screen",
            ));
        }
        self.screen = screen;
        Ok(())
    }

    pub fn toggle_watch(&mut self, product_id: &ProductId) -> bool {
        self.watchlist.toggle(product_id)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Search
    // ════════════════════════════════════════════════════════════════════════════

    pub async fn search(&mut self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Ignored;
        }

        if !self.state.can_search() {
            let decision = self.state.gate_decision();
            tracing::info!(
                tier = %self.state.tier(),
                usage = self.state.search_usage(),
                "Search gated, offering upgrade"
            );
            self.screen = Screen::Upgrade;
            return SearchOutcome::Gated(decision);
        }

        let raw = match self.search.search(query).await {
            Ok(raw) => raw,
            Err(e) => return self.search_unavailable(e),
        };
        let data = match normalize_response(query, raw) {
            Ok(data) => data,
            Err(e) => return self.search_unavailable(e),
        };

        let entitlement = tier_definition(self.state.tier()).retailer_count;
        let ComparisonData { product, listings } = data;
        let data = ComparisonData {
            product,
            listings: rank(listings, entitlement),
        };

        if self.state.record_search() {
            self.persister
                .persist_search_usage(self.state.search_usage())
                .await;
        }
        tracing::info!(
            provider = self.search.provider_name(),
            listings = data.listings.len(),
            usage = self.state.search_usage(),
            "Search completed"
        );

        self.screen = Screen::Results;
        self.results = Some(data.clone());
        SearchOutcome::Found(data)
    }

    pub async fn search_voice(&mut self, transcript: &VoiceTranscript) -> SearchOutcome {
        self.search(transcript.as_query()).await
    }

    fn search_unavailable(&self, error: SearchError) -> SearchOutcome {
        tracing::warn!(
            provider = self.search.provider_name(),
            error = %error,
            "Search unavailable"
        );
        SearchOutcome::Unavailable(error)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Checkout
    // ════════════════════════════════════════════════════════════════════════════

    /// Opens the upgrade offer without selecting a plan.
    pub fn open_upgrade(&mut self) {
        self.screen = Screen::Upgrade;
    }

    pub fn select_plan(&mut self, plan: SubscriptionTier) -> Result<(), CheckoutError> {
        self.checkout.select_plan(plan, self.state.tier())?;
        self.screen = Screen::Upgrade;
        Ok(())
    }

    pub fn choose_method(
        &mut self,
        method: PaymentMethod,
    ) -> Result<&PaymentSession, CheckoutError> {
        self.checkout.choose_method(method)?;
        self.screen = Screen::for_method(method);
        self.checkout.session().ok_or(CheckoutError::NoPendingPlan)
    }

    pub fn update_card_input(&mut self, input: CardInput) -> Result<CardBrand, CheckoutError> {
        self.checkout.update_card_input(input)
    }

    pub fn select_crypto(&mut self, asset: CryptoAssetId) -> Result<f64, CheckoutError> {
        self.checkout.select_crypto(asset)
    }

    pub fn select_bank(&mut self, bank: &str) -> Result<(), CheckoutError> {
        self.checkout.select_bank(bank)
    }

    pub async fn submit_card(&mut self) -> Result<CheckoutOutcome, CheckoutError> {
        self.checkout.submit_card()?;
        self.run_settlement().await
    }

    pub async fn confirm_crypto_transfer(&mut self) -> Result<CheckoutOutcome, CheckoutError> {
        self.checkout.confirm_crypto_transfer()?;
        self.run_settlement().await
    }

    pub async fn proceed_ozow(&mut self) -> Result<CheckoutOutcome, CheckoutError> {
        self.checkout.proceed_ozow()?;
        self.run_settlement().await
    }

    pub async fn mark_eft_paid(&mut self) -> Result<CheckoutOutcome, CheckoutError> {
        let event = self.checkout.mark_eft_paid(self.state.tier())?;
        self.apply_commit(event).await
    }

    /// Abandons checkout and returns home. No tier or usage change.
    pub fn cancel_checkout(&mut self) -> Result<(), CheckoutError> {
        if let Some(event) = self.checkout.cancel()? {
            self.publish(event);
        }
        self.screen = Screen::Home;
        Ok(())
    }

    /// Fails the running settlement and returns to the upgrade offer.
    ///
    /// The plan stays selected so another method can be chosen.
    pub fn fail_checkout(
        &mut self,
        reason: impl Into<String>,
    ) -> Result<CheckoutEvent, CheckoutError> {
        let event = self.checkout.fail(reason)?;
        self.screen = Screen::Upgrade;
        self.publish(event.clone());
        Ok(event)
    }

    async fn run_settlement(&mut self) -> Result<CheckoutOutcome, CheckoutError> {
        let mut guard = SettlementGuard {
            session: self,
            armed: true,
        };
        let outcome = guard.session.drive_settlement().await;
        guard.armed = false;
        outcome
    }

    /// Awaits each in-flight phase, then commits.
    async fn drive_settlement(&mut self) -> Result<CheckoutOutcome, CheckoutError> {
        loop {
            let step = match self.checkout.session() {
                Some(session) if session.phase().is_in_flight() => {
                    SettlementStep::new(session.method(), session.phase())
                }
                _ => break,
            };

            if let Err(e) = self.settlement.settle(step).await {
                let event = self.fail_checkout(e.to_string())?;
                return Ok(CheckoutOutcome::Failed(event));
            }
            self.checkout.advance()?;
        }

        let method = self
            .checkout
            .session()
            .map(|s| s.method())
            .ok_or(CheckoutError::NoPendingPlan)?;
        self.settlement.acknowledge(method).await;

        let event = self
            .checkout
            .commit(self.state.tier())?
            .ok_or(CheckoutError::NoPendingPlan)?;
        self.apply_commit(event).await
    }

    /// Cleans up after a settlement run whose future was dropped.
    ///
    /// A step still in flight fails the session. A payment that already
    /// settled is committed, with the tier write handed to the runtime.
    fn abandon_settlement(&mut self) {
        if self.checkout.is_in_flight() {
            if let Err(e) = self.fail_checkout(INTERRUPTED_REASON) {
                tracing::warn!(error = %e, "Could not fail interrupted settlement");
            }
            return;
        }

        let event = match self.checkout.commit(self.state.tier()) {
            Ok(Some(event)) => event,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "Could not commit interrupted settlement");
                return;
            }
        };
        if let CheckoutEvent::Committed { tier, .. } = &event {
            if let Err(e) = self.state.upgrade_tier(*tier) {
                tracing::warn!(error = %e, "Could not apply interrupted commit");
                return;
            }
            let persister = self.persister.clone();
            let tier = *tier;
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move { persister.persist_tier(tier).await });
                }
                Err(_) => tracing::warn!(tier = %tier, "No runtime to persist interrupted commit"),
            }
        }

        self.screen = Screen::Home;
        self.publish(event);
    }

    async fn apply_commit(
        &mut self,
        event: CheckoutEvent,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if let CheckoutEvent::Committed { tier, .. } = &event {
            self.state.upgrade_tier(*tier)?;
            self.persister.persist_tier(self.state.tier()).await;
        }

        self.screen = Screen::Home;
        self.publish(event.clone());
        Ok(CheckoutOutcome::Committed(event))
    }

    fn publish(&self, event: CheckoutEvent) {
        tracing::debug!(event_type = event.event_type(), "Checkout event");
        // No receivers is fine.
        let _ = self.events.send(event);
    }
}

/// Runs [`ShopSession::abandon_settlement`] if a settlement run is dropped
/// before it finishes.
struct SettlementGuard<'a> {
    session: &'a mut ShopSession,
    armed: bool,
}

impl Drop for SettlementGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session.abandon_settlement();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::adapters::{
        InMemoryKeyValueStore, MockSearchProvider, ScriptedSettlement, SimulatedSettlement,
    };
    use crate::application::bootstrap::{SEARCH_COUNT_KEY, TIER_KEY};
    use crate::application::rates::default_shared_rates;
    use crate::domain::checkout::PaymentPhase;
    use crate::domain::search::{RawListing, RawProduct, RawSearchResponse};
    use crate::ports::SettlementError;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn listing(store: &str, price: f64) -> RawListing {
        RawListing {
            store_name: Some(store.to_string()),
            price: Some(price),
            shipping_days: Some(3.0),
            shipping_cost: Some(0.0),
            rating: Some(4.5),
            review_count: Some(10.0),
            return_policy: None,
        }
    }

    fn response_with(count: usize) -> RawSearchResponse {
        RawSearchResponse {
            product: Some(RawProduct {
                name: Some("Kettle".to_string()),
                description: Some("Boils water".to_string()),
                image: None,
            }),
            listings: (0..count)
                .map(|i| listing(&format!("Store {}", i), 100.0 - i as f64))
                .collect(),
        }
    }

    struct Harness {
        session: ShopSession,
        search: MockSearchProvider,
        store: Arc<InMemoryKeyValueStore>,
        settlement: ScriptedSettlement,
    }

    fn harness(tier: SubscriptionTier, usage: u32, settlement: ScriptedSettlement) -> Harness {
        let search = MockSearchProvider::new().with_fallback(response_with(30));
        let store = Arc::new(InMemoryKeyValueStore::new());
        let deps = SessionDeps {
            search: Arc::new(search.clone()),
            store: store.clone(),
            settlement: Arc::new(settlement.clone()),
            rates: default_shared_rates(),
        };
        let state = SessionState::new(tier, usage, LanguageCode::default());
        Harness {
            session: ShopSession::with_state(deps, state, Currency::Usd),
            search,
            store,
            settlement,
        }
    }

    fn simulated_session(store: Arc<InMemoryKeyValueStore>) -> ShopSession {
        let deps = SessionDeps {
            search: Arc::new(MockSearchProvider::new().with_fallback(response_with(30))),
            store,
            settlement: Arc::new(SimulatedSettlement::default()),
            rates: default_shared_rates(),
        };
        ShopSession::with_state(deps, SessionState::default(), Currency::Usd)
    }

    fn complete_card() -> CardInput {
        CardInput::new("A Person", "4242 4242 4242 4242", "12/30", "123")
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Search
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn trial_search_is_ranked_truncated_and_counted() {
        let mut h = harness(SubscriptionTier::Trial, 0, ScriptedSettlement::new());

        let outcome = h.session.search("kettle").await;

        let SearchOutcome::Found(data) = outcome else {
            panic!("expected results");
        };
        assert_eq!(data.listings.len(), 10);
        assert!(data
            .listings
            .windows(2)
            .all(|w| w[0].total_cost() <= w[1].total_cost()));
        assert_eq!(h.session.search_usage(), 1);
        assert_eq!(h.session.screen(), Screen::Results);
        assert_eq!(
            h.store.snapshot().await.get(SEARCH_COUNT_KEY).map(String::as_str),
            Some("1")
        );
    }

    #[tokio::test]
    async fn elite_search_sees_all_retailers_without_counting() {
        let mut h = harness(SubscriptionTier::Elite, 0, ScriptedSettlement::new());

        let SearchOutcome::Found(data) = h.session.search("kettle").await else {
            panic!("expected results");
        };

        assert_eq!(data.listings.len(), 30);
        assert_eq!(h.session.search_usage(), 0);
        assert!(h.store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn gated_search_never_reaches_provider() {
        let mut h = harness(SubscriptionTier::Trial, 5, ScriptedSettlement::new());

        let outcome = h.session.search("kettle").await;

        assert!(matches!(outcome, SearchOutcome::Gated(d) if d.locked));
        assert_eq!(h.search.call_count(), 0);
        assert_eq!(h.session.search_usage(), 5);
        assert_eq!(h.session.screen(), Screen::Upgrade);
    }

    #[tokio::test]
    async fn failed_search_does_not_count() {
        let mut h = harness(SubscriptionTier::Trial, 2, ScriptedSettlement::new());
        let _ = h.search.clone().with_error(SearchError::unavailable("down"));

        let outcome = h.session.search("kettle").await;

        assert!(matches!(outcome, SearchOutcome::Unavailable(_)));
        assert_eq!(h.session.search_usage(), 2);
        assert_eq!(h.session.screen(), Screen::Home);
        assert!(h.store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_response_does_not_count() {
        let mut h = harness(SubscriptionTier::Trial, 0, ScriptedSettlement::new());
        let _ = h.search.clone().with_response(RawSearchResponse::default());

        let outcome = h.session.search("kettle").await;

        assert!(matches!(
            outcome,
            SearchOutcome::Unavailable(SearchError::MalformedResponse(_))
        ));
        assert_eq!(h.session.search_usage(), 0);
    }

    #[tokio::test]
    async fn blank_query_is_ignored() {
        let mut h = harness(SubscriptionTier::Trial, 0, ScriptedSettlement::new());
        assert!(matches!(h.session.search("   ").await, SearchOutcome::Ignored));
        assert_eq!(h.search.call_count(), 0);
        assert_eq!(h.session.search_usage(), 0);
    }

    #[tokio::test]
    async fn voice_transcript_is_searched_like_text() {
        let mut h = harness(SubscriptionTier::Starter, 0, ScriptedSettlement::new());
        let outcome = h
            .session
            .search_voice(&VoiceTranscript::new("red kettle."))
            .await;
        assert!(matches!(outcome, SearchOutcome::Found(_)));
        assert_eq!(h.search.calls(), vec!["red kettle"]);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Checkout
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn card_checkout_commits_and_persists_tier() {
        let mut h = harness(SubscriptionTier::Trial, 5, ScriptedSettlement::new());
        let mut events = h.session.subscribe();

        h.session.select_plan(SubscriptionTier::Explorer).unwrap();
        h.session.choose_method(PaymentMethod::Card).unwrap();
        assert_eq!(h.session.screen(), Screen::CardPay);
        h.session.update_card_input(complete_card()).unwrap();

        let outcome = h.session.submit_card().await.unwrap();

        assert!(matches!(outcome, CheckoutOutcome::Committed(_)));
        assert_eq!(h.session.tier(), SubscriptionTier::Explorer);
        assert_eq!(h.session.search_usage(), 5);
        assert!(h.session.state().can_search());
        assert_eq!(h.session.screen(), Screen::Home);
        assert_eq!(
            h.store.snapshot().await.get(TIER_KEY).map(String::as_str),
            Some("EXPLORER")
        );
        assert!(matches!(
            events.try_recv(),
            Ok(CheckoutEvent::Committed {
                tier: SubscriptionTier::Explorer,
                ..
            })
        ));
        assert!(events.try_recv().is_err());
        assert_eq!(
            h.settlement.steps(),
            vec![SettlementStep::new(PaymentMethod::Card, PaymentPhase::Processing)]
        );
    }

    #[tokio::test]
    async fn crypto_checkout_awaits_both_phases_then_acknowledges() {
        let mut h = harness(SubscriptionTier::Trial, 0, ScriptedSettlement::new());
        h.session.select_plan(SubscriptionTier::Starter).unwrap();
        h.session.choose_method(PaymentMethod::Crypto).unwrap();

        h.session.confirm_crypto_transfer().await.unwrap();

        let phases: Vec<PaymentPhase> = h.settlement.steps().iter().map(|s| s.phase).collect();
        assert_eq!(phases, vec![PaymentPhase::Waiting, PaymentPhase::Confirming]);
        assert_eq!(h.settlement.acknowledged(), vec![PaymentMethod::Crypto]);
        assert_eq!(h.session.tier(), SubscriptionTier::Starter);
    }

    #[tokio::test]
    async fn settlement_failure_returns_to_method_selection() {
        let settlement = ScriptedSettlement::failing_at(
            PaymentPhase::Waiting,
            SettlementError::Declined("bank rejected".to_string()),
        );
        let mut h = harness(SubscriptionTier::Trial, 3, settlement);
        let mut events = h.session.subscribe();
        h.session.select_plan(SubscriptionTier::Elite).unwrap();
        h.session.choose_method(PaymentMethod::Ozow).unwrap();
        h.session.select_bank("FNB").unwrap();

        let outcome = h.session.proceed_ozow().await.unwrap();

        assert!(matches!(outcome, CheckoutOutcome::Failed(_)));
        assert_eq!(h.session.tier(), SubscriptionTier::Trial);
        assert_eq!(h.session.search_usage(), 3);
        assert_eq!(
            h.session.checkout_stage(),
            CheckoutStage::SelectingMethod {
                plan: SubscriptionTier::Elite
            }
        );
        assert_eq!(h.session.screen(), Screen::Upgrade);
        assert!(matches!(events.try_recv(), Ok(CheckoutEvent::Failed { .. })));
        assert!(h.store.snapshot().await.get(TIER_KEY).is_none());
    }

    #[tokio::test]
    async fn cancel_leaves_tier_and_store_untouched() {
        let mut h = harness(SubscriptionTier::Trial, 1, ScriptedSettlement::new());
        h.session.select_plan(SubscriptionTier::Elite).unwrap();
        h.session.choose_method(PaymentMethod::Card).unwrap();
        h.session.update_card_input(complete_card()).unwrap();

        h.session.cancel_checkout().unwrap();

        assert_eq!(h.session.tier(), SubscriptionTier::Trial);
        assert_eq!(h.session.checkout_stage(), CheckoutStage::Idle);
        assert!(h.session.payment_session().is_none());
        assert_eq!(h.session.screen(), Screen::Home);
        assert!(h.store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn eft_marked_paid_commits() {
        let mut h = harness(SubscriptionTier::Starter, 0, ScriptedSettlement::new());
        h.session.select_plan(SubscriptionTier::Elite).unwrap();
        let reference = h
            .session
            .choose_method(PaymentMethod::ManualEft)
            .unwrap()
            .eft_reference()
            .cloned();
        assert!(reference.is_some());

        h.session.mark_eft_paid().await.unwrap();

        assert_eq!(h.session.tier(), SubscriptionTier::Elite);
        assert!(h.settlement.steps().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_card_settlement_fails_back_to_method_selection() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut session = simulated_session(store.clone());
        let mut events = session.subscribe();
        session.select_plan(SubscriptionTier::Explorer).unwrap();
        session.choose_method(PaymentMethod::Card).unwrap();
        session.update_card_input(complete_card()).unwrap();

        let result =
            tokio::time::timeout(Duration::from_millis(100), session.submit_card()).await;
        assert!(result.is_err());
        tokio::time::advance(Duration::from_secs(3600)).await;

        assert_eq!(
            session.checkout_stage(),
            CheckoutStage::SelectingMethod {
                plan: SubscriptionTier::Explorer
            }
        );
        assert_eq!(session.screen(), Screen::Upgrade);
        assert_eq!(session.tier(), SubscriptionTier::Trial);
        assert!(matches!(
            events.try_recv(),
            Ok(CheckoutEvent::Failed {
                method: PaymentMethod::Card,
                ref reason,
                ..
            }) if reason == INTERRUPTED_REASON
        ));

        // The flow accepts new input again.
        session.choose_method(PaymentMethod::ManualEft).unwrap();
        session.cancel_checkout().unwrap();
        assert_eq!(session.checkout_stage(), CheckoutStage::Idle);
        assert!(store.snapshot().await.get(TIER_KEY).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_success_hold_still_commits_settled_payment() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut session = simulated_session(store.clone());
        let mut events = session.subscribe();
        session.select_plan(SubscriptionTier::Starter).unwrap();
        session.choose_method(PaymentMethod::Crypto).unwrap();

        // Both crypto phases take 3s in total; the success hold runs past 3.5s.
        let result = tokio::time::timeout(
            Duration::from_millis(3500),
            session.confirm_crypto_transfer(),
        )
        .await;
        assert!(result.is_err());

        assert_eq!(session.tier(), SubscriptionTier::Starter);
        assert_eq!(session.checkout_stage(), CheckoutStage::Idle);
        assert_eq!(session.screen(), Screen::Home);
        assert!(matches!(
            events.try_recv(),
            Ok(CheckoutEvent::Committed {
                tier: SubscriptionTier::Starter,
                method: PaymentMethod::Crypto,
                ..
            })
        ));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(
            store.snapshot().await.get(TIER_KEY).map(String::as_str),
            Some("STARTER")
        );
    }

    #[tokio::test]
    async fn fail_checkout_requires_running_settlement() {
        let mut h = harness(SubscriptionTier::Trial, 0, ScriptedSettlement::new());
        h.session.select_plan(SubscriptionTier::Starter).unwrap();

        assert!(matches!(
            h.session.fail_checkout("gave up"),
            Err(CheckoutError::InvalidState { .. })
        ));
        assert_eq!(
            h.session.checkout_stage(),
            CheckoutStage::SelectingMethod {
                plan: SubscriptionTier::Starter
            }
        );
    }

    #[tokio::test]
    async fn navigate_refuses_checkout_screens() {
        let mut h = harness(SubscriptionTier::Trial, 0, ScriptedSettlement::new());
        assert!(h.session.navigate(Screen::CardPay).is_err());
        h.session.navigate(Screen::Watchlist).unwrap();
        assert_eq!(h.session.screen(), Screen::Watchlist);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Preferences
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn language_change_is_persisted() {
        let mut h = harness(SubscriptionTier::Trial, 0, ScriptedSettlement::new());
        h.session.set_language(LanguageCode::new("ar").unwrap()).await;

        assert!(h.session.language().is_rtl());
        assert_eq!(
            h.store
                .snapshot()
                .await
                .get(crate::application::bootstrap::LANGUAGE_KEY)
                .map(String::as_str),
            Some("ar")
        );
    }

    #[tokio::test]
    async fn prices_format_in_display_currency() {
        let mut h = harness(SubscriptionTier::Trial, 0, ScriptedSettlement::new());
        h.session.set_currency(Currency::Jpy);
        assert_eq!(h.session.format_price(10.0).await, "¥1502");
    }

    #[tokio::test]
    async fn toggle_watch_tracks_products() {
        let mut h = harness(SubscriptionTier::Trial, 0, ScriptedSettlement::new());
        let id = ProductId::new("p-1").unwrap();
        assert!(h.session.toggle_watch(&id));
        assert!(h.session.watchlist().contains(&id));
        assert!(!h.session.toggle_watch(&id));
    }
}

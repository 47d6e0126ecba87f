//! One analysis screen.
//!
//! Owns the persisted [`ViewPreferences`], the last fetched [`ScreenData`]
//! and the drill-down controller. Filter changes refetch and reset the
//! drill-down; pinning an entity only rebuilds from the cached data.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::CostApi;
use crate::drill::DrillDownController;
use crate::loader::{DashboardLoader, ScreenData};
use costlens_core::calendar::YearMonth;
use costlens_core::drilldown::{DrillContext, DrillTarget};
use costlens_core::preferences::{PreferencesStore, ViewPreferences, load_or_default};
use costlens_core::ranking::SelectionChange;
use costlens_core::report::{DashboardBuilder, DashboardView, ScreenState};
use costlens_shared::types::ViewMode;

/// State and actions of one analysis screen.
pub struct Screen {
    loader: DashboardLoader,
    builder: DashboardBuilder,
    store: Arc<dyn PreferencesStore>,
    user_key: String,
    preferences: ViewPreferences,
    today: YearMonth,
    data: Option<ScreenData>,
    view: watch::Sender<ScreenState<DashboardView>>,
    drill: DrillDownController,
}

impl Screen {
    /// Opens the screen with the preferences stored for `user_key`.
    ///
    /// Nothing is fetched until [`Screen::refresh`].
    pub async fn open(
        api: Arc<dyn CostApi>,
        store: Arc<dyn PreferencesStore>,
        user_key: impl Into<String>,
        builder: DashboardBuilder,
        today: YearMonth,
    ) -> Self {
        let user_key = user_key.into();
        let preferences = load_or_default(store.as_ref(), &user_key).await;
        let (view, _) = watch::channel(ScreenState::Loading);

        Self {
            loader: DashboardLoader::new(Arc::clone(&api)),
            drill: DrillDownController::new(api),
            builder,
            store,
            user_key,
            preferences,
            today,
            data: None,
            view,
        }
    }

    /// Current preferences.
    #[must_use]
    pub fn preferences(&self) -> &ViewPreferences {
        &self.preferences
    }

    /// Month in view.
    #[must_use]
    pub fn period(&self) -> YearMonth {
        self.preferences.period(self.today)
    }

    /// Subscribes to the screen state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScreenState<DashboardView>> {
        self.view.subscribe()
    }

    /// Current screen state.
    #[must_use]
    pub fn state(&self) -> ScreenState<DashboardView> {
        self.view.borrow().clone()
    }

    /// The drill-down controller of this screen.
    #[must_use]
    pub fn drill(&self) -> &DrillDownController {
        &self.drill
    }

    /// Fetches the data for the current filters and publishes the view.
    pub async fn refresh(&mut self) -> ScreenState<DashboardView> {
        self.view.send_replace(ScreenState::Loading);

        let data = self
            .loader
            .fetch(self.preferences.mode, self.period(), self.preferences.supplier_monthly)
            .await;
        self.data = Some(data);
        self.rebuild()
    }

    /// Switches mode and month: persists them, clears the drill-down and refetches.
    pub async fn change_filters(&mut self, mode: ViewMode, period: YearMonth) -> ScreenState<DashboardView> {
        let supplier_monthly = self.preferences.supplier_monthly;
        self.apply_filters(mode, period, supplier_monthly).await
    }

    /// Switches the supplier screen between year and month scope.
    pub async fn set_supplier_monthly(&mut self, monthly: bool) -> ScreenState<DashboardView> {
        let (mode, period) = (self.preferences.mode, self.period());
        self.apply_filters(mode, period, monthly).await
    }

    /// Sets every filter at once and fetches a single time.
    pub async fn apply_filters(
        &mut self,
        mode: ViewMode,
        period: YearMonth,
        supplier_monthly: bool,
    ) -> ScreenState<DashboardView> {
        debug!(%mode, %period, supplier_monthly, "filters changed");
        self.preferences.set_filters(mode, period);
        self.preferences.supplier_monthly = supplier_monthly;
        self.persist().await;
        self.drill.reset().await;
        self.refresh().await
    }

    /// Pins or unpins a chart entity of the current dimension and rebuilds
    /// from the cached data.
    pub async fn toggle_entity(&mut self, entity: &str) -> SelectionChange {
        let mode = self.preferences.mode;
        let change = self.preferences.selection_mut(mode).toggle(entity);
        if change != SelectionChange::Ignored {
            self.persist().await;
            self.rebuild();
        }
        change
    }

    /// Unpins every entity of the current dimension.
    pub async fn clear_selection(&mut self) {
        let mode = self.preferences.mode;
        self.preferences.selection_mut(mode).clear();
        self.persist().await;
        self.rebuild();
    }

    /// Drills into `entity` within the current filters.
    pub async fn select_detail(&self, entity: &str) -> Option<JoinHandle<()>> {
        self.drill.select(entity, self.drill_context()).await
    }

    fn drill_context(&self) -> DrillContext {
        let period = self.period();
        let target = match self.preferences.mode {
            ViewMode::Suppliers => DrillTarget::Supplier,
            ViewMode::Annual | ViewMode::Monthly | ViewMode::Daily => DrillTarget::Sector,
        };
        let whole_year = match self.preferences.mode {
            ViewMode::Annual => true,
            ViewMode::Suppliers => !self.preferences.supplier_monthly,
            ViewMode::Monthly | ViewMode::Daily => false,
        };

        if whole_year {
            DrillContext::year(target, period.year())
        } else {
            DrillContext::month(target, period.year(), period.month())
        }
    }

    fn rebuild(&self) -> ScreenState<DashboardView> {
        let state = match &self.data {
            Some(data) => ScreenState::Ready(data.build(
                &self.builder,
                Some(self.preferences.selection(self.preferences.mode)),
                self.period(),
            )),
            None => ScreenState::Loading,
        };
        self.view.send_replace(state.clone());
        state
    }

    async fn persist(&self) {
        if let Err(err) = self.store.save(&self.user_key, &self.preferences).await {
            warn!(user_key = %self.user_key, error = %err, "could not save preferences");
        }
    }
}

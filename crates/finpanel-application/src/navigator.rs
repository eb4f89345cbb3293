//! Route switching and view mounting.
//!
//! The navigator holds the current path and the mounted view for it. A
//! route change cancels the outgoing panel before it is dropped, so a late
//! reply can never reach a view that is gone.

use std::sync::Arc;

use finpanel_core::api::FinanceApi;
use finpanel_core::error::Result;
use finpanel_core::route::{Resolution, Route, RouteTable, ServiceChoice};
use finpanel_core::session::LoginMethod;

use crate::home::HomeView;
use crate::panels::{AdvisorPanel, LoanFormPanel, StockAnalysisPanel};
use crate::session_gate::SessionGate;

/// The view mounted for the current route.
#[derive(Clone)]
pub enum ActiveView {
    Login,
    Home(HomeView),
    Advisor(AdvisorPanel),
    Analysis(StockAnalysisPanel),
    Loan(LoanFormPanel),
}

impl ActiveView {
    fn mount(route: Route, api: &Arc<dyn FinanceApi>) -> Self {
        match route {
            Route::Login => ActiveView::Login,
            Route::Home => ActiveView::Home(HomeView::new()),
            Route::Advisor => ActiveView::Advisor(AdvisorPanel::new(api.clone())),
            Route::Analysis => ActiveView::Analysis(StockAnalysisPanel::new(api.clone())),
            Route::Loan => ActiveView::Loan(LoanFormPanel::new(api.clone())),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            ActiveView::Login => Route::Login,
            ActiveView::Home(_) => Route::Home,
            ActiveView::Advisor(_) => Route::Advisor,
            ActiveView::Analysis(_) => Route::Analysis,
            ActiveView::Loan(_) => Route::Loan,
        }
    }

    fn unmount(&self) {
        match self {
            ActiveView::Advisor(panel) => panel.cancel(),
            ActiveView::Analysis(panel) => panel.cancel(),
            ActiveView::Loan(panel) => panel.cancel(),
            ActiveView::Login | ActiveView::Home(_) => {}
        }
    }
}

pub struct Navigator {
    gate: Arc<SessionGate>,
    api: Arc<dyn FinanceApi>,
    resolution: Resolution,
    view: ActiveView,
}

impl Navigator {
    /// Starts at `/` under the gate's current flag.
    pub async fn new(gate: Arc<SessionGate>, api: Arc<dyn FinanceApi>) -> Self {
        let resolution = RouteTable::resolve("/", gate.is_authenticated().await);
        let view = ActiveView::mount(resolution.route, &api);
        Self {
            gate,
            api,
            resolution,
            view,
        }
    }

    pub fn current_path(&self) -> &'static str {
        self.resolution.path
    }

    pub fn current_route(&self) -> Route {
        self.resolution.route
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn gate(&self) -> &Arc<SessionGate> {
        &self.gate
    }

    /// Resolves `path` and mounts its view. Staying on the same route keeps
    /// the mounted view and its state.
    pub async fn navigate(&mut self, path: &str) -> Resolution {
        let authenticated = self.gate.is_authenticated().await;
        let resolution = RouteTable::resolve(path, authenticated);

        if resolution.redirected {
            tracing::debug!(requested = path, to = resolution.path, "Redirected");
        }

        if resolution.route != self.view.route() {
            tracing::debug!(from = %self.view.route(), to = %resolution.route, "Switching view");
            self.view.unmount();
            self.view = ActiveView::mount(resolution.route, &self.api);
        }

        self.resolution = resolution.clone();
        resolution
    }

    /// The tool switcher shown on each tool view.
    pub async fn switch(&mut self, choice: ServiceChoice) -> Resolution {
        self.navigate(choice.route().path()).await
    }

    /// Logs in and re-resolves the current path.
    pub async fn login(&mut self, method: &LoginMethod) -> Result<Resolution> {
        self.gate.login(method).await?;
        let path = self.resolution.path;
        Ok(self.navigate(path).await)
    }

    pub async fn logout(&mut self) -> Result<Resolution> {
        self.gate.logout().await?;
        let path = self.resolution.path;
        Ok(self.navigate(path).await)
    }
}

//! Route table: which view a path resolves to under the current session flag.
//!
//! Two states only. Unauthenticated, every path lands on the login view at
//! `/`. Authenticated, the four tool paths are reachable and anything else
//! redirects to home.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROOT_PATH: &str = "/";
pub const ADVISOR_PATH: &str = "/financial-advisor";
pub const ANALYSIS_PATH: &str = "/analysis";
pub const LOAN_PATH: &str = "/loan-approver";

/// A logical destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    Home,
    Advisor,
    Analysis,
    Loan,
}

impl Route {
    /// Canonical path for the route. Login and home share `/`.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login | Route::Home => ROOT_PATH,
            Route::Advisor => ADVISOR_PATH,
            Route::Analysis => ANALYSIS_PATH,
            Route::Loan => LOAN_PATH,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign In",
            Route::Home => "Smart Finance Solutions",
            Route::Advisor => "Financial Advisor",
            Route::Analysis => "Stock Past Analysis",
            Route::Loan => "Automatic Loan Approver",
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Outcome of resolving a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub route: Route,
    /// The path the view is actually shown under.
    pub path: &'static str,
    /// True when the requested path was not the one shown.
    pub redirected: bool,
}

/// Static mapping of paths to routes, conditioned on the session flag.
pub struct RouteTable;

impl RouteTable {
    pub fn resolve(requested: &str, authenticated: bool) -> Resolution {
        let normalized = normalize_path(requested);

        if !authenticated {
            return Resolution {
                route: Route::Login,
                path: ROOT_PATH,
                redirected: normalized != ROOT_PATH,
            };
        }

        match Self::match_authenticated(&normalized) {
            Some(route) => Resolution {
                route,
                path: route.path(),
                redirected: false,
            },
            None => Resolution {
                route: Route::Home,
                path: ROOT_PATH,
                redirected: true,
            },
        }
    }

    fn match_authenticated(path: &str) -> Option<Route> {
        [Route::Home, Route::Advisor, Route::Analysis, Route::Loan]
            .into_iter()
            .find(|route| route.path().eq_ignore_ascii_case(path))
    }
}

/// Drops query and fragment, forces a leading slash, trims trailing slashes.
pub fn normalize_path(raw: &str) -> String {
    let without_fragment = raw.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    let trimmed = without_query.trim();

    let mut path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };

    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    path
}

/// The tool switcher shown on every tool view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceChoice {
    Advisor,
    Analysis,
    Loan,
}

impl ServiceChoice {
    pub const ALL: [ServiceChoice; 3] = [
        ServiceChoice::Advisor,
        ServiceChoice::Analysis,
        ServiceChoice::Loan,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ServiceChoice::Advisor => "advisor",
            ServiceChoice::Analysis => "analysis",
            ServiceChoice::Loan => "loan",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            ServiceChoice::Advisor => Route::Advisor,
            ServiceChoice::Analysis => Route::Analysis,
            ServiceChoice::Loan => Route::Loan,
        }
    }

    pub fn for_route(route: Route) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.route() == route)
    }
}

impl FromStr for ServiceChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown service: {}", s))
    }
}

//! Navigation guard.
//!
//! Every view transition is checked against the route's metadata and the
//! credential's presence at the moment of the check. The decision itself is
//! a pure function so it can be tested without any front end.

use serde::Deserialize;
use tracing::debug;

use super::credential::CredentialStore;
use crate::domain::{AuthState, RouteDescriptor, RouteTable};

/// Route unauthenticated users are sent to.
pub const LOGIN_ROUTE: &str = "login";

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Continue to the requested route.
    Proceed,
    /// Go to the named route instead.
    RedirectTo(String),
    /// The destination is not in the route table.
    NotFound,
}

impl Decision {
    fn redirect(name: &str) -> Self {
        Self::RedirectTo(name.to_owned())
    }
}

/// Which routes are public, and whether signed-in users skip the landing page.
///
/// Exactly one policy is active per guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum GuardPolicy {
    /// A route is public iff its descriptor does not require auth.
    #[default]
    RequiresAuth,
    /// A route is public iff its name is listed. Authenticated users asking
    /// for `landing` are sent to `home`.
    PublicSet {
        #[serde(default = "default_public")]
        public: Vec<String>,
        #[serde(default = "default_landing")]
        landing: String,
        #[serde(default = "default_home")]
        home: String,
    },
}

fn default_public() -> Vec<String> {
    ["home", "login", "register", "about"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_landing() -> String {
    "home".into()
}

fn default_home() -> String {
    "bots".into()
}

impl GuardPolicy {
    /// `PublicSet` with its default members.
    #[must_use]
    pub fn public_set() -> Self {
        Self::PublicSet {
            public: default_public(),
            landing: default_landing(),
            home: default_home(),
        }
    }

    #[must_use]
    pub fn is_public(&self, route: &RouteDescriptor) -> bool {
        match self {
            Self::RequiresAuth => !route.requires_auth,
            Self::PublicSet { public, .. } => public.iter().any(|name| *name == route.name),
        }
    }
}

/// Decide whether navigating to `route` may proceed.
#[must_use]
pub fn decide(route: &RouteDescriptor, auth: AuthState, policy: &GuardPolicy) -> Decision {
    let public = policy.is_public(route);

    if let GuardPolicy::PublicSet { landing, home, .. } = policy {
        if public && auth.is_authenticated() && route.name == *landing {
            return Decision::redirect(home);
        }
    }

    if !public && !auth.is_authenticated() {
        return Decision::redirect(LOGIN_ROUTE);
    }

    Decision::Proceed
}

/// Runs [`decide`] against the live credential store.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    store: CredentialStore,
    routes: RouteTable,
    policy: GuardPolicy,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(store: CredentialStore, routes: RouteTable, policy: GuardPolicy) -> Self {
        Self {
            store,
            routes,
            policy,
        }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    #[must_use]
    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    /// Check navigation to a route by name.
    #[must_use]
    pub fn check(&self, name: &str) -> Decision {
        match self.routes.by_name(name) {
            Some(route) => self.check_route(route),
            None => Decision::NotFound,
        }
    }

    /// Check navigation to a concrete path such as `/bots/42`.
    #[must_use]
    pub fn check_path(&self, path: &str) -> Decision {
        match self.routes.resolve(path) {
            Some(route) => self.check_route(route),
            None => Decision::NotFound,
        }
    }

    fn check_route(&self, route: &RouteDescriptor) -> Decision {
        // Read fresh on every check; never cached between navigations.
        let auth = self.store.auth_state();
        let decision = decide(route, auth, &self.policy);
        debug!(route = %route.name, ?auth, ?decision, "Navigation checked");
        decision
    }
}

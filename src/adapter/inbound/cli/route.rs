//! Navigation guard checks for CLI views.

use serde_json::json;

use super::command::RouteArgs;
use super::output;
use crate::application::navigation::{Decision, NavigationGuard};
use crate::error::{Error, Result};

/// Pass the guard for the named view, or fail with the guard's decision.
pub fn enter(guard: &NavigationGuard, route: &str) -> Result<()> {
    match guard.check(route) {
        Decision::Proceed => Ok(()),
        Decision::RedirectTo(target) => Err(Error::NavigationDenied {
            route: route.to_owned(),
            redirect: Some(target),
        }),
        Decision::NotFound => Err(Error::NavigationDenied {
            route: route.to_owned(),
            redirect: None,
        }),
    }
}

/// Execute `botgate route <path>`: report the decision without acting on it.
pub fn execute(guard: &NavigationGuard, args: &RouteArgs) -> Result<()> {
    let decision = guard.check_path(&args.path);
    let view = guard
        .routes()
        .resolve(&args.path)
        .map(|route| route.view.clone());

    if output::is_json() {
        let (kind, target) = match &decision {
            Decision::Proceed => ("proceed", None),
            Decision::RedirectTo(target) => ("redirect", Some(target.as_str())),
            Decision::NotFound => ("not_found", None),
        };
        output::json_output(json!({
            "command": "route",
            "path": args.path,
            "view": view,
            "decision": kind,
            "redirect": target,
        }));
        return Ok(());
    }

    output::field("Path", &args.path);
    if let Some(view) = view {
        output::field("View", view);
    }
    match decision {
        Decision::Proceed => output::success("proceed"),
        Decision::RedirectTo(target) => {
            output::warning(&format!("redirect to {}", output::highlight(&target)));
        }
        Decision::NotFound => output::warning("no route matches this path"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::credential::CredentialStore;
    use crate::application::navigation::GuardPolicy;
    use crate::domain::{Credential, RouteTable};
    use crate::testkit::storage::MemoryCredentialStorage;

    fn guard() -> NavigationGuard {
        let store = CredentialStore::load(MemoryCredentialStorage::new()).unwrap();
        NavigationGuard::new(store, RouteTable::default(), GuardPolicy::default())
    }

    #[test]
    fn enter_public_view_without_credential() {
        assert!(enter(&guard(), "login").is_ok());
    }

    #[test]
    fn enter_protected_view_requires_credential() {
        let guard = guard();
        let err = enter(&guard, "marketplace").unwrap_err();
        assert!(matches!(
            err,
            Error::NavigationDenied { ref redirect, .. } if redirect.as_deref() == Some("login")
        ));
    }

    #[test]
    fn enter_unknown_view_is_not_found() {
        let err = enter(&guard(), "settings").unwrap_err();
        assert!(matches!(err, Error::NavigationDenied { redirect: None, .. }));
    }

    #[test]
    fn enter_succeeds_after_credential_is_set() {
        let store = CredentialStore::load(MemoryCredentialStorage::new()).unwrap();
        let guard = NavigationGuard::new(store.clone(), RouteTable::default(), GuardPolicy::default());

        store.set(Credential::new("tok"));

        assert!(enter(&guard, "terminal").is_ok());
    }
}

//! Handlers for `login`, `register`, `logout`, and `whoami`.

use dialoguer::Password;
use serde_json::json;

use super::command::{LoginArgs, RegisterArgs};
use super::{output, route};
use super::operator::Operator;
use crate::domain::RegisterRequest;
use crate::error::{ConfigError, Result};

fn password(given: Option<String>) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    if output::is_json() {
        return Err(ConfigError::MissingField { field: "password" }.into());
    }
    Ok(Password::new().with_prompt("Password").interact()?)
}

/// Execute `botgate login`.
pub async fn login(operator: &Operator, args: LoginArgs) -> Result<()> {
    route::enter(operator.guard(), "login")?;
    let password = password(args.password)?;

    let token = operator.session().login(&args.email, &password).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "login",
            "email": args.email,
            "token_type": token.token_type,
        }));
        return Ok(());
    }
    output::success(&format!("Signed in as {}", output::highlight(&args.email)));
    Ok(())
}

/// Execute `botgate register`.
pub async fn register(operator: &Operator, args: RegisterArgs) -> Result<()> {
    route::enter(operator.guard(), "register")?;
    let request = RegisterRequest {
        email: args.email,
        password: password(args.password)?,
        full_name: args.full_name,
    };

    let registered = operator.session().register(&request).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "register",
            "account": registered.account,
            "token_type": registered.token.token_type,
        }));
        return Ok(());
    }
    output::success(&format!(
        "Registered and signed in as {}",
        output::highlight(&request.email)
    ));
    Ok(())
}

/// Execute `botgate logout`.
pub fn logout(operator: &Operator) {
    operator.session().logout();

    if output::is_json() {
        output::json_output(json!({ "command": "logout" }));
        return;
    }
    output::success("Signed out");
}

/// Execute `botgate whoami`.
pub fn whoami(operator: &Operator) {
    let storage = operator.storage_path();
    let authenticated = operator.session().auth_state().is_authenticated();

    if output::is_json() {
        output::json_output(json!({
            "command": "whoami",
            "authenticated": authenticated,
            "storage": storage.display().to_string(),
        }));
        return;
    }

    output::field("Storage", storage.display());
    if authenticated {
        output::success("A session token is stored");
    } else {
        output::warning("Not signed in");
        output::hint("run `botgate login --email <email>`");
    }
}

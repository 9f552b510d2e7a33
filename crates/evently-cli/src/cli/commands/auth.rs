//! Session command handlers.

use anyhow::{Context, Result};
use evently_core::api::ApiClient;
use evently_core::config;
use evently_tui::features::auth::signup_form;

pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<()> {
    client.login(email, password).await.context("login")?;
    if client.session().is_authenticated() {
        println!("Logged in as {email}");
    } else {
        println!("Login accepted, but the server returned no token.");
    }
    Ok(())
}

pub async fn signup(client: &ApiClient, name: &str, email: &str, password: &str) -> Result<()> {
    client
        .signup(signup_form(name, email, password))
        .await
        .context("sign up")?;
    println!("Account created for {email}. Run `evently login` to continue.");
    Ok(())
}

pub async fn logout(client: &ApiClient) -> Result<()> {
    if !client.session().is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    // The local session is cleared even if the server call fails.
    client.logout().await.context("logout")?;
    println!("Logged out.");
    Ok(())
}

pub fn status(client: &ApiClient) {
    println!("Service: {}", client.base_url());
    println!("Session: {}", config::paths::session_path().display());
    if client.session().is_authenticated() {
        println!("Status:  logged in");
    } else {
        println!("Status:  logged out");
    }
}

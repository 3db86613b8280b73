//! Account commands.

use crate::context::AppContext;
use anyhow::Result;

/// Printed before auth calls: the hosted backend runs on a free tier that
/// may need tens of seconds to cold-start after idling.
fn cold_start_hint() {
    eprintln!("Contacting API (a sleeping server may take ~40s to wake)...");
}

pub async fn register(ctx: &AppContext, username: &str, email: &str, password: &str) -> Result<()> {
    cold_start_hint();
    ctx.auth.register(username, email, password).await?;
    println!("Account created. Run `studypad login` to sign in.");
    Ok(())
}

pub async fn login(ctx: &AppContext, username: &str, password: &str) -> Result<()> {
    cold_start_hint();
    ctx.auth.login(username, password).await?;
    println!("Logged in.");
    Ok(())
}

pub fn logout(ctx: &AppContext) {
    ctx.auth.logout();
    println!("Logged out.");
}

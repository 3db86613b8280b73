//! Subtopic commands.

use crate::context::AppContext;
use crate::terminal::prompt_confirm;
use anyhow::Result;

pub async fn list(ctx: &AppContext) -> Result<()> {
    for sub in ctx.client.subtopics().await? {
        println!("[{}] (unit {}) {}", sub.id, sub.unit, sub.title);
    }
    Ok(())
}

/// Shows the server-side copy. For the draft-aware view use `note pull`.
pub async fn show(ctx: &AppContext, id: &str) -> Result<()> {
    let sub = ctx.client.subtopic_detail(id).await?;
    println!("== {} ==", sub.title);
    println!("{}", sub.notes);
    Ok(())
}

pub async fn add(ctx: &AppContext, unit: u64, title: &str) -> Result<()> {
    let sub = ctx.library.create_subtopic(unit, title).await?;
    println!("Created subtopic [{}] {}", sub.id, sub.title);
    Ok(())
}

pub async fn rm(ctx: &AppContext, id: &str, yes: bool) -> Result<()> {
    if !yes && !prompt_confirm("Delete this subtopic?") {
        return Ok(());
    }
    ctx.library.delete_subtopic(id).await?;
    println!("Deleted subtopic [{id}]");
    Ok(())
}

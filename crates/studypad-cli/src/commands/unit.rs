//! Unit commands.

use crate::context::AppContext;
use crate::terminal::prompt_confirm;
use anyhow::Result;

pub async fn list(ctx: &AppContext) -> Result<()> {
    let overview = ctx.library.overview().await?;
    if overview.is_empty() {
        println!("No units yet. Create one with `studypad unit add <name>`.");
        return Ok(());
    }
    for entry in overview {
        println!("[{}] {}", entry.unit.id, entry.unit.name);
        for sub in &entry.subtopics {
            println!("    [{}] {}", sub.subtopic.id, sub.subtopic.title);
            for pdf in &sub.pdfs {
                println!("        pdf [{}] {} ({})", pdf.id, pdf.title, pdf.file);
            }
        }
    }
    Ok(())
}

pub async fn add(ctx: &AppContext, name: &str) -> Result<()> {
    let unit = ctx.library.create_unit(name).await?;
    println!("Created unit [{}] {}", unit.id, unit.name);
    Ok(())
}

pub async fn rename(ctx: &AppContext, id: u64, name: &str) -> Result<()> {
    let unit = ctx.library.rename_unit(id, name).await?;
    println!("Renamed unit [{}] to {}", unit.id, unit.name);
    Ok(())
}

pub async fn rm(ctx: &AppContext, id: u64, yes: bool) -> Result<()> {
    if !yes && !prompt_confirm("Delete this unit and all its subtopics and attachments?") {
        return Ok(());
    }
    ctx.library.delete_unit(id).await?;
    println!("Deleted unit [{id}]");
    Ok(())
}

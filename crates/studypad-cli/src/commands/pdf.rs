//! Attachment commands.

use crate::context::AppContext;
use crate::terminal::prompt_confirm;
use anyhow::Result;
use std::fs;
use std::path::Path;

pub async fn list(ctx: &AppContext) -> Result<()> {
    for pdf in ctx.client.pdfs().await? {
        println!(
            "[{}] (subtopic {}) {} ({})",
            pdf.id, pdf.subtopic, pdf.title, pdf.file
        );
    }
    Ok(())
}

pub async fn upload(ctx: &AppContext, subtopic: u64, file: &Path) -> Result<()> {
    let bytes = fs::read(file)?;
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment.pdf");
    let pdf = ctx.library.upload_pdf(subtopic, name, bytes).await?;
    println!("Uploaded [{}] {}", pdf.id, pdf.title);
    Ok(())
}

pub async fn rename(ctx: &AppContext, id: u64, title: &str) -> Result<()> {
    let pdf = ctx.library.rename_pdf(id, title).await?;
    println!("Renamed attachment [{}] to {}", pdf.id, pdf.title);
    Ok(())
}

pub async fn rm(ctx: &AppContext, id: u64, yes: bool) -> Result<()> {
    if !yes && !prompt_confirm("Delete this attachment?") {
        return Ok(());
    }
    ctx.library.delete_pdf(id).await?;
    println!("Deleted attachment [{id}]");
    Ok(())
}

//! Notes document commands, driven through the reconciliation controller.
//!
//! Every command here runs a real [`EditorSession`], so a locally buffered
//! draft always takes precedence over the server copy, exactly as in the
//! editor surface.

use crate::context::AppContext;
use crate::terminal::{BufferSurface, CliChrome, prompt_confirm};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use studypad_application::EditorSession;
use studypad_core::draft::DraftStore;
use studypad_core::editor::EditorSurface;

fn open_session(ctx: &AppContext, id: &str) -> Result<(EditorSession, Arc<BufferSurface>)> {
    let surface = Arc::new(BufferSurface::new());
    let session = EditorSession::start(
        Some(id.to_string()),
        ctx.client.clone(),
        ctx.drafts.clone(),
        surface.clone(),
        Arc::new(CliChrome),
    )?;
    Ok((session, surface))
}

/// Prints the reconciled content: the buffered draft when one exists,
/// otherwise the server copy. A failed fetch degrades to whatever content
/// is locally available.
pub async fn pull(ctx: &AppContext, id: &str, out: Option<PathBuf>) -> Result<()> {
    let (mut session, surface) = open_session(ctx, id)?;
    if let Err(e) = session.load().await {
        tracing::warn!(error = %e, "continuing with local content");
    }
    let content = surface.content();
    match out {
        Some(path) => fs::write(path, content)?,
        None => println!("{content}"),
    }
    Ok(())
}

/// Opens the reconciled content in `$EDITOR` and flushes the result.
pub async fn edit(ctx: &AppContext, id: &str) -> Result<()> {
    let (mut session, surface) = open_session(ctx, id)?;
    if let Err(e) = session.load().await {
        tracing::warn!(error = %e, "continuing with local content");
    }

    let scratch = scratch_path(id);
    fs::write(&scratch, surface.content())?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor).arg(&scratch).status()?;
    if !status.success() {
        anyhow::bail!("{editor} exited with {status}; note left untouched");
    }

    let edited = fs::read_to_string(&scratch)?;
    if edited != surface.content() {
        surface.set_content(&edited);
        session.note_edited(&edited);
    }

    if !session.is_dirty() {
        println!("No changes.");
    } else {
        while session.save().await.is_err() {
            // request_back blocks on the unsaved-changes prompt; leaving
            // keeps the draft as the safety net for the next session.
            if session.request_back() {
                eprintln!("Draft kept locally; it will be recovered on the next edit.");
                break;
            }
        }
    }

    fs::remove_file(&scratch).ok();
    Ok(())
}

/// Replaces the note's content with a file's content and flushes.
pub async fn push(ctx: &AppContext, id: &str, file: &Path) -> Result<()> {
    let (mut session, _surface) = open_session(ctx, id)?;
    if let Err(e) = session.load().await {
        tracing::warn!(error = %e, "continuing with local content");
    }
    let html = fs::read_to_string(file)?;
    session.note_edited(&html);
    session.save().await?;
    Ok(())
}

/// Shows or discards the locally buffered draft without touching the server.
pub fn draft(ctx: &AppContext, id: &str, discard: bool) -> Result<()> {
    match ctx.drafts.read(id) {
        None => println!("No pending draft for this document."),
        Some(_) if discard => {
            if prompt_confirm("Discard the locally buffered draft?") {
                ctx.drafts.clear(id);
                println!("Draft discarded.");
            }
        }
        Some(notes) => println!("{notes}"),
    }
    Ok(())
}

/// Uploads an image, inserts its locator into the note, and flushes.
///
/// A failed fetch degrades like `pull` and `edit`: the buffered draft is
/// still the baseline, so the image lands on the reconciled content.
pub async fn attach(ctx: &AppContext, id: &str, image: &Path) -> Result<()> {
    let (mut session, surface) = open_session(ctx, id)?;
    if let Err(e) = session.load().await {
        tracing::warn!(error = %e, "continuing with local content");
    }

    let bytes = fs::read(image)?;
    let name = image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image");
    session.attach_image(name, bytes).await?;

    session.note_edited(&surface.content());
    session.save().await?;
    println!("Image attached and note saved.");
    Ok(())
}

fn scratch_path(id: &str) -> PathBuf {
    let safe: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    std::env::temp_dir().join(format!("studypad-note-{safe}.html"))
}

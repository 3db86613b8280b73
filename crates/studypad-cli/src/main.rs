use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod context;
mod terminal;

#[derive(Parser)]
#[command(name = "studypad")]
#[command(about = "Studypad - notes vault client with offline draft recovery", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Log in and store the access token
    Login { username: String, password: String },
    /// Discard the stored access token
    Logout,
    /// Manage units
    Unit {
        #[command(subcommand)]
        action: UnitAction,
    },
    /// Manage subtopics
    Sub {
        #[command(subcommand)]
        action: SubAction,
    },
    /// Manage PDF attachments
    Pdf {
        #[command(subcommand)]
        action: PdfAction,
    },
    /// Work with notes documents
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
}

#[derive(Subcommand)]
enum UnitAction {
    /// Show the full unit / subtopic / attachment tree
    List,
    /// Create a unit
    Add { name: String },
    /// Rename a unit
    Rename { id: u64, name: String },
    /// Delete a unit and everything under it
    Rm {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SubAction {
    /// List all subtopics
    List,
    /// Show one subtopic's title and server-side notes
    Show { id: String },
    /// Create a subtopic inside a unit
    Add { unit: u64, title: String },
    /// Delete a subtopic
    Rm {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PdfAction {
    /// List all attachments
    List,
    /// Upload a file against a subtopic
    Upload { subtopic: u64, file: PathBuf },
    /// Rename an attachment
    Rename { id: u64, title: String },
    /// Delete an attachment
    Rm {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum NoteAction {
    /// Print the note's content, preferring a locally buffered draft
    Pull {
        id: String,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Open the note in $EDITOR and save the result
    Edit { id: String },
    /// Replace the note's content with a file's content and save
    Push {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Show (or discard) the locally buffered draft
    Draft {
        id: String,
        /// Discard the buffered draft instead of showing it
        #[arg(long)]
        discard: bool,
    },
    /// Upload an image and insert its locator into the note
    Attach { id: String, image: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = context::AppContext::new()?;

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => commands::auth::register(&ctx, &username, &email, &password).await?,
        Commands::Login { username, password } => {
            commands::auth::login(&ctx, &username, &password).await?
        }
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Unit { action } => match action {
            UnitAction::List => commands::unit::list(&ctx).await?,
            UnitAction::Add { name } => commands::unit::add(&ctx, &name).await?,
            UnitAction::Rename { id, name } => commands::unit::rename(&ctx, id, &name).await?,
            UnitAction::Rm { id, yes } => commands::unit::rm(&ctx, id, yes).await?,
        },
        Commands::Sub { action } => match action {
            SubAction::List => commands::sub::list(&ctx).await?,
            SubAction::Show { id } => commands::sub::show(&ctx, &id).await?,
            SubAction::Add { unit, title } => commands::sub::add(&ctx, unit, &title).await?,
            SubAction::Rm { id, yes } => commands::sub::rm(&ctx, &id, yes).await?,
        },
        Commands::Pdf { action } => match action {
            PdfAction::List => commands::pdf::list(&ctx).await?,
            PdfAction::Upload { subtopic, file } => {
                commands::pdf::upload(&ctx, subtopic, &file).await?
            }
            PdfAction::Rename { id, title } => commands::pdf::rename(&ctx, id, &title).await?,
            PdfAction::Rm { id, yes } => commands::pdf::rm(&ctx, id, yes).await?,
        },
        Commands::Note { action } => match action {
            NoteAction::Pull { id, out } => commands::note::pull(&ctx, &id, out).await?,
            NoteAction::Edit { id } => commands::note::edit(&ctx, &id).await?,
            NoteAction::Push { id, file } => commands::note::push(&ctx, &id, &file).await?,
            NoteAction::Draft { id, discard } => commands::note::draft(&ctx, &id, discard)?,
            NoteAction::Attach { id, image } => commands::note::attach(&ctx, &id, &image).await?,
        },
    }

    Ok(())
}

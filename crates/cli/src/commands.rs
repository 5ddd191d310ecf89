//! Subcommands.
//!
//! Each subcommand is a clap struct with an `execute` method that drives the
//! tracker and prints through [`crate::render`].

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use companion_core::{BookId, Genre};
use companion_runtime::{NewBook, ReadingTracker};
use console::style;
use uuid::Uuid;

use crate::render;

#[derive(Parser)]
pub enum Command {
    /// Show character, pet and recent books
    Status(Status),

    /// Log a finished book
    Add(Add),

    /// Remove a logged book by id
    Remove(Remove),

    /// Record a reading session
    Session(Session),

    /// Rename the pet
    Rename(Rename),

    /// Suggest genres that train the weakest attribute
    Recommend(Recommend),

    /// Show the layered avatar
    Avatar(Avatar),

    /// Replace the reader seed (the avatar's look changes, the pet's does not)
    ResetIdentity(ResetIdentity),
}

impl Command {
    pub fn execute(self, tracker: &mut ReadingTracker) -> Result<()> {
        match self {
            Command::Status(cmd) => cmd.execute(tracker),
            Command::Add(cmd) => cmd.execute(tracker),
            Command::Remove(cmd) => cmd.execute(tracker),
            Command::Session(cmd) => cmd.execute(tracker),
            Command::Rename(cmd) => cmd.execute(tracker),
            Command::Recommend(cmd) => cmd.execute(tracker),
            Command::Avatar(cmd) => cmd.execute(tracker),
            Command::ResetIdentity(cmd) => cmd.execute(tracker),
        }
    }
}

/// Show character, pet and recent books
#[derive(Parser, Debug)]
pub struct Status {
    /// Number of recent books to list
    #[arg(long, default_value_t = 5)]
    pub recent: usize,
}

impl Status {
    pub fn execute(self, tracker: &mut ReadingTracker) -> Result<()> {
        render::character(tracker.character());
        println!();
        render::pet(tracker.pet());
        println!();
        render::books(tracker.library().newest_first().take(self.recent));
        Ok(())
    }
}

/// Log a finished book
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("classification").required(true).args(["genre", "subjects"])))]
pub struct Add {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub author: String,

    /// Genre label, e.g. "Science Fiction"
    #[arg(long)]
    pub genre: Option<String>,

    /// Catalogue subject; repeat to pass several. The genre is inferred.
    #[arg(long = "subject")]
    pub subjects: Vec<String>,

    /// Cover image reference
    #[arg(long)]
    pub cover: Option<String>,
}

impl Add {
    pub fn execute(self, tracker: &mut ReadingTracker) -> Result<()> {
        let new_book = match self.genre {
            Some(label) => NewBook::new(self.title, self.author, Genre::parse(&label)?),
            None => NewBook::from_subjects(self.title, self.author, &self.subjects),
        };
        let new_book = match self.cover {
            Some(cover) => new_book.with_cover(cover),
            None => new_book,
        };

        let added = tracker.add_book(new_book)?;
        println!(
            "{} {} ({})",
            style("Logged").green().bold(),
            added.book.title,
            added.book.genre
        );
        render::impact(&added.book.attribute_impact);
        render::progress(&added.progress, tracker.pet());
        println!("id: {}", style(added.book.id).dim());
        Ok(())
    }
}

/// Remove a logged book by id
#[derive(Parser, Debug)]
pub struct Remove {
    /// Book id as shown by `status`
    pub id: String,
}

impl Remove {
    pub fn execute(self, tracker: &mut ReadingTracker) -> Result<()> {
        let uuid = Uuid::parse_str(self.id.trim())
            .with_context(|| format!("invalid book id: {}", self.id))?;

        let removed = tracker.remove_book(BookId(uuid))?;
        println!("{} {}", style("Removed").yellow().bold(), removed.book.title);
        render::progress(&removed.progress, tracker.pet());
        Ok(())
    }
}

/// Record a reading session
#[derive(Parser, Debug)]
pub struct Session {
    /// Session length in seconds
    pub seconds: u64,
}

impl Session {
    pub fn execute(self, tracker: &mut ReadingTracker) -> Result<()> {
        let completed = tracker.complete_session(self.seconds)?;
        println!(
            "{} {} minutes of reading",
            style("Recorded").green().bold(),
            completed.session.duration_seconds / 60
        );
        render::impact(&completed.session.attribute_gains);
        render::progress(&completed.progress, tracker.pet());
        Ok(())
    }
}

/// Rename the pet
#[derive(Parser, Debug)]
pub struct Rename {
    pub name: String,
}

impl Rename {
    pub fn execute(self, tracker: &mut ReadingTracker) -> Result<()> {
        let pet = tracker.rename_pet(&self.name)?;
        println!("Your pet is now called {}", style(&pet.name).bold());
        Ok(())
    }
}

/// Suggest genres that train the weakest attribute
#[derive(Parser, Debug)]
pub struct Recommend {}

impl Recommend {
    pub fn execute(self, tracker: &mut ReadingTracker) -> Result<()> {
        if let Some(weakest) = tracker.character().weakest() {
            println!(
                "Weakest attribute: {} {}",
                weakest.icon(),
                style(weakest).bold()
            );
        }
        for genre in tracker.recommendations() {
            println!("  {} {}", style("•").dim(), genre);
        }
        Ok(())
    }
}

/// Show the layered avatar
#[derive(Parser, Debug)]
pub struct Avatar {
    /// Print the full description as JSON
    #[arg(long)]
    pub json: bool,
}

impl Avatar {
    pub fn execute(self, tracker: &mut ReadingTracker) -> Result<()> {
        let layers = tracker.avatar();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&layers)?);
        } else {
            render::avatar(&layers);
        }
        Ok(())
    }
}

/// Replace the reader seed
#[derive(Parser, Debug)]
pub struct ResetIdentity {
    /// Confirm the reset
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl ResetIdentity {
    pub fn execute(self, tracker: &mut ReadingTracker) -> Result<()> {
        if !self.yes {
            anyhow::bail!("resetting identity changes your avatar for good; pass --yes to confirm");
        }

        tracker.reset_identity()?;
        println!("{} a new identity", style("Generated").green().bold());
        render::avatar(&tracker.avatar());
        Ok(())
    }
}

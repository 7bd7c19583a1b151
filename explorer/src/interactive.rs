//! Line oriented session on stdin.

use crate::progress::waiting;
use anyhow::Error as AnyError;
use clap::{Parser, Subcommand};
use landsat::{ExportScope, SceneBackend, Session};
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct Line {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Action {
    /// Select a point as if clicked on the map.
    Click {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Select a point by typing its coordinates.
    At {
        #[arg(allow_hyphen_values = true)]
        latitude: String,
        #[arg(allow_hyphen_values = true)]
        longitude: String,
    },

    /// Search for scenes at the selected point.
    Search,

    /// Load a scene by list position or ID.
    Select { scene: String },

    /// Print the coordinate fields.
    Point,

    /// Save the loaded pixels as CSV.
    Export { scope: ExportScope },

    /// End the session.
    Quit,
}

impl Line {
    fn read(text: &str) -> Result<Option<Action>, clap::Error> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }
        Line::try_parse_from(words).map(|line| Some(line.action))
    }
}

pub async fn run<B: SceneBackend>(session: Session<B>) -> Result<(), AnyError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(text) = lines.next().transpose()? else {
            return Ok(());
        };
        let action = match Line::read(&text) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if action == Action::Quit {
            return Ok(());
        }
        // Failures were already shown by the session's notifier.
        let _ = dispatch(&session, action).await;
    }
}

async fn dispatch<B: SceneBackend>(session: &Session<B>, action: Action) -> Result<(), AnyError> {
    match action {
        Action::Click {
            latitude,
            longitude,
        } => {
            session.click(latitude, longitude)?;
        }
        Action::At {
            latitude,
            longitude,
        } => {
            session.enter(&latitude, &longitude)?;
        }
        Action::Search => {
            waiting("searching", session.search()).await?;
        }
        Action::Select { scene } => {
            let scene_id = resolve(session, &scene);
            waiting("loading", session.select(&scene_id)).await?;
        }
        Action::Point => {
            let (latitude, longitude) = session.fields();
            println!("latitude {latitude}, longitude {longitude}");
        }
        Action::Export { scope } => match session.export(scope)? {
            Some(name) => println!("saved {name}"),
            None => println!("nothing loaded"),
        },
        Action::Quit => (),
    }
    Ok(())
}

/// Maps a 1-based list position to its scene ID. Anything else is
/// taken as an ID.
fn resolve<B: SceneBackend>(session: &Session<B>, scene: &str) -> String {
    let listing = session.catalog().listing();
    scene
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| listing.scenes().get(idx))
        .map_or_else(|| scene.to_owned(), |found| found.scene_id.clone())
}

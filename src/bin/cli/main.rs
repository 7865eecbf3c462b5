use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use soanki::{FileStore, FlashcardStorage, KeyValueStore, StudySession};

#[derive(Parser)]
#[command(name = "soanki-cli", about = "Flashcard decks from the terminal", version)]
struct Cli {
    /// Data directory (default: platform-local app data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all decks
    Decks,

    /// Create a new deck
    NewDeck {
        /// Deck name
        name: String,
        /// Deck description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a deck and all of its cards
    RmDeck {
        /// Deck id
        deck: Uuid,
    },

    /// List cards, optionally only those in one deck
    Cards {
        /// Filter by deck id
        #[arg(long)]
        deck: Option<Uuid>,
    },

    /// Add a card to a deck
    NewCard {
        /// Owning deck id
        deck: Uuid,
        /// Front of the card
        question: String,
        /// Back of the card
        answer: String,
    },

    /// Delete a card
    RmCard {
        /// Card id
        card: Uuid,
    },

    /// Run a study session over a deck
    Study {
        /// Deck id
        deck: Uuid,
    },

    /// Dump every key and raw value in the backing store
    Dump,

    /// Wipe the backing store
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => FileStore::default_data_dir().context("resolving data directory")?,
    };
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(data_dir));
    let storage = FlashcardStorage::new(Arc::clone(&store));

    match cli.command {
        Command::Decks => {
            for deck in storage.list_decks().await {
                println!(
                    "{}  {} ({} cards){}",
                    deck.id,
                    deck.name,
                    deck.card_count,
                    if deck.description.is_empty() {
                        String::new()
                    } else {
                        format!(" - {}", deck.description)
                    }
                );
            }
        }

        Command::NewDeck { name, description } => {
            if name.trim().is_empty() {
                bail!("deck name must not be empty");
            }
            let deck = storage.create_deck(name, description).await?;
            println!("created deck {}", deck.id);
        }

        Command::RmDeck { deck } => {
            storage.delete_deck(deck).await?;
            println!("deleted deck {}", deck);
        }

        Command::Cards { deck } => {
            let cards = match deck {
                Some(deck_id) => storage.list_cards_by_deck(deck_id).await,
                None => storage.list_cards().await,
            };
            for card in cards {
                println!(
                    "{}  [{}] {} -> {} (reviews: {}, difficulty: {})",
                    card.id,
                    card.deck_id,
                    card.question,
                    card.answer,
                    card.review_count,
                    card.difficulty_level
                );
            }
        }

        Command::NewCard {
            deck,
            question,
            answer,
        } => {
            if question.trim().is_empty() || answer.trim().is_empty() {
                bail!("question and answer must not be empty");
            }
            let card = storage.create_card(question, answer, deck).await?;
            println!("created card {}", card.id);
        }

        Command::RmCard { card } => {
            storage.delete_card(card).await?;
            println!("deleted card {}", card);
        }

        Command::Study { deck } => {
            study(&storage, deck).await?;
        }

        Command::Dump => {
            let mut keys = store.get_all_keys().await?;
            keys.sort();
            for key in keys {
                let value = store.get(&key).await?.unwrap_or_default();
                println!("{}: {}", key, value);
            }
        }

        Command::Clear => {
            store.clear().await?;
            println!("store cleared");
        }
    }

    Ok(())
}

/// Interactive single pass: show the question, reveal the answer on enter,
/// then read a 1-5 rating. The deck's last-studied time is only stamped
/// when the whole pass completes.
async fn study(storage: &FlashcardStorage, deck_id: Uuid) -> anyhow::Result<()> {
    let mut session = StudySession::begin(storage, deck_id).await?;
    if session.is_finished() {
        println!("deck has no cards");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(card) = session.current() {
        println!("\n[{} left] Q: {}", session.remaining(), card.question);
        print!("(enter to reveal) ");
        io::stdout().flush()?;
        if lines.next().transpose()?.is_none() {
            return Ok(());
        }
        println!("A: {}", card.answer);

        let rating = loop {
            print!("rating 1 (easy) - 5 (hard), q to stop: ");
            io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                return Ok(());
            };
            let line = line.trim().to_string();
            if line.eq_ignore_ascii_case("q") {
                return Ok(());
            }
            match line.parse::<i32>() {
                Ok(n) if (1..=5).contains(&n) => break n,
                _ => println!("please enter a number from 1 to 5"),
            }
        };

        session.rate(storage, rating).await?;
    }

    session.finish(storage).await?;
    println!("\nsession complete");
    Ok(())
}

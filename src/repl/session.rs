//! REPL session state
//!
//! Holds the paging cursor and the caught pokemon, and runs commands
//! against the catalog client.

use std::collections::BTreeMap;
use std::io::Write;

use rand::Rng;
use tracing::info;

use crate::client::PokeClient;
use crate::error::{PokedexError, Result};
use crate::models::Pokemon;
use crate::repl::commands::{Command, COMMANDS};

/// Catch rolls are drawn uniformly from `0..CATCH_ROLL_RANGE`.
pub const CATCH_ROLL_RANGE: u32 = 200;

/// Source of catch rolls.
pub type CatchRoll = Box<dyn FnMut() -> u32 + Send>;

/// What the prompt loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Mutable state of one interactive session.
pub struct Session {
    client: PokeClient,
    next: Option<String>,
    previous: Option<String>,
    /// Set once the first page has been shown
    paged: bool,
    pokedex: BTreeMap<String, Pokemon>,
    roll: CatchRoll,
}

impl Session {
    /// Creates a session using thread-local randomness for catch rolls.
    pub fn new(client: PokeClient) -> Self {
        Self::with_roll(
            client,
            Box::new(|| rand::thread_rng().gen_range(0..CATCH_ROLL_RANGE)),
        )
    }

    /// Creates a session with a custom roll source.
    pub fn with_roll(client: PokeClient, roll: CatchRoll) -> Self {
        Self {
            client,
            next: None,
            previous: None,
            paged: false,
            pokedex: BTreeMap::new(),
            roll,
        }
    }

    pub fn client(&self) -> &PokeClient {
        &self.client
    }

    /// Caught pokemon, keyed by name.
    pub fn pokedex(&self) -> &BTreeMap<String, Pokemon> {
        &self.pokedex
    }

    // == Execute ==
    /// Runs one command, writing its output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => {
                let area = area.ok_or(PokedexError::MissingArgument("location area"))?;
                self.explore(&area, out).await?;
            }
            Command::Catch(name) => {
                let name = name.ok_or(PokedexError::MissingArgument("pokemon name"))?;
                self.catch(&name, out).await?;
            }
            Command::Inspect(name) => {
                let name = name.ok_or(PokedexError::MissingArgument("pokemon name"))?;
                self.inspect(&name, out)?;
            }
            Command::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for info in COMMANDS {
            writeln!(out, "{}: {}", info.name, info.description)?;
        }
        Ok(())
    }

    // == Paging ==
    async fn map<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.paged && self.next.is_none() {
            writeln!(out, "you're on the last page")?;
            return Ok(());
        }
        let url = self.next.clone();
        self.show_page(url.as_deref(), out).await
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.previous.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };
        self.show_page(Some(&url), out).await
    }

    async fn show_page<W: Write>(&mut self, url: Option<&str>, out: &mut W) -> Result<()> {
        let page = self.client.location_areas(url).await?;

        // Empty cursors mean the same as missing ones
        self.next = page.next.filter(|next| !next.is_empty());
        self.previous = page.previous.filter(|previous| !previous.is_empty());
        self.paged = true;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    // == Explore ==
    async fn explore<W: Write>(&self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        let detail = self.client.location_area(area).await?;

        writeln!(out, "Found Pokemon:")?;
        for name in detail.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    // == Catch ==
    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        let pokemon = self.client.pokemon(name).await?;

        let roll = (self.roll)();
        if roll > pokemon.experience() {
            writeln!(out, "{} was caught!", pokemon.name)?;
            info!(pokemon = %pokemon.name, roll, "Caught pokemon");
            self.pokedex.insert(pokemon.name.clone(), pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    // == Inspect ==
    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        match self.pokedex.get(name) {
            Some(pokemon) => write!(out, "{}", pokemon)?,
            None => writeln!(out, "{} is not in your pokedex", name)?,
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "No pokemon")?;
            return Ok(());
        }
        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}

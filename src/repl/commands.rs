//! Command table
//!
//! Maps cleaned input words to commands and describes them for `help`.

/// A parsed command with its optional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(Option<String>),
    Catch(Option<String>),
    Inspect(Option<String>),
    Pokedex,
}

/// Name and help text of a command.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every command, in the order `help` lists them.
pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "help",
        description: "Displays a help message",
    },
    CommandInfo {
        name: "exit",
        description: "Exit the Pokedex",
    },
    CommandInfo {
        name: "map",
        description: "Displays the next 20 location areas",
    },
    CommandInfo {
        name: "mapb",
        description: "Displays the previous 20 location areas",
    },
    CommandInfo {
        name: "explore",
        description: "Lists the pokemon found in a location area",
    },
    CommandInfo {
        name: "catch",
        description: "Throws a Pokeball at a pokemon",
    },
    CommandInfo {
        name: "inspect",
        description: "Shows the details of a caught pokemon",
    },
    CommandInfo {
        name: "pokedex",
        description: "Lists all your pokemon",
    },
];

impl Command {
    /// Parses cleaned input words. Returns `None` for unknown or empty input.
    ///
    /// Only the first argument is used; extra words are ignored.
    pub fn parse(words: &[String]) -> Option<Self> {
        let (name, args) = words.split_first()?;
        let arg = args.first().cloned();

        let command = match name.as_str() {
            "help" => Self::Help,
            "exit" => Self::Exit,
            "map" => Self::Map,
            "mapb" => Self::MapBack,
            "explore" => Self::Explore(arg),
            "catch" => Self::Catch(arg),
            "inspect" => Self::Inspect(arg),
            "pokedex" => Self::Pokedex,
            _ => return None,
        };
        Some(command)
    }
}

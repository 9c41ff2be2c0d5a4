use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dex", bin_name = "dex", version)]
#[command(about = "Browse, filter and collect Pokémon from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the catalog a page at a time
    #[command(alias = "ls")]
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Look up one Pokémon by exact name or id
    Search { query: String },

    /// Filter by type, ability, move and effort yield
    Filter {
        /// Type to require (repeat for a second type)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        types: Vec<String>,

        /// Ability to require
        #[arg(short, long)]
        ability: Option<String>,

        /// Move that must be learnable
        #[arg(short, long = "move", value_name = "MOVE")]
        move_name: Option<String>,

        /// Stat that must yield effort points (hp, attack, defense, special-attack, special-defense, speed)
        #[arg(short, long, value_name = "STAT")]
        ev: Option<String>,

        /// Page of the results, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show the full detail view for one Pokémon
    Show { query: String },

    /// List the types usable with `filter --type`
    Types,

    /// List or edit favorites
    Fav {
        #[command(subcommand)]
        action: Option<FavAction>,
    },

    /// Show or edit the team
    Team {
        #[command(subcommand)]
        action: Option<TeamAction>,
    },

    /// Interactive session sharing one cache and page cursor
    Shell,

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand, Debug)]
pub enum FavAction {
    /// Add a favorite, or remove it if already there
    Toggle { query: String },
    /// Remove a favorite
    Rm { query: String },
    /// Remove every favorite
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum TeamAction {
    /// Add a member
    Add { query: String },
    /// Remove the member in a slot (1-6)
    Rm { slot: usize },
    /// Remove every member
    Clear,
}

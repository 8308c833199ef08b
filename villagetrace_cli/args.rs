use clap::Parser;

/// Reconstructs the possible building compositions of a Tribal Wars village
/// from its points history.
#[derive(Parser, Debug, Clone)]
#[command(name = "villagetrace")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// World id, e.g. `de238`
    pub world: String,

    /// Village id within the world
    pub village_id: u32,

    /// Print the whole reconstruction as JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum number of compositions listed (overrides VILLAGETRACE_DISPLAY_LIMIT)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

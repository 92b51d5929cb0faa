use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Authorize with Spotify and store the access token
    Login {
        /// Redirect URL from the browser; prompts on stdin when omitted
        #[arg(long)]
        redirect_url: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// Create a playlist from scraped titles
    Build {
        /// File with one title per line, a .json string array, or `-` for stdin
        #[arg(short, long)]
        titles: String,

        /// Playlist name (defaults to playlist.default_name)
        #[arg(short, long)]
        name: Option<String>,

        /// Read the titles as a JSON string array (implied for .json files)
        #[arg(long)]
        json_input: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how titles would be cleaned and split, without touching the network
    Preview {
        #[arg(short, long)]
        titles: String,

        #[arg(long)]
        json_input: bool,
    },
}

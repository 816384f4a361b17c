use crate::config::DEFAULT_LATEST_POSTS;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sitesearch", version, about = "Content search for static school sites")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search pages, articles, and memos.
    Search(SearchOpts),
    /// List or filter blog posts.
    Posts(PostsOpts),
    /// List or filter memos.
    Memos(MemosOpts),
    /// List calendar events.
    Events(EventsOpts),
    Config(ConfigOpts),
    Version,
}

#[derive(clap::Args)]
pub struct SearchOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    pub query: String,
    /// Print results as JSON.
    #[arg(long, conflicts_with = "html")]
    pub json: bool,
    /// Print results as an HTML fragment.
    #[arg(long)]
    pub html: bool,
}

#[derive(clap::Args)]
pub struct PostsOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    /// Free-text filter over title and body.
    #[arg(short, long)]
    pub filter: Option<String>,
    /// Restrict to one section.
    #[arg(short, long)]
    pub section: Option<String>,
    /// Show only the newest N posts; without a value, N is the homepage
    /// strip size.
    #[arg(short, long, value_name = "N")]
    pub latest: Option<Option<usize>>,
    #[arg(long)]
    pub html: bool,
}

impl PostsOpts {
    /// Resolved `--latest` count: `None` when the flag is absent, the
    /// homepage strip size when it is given without a value.
    pub fn latest_count(&self) -> Option<usize> {
        self.latest.map(|n| n.unwrap_or(DEFAULT_LATEST_POSTS))
    }
}

#[derive(clap::Args)]
pub struct MemosOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[arg(short, long)]
    pub filter: Option<String>,
    #[arg(long)]
    pub html: bool,
}

#[derive(clap::Args)]
pub struct EventsOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[arg(long)]
    pub html: bool,
}

#[derive(clap::Args)]
pub struct ConfigOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    Show,
    Validate,
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts_opts(args: &[&str]) -> PostsOpts {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Posts(opts) => opts,
            _ => panic!("expected posts command"),
        }
    }

    #[test]
    fn latest_without_value_uses_homepage_strip_size() {
        let opts = posts_opts(&["sitesearch", "posts", "--latest"]);
        assert_eq!(opts.latest_count(), Some(DEFAULT_LATEST_POSTS));
    }

    #[test]
    fn latest_with_value_overrides_default() {
        let opts = posts_opts(&["sitesearch", "posts", "--latest", "3"]);
        assert_eq!(opts.latest_count(), Some(3));
    }

    #[test]
    fn absent_latest_means_no_slice() {
        let opts = posts_opts(&["sitesearch", "posts"]);
        assert_eq!(opts.latest_count(), None);
    }
}

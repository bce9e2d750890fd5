use crate::config::Config;
use crate::core::{FileStorage, JsonLinkFetcher, LinkRecord, LinkStore, Theme};
use crate::utils::{single_line, truncate};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linkshelf")]
#[command(about = "Personal link library with previews, search and inline players")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/linkshelf/config.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the link library
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a link, fetching its title, description and preview image
    Add {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Remove a link by id
    Remove {
        #[arg(value_name = "ID")]
        id: u64,
    },
    /// List links, newest first, optionally filtered by a search query
    List {
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },
    /// Show every field of one link
    Show {
        #[arg(value_name = "ID")]
        id: u64,
    },
    /// Show or change the light/dark preference
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from_path(path),
            None => Config::load(),
        }
    }

    pub fn open_store(&self, config: &Config) -> Result<LinkStore<FileStorage>> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => config.resolve_data_dir()?,
        };
        tracing::debug!("Using link library at {}", dir.display());

        let storage = FileStorage::new(dir);
        Ok(LinkStore::load_with_key(storage, &config.storage_key).with_default_theme(config.theme))
    }

    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let mut store = self.open_store(&config)?;

        match &self.command {
            Command::Add { url } => {
                let fetcher = JsonLinkFetcher::new(&config)?;
                println!("Adding...");
                let record = store.add(url, &fetcher).await?;
                println!("Added:");
                print_record(&record, true);
            }
            Command::Remove { id } => match store.remove(*id) {
                Some(record) => println!("Removed: {}", record.url),
                None => println!("No link with id {}", id),
            },
            Command::List { query } => {
                let links = store.search(query.as_deref().unwrap_or(""));
                if links.is_empty() {
                    println!("No links found.");
                }
                for record in links {
                    print_record(record, false);
                }
            }
            Command::Show { id } => match store.get(*id) {
                Some(record) => print_record(record, true),
                None => anyhow::bail!("No link with id {}", id),
            },
            Command::Theme { action } => {
                let theme = match action {
                    None => store.theme(),
                    Some(ThemeAction::Toggle) => store.toggle_theme()?,
                    Some(ThemeAction::Light) => {
                        store.set_theme(Theme::Light)?;
                        Theme::Light
                    }
                    Some(ThemeAction::Dark) => {
                        store.set_theme(Theme::Dark)?;
                        Theme::Dark
                    }
                };
                println!("Theme: {}", theme);
            }
        }

        Ok(())
    }
}

fn print_record(record: &LinkRecord, detailed: bool) {
    println!("[{}] {}  (id {})", record.category, single_line(&record.title), record.id);

    let description = single_line(&record.description);
    if detailed {
        println!("  {}", description);
    } else {
        println!("  {}", truncate(&description, 100));
    }
    println!("  {}", record.url);

    if detailed {
        if let Some(embed) = &record.embed {
            println!("  Player: {}", embed);
        } else if let Some(image) = &record.image {
            println!("  Preview: {}", image);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["linkshelf", "add", "https://vimeo.com/987654"]).unwrap();
        match cli.command {
            Command::Add { url } => assert_eq!(url, "https://vimeo.com/987654"),
            _ => panic!("expected add"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["linkshelf", "list", "rust", "-v", "--data-dir", "/tmp/l"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/l")));
        match cli.command {
            Command::List { query } => assert_eq!(query.as_deref(), Some("rust")),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_theme_action() {
        let cli = Cli::try_parse_from(["linkshelf", "theme", "toggle"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Theme {
                action: Some(ThemeAction::Toggle)
            }
        ));
        assert!(Cli::try_parse_from(["linkshelf", "remove", "abc"]).is_err());
    }
}

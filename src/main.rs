use anyhow::Result;
use clap::Parser;
use pkggodev::Client;
use serde::Serialize;

/// pkggodev - read package metadata from pkg.go.dev
///
/// Look up package details, version history, search results, and importer
/// lists, printed as JSON.
///
/// Examples:
///   pkggodev describe github.com/gorilla/mux
///   pkggodev search mux --limit 5
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Site base URL (defaults to https://pkg.go.dev)
    #[arg(
        long = "base-url",
        env = "PKGGODEV_BASE_URL",
        value_name = "URL",
        global = true
    )]
    base_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show metadata for a package
    Describe(DescribeArgs),

    /// List the published versions of a package
    Versions(PackageArgs),

    /// Search for packages matching a query
    Search(SearchArgs),

    /// List the packages importing a package
    ImportedBy(PackageArgs),
}

#[derive(clap::Args, Debug)]
struct PackageArgs {
    /// Package import path
    #[arg(value_name = "PACKAGE")]
    package: String,
}

#[derive(clap::Args, Debug)]
struct DescribeArgs {
    /// Package import path
    #[arg(value_name = "PACKAGE")]
    package: String,

    /// Replace the synopsis with the repository description
    #[arg(long)]
    synopsis: bool,
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Search query
    #[arg(value_name = "QUERY")]
    query: String,

    /// Maximum number of results
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let client = match cli.base_url {
        Some(ref base_url) => Client::with_base_url(reqwest::Client::new(), base_url),
        None => Client::default(),
    };

    match cli.command {
        Commands::Describe(args) => {
            let mut package = client.describe_package(&args.package).await?;
            if args.synopsis {
                client.enrich_synopsis(&mut package).await?;
            }
            print_json(&package)
        }
        Commands::Versions(args) => print_json(&client.versions(&args.package).await?),
        Commands::Search(args) => print_json(&client.search(&args.query, args.limit).await?),
        Commands::ImportedBy(args) => print_json(&client.imported_by(&args.package).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_describe_parsing() {
        let cli = Cli::try_parse_from(["pkggodev", "describe", "github.com/a/b"]).unwrap();
        match cli.command {
            Commands::Describe(args) => {
                assert_eq!(args.package, "github.com/a/b");
                assert!(!args.synopsis);
            }
            _ => panic!("Expected Describe command"),
        }
        assert_eq!(cli.base_url, None);
    }

    #[test]
    fn test_cli_describe_synopsis_flag() {
        let cli =
            Cli::try_parse_from(["pkggodev", "describe", "github.com/a/b", "--synopsis"]).unwrap();
        match cli.command {
            Commands::Describe(args) => assert!(args.synopsis),
            _ => panic!("Expected Describe command"),
        }
    }

    #[test]
    fn test_cli_search_default_limit() {
        let cli = Cli::try_parse_from(["pkggodev", "search", "mux"]).unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query, "mux");
                assert_eq!(args.limit, 10);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_search_limit_parsing() {
        let cli = Cli::try_parse_from(["pkggodev", "search", "mux", "--limit", "3"]).unwrap();
        match cli.command {
            Commands::Search(args) => assert_eq!(args.limit, 3),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_global_base_url_parsing() {
        let cli = Cli::try_parse_from([
            "pkggodev",
            "--base-url",
            "http://localhost:8080",
            "versions",
            "github.com/a/b",
        ])
        .unwrap();
        assert_eq!(cli.base_url, Some("http://localhost:8080".to_string()));
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["pkggodev", "github.com/a/b"]);
        assert!(result.is_err());
    }
}

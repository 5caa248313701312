use clap::{Arg, Command};
use translate_link::{Config, Lookup, MediaWikiClient, find_urls, lookup, urls_for_titles};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("translate-link")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find the translatewiki.net link for a message key")
        .arg(
            Arg::new("key")
                .help("Message key (e.g., parentheses)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("language-code")
                .help("Target language code (e.g., de, pt-br)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("show")
                .long("show")
                .short('s')
                .help("List every candidate URL instead of the redirect target")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .help("Wiki origin (default: from config, https://translatewiki.net)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log each API call and strategy")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let default_level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let key = matches
        .get_one::<String>("key")
        .ok_or("missing message key")?;
    let language_code = matches
        .get_one::<String>("language-code")
        .ok_or("missing language code")?;

    let mut config = Config::from_env()?;
    if let Some(host) = matches.get_one::<String>("host") {
        config.wiki_host = host.trim_end_matches('/').to_string();
    }

    let wiki = MediaWikiClient::from_config(&config)?;
    let builder = config.url_builder();

    if matches.get_flag("show") {
        let urls = find_urls(&wiki, &builder, key, language_code).await?;
        if urls.is_empty() {
            eprintln!("No documentation page found for {}", key);
        }
        for url in urls {
            println!("{}", url);
        }
        return Ok(());
    }

    match lookup(&wiki, &builder, key, language_code).await? {
        Lookup::Redirect(url) => println!("{}", url),
        Lookup::Disambiguation(titles) => {
            eprintln!(
                "{} matches {} documentation pages, pick one:",
                key,
                titles.len()
            );
            let urls = urls_for_titles(&wiki, &builder, key, &titles, language_code).await?;
            for url in urls {
                println!("{}", url);
            }
        }
    }

    Ok(())
}

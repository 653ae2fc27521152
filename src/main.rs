use std::path::PathBuf;
use websearch::plugin::FallbackProvider;
use websearch::settings::{default_settings_path, Settings};
use websearch::{logging, WebSearchPlugin};

const USAGE: &str = "usage: websearch [--settings <path>] [--fallback] [--open] [--restore-defaults] <query...>";

struct Args {
    settings: PathBuf,
    fallback: bool,
    open: bool,
    restore_defaults: bool,
    query: String,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        settings: default_settings_path(),
        fallback: false,
        open: false,
        restore_defaults: false,
        query: String::new(),
    };
    let mut words = Vec::new();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--settings" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--settings needs a path\n{USAGE}"))?;
                args.settings = PathBuf::from(path);
            }
            "--fallback" => args.fallback = true,
            "--open" => args.open = true,
            "--restore-defaults" => args.restore_defaults = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => words.push(arg),
        }
    }
    args.query = words.join(" ");
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    let settings = Settings::load(&args.settings)?;
    logging::init(settings.debug_logging, settings.log_path(&args.settings));

    let plugin = WebSearchPlugin::from_settings(&settings, &args.settings);
    if args.restore_defaults {
        plugin.restore_default_engines()?;
    }

    if args.fallback {
        for action in plugin.fallbacks(&args.query) {
            println!("{}\t{}", action.label, action.action);
        }
        return Ok(());
    }

    let mut items = plugin.rank_items(&args.query);
    items.sort_by(|a, b| b.1.cmp(&a.1));
    for (item, score) in &items {
        println!("{score:>5}\t{}\t{}", item.text, item.url);
    }

    if args.open {
        let best = items
            .into_iter()
            .next()
            .map(|(item, _)| item)
            .or_else(|| plugin.fallback_items(&args.query).into_iter().next());
        match best {
            Some(item) => plugin.activate(&item)?,
            None => anyhow::bail!("no engine matches '{}'", args.query),
        }
    }
    Ok(())
}

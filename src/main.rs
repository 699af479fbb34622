use clap::Parser;
use locator_inspector::cli::commands::{
    CommandContext, OutputFormat, Target, build_tracer, cmd_hit, cmd_locate, cmd_query, cmd_tree,
};
use locator_inspector::cli::config::{
    Cli, Commands, LocatorOverrides, build_selector_options, build_xpath_options, load_config,
    parse_strategy,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve trace path: CLI > config
    let trace_path = cli.trace.as_deref().or(config.trace.path.as_deref());

    let mut overrides = LocatorOverrides::default();
    if let Commands::Locate {
        attribute,
        strategy,
        extra,
        bare,
        ..
    } = &cli.command
    {
        overrides.attribute = attribute.clone();
        overrides.strategy = match strategy.as_deref() {
            Some(name) => Some(
                parse_strategy(name).ok_or_else(|| format!("unknown match strategy '{}'", name))?,
            ),
            None => None,
        };
        overrides.extra = extra.clone();
        overrides.bare = *bare;
    }

    let ctx = CommandContext {
        format: OutputFormat::parse(&cli.format),
        verbose: cli.verbose,
        tracer: build_tracer(trace_path),
        xpath: build_xpath_options(&config.locator, &overrides),
        selector: build_selector_options(&config.locator, &overrides),
    };

    let output = match cli.command {
        Commands::Tree { dump } => cmd_tree(&dump, ctx)?,
        Commands::Hit {
            dump,
            x,
            y,
            image_width,
            image_height,
            click,
        } => {
            let image = image_width.zip(image_height);
            cmd_hit(&dump, x, y, image, click, ctx)?
        }
        Commands::Locate {
            dump, node, x, y, ..
        } => {
            let target = match (node, x.zip(y)) {
                (Some(index), _) => Target::Node(index),
                (None, Some((x, y))) => Target::Point(x, y),
                (None, None) => return Err("locate needs --node or --x/--y".into()),
            };
            cmd_locate(&dump, target, ctx)?
        }
        Commands::Query { dump, query } => cmd_query(&dump, &query, ctx)?,
    };

    print!("{}", output);
    Ok(())
}

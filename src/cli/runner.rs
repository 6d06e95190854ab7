use crate::{
    cli::{Cli, Commands, PairsArgs, RenderArgs, SourceArgs},
    config::FormatterConfig,
    dispatch::Dispatcher,
    error::Result,
    pairs::PairBuilder,
    renderer::MiniJinjaEngine,
    request::{Input, RenderOptions, RenderRequest},
    store::{MemoryStore, Query, RecordStore},
};
use log::info;

/// Runs a parsed command and prints its output.
pub fn run(cli: Cli) -> Result<()> {
    let output = execute(&cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Runs a command and returns what it would print.
pub fn execute(command: &Commands) -> Result<String> {
    match command {
        Commands::Render(args) => render(args),
        Commands::Pairs(args) => pairs(args),
    }
}

fn render(args: &RenderArgs) -> Result<String> {
    let source = &args.source;
    let (config, store) = load(source)?;
    let dispatcher = Dispatcher::from_config(MiniJinjaEngine::from_config(&config), &config);

    let mut query = store.find(&source.type_name)?;
    let criteria = source.criteria()?;
    if !criteria.is_empty() {
        query = query.filter_where(&criteria);
    }
    let records = query.all()?;
    if records.is_empty() {
        info!("No {} records match; nothing to render", source.type_name);
        return Ok(String::new());
    }

    let mut request = RenderRequest::objects(&records);
    if let Some(view) = &source.view {
        request = request.with_view(view.as_str());
    }
    Ok(dispatcher.render(&Input::Request(request))?.unwrap_or_default())
}

fn pairs(args: &PairsArgs) -> Result<String> {
    let source = &args.source;
    let (config, store) = load(source)?;
    let dispatcher = Dispatcher::from_config(MiniJinjaEngine::from_config(&config), &config);
    let builder = PairBuilder::from_config(&dispatcher, &store, &config);

    let options = source.view.as_deref().map(RenderOptions::view);
    let pairs = builder.pairs(
        &source.type_name,
        &source.criteria()?,
        args.key.as_deref(),
        options.as_ref(),
    )?;
    Ok(serde_json::to_string_pretty(&pairs)?)
}

fn load(source: &SourceArgs) -> Result<(FormatterConfig, MemoryStore)> {
    let mut config = match &source.config {
        Some(dir) => FormatterConfig::load(dir)?,
        None => FormatterConfig::default(),
    };
    if let Some(root) = &source.partials {
        config.partials_root = root.clone();
    }
    let store = MemoryStore::from_file(&source.fixture)?;
    Ok((config, store))
}

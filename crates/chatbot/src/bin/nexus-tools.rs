use std::io;

use clap::Parser;
use tracing::info;

use nexus_chatbot::{RecordingMailer, TextReportRenderer, ToolDefinitions, ToolDispatcher, ToolSettings};
use nexus_infra::{
    InMemoryEmpresaRepository, InMemoryInventarioRepository, InMemoryProductoRepository,
    NexusConfig,
};

/// Serve inventory tools as JSON lines over stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "nexus-tools")]
#[command(version)]
struct Cli {
    /// Print the function declarations as JSON and exit
    #[arg(long)]
    declarations: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = NexusConfig::from_env()?;
    nexus_observability::init(&config.log_filter);

    if cli.declarations {
        serde_json::to_writer_pretty(io::stdout().lock(), &ToolDefinitions::all())?;
        println!();
        return Ok(());
    }

    let dispatcher = ToolDispatcher::new(
        InMemoryEmpresaRepository::new(),
        InMemoryProductoRepository::new(),
        InMemoryInventarioRepository::new(),
        TextReportRenderer,
        RecordingMailer::new(),
    )
    .with_settings(ToolSettings::from_config(&config));

    info!(
        tools = ToolDefinitions::names().len(),
        list_limit = config.tool_list_limit,
        "nexus-tools ready"
    );
    let answered = nexus_chatbot::serve(&dispatcher, io::stdin().lock(), io::stdout().lock())?;
    info!(answered, "input closed");
    Ok(())
}

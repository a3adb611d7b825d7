//! screen-ruler command line.
//!
//! Drives the background coordinator against the settings file, and runs
//! the measurement engine over a headless page layout:
//!
//! - `status`: print `{isEnabled, settings}`
//! - `toggle`: flip enabled
//! - `pause <true|false>`: set paused
//! - `set key=value...`: partial settings update
//! - `measure <layout.json> <id> [<other-id>]`: selector, size, box model
//!   and, with a second id, the distance between the two

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::{json, Value};

use screen_ruler::background::Coordinator;
use screen_ruler::events::{Request, Response};
use screen_ruler::measure;
use screen_ruler::platform::headless::{HeadlessDocument, HeadlessTabs, Layout};
use screen_ruler::platform::{file_store, ElementId, JsonFileStore, MessageSender};
use screen_ruler::{logging, SettingsPatch};

#[derive(Parser, Debug)]
#[command(name = "screen-ruler")]
#[command(about = "Element size, box model and distance measurement")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to $SCREEN_RULER_CONFIG or the user config dir)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging (honours RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current status
    Status,
    /// Flip the enabled flag
    Toggle,
    /// Set the paused flag
    Pause {
        #[arg(action = ArgAction::Set)]
        paused: bool,
    },
    /// Apply key=value settings
    Set {
        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },
    /// Measure elements of a JSON page layout by their id attribute
    Measure {
        layout: PathBuf,
        first: String,
        second: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.config.unwrap_or_else(file_store::config_path);
    let output = match cli.command {
        Command::Status => run_request(config, Request::GetStatus)?,
        Command::Toggle => run_request(config, Request::ToggleExtension)?,
        Command::Pause { paused } => run_request(config, Request::pause(paused))?,
        Command::Set { assignments } => {
            let patch = parse_patch(&assignments)?;
            run_request(config, Request::UpdateSettings(patch))?
        }
        Command::Measure {
            layout,
            first,
            second,
        } => run_measure(&layout, &first, second.as_deref())?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_patch(assignments: &[String]) -> Result<SettingsPatch> {
    let mut patch = SettingsPatch::default();
    for assignment in assignments {
        patch.parse_assignment(assignment).map_err(|e| anyhow!(e))?;
    }
    Ok(patch)
}

/// Run one request against the coordinator backed by the settings file.
fn run_request(config: PathBuf, request: Request) -> Result<Value> {
    tracing::debug!(path = %config.display(), "settings file");
    let mut coordinator = Coordinator::new(JsonFileStore::new(config), HeadlessTabs::new());

    let action = request.action();
    let response = coordinator.handle(request, MessageSender::POPUP);
    if let Response::Error { error } = &response {
        return Err(anyhow!("{action} failed: {error}"));
    }
    if matches!(response, Response::Ack { .. }) {
        // Show the resulting state rather than a bare acknowledgement.
        return Ok(serde_json::to_value(coordinator.get_status())?);
    }
    Ok(serde_json::to_value(response)?)
}

fn run_measure(layout_path: &Path, first: &str, second: Option<&str>) -> Result<Value> {
    let text = fs::read_to_string(layout_path)
        .with_context(|| format!("reading layout {}", layout_path.display()))?;
    let layout = Layout::from_json(&text)
        .with_context(|| format!("parsing layout {}", layout_path.display()))?;
    let doc = layout.build();

    let a = find(&doc, first)?;
    let mut out = describe(&doc, a)?;
    if let Some(second) = second {
        let b = find(&doc, second)?;
        let distance = measure::distance(&doc, a, b)
            .ok_or_else(|| anyhow!("cannot measure between `{first}` and `{second}`"))?;
        out["other"] = describe(&doc, b)?;
        out["distance"] = serde_json::to_value(distance)?;
    }
    Ok(out)
}

fn find(doc: &HeadlessDocument, id: &str) -> Result<ElementId> {
    doc.find_by_element_id(id)
        .ok_or_else(|| anyhow!("no element with id `{id}` in layout"))
}

fn describe(doc: &HeadlessDocument, el: ElementId) -> Result<Value> {
    let dimensions = measure::dimensions(doc, el).context("element has no geometry")?;
    let box_model = measure::box_model(doc, el).context("element has no box model")?;
    Ok(json!({
        "selector": measure::selector(doc, el, false),
        "dimensions": dimensions,
        "boxModel": box_model,
    }))
}

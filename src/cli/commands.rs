use serde::Serialize;
use tracing::{debug, info};

use crate::cli::config::{AppConfig, build_engine_config};
use crate::engine::engine::Engine;
use crate::error::PickerError;
use crate::gesture::hit_resolver::Resolution;
use crate::page::page_model::Page;
use crate::page::paths::{css_selector, node_descriptor, xpath};
use crate::report::console::format_console_report;
use crate::report::report_model::ReplaySuiteReport;
use crate::script::runner::ScriptRunner;
use crate::script::script_model::GestureScript;
use crate::selection::descriptor::describe;
use crate::selection::selection_model::SelectionMode;
use crate::selection::similarity::find_similar;
use crate::trace::logger::TraceLogger;

// ============================================================================
// replay subcommand
// ============================================================================

pub struct ReplayArgs<'a> {
    pub page: &'a str,
    pub script: &'a str,
    pub format: Option<&'a str>,
    pub trace: Option<&'a str>,
    pub mode: Option<SelectionMode>,
}

/// Replay gesture scripts and return whether all passed.
pub fn cmd_replay(args: &ReplayArgs<'_>, config: &AppConfig) -> Result<bool, PickerError> {
    let page_json =
        std::fs::read_to_string(args.page).map_err(|e| PickerError::io(args.page, e))?;
    let scripts = load_scripts(args.script)?;

    if scripts.is_empty() {
        eprintln!("No gesture scripts found at: {}", args.script);
        return Ok(true);
    }

    let engine_config = build_engine_config(config, args.mode);
    let format = args.format.unwrap_or(config.replay.format.as_str());
    let trace = args.trace.or(config.replay.trace.as_deref());

    info!(scripts = scripts.len(), page = args.page, "replaying gesture scripts");
    let start = std::time::Instant::now();

    let mut results = Vec::new();
    for script in &scripts {
        debug!("replaying: {}", script.name);
        // Each script gets a pristine page.
        let page = Page::from_json(&page_json)?;
        let mut engine = Engine::new(page, engine_config.clone());
        if let Some(path) = trace {
            engine.subscribe(Box::new(TraceLogger::new(path, &script.name)));
        }
        results.push(ScriptRunner::run(script, &mut engine));
        engine.teardown();
    }

    let report = ReplaySuiteReport::from_results(args.page, results)
        .with_duration(start.elapsed().as_millis());

    match format {
        "json" => println!("{}", to_json(&report, "replay report")?),
        _ => print!("{}", format_console_report(&report)),
    }

    Ok(report.all_passed())
}

/// Load gesture scripts from a single YAML file or a directory of YAML files.
pub fn load_scripts(path: &str) -> Result<Vec<GestureScript>, PickerError> {
    let metadata = std::fs::metadata(path).map_err(|e| PickerError::io(path, e))?;
    if metadata.is_dir() {
        let mut scripts = Vec::new();
        let entries = std::fs::read_dir(path).map_err(|e| PickerError::io(path, e))?;
        for entry in entries {
            let p = entry.map_err(|e| PickerError::io(path, e))?.path();
            if p.extension().is_some_and(|e| e == "yaml" || e == "yml") {
                scripts.push(parse_script_file(&p.to_string_lossy())?);
            }
        }
        // Sort by name for deterministic order
        scripts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scripts)
    } else {
        Ok(vec![parse_script_file(path)?])
    }
}

fn parse_script_file(path: &str) -> Result<GestureScript, PickerError> {
    let content = std::fs::read_to_string(path).map_err(|e| PickerError::io(path, e))?;
    serde_yaml::from_str(&content).map_err(|source| PickerError::YamlParse {
        context: path.to_string(),
        source,
    })
}

// ============================================================================
// probe subcommand
// ============================================================================

/// Resolve a point the way a click would and print the element descriptor.
pub fn cmd_probe(page_path: &str, x: f64, y: f64, config: &AppConfig) -> Result<(), PickerError> {
    let mut engine = Engine::new(Page::load(page_path)?, config.engine.clone());

    match engine.resolve(x, y) {
        Resolution::Element(node) => {
            let descriptor = describe(
                engine.page(),
                node,
                &config.engine.captured_styles,
                config.engine.max_text_len,
            )
            .ok_or_else(|| PickerError::PageStructure(format!("node {:?} vanished", node)))?;
            println!("{}", to_json(&descriptor, "element descriptor")?);
        }
        Resolution::ControlSurface => println!("control surface at ({}, {})", x, y),
        Resolution::Nothing => println!("no element at ({}, {})", x, y),
    }
    Ok(())
}

// ============================================================================
// similar subcommand
// ============================================================================

#[derive(Debug)]
struct SimilarMatch {
    descriptor: String,
    css_selector: String,
    xpath: String,
}

/// Print every element similar to the one under a point.
pub fn cmd_similar(page_path: &str, x: f64, y: f64, config: &AppConfig) -> Result<(), PickerError> {
    let mut engine = Engine::new(Page::load(page_path)?, config.engine.clone());

    let Some(base) = engine.resolve(x, y).element() else {
        println!("no element at ({}, {})", x, y);
        return Ok(());
    };

    let page = engine.page();
    let matches: Vec<SimilarMatch> = find_similar(page, base, &config.engine.markers)
        .into_iter()
        .map(|node| SimilarMatch {
            descriptor: node_descriptor(page, node),
            css_selector: css_selector(page, node),
            xpath: xpath(page, node),
        })
        .collect();

    println!(
        "{} similar to {}:",
        matches.len(),
        node_descriptor(page, base)
    );
    for m in &matches {
        println!("  - {}  {}  {}", m.descriptor, m.css_selector, m.xpath);
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T, context: &str) -> Result<String, PickerError> {
    serde_json::to_string_pretty(value).map_err(|source| PickerError::JsonSerialize {
        context: context.to_string(),
        source,
    })
}

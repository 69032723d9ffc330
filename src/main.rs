use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use scribe_filter::config::{ConnectorConfig, SharedMetadataProvider};
use scribe_filter::{domain, parse_expression, ExpressionVisitor};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "connector.json";

/// 优先使用JSON配置，文件不存在时使用默认配置
fn load_config(path: Option<String>) -> Result<ConnectorConfig> {
    match path {
        Some(path) => ConnectorConfig::from_json_file(&path).with_context(|| format!("failed to load {path}")),
        None => match ConnectorConfig::from_json_file(DEFAULT_CONFIG_PATH) {
            Ok(config) => {
                println!("✅ 使用JSON配置文件: {DEFAULT_CONFIG_PATH}");
                Ok(config)
            }
            Err(e) => {
                warn!(error = %e, "falling back to default config");
                println!("⚠️ 无法加载JSON配置文件 ({e}), 使用默认配置");
                Ok(ConnectorConfig::default())
            }
        },
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs one console line; returns `false` when the session should end.
fn handle_line(line: &str, visitor: &ExpressionVisitor, provider: &SharedMetadataProvider) -> Result<bool> {
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command {
        ":quit" | ":q" => return Ok(false),
        ":actions" => print_json(&provider.retrieve_action_definitions()?)?,
        ":objects" => {
            for object in provider.retrieve_object_definitions(false, false)? {
                println!("{} [{}]", object.full_name, object.supported_action_full_names.join(", "));
            }
        }
        ":object" if argument.is_empty() => println!("usage: :object <full name>"),
        ":object" => print_json(&provider.retrieve_object_definition(argument, true, true)?)?,
        ":reset" => {
            provider.reset_metadata()?;
            println!("metadata cache cleared");
        }
        _ => {
            let expression = parse_expression(line)?;
            let candidates = visitor.visit(&expression)?;
            print_json(&candidates)?;
        }
    }
    Ok(true)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(std::env::args().nth(1))?;
    let visitor = config.expression_visitor();
    let provider = config.build_metadata_provider(domain::registry());

    println!("--- {}: filter 翻译控制台 ---", config.connector_name);
    println!("输入过滤表达式，例如: Name = \"Acme\" AND (ParentId = 1 OR ParentId = 2)");
    println!("命令: :objects  :object <name>  :actions  :reset  :quit");

    let mut editor = DefaultEditor::new().context("failed to start line editor")?;
    loop {
        match editor.readline("filter> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;
                match handle_line(line, &visitor, &provider) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => println!("❌ {e:#}"),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("failed to read line"),
        }
    }

    provider.dispose();
    Ok(())
}

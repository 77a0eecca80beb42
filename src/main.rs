use clap::Parser;
use std::io::BufRead;
use twd_format::core::FormatConfigProvider;
use twd_format::utils::{logger, validation::Validate};
use twd_format::{CliConfig, CurrencyFormatter, FormatError, FormattedAmount, TomlConfig};

fn main() {
    let config = CliConfig::parse();

    // 設定檔需在初始化日誌前載入，才能套用 [logging] 區段
    let file_config = match config.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(file_config) => file_config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    let log_level = file_config.as_ref().and_then(|c| c.log_level());
    let json_logs = config.log_json || file_config.as_ref().is_some_and(|c| c.json_logging());
    if json_logs {
        logger::init_json_logger(log_level);
    } else {
        logger::init_cli_logger(config.verbose, log_level);
    }

    tracing::info!("Starting twd-format");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config, file_config.as_ref()) {
        tracing::error!("❌ Formatting failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        let exit_code = if e.is_config_error() { 2 } else { 1 };
        std::process::exit(exit_code);
    }
}

fn run(config: &CliConfig, file_config: Option<&TomlConfig>) -> twd_format::Result<()> {
    let options = match file_config {
        Some(file_config) => {
            file_config.validate()?;
            let ignored = config.overridden_format_flags();
            if !ignored.is_empty() {
                tracing::warn!(
                    "Ignoring {} because --config supplies the format options",
                    ignored.join(", ")
                );
            }
            tracing::info!(
                "Using format options from {}",
                config.config.as_deref().unwrap_or_default()
            );
            file_config.format_options()
        }
        None => {
            config.validate()?;
            config.format_options()
        }
    };
    tracing::debug!("Format options: {:?}", options);
    let formatter = CurrencyFormatter::new(options)?;

    let inputs = if config.amounts.is_empty() {
        read_stdin_amounts()?
    } else {
        config.amounts.clone()
    };

    let results = inputs
        .iter()
        .map(|input| formatter.format_str(input))
        .collect::<twd_format::Result<Vec<FormattedAmount>>>()?;

    tracing::info!("Formatted {} amounts", results.len());

    if config.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            println!("{}", result.formatted);
        }
    }

    Ok(())
}

fn read_stdin_amounts() -> Result<Vec<String>, FormatError> {
    let stdin = std::io::stdin();
    let mut amounts = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            amounts.push(line);
        }
    }
    Ok(amounts)
}

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

/// Print a command's result. Warnings go to stderr in both formats so the
/// data stream stays machine-readable.
pub fn render(
    outcome: &CommandOutput,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    match format {
        OutputFormat::Table => println!("{}", outcome.text),
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&outcome.json)?
            } else {
                serde_json::to_string(&outcome.json)?
            };
            println!("{payload}");
        }
    }

    Ok(())
}

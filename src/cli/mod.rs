pub mod convert;
pub mod currencies;

use clap::{Parser, Subcommand};
use convert::{convert, ConvertArgs};
use currencies::currencies;

use crate::{
    api::api,
    services::shared::env::{check_for_env_variables, Settings},
};

#[derive(Parser, Debug)]
#[command(version, about = "Currency converter backed by exchangerate.host")]
struct Args {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand, PartialEq)]
enum Command {
    /// Convert an amount; without arguments shows the default pair
    Convert {
        amount: Option<String>,
        #[arg(short, long)]
        from: Option<String>,
        #[arg(short, long)]
        to: Option<String>,
        /// Swap source and target before converting
        #[arg(short, long)]
        swap: bool,
    },
    /// List the selectable currencies
    Currencies,
    /// Serve the converter widget over HTTP
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

pub async fn cli(mut settings: Settings) -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        Command::Convert {
            amount,
            from,
            to,
            swap,
        } => {
            convert(
                ConvertArgs {
                    amount,
                    from,
                    to,
                    swap,
                },
                &settings,
            )
            .await?;
        }
        Command::Currencies => {
            currencies();
        }
        Command::Serve { port } => {
            check_for_env_variables();
            if let Some(port) = port {
                settings.port = port;
            }
            println!("Starting web server...");
            api(settings).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_arguments_parse() {
        let args = Args::parse_from(["exchangebox", "convert", "25", "--from", "eur", "-t", "gbp", "--swap"]);
        assert_eq!(
            args.cmd,
            Command::Convert {
                amount: Some("25".into()),
                from: Some("eur".into()),
                to: Some("gbp".into()),
                swap: true,
            }
        );
    }

    #[test]
    fn serve_port_is_optional() {
        let args = Args::parse_from(["exchangebox", "serve"]);
        assert_eq!(args.cmd, Command::Serve { port: None });
    }
}

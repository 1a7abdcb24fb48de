mod client;
mod keys;
mod output;

use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use client::{CliError, Client, DEFAULT_URL, ERR_LOCAL_EXE, SUCCESS};
use keys::{KeyRequest, Render};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Bytom command line client")]
struct Args {
    /// Base URL of the node's API server.
    #[clap(long, env = "BYTOM_URL", default_value = DEFAULT_URL)]
    url: String,

    #[clap(long, default_value = "30")]
    timeout_secs: u64,

    #[clap(long, default_value = "warn")]
    log_level: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a key
    CreateKey { alias: String, password: String },
    /// Delete a key
    DeleteKey { xpub: String, password: String },
    /// List the existing keys
    ListKeys,
    /// Reset the password of a key
    ResetKeyPassword {
        xpub: String,
        old_password: String,
        new_password: String,
    },
    /// Export the private key
    ExportPrivateKey { xpub: String, password: String },
    /// Import the private key
    ImportPrivateKey {
        key_alias: String,
        xprv: String,
        index: String,
        password: String,
        account_alias: String,
    },
    /// Get import private key progress info
    ImportKeyProgress,
    /// Decode a hex-encoded claim output
    DecodeOutput { output_hex: String },
    /// Encode a claim output at the current asset version
    EncodeOutput {
        asset_id: String,
        amount: String,
        control_program: String,
    },
}

fn print_json(data: &Value) {
    match serde_json::to_string_pretty(data) {
        Ok(s) => println!("{s}"),
        Err(e) => error!("render reply: {e}"),
    }
}

fn print_json_list(data: &Value) {
    match data {
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                println!("{idx}:");
                print_json(item);
            }
        }
        other => print_json(other),
    }
}

fn key_request(command: Command) -> Result<KeyRequest, CliError> {
    match command {
        Command::CreateKey { alias, password } => Ok(KeyRequest::create(alias, password)),
        Command::DeleteKey { xpub, password } => KeyRequest::delete(&xpub, password),
        Command::ListKeys => Ok(KeyRequest::List {}),
        Command::ResetKeyPassword {
            xpub,
            old_password,
            new_password,
        } => KeyRequest::reset_password(&xpub, old_password, new_password),
        Command::ExportPrivateKey { xpub, password } => KeyRequest::export_private(&xpub, password),
        Command::ImportPrivateKey {
            key_alias,
            xprv,
            index,
            password,
            account_alias,
        } => KeyRequest::import_private(key_alias, xprv, &index, password, account_alias),
        Command::ImportKeyProgress => Ok(KeyRequest::ImportProgress {}),
        Command::DecodeOutput { .. } | Command::EncodeOutput { .. } => {
            Err(CliError::LocalExe("not a key command".to_string()))
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::DecodeOutput { output_hex } => {
            let view = output::decode_output(&output_hex)?;
            let data = serde_json::to_value(view)
                .map_err(|e| CliError::LocalExe(format!("decode-output: {e}")))?;
            print_json(&data);
            Ok(())
        }
        Command::EncodeOutput {
            asset_id,
            amount,
            control_program,
        } => {
            println!("{}", output::encode_output(&asset_id, &amount, &control_program)?);
            Ok(())
        }
        command => {
            let req = key_request(command)?;
            let client = Client::new(&args.url, Duration::from_secs(args.timeout_secs))?;
            let data = req.send(&client)?;
            match req.render() {
                Render::Json => print_json(&data),
                Render::List => print_json_list(&data),
                Render::Feedback(msg) => println!("{msg}"),
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(v) => v,
        Err(e) => {
            if !e.use_stderr() {
                e.exit();
            }
            let _ = e.print();
            std::process::exit(ERR_LOCAL_EXE);
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let code = match run(args) {
        Ok(()) => SUCCESS,
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}

use iris::cli::{parse_args, run_cli_command, CliCommand};
use iris::client::{IrisClient, StreamOutcome};
use iris::models::{AssembledMessage, ChatThread, UiComponent};
use iris::startup::{init_logging, IrisConfig};
use iris::traits::StreamHandler;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::io::{self, Write};
use tokio_util::sync::CancellationToken;

/// Prints the reply as it streams while recording it in the transcript.
struct ReplyPrinter<'a> {
    message: &'a mut AssembledMessage,
    /// Whether the cursor sits at the start of a line on stdout
    at_line_start: bool,
}

impl ReplyPrinter<'_> {
    fn end_line(&mut self) {
        if !self.at_line_start {
            println!();
            self.at_line_start = true;
        }
    }
}

impl StreamHandler for ReplyPrinter<'_> {
    fn on_ui_component(&mut self, components: Vec<UiComponent>) {
        self.end_line();
        for component in &components {
            println!("[{}] {}", component.kind(), component.summary());
        }
        self.message.on_ui_component(components);
    }

    fn on_text_chunk(&mut self, chunk: &str) {
        print!("{}", chunk);
        let _ = io::stdout().flush();
        self.at_line_start = chunk.ends_with('\n');
        self.message.on_text_chunk(chunk);
    }

    fn on_message_complete(&mut self, message_id: i64) {
        eprintln!("(message {})", message_id);
        self.message.on_message_complete(message_id);
    }

    fn on_error(&mut self, message: &str) {
        self.end_line();
        eprintln!("error: {}", message);
        self.message.on_error(message);
    }

    fn on_close(&mut self) {
        self.end_line();
        self.message.on_close();
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    if let Some(result) = run_cli_command(&command) {
        return result;
    }
    let CliCommand::Ask(ask) = command else {
        return Ok(());
    };

    let config = ask.apply(IrisConfig::from_env()?);
    init_logging(&config.log_level);

    let client = IrisClient::from_config(&config)?;
    let mut thread = match &config.thread_id {
        Some(thread_id) => ChatThread::new(config.user_identifier.clone(), thread_id.clone()),
        None => ChatThread::start(config.user_identifier.clone()),
    };
    let (request, placeholder_id) = thread.submit(&ask.message)?;
    let message = thread
        .placeholder(placeholder_id)
        .ok_or_else(|| eyre!("reply placeholder {} is missing", placeholder_id))?;
    let mut printer = ReplyPrinter {
        message,
        at_line_start: true,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let cancel = CancellationToken::new();
    let summary = runtime.block_on(async {
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });
        client.run(&request, &mut printer, &cancel).await
    });

    match &summary.outcome {
        StreamOutcome::Exhausted => {
            printer.end_line();
            printer.message.finalize();
        }
        StreamOutcome::Cancelled => {
            printer.end_line();
            eprintln!("cancelled");
        }
        StreamOutcome::Failed(err) => eprintln!("{}", err.report()),
        StreamOutcome::Ended => {}
    }

    let failed = printer.message.error.is_some();
    if !summary.outcome.is_success() || failed {
        std::process::exit(1);
    }
    Ok(())
}

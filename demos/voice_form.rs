//! Interactive voice-report client against a running recognition backend.
//!
//! Type `start`, `stop`, `save`, `show` or `quit`. While listening, dictation
//! and spoken commands arriving over the WebSocket drive the form; saying the
//! completion phrase saves the report and clears the form for the next one.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::fmt::time::ChronoLocal;
use voice_report::config::Config;
use voice_report::{FieldRegistry, HeadlessForm, SessionController, VoiceApi, WsCommandChannel};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    tracing::info!("voice API: {}, event channel: {}", config.api_base_url, config.ws_url);

    let api = VoiceApi::new(config.api_base_url.clone());
    let channel = WsCommandChannel::new(config.ws_url.clone());
    let mut controller = SessionController::new(
        channel,
        api.clone(),
        api,
        FieldRegistry::medical_report(),
        Box::new(HeadlessForm::new()),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("commands: start | stop | save | show | quit");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else { break };
                match line.trim() {
                    "start" => {
                        if let Err(e) = controller.start().await {
                            tracing::error!("start failed: {e}");
                        }
                    }
                    "stop" => {
                        if let Err(e) = controller.stop().await {
                            tracing::error!("stop failed: {e}");
                        }
                    }
                    "save" => match controller.save().await {
                        Ok(saved) => println!("report saved, id={}", saved.report_id()),
                        Err(e) => tracing::error!("save failed: {e}"),
                    },
                    "show" => {
                        for field in controller.registry().fields() {
                            let marker = if field.name() == controller.registry().active_field().name() {
                                "*"
                            } else {
                                " "
                            };
                            println!("{marker} {}: {}", field.name(), controller.form().value(field.name()));
                        }
                    }
                    "quit" | "exit" => break,
                    "" => {}
                    other => println!("unknown command: {other}"),
                }
            }
            event = controller.next_event() => {
                match event {
                    Some(event) => {
                        controller.handle_event(event).await;
                    }
                    None => tracing::info!("listening session ended"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl-C, shutting down...");
                break;
            }
        }
    }

    controller.stop().await.ok();
    Ok(())
}

use anyhow::Result;
use dotenv::dotenv;
use log::info;
use std::io::{self, BufRead, Write};

use local_llm_chat::client::backend::HttpBackend;
use local_llm_chat::client::replay::TerminalRenderer;
use local_llm_chat::client::{ChatClient, SessionState, SettingError, AVAILABLE_MODELS};
use local_llm_chat::config::ClientConfig;
use local_llm_chat::web::models::Role;

const HELP: &str = "\
Commands:
  /model <name>        switch model
  /temperature <0.1-1.0>
  /top_p <0.1-1.0>
  /max_tokens <64-1024, step 64>
  /settings            show active parameters
  /history             show the conversation
  /quit                leave";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment
    dotenv().ok();
    // Quieter than the server so log lines stay out of the conversation
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let config = ClientConfig::from_env();
    info!("Using generation service at: {}", config.backend_url);

    let mut chat = ChatClient::new(HttpBackend::new(config.backend_url), config.replay_delay);
    let mut renderer = TerminalRenderer::new(io::stdout());

    println!("Local LLM Chat (models: {})", AVAILABLE_MODELS.join(", "));
    println!("Type /help for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();

        if let Some(command) = input.strip_prefix('/') {
            let mut parts = command.split_whitespace();
            let name = parts.next().unwrap_or_default();
            let arg = parts.next().unwrap_or_default();

            match name {
                "quit" | "exit" => break,
                "help" => println!("{}", HELP),
                "settings" => print_settings(chat.session()),
                "history" => print_history(chat.session()),
                _ => match apply_setting(chat.session_mut(), name, arg) {
                    Ok(()) => print_settings(chat.session()),
                    Err(e) => println!("{}", e),
                },
            }
            continue;
        }

        // The session waits here until the reply has been shown in full
        chat.submit_prompt(input, &mut renderer).await;
    }

    Ok(())
}

fn apply_setting(session: &mut SessionState, name: &str, arg: &str) -> Result<(), String> {
    let parse_f64 = || arg.parse::<f64>().map_err(|_| format!("Not a number: {:?}", arg));
    let result: Result<(), SettingError> = match name {
        "model" => session.set_model(arg),
        "temperature" => session.set_temperature(parse_f64()?),
        "top_p" => session.set_top_p(parse_f64()?),
        "max_tokens" => {
            let value = arg
                .parse::<u32>()
                .map_err(|_| format!("Not a whole number: {:?}", arg))?;
            session.set_max_tokens(value)
        }
        other => return Err(format!("Unknown command /{}. {}", other, HELP)),
    };
    result.map_err(|e| e.to_string())
}

fn print_settings(session: &SessionState) {
    println!(
        "model={} temperature={} top_p={} max_tokens={}",
        session.model(),
        session.temperature(),
        session.top_p(),
        session.max_tokens()
    );
}

fn print_history(session: &SessionState) {
    for message in session.transcript() {
        let who = match message.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("[{}] {}", who, message.content);
    }
}

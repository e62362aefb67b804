//! Chattools CLI - run the chat-assistant tools from the command line

use chattools::{
    fetch_page_text, fetch_transcript, user_environment, ClientOptions, EnvironmentOptions,
    PageTextRequest, ToolRegistry, TranscriptRequest, TOOL_LLMTXT,
};
use clap::{Parser, Subcommand};

/// Chattools - chat-assistant tools for LLM orchestrators
#[derive(Parser, Debug)]
#[command(name = "chattools")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Backend origin for the transcript endpoint
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Custom User-Agent
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Print full tool documentation (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the user environment (locale, date, time, timezone)
    Env {
        /// Preferred language tag, e.g. en-US
        #[arg(long)]
        locale: Option<String>,

        /// Time zone name, e.g. Europe/Berlin
        #[arg(long)]
        time_zone: Option<String>,
    },
    /// Fetch a YouTube video transcript
    Transcript {
        /// Video URL or bare 11-character video id
        #[arg(long)]
        url: String,

        /// Preferred transcript language code
        #[arg(long)]
        lang: Option<String>,
    },
    /// Fetch readable text from a web page
    Page {
        /// Page URL
        #[arg(long)]
        url: String,

        /// CSS selector of the subtree to read (default: body)
        #[arg(long)]
        root: Option<String>,
    },
    /// List the registered tool definitions as JSON
    Tools,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Handle --llmtxt flag
    if args.llmtxt {
        println!("{}", TOOL_LLMTXT);
        std::process::exit(0);
    }

    let command = match args.command {
        Some(command) => command,
        None => {
            eprintln!("Error: Missing command");
            eprintln!("Usage: chattools <env|transcript|page|tools>");
            std::process::exit(1);
        }
    };

    let client = ClientOptions {
        base_url: args.base_url,
        user_agent: args.user_agent,
        lang: None,
    };

    let value = match command {
        Command::Env { locale, time_zone } => {
            let info = user_environment(&EnvironmentOptions { locale, time_zone });
            serde_json::to_value(info).unwrap_or_default()
        }
        Command::Transcript { url, lang } => {
            let mut request = TranscriptRequest::new(url);
            if let Some(lang) = lang {
                request = request.lang(lang);
            }
            match fetch_transcript(request, client).await {
                Ok(response) => serde_json::to_value(response).unwrap_or_default(),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Page { url, root } => {
            let mut request = PageTextRequest::new(url);
            if let Some(root) = root {
                request = request.root(root);
            }
            match fetch_page_text(request, client).await {
                Ok(response) => serde_json::to_value(response).unwrap_or_default(),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Tools => {
            let registry = ToolRegistry::with_defaults(client, EnvironmentOptions::default());
            serde_json::to_value(registry.definitions()).unwrap_or_default()
        }
    };

    match serde_json::to_string_pretty(&value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing response: {}", e);
            std::process::exit(1);
        }
    }
}

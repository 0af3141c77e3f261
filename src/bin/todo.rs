use clap::{Parser, Subcommand};
use todo_api::client::{TodoBoard, TodoClient, ViewState};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "todo",
    version,
    about = "Command-line client for the todo API",
    long_about = "Lists, adds and removes todos through the todo API. The full list is fetched again after every change."
)]
struct Cli {
    #[arg(long, env = "API_URL", default_value = "http://127.0.0.1:8080", help = "Base url of the todo API")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shows all todos, newest first.
    List,

    /// Adds a todo. Words are joined with single spaces.
    Add {
        #[arg(required = true, num_args = 1.., value_name = "CONTENT")]
        content: Vec<String>,
    },

    /// Removes the todo with the given id.
    Remove {
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("WARN")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut board = TodoBoard::new(TodoClient::new(&cli.api_url)?);

    board.mount().await;
    match cli.command {
        Commands::List => {}
        Commands::Add { content } => board.add(&content.join(" ")).await,
        Commands::Remove { id } => board.remove(&id).await,
    }

    match board.state() {
        ViewState::Loaded(todos) if todos.is_empty() => println!("No todos yet."),
        ViewState::Loaded(todos) => {
            for todo in todos {
                println!("{}  {}  {}", todo.id, todo.created_at.format("%Y-%m-%d %H:%M"), todo.content);
            }
        }
        _ => anyhow::bail!("could not load todos from {}", cli.api_url),
    }
    Ok(())
}

mod client;
mod terminal;
mod watch;

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use notify_core::{
    Badge, ControllerConfig, Listing, NotificationsApi, NotificationsController, Task,
};
use tracing_subscriber::EnvFilter;

use crate::client::ReqwestApi;
use crate::terminal::{format_badge, format_listing, TerminalView};

#[derive(Parser, Debug)]
#[command(
    name = "notify-cli",
    about = "Read and manage notifications from the terminal."
)]
struct Args {
    /// Origin of the backend, e.g. https://canteen.example.
    #[arg(long, env = "NOTIFY_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    /// Path prefix of the notifications API.
    #[arg(long, default_value = "/api/notifications")]
    api_base: String,

    /// Raw `Cookie` header of an existing session.
    #[arg(long, env = "NOTIFY_COOKIE")]
    cookie: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the newest notifications.
    List {
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
        /// Print the response as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the unread count.
    Count,
    /// Mark every notification read.
    ReadAll,
    /// Mark one notification read.
    Read { id: i64 },
    /// Delete one notification.
    Delete { id: i64 },
    /// Delete every notification.
    Clear,
    /// Follow the unread count until Ctrl-C.
    Watch {
        /// Seconds between polls.
        #[arg(long, default_value_t = 30)]
        poll_secs: u64,
        /// Mark everything read on start, like opening the dropdown.
        #[arg(long)]
        mark_read: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let api = ReqwestApi::new(
        &args.base_url,
        &args.api_base,
        args.cookie.clone(),
        Duration::from_secs(args.timeout_secs),
    )?;

    match args.command {
        Command::List {
            limit,
            offset,
            json,
        } => {
            let list = api
                .list(limit, offset)
                .await
                .context("Cannot load notifications")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                let config = ControllerConfig::default();
                let badge = Badge::from_count(list.unread_count, config.badge_cap);
                println!("{}", format_badge(&badge));
                for line in format_listing(
                    &Listing::from_entries(&list.notifications),
                    &config.empty_label,
                ) {
                    println!("{line}");
                }
            }
        }
        Command::Count => {
            let count = api.count().await.context("Cannot read unread count")?;
            println!("{count}");
        }
        Command::ReadAll => {
            api.mark_all_read()
                .await
                .context("Cannot mark notifications read")?;
            println!("All notifications marked read");
        }
        Command::Read { id } => {
            let done = api
                .mark_read(id)
                .await
                .with_context(|| format!("Cannot mark notification #{id} read"))?;
            report(done, &format!("Notification #{id} marked read"));
        }
        Command::Delete { id } => {
            let done = api
                .delete(id)
                .await
                .with_context(|| format!("Cannot delete notification #{id}"))?;
            report(done, &format!("Notification #{id} deleted"));
        }
        Command::Clear => {
            let done = api
                .delete_all()
                .await
                .context("Cannot delete notifications")?;
            report(done, "All notifications deleted");
        }
        Command::Watch {
            poll_secs,
            mark_read,
        } => {
            let config = ControllerConfig {
                poll_interval: Duration::from_secs(poll_secs),
                api_base: args.api_base.clone(),
                ..ControllerConfig::default()
            };
            config.validate()?;
            watch(api, config, mark_read).await;
        }
    }

    Ok(())
}

fn report(done: bool, message: &str) {
    if done {
        println!("{message}");
    } else {
        println!("Nothing changed");
    }
}

async fn watch(api: ReqwestApi, config: ControllerConfig, mark_read: bool) {
    let poll_interval = config.poll_interval;
    let view = TerminalView::new(&config.empty_label);
    let controller = NotificationsController::new(api, view, config);

    controller.run(Task::Load).await;
    if mark_read {
        for task in controller.open() {
            controller.run(task).await;
        }
        controller.close();
    }

    watch::poll_until(&controller, poll_interval, tokio::signal::ctrl_c()).await;
}

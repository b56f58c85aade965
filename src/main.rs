// SPDX-License-Identifier: MPL-2.0
use cafe_client::app::console::{ConsolePage, CART_COUNT_KEY};
use cafe_client::app::{App, Flags};
use cafe_client::cafe::api::OrderStatus;
use cafe_client::cafe::Outcome;
use cafe_client::ui::page::Page;
use cafe_client::config::MIN_REFRESH_INTERVAL_SECS;
use cafe_client::error::{Error, Result};
use serde_json::{Map, Value};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
cafe-client: command-line client for the café ordering service

USAGE:
  cafe-client [OPTIONS] <COMMAND> [ARGS]

OPTIONS:
  --lang <LOCALE>        Interface language (e.g. ko, en-US)
  --base-url <URL>       Café server address
  --data-dir <DIR>       Data directory (local storage)
  --config-dir <DIR>     Config directory (settings.toml)
  -y, --yes              Answer yes to confirmation prompts
  -h, --help             Print this help

COMMANDS:
  add-to-cart <MENU_ID> [--quantity N] [--temperature T] [--request TEXT]
  clear-cart
  cart-count
  order-status <ORDER_ID> <pending|preparing|ready|completed|cancelled>
  toggle-soldout <MENU_ID>
  delete-order <ORDER_ID>
  watch-orders [--interval SECS]
";

#[derive(Debug)]
enum Command {
    AddToCart {
        menu_id: u64,
        quantity: u32,
        options: Map<String, Value>,
    },
    ClearCart,
    CartCount,
    OrderStatus {
        order_id: u64,
        status: OrderStatus,
    },
    ToggleSoldout {
        menu_id: u64,
    },
    DeleteOrder {
        order_id: u64,
    },
    WatchOrders {
        interval_secs: Option<u64>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(code) => code,
        Err(err @ Error::Usage(_)) => {
            eprintln!("{err}\n\n{HELP}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut args: pico_args::Arguments) -> Result<ExitCode> {
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        base_url: args.opt_value_from_str("--base-url")?,
    };
    let assume_yes = args.contains(["-y", "--yes"]);
    let command = parse_command(&mut args)?;

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(Error::Usage(format!("unexpected arguments: {rest:?}")));
    }

    let mut app = App::new(flags)?;

    if let Command::CartCount = command {
        let count: u32 = app.storage().get(CART_COUNT_KEY, 0);
        let count = count.to_string();
        println!("{}", app.i18n.tr_with_args("cart-count", &[("count", count.as_str())]));
        return Ok(ExitCode::SUCCESS);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let (outcome, cart_count) = runtime.block_on(execute(&app, command, assume_yes));

    if let Some(count) = cart_count {
        app.storage_mut().set(CART_COUNT_KEY, &count);
    }

    Ok(match outcome {
        Outcome::Done | Outcome::Cancelled => ExitCode::SUCCESS,
        Outcome::Rejected | Outcome::Failed => ExitCode::FAILURE,
    })
}

fn parse_command(args: &mut pico_args::Arguments) -> Result<Command> {
    let Some(name) = args.subcommand()? else {
        return Err(Error::Usage("missing command".into()));
    };

    let command = match name.as_str() {
        "add-to-cart" => {
            let quantity = args.opt_value_from_str("--quantity")?.unwrap_or(1);
            let mut options = Map::new();
            if let Some(temperature) = args.opt_value_from_str::<_, String>("--temperature")? {
                options.insert("temperature".into(), Value::String(temperature));
            }
            if let Some(request) = args.opt_value_from_str::<_, String>("--request")? {
                options.insert("special_request".into(), Value::String(request));
            }
            Command::AddToCart {
                menu_id: args.free_from_str()?,
                quantity,
                options,
            }
        }
        "clear-cart" => Command::ClearCart,
        "cart-count" => Command::CartCount,
        "order-status" => Command::OrderStatus {
            order_id: args.free_from_str()?,
            status: args.free_from_str()?,
        },
        "toggle-soldout" => Command::ToggleSoldout {
            menu_id: args.free_from_str()?,
        },
        "delete-order" => Command::DeleteOrder {
            order_id: args.free_from_str()?,
        },
        "watch-orders" => Command::WatchOrders {
            interval_secs: args.opt_value_from_str("--interval")?,
        },
        other => return Err(Error::Usage(format!("unknown command '{other}'"))),
    };
    Ok(command)
}

async fn execute(app: &App, command: Command, assume_yes: bool) -> (Outcome, Option<u32>) {
    let stdin = std::io::stdin();
    let mut page = ConsolePage::new(&app.i18n, stdin.lock(), std::io::stdout())
        .assume_yes(assume_yes)
        .with_notifier(app.notifier().clone());

    let command_clears_cart = matches!(command, Command::ClearCart);
    let outcome = match command {
        Command::AddToCart {
            menu_id,
            quantity,
            options,
        } => app.cart().add_item(&mut page, menu_id, quantity, options).await,
        Command::ClearCart => app.cart().clear(&mut page).await,
        Command::OrderStatus { order_id, status } => {
            app.admin().update_order_status(order_id, status).await
        }
        Command::ToggleSoldout { menu_id } => app.admin().toggle_menu_soldout(&mut page, menu_id).await,
        Command::DeleteOrder { order_id } => app.admin().delete_order(&mut page, order_id).await,
        Command::WatchOrders { interval_secs } => {
            let period = interval_secs.map_or_else(
                || app.config().refresh_interval(),
                |secs| Duration::from_secs(secs.max(MIN_REFRESH_INTERVAL_SECS)),
            );
            let shutdown = async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %err, "cannot listen for Ctrl-C");
                }
            };
            app.admin().watch_orders(&mut page, period, shutdown).await;
            Outcome::Done
        }
        Command::CartCount => Outcome::Done,
    };

    page.show_banners();
    let cart_count = if command_clears_cart && outcome.is_done() {
        Some(0)
    } else {
        page.cart_count()
    };
    (outcome, cart_count)
}

//! Command-line host for the orchid catalog.
//!
//! Loads the configured dataset, runs one command against the in-memory
//! catalog and prints the result as JSON. Mutating commands show what the
//! catalog would look like afterwards; nothing is written back to disk.

use anyhow::{Context, Result, bail};
use orchid_catalog::{
    CatalogConfig, CatalogError, CatalogManager, Category, CharacteristicId, OrchidForm, OrchidId,
    OrchidView, category_summary, category_title, init_tracing, load_catalog, paginate,
};
use serde::Serialize;
use serde_json::json;
use std::env;
use std::path::PathBuf;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse(env::args().skip(1).collect())?;
    let mut config = CatalogConfig::from_env()?;
    if let Some(path) = &cli.data {
        config = config.with_data_path(path)?;
    }
    let mut manager = load_catalog(&config)?;
    execute(&mut manager, cli.command, config.page_size)
}

struct Cli {
    data: Option<PathBuf>,
    command: Command,
}

enum Command {
    List {
        page: usize,
    },
    Categories {
        category: Category,
    },
    Filter {
        category: Category,
        id: CharacteristicId,
        page: usize,
    },
    Show {
        id: OrchidId,
    },
    Create {
        form: OrchidForm,
    },
    Update {
        id: OrchidId,
        form: OrchidForm,
    },
    Remove {
        id: OrchidId,
    },
}

impl Cli {
    fn parse(args: Vec<String>) -> Result<Self> {
        let mut args = args.into_iter().peekable();
        let mut data = None;

        while let Some(flag) =
            args.next_if(|arg| matches!(arg.as_str(), "--data" | "--help" | "-h"))
        {
            if flag != "--data" {
                usage(0);
            }
            let value = args.next().context("--data requires a path")?;
            data = Some(PathBuf::from(value));
        }

        let Some(name) = args.next() else {
            usage(1);
        };
        let rest: Vec<String> = args.collect();

        let command = match name.as_str() {
            "list" => Command::List {
                page: parse_page(&rest)?,
            },
            "categories" => {
                let [category] = exact::<1>(&rest, "categories <category>")?;
                Command::Categories {
                    category: category.parse()?,
                }
            }
            "filter" => {
                let [category, id] = positional::<2>(&rest, "filter <category> <id>")?;
                Command::Filter {
                    category: category.parse()?,
                    id: CharacteristicId(parse_number(&id, "characteristic id")?),
                    page: parse_page(&rest[2..])?,
                }
            }
            "show" => {
                let [id] = exact::<1>(&rest, "show <id>")?;
                Command::Show {
                    id: OrchidId(parse_number(&id, "orchid id")?),
                }
            }
            "create" => Command::Create {
                form: parse_form(&rest)?,
            },
            "update" => {
                let [id] = positional::<1>(&rest, "update <id> --name .. --src ..")?;
                Command::Update {
                    id: OrchidId(parse_number(&id, "orchid id")?),
                    form: parse_form(&rest[1..])?,
                }
            }
            "remove" => {
                let [id] = exact::<1>(&rest, "remove <id>")?;
                Command::Remove {
                    id: OrchidId(parse_number(&id, "orchid id")?),
                }
            }
            "help" => usage(0),
            other => bail!("Unknown command '{other}'. Run 'orchid-catalog --help' for usage."),
        };

        Ok(Self { data, command })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: orchid-catalog [--data PATH] <command> [args]\n\nCommands:\n  list [--page N]                      Page through every orchid.\n  categories <category>                 List a taxonomy with orchid counts.\n  filter <category> <id> [--page N]     Orchids with one characteristic.\n  show <id>                             One orchid with resolved characteristics.\n  create --name NAME --src SRC [--<category> ID]...\n  update <id> --name NAME --src SRC [--<category> ID]...\n  remove <id>\n\nCategories: genus, type, luminosity, temperature, humidity, size.\nChanges are applied in memory only and printed; the dataset file is not modified.\n\nEnvironment:\n  ORCHID_CATALOG_DATA       Dataset path (default: bundled data/orchids.json).\n  ORCHID_CATALOG_PAGE_SIZE  Gallery page size (default: 6).\n  ORCHID_CATALOG_LOG        Log filter (default: warn)."
    );
    std::process::exit(code);
}

fn positional<const N: usize>(rest: &[String], shape: &str) -> Result<[String; N]> {
    if rest.len() < N || rest[..N].iter().any(|arg| arg.starts_with("--")) {
        bail!("Expected: orchid-catalog {shape}");
    }
    let values: Vec<String> = rest[..N].to_vec();
    values
        .try_into()
        .map_err(|_| anyhow::anyhow!("Expected: orchid-catalog {shape}"))
}

fn exact<const N: usize>(rest: &[String], shape: &str) -> Result<[String; N]> {
    let values = positional::<N>(rest, shape)?;
    if rest.len() > N {
        bail!("Unexpected arguments: {}", rest[N..].join(" "));
    }
    Ok(values)
}

fn parse_number(raw: &str, what: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid {what} '{raw}'; expected a non-negative integer"))
}

fn parse_page(rest: &[String]) -> Result<usize> {
    match rest {
        [] => Ok(1),
        [flag, value] if flag == "--page" => {
            let page = parse_number(value, "page")?;
            Ok(usize::try_from(page).context("page out of range")?)
        }
        _ => bail!("Unexpected arguments: {}", rest.join(" ")),
    }
}

fn parse_form(rest: &[String]) -> Result<OrchidForm> {
    let mut form = OrchidForm::default();
    let mut iter = rest.iter();
    while let Some(flag) = iter.next() {
        let Some(field) = flag.strip_prefix("--") else {
            bail!("Unexpected argument '{flag}'");
        };
        let value = iter
            .next()
            .with_context(|| format!("--{field} requires a value"))?;
        form.set_field(field, value.as_str())?;
    }
    Ok(form)
}

fn execute(manager: &mut CatalogManager, command: Command, page_size: usize) -> Result<()> {
    match command {
        Command::List { page } => {
            let views: Vec<OrchidView<'_>> = manager
                .orchids()
                .iter()
                .map(|record| manager.view(record))
                .collect();
            print_json(&json!({
                "title": "All orchids",
                "gallery": paginate(&views, page, page_size),
            }))
        }
        Command::Categories { category } => print_json(&json!({
            "category": category,
            "title": category.title(),
            "entries": category_summary(manager, category),
        })),
        Command::Filter { category, id, page } => {
            let title = match manager.taxonomy().resolve(category, id) {
                Some(entry) => category_title(category, entry),
                None => format!("{}: {id}", category.title()),
            };
            let views: Vec<OrchidView<'_>> = manager
                .filter_by_category(category, id)
                .into_iter()
                .map(|record| manager.view(record))
                .collect();
            let gallery = paginate(&views, page, page_size);
            if gallery.total_items == 0 {
                eprintln!("No orchids found in this category.");
            }
            print_json(&json!({ "title": title, "gallery": gallery }))
        }
        Command::Show { id } => {
            let record = manager.orchid(id).ok_or(CatalogError::NotFound { id })?;
            print_json(&manager.view(record))
        }
        Command::Create { form } => {
            let candidate = form.into_candidate()?;
            let id = manager.create(candidate)?.id();
            print_record(manager, id)
        }
        Command::Update { id, form } => {
            let details = form.into_details()?;
            manager.update(id, details)?;
            print_record(manager, id)
        }
        Command::Remove { id } => {
            let removed = manager.remove(id);
            let view = removed.as_ref().map(|record| manager.view(record));
            print_json(&json!({
                "removed": view,
                "remaining": manager.orchids().len(),
            }))
        }
    }
}

fn print_record(manager: &CatalogManager, id: OrchidId) -> Result<()> {
    let record = manager.orchid(id).ok_or(CatalogError::NotFound { id })?;
    print_json(&manager.view(record))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

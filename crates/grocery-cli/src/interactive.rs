//! Line-oriented driver for a mounted catalog view.
//!
//! Plain lines are search input and go through the view's debounce.
//! Lines starting with `:` are commands.

use anyhow::{bail, Context as _};
use grocery_client::{CatalogClient, CatalogView, DetailView};
use grocery_core::{PageSize, SortItem, SortModel, ViewState};
use tokio::io::{AsyncBufReadExt as _, BufReader};

use crate::render::{render_catalog, render_details};

const HELP: &str = "\
type to search by name, or:
  :category [NAME]      filter by category (omit NAME for all)
  :sort [FIELD[:DIR]]   sort keys, e.g. `:sort name:desc price` (omit for none)
  :page N               go to page N (1-based)
  :size N               rows per page: 5, 10 or 20
  :open ROW             show details for a visible row
  :dismiss              hide the error notification
  :quit";

#[derive(Debug, PartialEq)]
enum Command {
    Search(String),
    Category(Option<String>),
    Sort(SortModel),
    Page(usize),
    PageSize(PageSize),
    Open(usize),
    Dismiss,
    Help,
    Quit,
}

fn parse_command(line: &str) -> anyhow::Result<Command> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Search(line.to_string()));
    };
    let rest = rest.trim_end();
    let (name, args) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(name, args)| (name, args.trim()));

    let command = match name {
        "category" | "cat" => Command::Category(Some(args.to_string()).filter(|c| !c.is_empty())),
        "sort" => {
            let items = args
                .split_whitespace()
                .map(str::parse::<SortItem>)
                .collect::<Result<Vec<_>, _>>()?;
            Command::Sort(SortModel::new(items))
        }
        "page" => {
            let page: usize = args.parse().context("page must be a number")?;
            if page == 0 {
                bail!("pages start at 1");
            }
            Command::Page(page - 1)
        }
        "size" => {
            let size: usize = args.parse().context("page size must be a number")?;
            Command::PageSize(PageSize::try_from(size)?)
        }
        "open" => Command::Open(args.parse().context("row must be a number")?),
        "dismiss" => Command::Dismiss,
        "help" | "h" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => bail!("unknown command `:{other}` (try :help)"),
    };
    Ok(command)
}

enum Event {
    Line(Option<String>),
    Changed,
}

pub(crate) async fn run(client: CatalogClient, mut view: CatalogView) -> anyhow::Result<()> {
    println!("{HELP}");
    print!("{}", render_catalog(&view.snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line?),
            () = view.changed() => Event::Changed,
        };

        let line = match event {
            Event::Changed => {
                print!("{}", render_catalog(&view.snapshot()));
                continue;
            }
            Event::Line(None) => break,
            Event::Line(Some(line)) => line,
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("error: {e:#}");
                continue;
            }
        };

        match command {
            Command::Search(text) => view.input_search(text),
            Command::Category(category) => view.select_category(category),
            Command::Sort(sort) => view.change_sort(sort),
            Command::Page(page) => view.change_page(page),
            Command::PageSize(size) => view.change_page_size(size),
            Command::Dismiss => view.dismiss_notification(),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Open(row) => {
                let Some(navigation) = view.select_row(row) else {
                    eprintln!("error: no row {row} on this page");
                    continue;
                };
                tracing::debug!(path = %navigation.to_path(), "navigating");
                view.unmount();

                if let Some(mut details) = DetailView::open(client.clone(), &navigation) {
                    print!("{}", render_details(&details.settled().await));
                }

                view = CatalogView::mount_with_state(client.clone(), ViewState::default());
                view.settled().await;
                print!("{}", render_catalog(&view.snapshot()));
            }
        }
    }

    view.unmount();
    Ok(())
}

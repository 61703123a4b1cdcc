//! FILENAME: app/src/main.rs
//! PURPOSE: Demo binary for the indicator drill-down tree.
//! CONTEXT: Loads a JSON config, fetches the root rows, drills down the
//! configured number of levels through the store's fetch protocol, prints
//! the visible view and the indicator passport, and optionally exports the
//! whole fetched tree as xlsx.

mod config;

use std::process::ExitCode;

use log::{error, warn};

use client::{StatClient, TreeQuery};
use model::{derive_columns, format_value, Locale, PeriodColumn, TreeRow};
use tree_engine::{visible, TreeStore};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let config_path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: indicator-tree <config.json>");
            return ExitCode::FAILURE;
        }
    };

    let config = match AppConfig::load(config_path.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            error!("failed to read config {}: {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    let client = StatClient::new(&config.base_url);
    let query = config.tree_query();

    let mut store = TreeStore::new();
    match client.tree_rows(&query, None).await {
        Ok(rows) if rows.is_empty() => {
            println!("Нет данных для отображения");
            return ExitCode::SUCCESS;
        }
        Ok(rows) => store.set_root(rows),
        Err(e) => {
            // Transport failures are logged, never fatal; with no prior
            // state there is nothing to show.
            error!("root fetch failed: {}", e);
            println!("Нет данных для отображения");
            return ExitCode::FAILURE;
        }
    }

    drill_down(&client, &query, &mut store, config.drill_depth).await;

    let all_rows: Vec<TreeRow> = (0..store.len()).map(|i| store.node(i).row.clone()).collect();
    let all_columns = derive_columns(&all_rows);
    let columns = config.columns.apply(&all_columns);

    print_table(&store, columns, &config);

    match client.index_attributes(config.index_id, config.period_id).await {
        Ok(attrs) => {
            println!();
            println!("Наименование единицы измерения: {}", attrs.measure_name);
            for entry in &attrs.passport {
                println!("{}: {}", entry.title, entry.value);
            }
        }
        Err(e) => warn!("passport fetch failed: {}", e),
    }

    if let Some(path) = &config.export_path {
        if let Err(e) = export::save_xlsx(&store, columns, config.format, &Locale::ru(), path) {
            error!("export failed: {}", e);
            return ExitCode::FAILURE;
        }
        println!("Экспортировано: {}", path.display());
    }

    ExitCode::SUCCESS
}

/// Fetches children level by level down to `depth` levels below the roots,
/// expanding each populated row so the printed view shows what was drilled.
/// A failed child fetch is logged and re-armed; the rest of the level
/// continues.
async fn drill_down(client: &StatClient, query: &TreeQuery, store: &mut TreeStore, depth: usize) {
    for level in 0..depth {
        for id in store.unfetched_at_depth(level) {
            if !store.begin_fetch(id) {
                continue;
            }
            match client.tree_rows(query, Some(id)).await {
                Ok(rows) => {
                    store.merge_children(id, rows);
                    if !store.is_expanded(id) {
                        store.toggle(id);
                    }
                }
                Err(e) => {
                    warn!("child fetch for row {} failed: {}", id, e);
                    store.abort_fetch(id);
                }
            }
        }
    }
}

fn print_table(store: &TreeStore, columns: &[PeriodColumn], config: &AppConfig) {
    let locale = Locale::ru();

    let mut header = String::from("Наименование");
    for column in columns {
        header.push_str(" | ");
        header.push_str(&column.key);
    }
    println!("{}", header);

    for row in visible(store, columns) {
        let mut line = format!("{}{}", "  ".repeat(row.level), row.name);
        for value in row.values {
            line.push_str(" | ");
            line.push_str(&format_value(value, config.format, &locale));
        }
        println!("{}", line);
    }
}

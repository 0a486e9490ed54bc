use anyhow::Result;
use comfy_table::{CellAlignment, Table};
use tracing::info_span;

use f1_cli::config::{OptionOverrides, resolve_options};
use f1_cli::pipeline::{RunOutcome, RunRequest, execute_run};
use f1_model::TableName;

use crate::cli::RunArgs;
use crate::summary::{align_column, apply_table_style, header_cell};

pub fn run_tables() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Description"),
        header_cell("Key"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for name in TableName::LOAD_ORDER {
        let columns = name
            .columns()
            .iter()
            .map(|column| {
                let nullable = if column.nullable { "?" } else { "" };
                format!("{} {}{nullable}", column.name, column.kind.sql_type())
            })
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            name.as_str().to_string(),
            name.description().to_string(),
            name.primary_key().to_string(),
            columns,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_etl(args: &RunArgs) -> Result<RunOutcome> {
    let span = info_span!("run", data_dir = %args.data_dir.display());
    let _guard = span.enter();
    let overrides = OptionOverrides {
        unresolved_keys: args.unresolved_keys.map(Into::into),
        pit_stop_join: args.pit_stop_join.map(Into::into),
    };
    let options = resolve_options(args.config.as_deref(), overrides)?;
    let request = RunRequest {
        data_dir: args.data_dir.clone(),
        options,
        sqlite: args.sqlite.clone(),
        csv_dir: args.csv_dir.clone(),
        dry_run: args.dry_run,
    };
    execute_run(&request)
}

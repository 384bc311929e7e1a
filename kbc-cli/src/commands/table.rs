//! Table command handlers
//!
//! Listing Storage tables and showing a single table's columns.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use kbc_client::{Column, KeboolaClient, Table};

use crate::config::Config;

/// Table subcommands
#[derive(Subcommand)]
pub enum TableCommands {
    /// List all tables
    List,
    /// Show one table with its columns
    Show {
        /// `schema.name`, bare table name, or unambiguous prefix
        name: String,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle table commands
pub async fn handle_table_command(command: TableCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        TableCommands::List => list_tables(&client).await,
        TableCommands::Show { name, json } => show_table(&client, &name, json).await,
    }
}

/// List all tables
async fn list_tables(client: &KeboolaClient) -> Result<()> {
    let tables = client
        .list_tables()
        .await
        .context("Failed to retrieve tables from Keboola")?;

    if tables.is_empty() {
        println!("{}", "No tables found.".yellow());
    } else {
        println!("{}", format!("Found {} table(s):", tables.len()).bold());
        println!();
        for table in tables {
            print_table_summary(&table);
        }
    }

    Ok(())
}

/// Get and display a single table
async fn show_table(client: &KeboolaClient, name: &str, json: bool) -> Result<()> {
    let table = client.find_table(name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print_table_details(&table);
    }

    Ok(())
}

/// Print a table summary
fn print_table_summary(table: &Table) {
    println!("  {} {}", "▸".cyan(), table.qualified_name().bold());
    println!(
        "    Columns: {}",
        table.columns.len().to_string().dimmed()
    );
    if let Some(rows) = table.row_count {
        println!("    Rows:    {}", rows.to_string().dimmed());
    }
    let keys = primary_key_names(table);
    if !keys.is_empty() {
        println!("    Key:     {}", keys.dimmed());
    }
    if let Some(desc) = &table.description {
        println!("    Description: {}", desc.dimmed());
    }
    println!();
}

/// Print detailed table information
fn print_table_details(table: &Table) {
    println!("{}", "Table Details:".bold());
    println!("  Name:        {}", table.name.cyan());
    println!("  Schema:      {}", table.schema);
    if let Some(desc) = &table.description {
        println!("  Description: {}", desc);
    }
    if let Some(rows) = table.row_count {
        println!("  Rows:        {}", rows);
    }
    let keys = primary_key_names(table);
    if !keys.is_empty() {
        println!("  Primary key: {}", keys);
    }

    if table.columns.is_empty() {
        return;
    }

    let width = table
        .columns
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    println!("\n{}", "Columns:".bold());
    println!("{}", "─".repeat(80).dimmed());
    for column in &table.columns {
        print_column(column, width);
    }
    println!("{}", "─".repeat(80).dimmed());
}

fn print_column(column: &Column, width: usize) {
    let marker = if column.primary { "*" } else { " " };
    let data_type = match (&column.data_type, &column.length) {
        (Some(t), Some(len)) => format!("{}({})", t, len),
        (Some(t), None) => t.clone(),
        (None, _) => "-".to_string(),
    };

    println!(
        "  {}{:<width$}  {:<16} {}",
        marker.red(),
        column.name,
        data_type,
        column.description.as_deref().unwrap_or("").dimmed(),
        width = width
    );
}

fn primary_key_names(table: &Table) -> String {
    table
        .primary_keys()
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

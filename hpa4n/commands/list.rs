use anyhow::Result;
use hpa4n_common::{render_table, truncate_with_ellipsis};
use hpa4n_kube::HpaRow;
use hpa4n_metrics::EMPTY_VALUE;

use crate::cli::ListArgs;
use crate::commands::Source;

#[cfg(test)]
#[path = "./list.tests.rs"]
mod list_tests;

const COLUMNS_GAP: usize = 3;
const MAX_ALIAS_WIDTH: usize = 30;

/// Prints table of horizontal pod autoscalers.
pub async fn run(source: &Source, all_namespaces: bool, args: &ListArgs, wide: bool) -> Result<()> {
    let selector = args.label_selector();
    let items = source.list(all_namespaces, selector.as_deref()).await?;

    let mut rows = items.iter().map(HpaRow::from).collect::<Vec<_>>();
    rows.sort_unstable_by(|a, b| a.namespace.cmp(&b.namespace).then_with(|| a.name.cmp(&b.name)));
    tracing::debug!("Listing {} autoscalers", rows.len());

    if rows.is_empty() {
        println!("No horizontal pod autoscalers found.");
    } else {
        print!("{}", render_rows(&rows, all_namespaces, args.wide || wide));
    }

    Ok(())
}

/// Renders autoscaler rows as a table.
pub fn render_rows(rows: &[HpaRow], show_namespace: bool, wide: bool) -> String {
    let mut header = Vec::with_capacity(10);
    if show_namespace {
        header.push("NAMESPACE");
    }

    header.extend(["NAME", "TARGET", "CPU", "MEMORY", "MIN-MAX", "REPLICAS", "AGE"]);
    if wide {
        header.extend(["CONDITIONS", "ALIAS"]);
    }

    let lines = rows
        .iter()
        .map(|row| {
            let mut line = Vec::with_capacity(header.len());
            if show_namespace {
                line.push(row.namespace.clone());
            }

            line.extend([
                row.name.clone(),
                row.target.clone(),
                row.cpu(),
                row.memory(),
                row.replica_bounds(),
                row.replicas(),
                row.age.clone().unwrap_or_else(|| EMPTY_VALUE.to_owned()),
            ]);

            if wide {
                line.push(row.conditions.to_string());
                line.push(
                    row.alias
                        .as_deref()
                        .map_or_else(String::new, |a| truncate_with_ellipsis(a, MAX_ALIAS_WIDTH)),
                );
            }

            line
        })
        .collect::<Vec<_>>();

    render_table(&header, &lines, COLUMNS_GAP)
}

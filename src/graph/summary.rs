//! Terminal summary of the hottest allocation paths.

use super::dot::format_size;
use crate::aggregator::metrics::{AllocationTotals, HotNode};

const PATH_WIDTH: usize = 44;
const BAR_WIDTH: usize = 40;

/// Render a table of hot nodes followed by a size bar chart
///
/// # Arguments
/// * `hot_nodes` - Ranked nodes from `calculate_hot_nodes`
/// * `totals` - Dump-wide totals, used for the footer
/// * `max_lines` - Rows to print
pub fn generate_text_summary(
    hot_nodes: &[HotNode],
    totals: &AllocationTotals,
    max_lines: usize,
) -> String {
    let mut lines = Vec::new();

    lines.push("  ALLOCATION HOT PATHS".to_string());
    lines.push(format!(
        "  {:<width$} | {:>10} | {:>10} | {:>7}",
        "Call path (largest first)",
        "COUNT",
        "SIZE",
        "%",
        width = PATH_WIDTH
    ));
    lines.push(format!("  {}", "-".repeat(PATH_WIDTH + 38)));

    for node in hot_nodes.iter().take(max_lines) {
        lines.push(format!(
            "  {:<width$} | {:>10} | {:>10} | {:>6.1}%",
            display_path(node),
            node.count,
            format_size(node.size),
            node.percentage,
            width = PATH_WIDTH
        ));
    }

    lines.push(String::new());
    for node in hot_nodes.iter().take(5) {
        let bar_len = ((node.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        lines.push(format!(
            "  {:<24} {:<bar$} {:>5.1}%",
            truncate_start(&node.name, 24),
            "#".repeat(bar_len.min(BAR_WIDTH)),
            node.percentage,
            bar = BAR_WIDTH
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "  {} allocations, {} in {} records ({} unique call paths)",
        totals.total_count,
        format_size(totals.total_size),
        totals.record_count,
        totals.node_count
    ));

    if hot_nodes.len() > max_lines {
        lines.push(format!("  (Showing top {} of {} ranked paths)", max_lines, hot_nodes.len()));
    }

    lines.join("\n")
}

/// Indent by depth and keep the tail of long names
fn display_path(node: &HotNode) -> String {
    let indent = "  ".repeat(node.depth.min(8));
    let room = PATH_WIDTH.saturating_sub(indent.len());
    format!("{}{}", indent, truncate_start(&node.name, room))
}

fn truncate_start(text: &str, max_chars: usize) -> String {
    let len = text.chars().count();
    if len <= max_chars || max_chars <= 3 {
        return text.to_string();
    }
    let tail: String = text.chars().skip(len - (max_chars - 3)).collect();
    format!("...{}", tail)
}

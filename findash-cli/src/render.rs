use findash_core::ChartData;

/// Plain-text rendering of a chart projection.
pub fn chart_table(chart: &ChartData) -> String {
    let mut s = format!("{}\n\n", chart.title);
    if chart.is_empty() {
        s.push_str("(no balances recorded yet)\n");
        return s;
    }

    let width = chart.labels.iter().map(String::len).max().unwrap_or(0).max(chart.y_label.len());
    s.push_str(&format!("{:<10}  {:>width$}\n", "Date", chart.y_label));
    for (tick, label) in chart.tick_text.iter().zip(&chart.labels) {
        s.push_str(&format!("{:<10}  {:>width$}\n", tick, label));
    }
    s
}

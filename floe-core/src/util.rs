//! Utilities.

/// Formats a value table, indexed by state then action, as a text table.
///
/// ```
/// use floe_core::util::format_values;
///
/// let table = format_values(&[vec![0.5, 0.25], vec![0.0, 1.0]]);
/// assert_eq!(table, "STATE\t0\t1\n0\t0.50\t0.25\n1\t0.00\t1.00");
/// ```
pub fn format_values(values: &[Vec<f64>]) -> String {
    let n_actions = values.first().map_or(0, |row| row.len());
    let header = std::iter::once("STATE".to_string())
        .chain((0..n_actions).map(|a| a.to_string()))
        .collect::<Vec<_>>()
        .join("\t");

    std::iter::once(header)
        .chain(values.iter().enumerate().map(|(s, row)| {
            std::iter::once(s.to_string())
                .chain(row.iter().map(|v| format!("{:.2}", v)))
                .collect::<Vec<_>>()
                .join("\t")
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

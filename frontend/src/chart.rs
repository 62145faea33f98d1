use crate::models::ChartPoint;

const PALETTE: [&str; 6] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899"];

/// One bar of the analysis chart, ready for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    /// Height relative to the tallest bar, 0–100.
    pub height_percent: f64,
    pub color: &'static str,
}

/// Lays out one bar per point, in order. Non-positive values get no height.
pub fn bars(points: &[ChartPoint]) -> Vec<ChartBar> {
    let max = points
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let height_percent = if max > 0.0 && point.value.is_finite() {
                (point.value.max(0.0) / max * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };
            ChartBar {
                label: point.label.clone(),
                value: point.value,
                height_percent,
                color: PALETTE[idx % PALETTE.len()],
            }
        })
        .collect()
}

/// Compact value label: integers without decimals, others with up to two.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

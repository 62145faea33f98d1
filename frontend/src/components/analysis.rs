use leptos::prelude::*;

use crate::chart::{self, ChartBar};
use crate::models::DataAnalysisResult;
use crate::state::AppState;

/// Paste-and-analyse view for the Data mode.
#[component]
pub fn AnalysisView() -> impl IntoView {
    let state = expect_context::<AppState>();

    let is_analyzing = move || state.analysis.with(|a| a.is_in_flight());
    let can_run = move || state.analysis.with(|a| a.can_run());

    view! {
        <div class="analysis-view">
            <section class="card">
                <h2 class="card-title">"📈 Data Input"</h2>
                <textarea
                    class="data-input"
                    placeholder="Paste your CSV data, JSON, or just a list of numbers with categories here..."
                    prop:value=move || state.analysis.with(|a| a.input().to_string())
                    on:input=move |ev| state.set_analysis_input(event_target_value(&ev))
                />
                <div class="card-actions">
                    <button
                        class="analyze-btn"
                        on:click=move |_| state.run_analysis()
                        disabled=move || !can_run()
                    >
                        {move || if is_analyzing() { "Analyzing…" } else { "Analyze Data" }}
                    </button>
                </div>
            </section>

            {move || {
                state
                    .analysis
                    .with(|a| a.result().cloned())
                    .map(|result| view! { <AnalysisReport result=result /> })
            }}
        </div>
    }
}

/// Summary, recommendation, chart and findings of one report.
#[component]
fn AnalysisReport(result: DataAnalysisResult) -> impl IntoView {
    let bars = chart::bars(&result.chart_data);

    view! {
        <div class="report">
            <div class="report-grid">
                <section class="card">
                    <h3 class="card-label">"Executive Summary"</h3>
                    <p>{result.summary}</p>
                </section>
                <section class="card recommendation">
                    <h3 class="card-label">"Strategic Recommendation"</h3>
                    <p>{result.recommendation}</p>
                </section>
            </div>

            <section class="card">
                <h3 class="card-title">"Visual Breakdown"</h3>
                <BarChart bars=bars />
            </section>

            <section class="card">
                <h3 class="card-title">"Key Findings"</h3>
                <ul class="insights">
                    {result
                        .insights
                        .into_iter()
                        .map(|insight| view! { <li><span class="check">"✔"</span>{insight}</li> })
                        .collect_view()}
                </ul>
            </section>
        </div>
    }
}

#[component]
fn BarChart(bars: Vec<ChartBar>) -> impl IntoView {
    view! {
        <div class="bar-chart">
            {bars
                .into_iter()
                .map(|bar| {
                    let style = format!(
                        "height: {:.1}%; background-color: {};",
                        bar.height_percent, bar.color
                    );
                    view! {
                        <div class="bar-column" title=format!("{}: {}", bar.label, chart::format_value(bar.value))>
                            <span class="bar-value">{chart::format_value(bar.value)}</span>
                            <div class="bar-track">
                                <div class="bar" style=style></div>
                            </div>
                            <span class="bar-label">{bar.label.clone()}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

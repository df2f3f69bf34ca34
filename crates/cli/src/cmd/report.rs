//! `vault report` command: static HTML page with vault charts.

use charts_rs::{BarChart, HorizontalBarChart, Series, THEME_DARK};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use woplab_core::config::ResolvedConfig;
use woplab_core::templates::{escape_html, render_to_file, RenderContext};
use woplab_core::vault::stats::{BAD, GOOD};
use woplab_core::vault::VaultStats;

const REPORT_TEMPLATE: &str = include_str!("../../templates/vault/report.html");
const STYLE_CSS: &str = include_str!("../../static/css/style.css");

const CHART_WIDTH: f32 = 960.0;
const ROW_HEIGHT: f32 = 28.0;

/// Row of the hourly submissions table.
#[derive(Tabled)]
struct HourlyTableRow {
    #[tabled(rename = "Hour (UTC)")]
    hour: String,
    #[tabled(rename = "Good")]
    good: usize,
    #[tabled(rename = "Bad")]
    bad: usize,
}

pub fn run(cfg: &ResolvedConfig, args: &crate::ReportArgs) {
    let stats = super::stats::load_stats(cfg);

    println!("rendering vault report: {}", args.result_dir.display());
    let index_path = match render_report(&stats, &cfg.vault_path, &args.result_dir) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to render report: {e}");
            std::process::exit(1);
        }
    };

    println!("{}", hourly_table(&stats));
    println!("vault report index: {}", index_path.display());

    if args.open_web {
        if let Err(e) = open::that(&index_path) {
            eprintln!("Failed to open {}: {e}", index_path.display());
            std::process::exit(1);
        }
    }
}

/// Write `index.html` and `css/style.css` into `dir`, returning the index path.
fn render_report(stats: &VaultStats, vault_path: &Path, dir: &Path) -> Result<PathBuf, String> {
    let css_dir = dir.join("css");
    fs::create_dir_all(&css_dir)
        .map_err(|e| format!("cannot create {}: {e}", css_dir.display()))?;

    let mut ctx = RenderContext::new();
    ctx.insert("title".into(), "Words of Power Vault".into());
    ctx.insert("vault_path".into(), vault_path.display().to_string());
    ctx.insert("generated_at".into(), Utc::now().format("%Y-%m-%d %H:%M UTC").to_string());
    ctx.insert("n_drawings".into(), stats.n_drawings.to_string());
    ctx.insert("n_good".into(), stats.tag_count(GOOD).to_string());
    ctx.insert("n_bad".into(), stats.tag_count(BAD).to_string());
    ctx.insert("n_symbols".into(), stats.n_symbols.len().to_string());
    ctx.insert("symbols_tags_fig".into(), symbols_tags_chart(stats)?);
    ctx.insert("symbols_badness_fig".into(), symbols_badness_chart(stats)?);
    ctx.insert("times_fig".into(), times_chart(stats)?);

    let index_path = dir.join("index.html");
    render_to_file(REPORT_TEMPLATE, &ctx, &index_path).map_err(|e| e.to_string())?;

    let css_path = css_dir.join("style.css");
    fs::write(&css_path, STYLE_CSS)
        .map_err(|e| format!("cannot write {}: {e}", css_path.display()))?;

    tracing::info!("vault report written to {}", dir.display());
    Ok(index_path)
}

fn symbols_tags_chart(stats: &VaultStats) -> Result<String, String> {
    let rows = stats.symbols_tags_rows();
    if rows.is_empty() {
        return Ok(empty_chart("amount of drawings per symbol"));
    }

    let labels = rows.iter().map(|r| r.symbol.clone()).collect();
    let good = rows.iter().map(|r| r.good as f32).collect();
    let bad = rows.iter().map(|r| r.bad as f32).collect();

    let mut chart = HorizontalBarChart::new_with_theme(
        vec![Series::new(GOOD.to_string(), good), Series::new(BAD.to_string(), bad)],
        labels,
        THEME_DARK,
    );
    chart.title_text = "amount of drawings per symbol".to_string();
    chart.width = CHART_WIDTH;
    chart.height = bar_chart_height(rows.len());
    for series in chart.series_list.iter_mut() {
        series.label_show = true;
    }
    chart.svg().map_err(|e| e.to_string())
}

fn symbols_badness_chart(stats: &VaultStats) -> Result<String, String> {
    let rows = stats.symbols_badness_rows();
    if rows.is_empty() {
        return Ok(empty_chart("drawing badness (bad / good ratio) per symbol"));
    }

    let labels = rows.iter().map(|r| r.symbol.clone()).collect();
    let badness = rows.iter().map(|r| r.badness as f32).collect();

    let mut chart = HorizontalBarChart::new_with_theme(
        vec![Series::new("badness [%]".to_string(), badness)],
        labels,
        THEME_DARK,
    );
    chart.title_text = "drawing badness (bad / good ratio) per symbol".to_string();
    chart.width = CHART_WIDTH;
    chart.height = bar_chart_height(rows.len());
    chart.series_list[0].label_show = true;
    chart.svg().map_err(|e| e.to_string())
}

fn times_chart(stats: &VaultStats) -> Result<String, String> {
    let rows = stats.hourly_rows();
    if rows.is_empty() {
        return Ok(empty_chart("drawings submission through time"));
    }

    let labels = rows.iter().map(|r| r.hour.format("%m-%d %H:00").to_string()).collect();
    let good = rows.iter().map(|r| r.good as f32).collect();
    let bad = rows.iter().map(|r| r.bad as f32).collect();

    let mut chart = BarChart::new_with_theme(
        vec![Series::new(GOOD.to_string(), good), Series::new(BAD.to_string(), bad)],
        labels,
        THEME_DARK,
    );
    chart.title_text = "drawings submission through time".to_string();
    chart.width = CHART_WIDTH;
    chart.height = 480.0;
    for series in chart.series_list.iter_mut() {
        series.label_show = true;
    }
    chart.svg().map_err(|e| e.to_string())
}

fn bar_chart_height(n_rows: usize) -> f32 {
    (n_rows as f32 * ROW_HEIGHT + 120.0).max(400.0)
}

fn empty_chart(title: &str) -> String {
    format!(r#"<div class="empty"><h3>{}</h3><p>no drawings</p></div>"#, escape_html(title))
}

fn hourly_table(stats: &VaultStats) -> String {
    let rows: Vec<HourlyTableRow> = stats
        .hourly_rows()
        .into_iter()
        .map(|r| HourlyTableRow {
            hour: r.hour.format("%Y-%m-%d %H:00").to_string(),
            good: r.good,
            bad: r.bad,
        })
        .collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

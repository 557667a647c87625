//! Inline SVG charts

use std::fmt::Write;

use crate::format::{escape_html, percent};
use crate::models::{CategoryRate, FeatureImpact};

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_TOP: f64 = 20.0;

pub const VIRIDIS: [&str; 3] = ["#440154", "#21918c", "#fde725"];
pub const PLASMA: [&str; 3] = ["#0d0887", "#cc4778", "#f0f921"];

const POSITIVE: &str = "#ff0051";
const NEGATIVE: &str = "#008bfb";
const NEUTRAL: &str = "#9e9e9e";

/// Upper end of the y axis: the largest rate rounded up to the next tenth
fn axis_max(bars: &[CategoryRate]) -> f64 {
    let max = bars.iter().map(|b| b.churn_rate).fold(0.0, f64::max);
    ((max * 10.0).ceil() / 10.0).max(0.1)
}

/// Vertical bar chart of churn rate per category
pub fn rate_bars(bars: &[CategoryRate], x_label: &str, y_label: &str, palette: &[&str]) -> String {
    let plot_w = WIDTH - MARGIN_LEFT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let top = axis_max(bars);
    let slot = if bars.is_empty() { plot_w } else { plot_w / bars.len() as f64 };

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg viewBox=\"0 0 {w} {h}\" width=\"100%\" role=\"img\" aria-label=\"{label}\">",
        w = WIDTH,
        h = HEIGHT,
        label = escape_html(y_label),
    );

    // y axis ticks at every tenth
    let steps = (top * 10.0).round() as usize;
    for i in 0..=steps {
        let value = i as f64 / 10.0;
        let y = MARGIN_TOP + plot_h * (1.0 - value / top);
        let _ = write!(
            svg,
            "<line x1=\"{x0}\" y1=\"{y:.1}\" x2=\"{x1}\" y2=\"{y:.1}\" stroke=\"#e6e6e6\"/>\
             <text x=\"{tx}\" y=\"{ty:.1}\" font-size=\"11\" text-anchor=\"end\">{v:.1}</text>",
            x0 = MARGIN_LEFT,
            x1 = WIDTH,
            tx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
            v = value,
        );
    }

    for (i, bar) in bars.iter().enumerate() {
        let bar_h = plot_h * bar.churn_rate / top;
        let x = MARGIN_LEFT + slot * i as f64 + slot * 0.15;
        let y = MARGIN_TOP + plot_h - bar_h;
        let color = palette.get(i % palette.len().max(1)).copied().unwrap_or("#4c78a8");
        let _ = write!(
            svg,
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{bw:.1}\" height=\"{bar_h:.1}\" fill=\"{color}\">\
             <title>{cat}: {rate} ({n} customers)</title></rect>\
             <text x=\"{cx:.1}\" y=\"{ly:.1}\" font-size=\"12\" text-anchor=\"middle\">{cat}</text>",
            bw = slot * 0.7,
            cat = escape_html(&bar.category),
            rate = percent(bar.churn_rate, 1),
            n = bar.customers,
            cx = x + slot * 0.35,
            ly = HEIGHT - MARGIN_BOTTOM + 18.0,
        );
    }

    let _ = write!(
        svg,
        "<text x=\"{cx}\" y=\"{by}\" font-size=\"13\" text-anchor=\"middle\">{xl}</text>\
         <text x=\"14\" y=\"{cy}\" font-size=\"13\" text-anchor=\"middle\" transform=\"rotate(-90 14 {cy})\">{yl}</text></svg>",
        cx = MARGIN_LEFT + plot_w / 2.0,
        by = HEIGHT - 8.0,
        cy = MARGIN_TOP + plot_h / 2.0,
        xl = escape_html(x_label),
        yl = escape_html(y_label),
    );
    svg
}

/// Horizontal bars of mean absolute attribution, colored by direction
pub fn impact_bars(impacts: &[FeatureImpact]) -> String {
    const ROW: f64 = 30.0;
    const LABEL_W: f64 = 180.0;
    let plot_w = WIDTH + 160.0 - LABEL_W - 70.0;
    let height = ROW * impacts.len() as f64 + 40.0;
    let max = impacts.iter().map(|f| f.mean_abs).fold(0.0, f64::max);
    let scale = if max > 0.0 { plot_w / max } else { 0.0 };

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg viewBox=\"0 0 {w} {h}\" width=\"100%\" role=\"img\" aria-label=\"Feature impact\">",
        w = WIDTH + 160.0,
        h = height,
    );

    for (i, impact) in impacts.iter().enumerate() {
        let y = 10.0 + ROW * i as f64;
        let color = if impact.direction > 0.0 {
            POSITIVE
        } else if impact.direction < 0.0 {
            NEGATIVE
        } else {
            NEUTRAL
        };
        let _ = write!(
            svg,
            "<text x=\"{lx}\" y=\"{ty:.1}\" font-size=\"12\" text-anchor=\"end\">{name}</text>\
             <rect x=\"{bx}\" y=\"{y:.1}\" width=\"{bw:.1}\" height=\"{bh}\" fill=\"{color}\">\
             <title>{name}: mean |attribution| {v:.3}, correlation {d:.2}</title></rect>\
             <text x=\"{vx:.1}\" y=\"{ty:.1}\" font-size=\"11\">{v:.3}</text>",
            lx = LABEL_W - 8.0,
            ty = y + ROW * 0.55,
            name = escape_html(&impact.name),
            bx = LABEL_W,
            bw = impact.mean_abs * scale,
            bh = ROW * 0.7,
            v = impact.mean_abs,
            d = impact.direction,
            vx = LABEL_W + impact.mean_abs * scale + 6.0,
        );
    }

    let _ = write!(
        svg,
        "<text x=\"{x}\" y=\"{y}\" font-size=\"12\" text-anchor=\"middle\">mean(|attribution value|)</text></svg>",
        x = LABEL_W + plot_w / 2.0,
        y = height - 6.0,
    );
    svg
}

//! Histogram Component
//!
//! Monthly event counts drawn on an HTML5 canvas, with a PNG download.

use eventify_core::analysis::MonthlyHistogram;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 400;
const BAR_COLOR: &str = "#6366f1";
/// File name of the downloaded chart
const CHART_FILENAME: &str = "event_histogram.png";

/// Monthly histogram with a download button
#[component]
pub fn Histogram(
    #[prop(into)]
    histogram: Signal<MonthlyHistogram>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let data = histogram.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_histogram(&canvas, &data);
        }
    });

    let download = move |_| {
        if let Some(canvas) = canvas_ref.get() {
            match canvas.to_data_url_with_type("image/png") {
                Ok(url) => trigger_download(&url, CHART_FILENAME),
                Err(_) => web_sys::console::error_1(&"Failed to render chart image".into()),
            }
        }
    };

    view! {
        <div class="bg-white rounded-xl shadow p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"Events per Month"</h2>
                <button
                    on:click=download
                    class="px-3 py-1 rounded-md text-sm text-white bg-indigo-600 hover:bg-indigo-700"
                >
                    "Download Chart"
                </button>
            </div>
            <canvas
                node_ref=canvas_ref
                width=CANVAS_WIDTH.to_string()
                height=CANVAS_HEIGHT.to_string()
                class="w-full h-64 md:h-96"
            />
        </div>
    }
}

/// Click a temporary link to download `href`
pub fn trigger_download(href: &str, filename: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(link) = document.create_element("a") else {
        return;
    };
    let _ = link.set_attribute("href", href);
    let _ = link.set_attribute("download", filename);
    if let Some(link) = link.dyn_ref::<web_sys::HtmlElement>() {
        link.click();
    }
}

/// Height in pixels of a bar for `count` when the tallest bar is `max`
fn bar_height(count: usize, max: usize, chart_height: f64) -> f64 {
    if max == 0 {
        0.0
    } else {
        count as f64 / max as f64 * chart_height
    }
}

fn draw_histogram(canvas: &HtmlCanvasElement, histogram: &MonthlyHistogram) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 40.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    let max = histogram.max();

    // Horizontal grid with integer labels
    let steps = max.clamp(1, 5);
    ctx.set_stroke_style(&"#e5e7eb".into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=steps {
        let y = margin_top + chart_height - (i as f64 / steps as f64) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = (max.max(1) * i) as f64 / steps as f64;
        ctx.set_fill_style(&"#6b7280".into());
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    // Bars
    let slot = chart_width / 12.0;
    let bar_width = slot * 0.6;
    for (i, (label, count)) in histogram.labelled().enumerate() {
        let x = margin_left + i as f64 * slot + (slot - bar_width) / 2.0;
        let h = bar_height(count, max, chart_height);

        ctx.set_fill_style(&BAR_COLOR.into());
        ctx.fill_rect(x, margin_top + chart_height - h, bar_width, h);

        ctx.set_fill_style(&"#374151".into());
        let _ = ctx.fill_text(label, x, height - 15.0);
    }

    if histogram.total() == 0 {
        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No events for this selection", width / 2.0 - 100.0, height / 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_height_scales_to_tallest() {
        assert_eq!(bar_height(4, 4, 300.0), 300.0);
        assert_eq!(bar_height(1, 4, 300.0), 75.0);
        assert_eq!(bar_height(0, 0, 300.0), 0.0);
    }
}

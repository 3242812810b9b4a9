//! Decorative widgets shown next to a finished report.

use std::f64::consts::PI;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const GAUGE_WIDTH: f64 = 240.0;
const GAUGE_HEIGHT: f64 = 150.0;
const CHART_WIDTH: f64 = 240.0;
const CHART_HEIGHT: f64 = 140.0;
const SAMPLES: usize = 12;
const TRAFFIC_MAX: f64 = 1000.0;

/// Threat score in `20..80` from a value in `[0, 1)`.
pub fn threat_score(random: f64) -> u8 {
	(random * 60.0).floor() as u8 + 20
}

fn gauge_color(score: u8) -> &'static str {
	match score {
		76.. => "#ef4444",
		41..=75 => "#f59e0b",
		_ => "#10b981",
	}
}

/// One bar pair of the traffic chart.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
	traffic: f64,
	anomalies: f64,
}

fn traffic_samples(mut random: impl FnMut() -> f64) -> Vec<Sample> {
	(0..SAMPLES)
		.map(|_| Sample {
			traffic: (random() * 800.0).floor() + 200.0,
			anomalies: (random() * 100.0).floor(),
		})
		.collect()
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn draw_gauge(ctx: &CanvasRenderingContext2d, score: u8) {
	let (cx, cy, radius) = (GAUGE_WIDTH / 2.0, GAUGE_HEIGHT - 30.0, 80.0);
	ctx.clear_rect(0.0, 0.0, GAUGE_WIDTH, GAUGE_HEIGHT);
	ctx.set_line_width(8.0);

	ctx.begin_path();
	let _ = ctx.arc(cx, cy, radius, PI, 2.0 * PI);
	ctx.set_stroke_style_str("#1e293b");
	ctx.stroke();

	ctx.begin_path();
	let _ = ctx.arc(cx, cy, radius, PI, PI + PI * f64::from(score) / 100.0);
	ctx.set_stroke_style_str(gauge_color(score));
	ctx.stroke();

	ctx.set_text_align("center");
	ctx.set_fill_style_str("#e2e8f0");
	ctx.set_font("bold 28px monospace");
	let _ = ctx.fill_text(&format!("{score}%"), cx, cy - 20.0);
	ctx.set_fill_style_str("#64748b");
	ctx.set_font("bold 10px sans-serif");
	let _ = ctx.fill_text("RISK FACTOR", cx, cy + 4.0);
}

fn draw_chart(ctx: &CanvasRenderingContext2d, samples: &[Sample]) {
	ctx.clear_rect(0.0, 0.0, CHART_WIDTH, CHART_HEIGHT);
	let slot = CHART_WIDTH / samples.len().max(1) as f64;
	let bar = (slot - 4.0) / 2.0;
	let scale = |v: f64| v / TRAFFIC_MAX * CHART_HEIGHT;
	for (i, s) in samples.iter().enumerate() {
		let x = i as f64 * slot + 2.0;
		ctx.set_global_alpha(0.8);
		ctx.set_fill_style_str("#10b981");
		ctx.fill_rect(x, CHART_HEIGHT - scale(s.traffic), bar, scale(s.traffic));
		ctx.set_global_alpha(1.0);
		ctx.set_fill_style_str("#ef4444");
		ctx.fill_rect(x + bar, CHART_HEIGHT - scale(s.anomalies), bar, scale(s.anomalies));
	}
}

/// Half-ring gauge of a 0-100 risk score.
#[component]
pub fn ThreatGauge(score: u8) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		match context_2d(&canvas) {
			Some(ctx) => draw_gauge(&ctx, score),
			None => warn!("2d canvas context unavailable; gauge not drawn"),
		}
	});

	view! {
		<div class="widget">
			<h4 class="widget-title">"Threat Probability"</h4>
			<canvas node_ref=canvas_ref width=GAUGE_WIDTH height=GAUGE_HEIGHT />
		</div>
	}
}

/// Bar chart of simulated traffic with anomaly counts.
#[component]
pub fn NetworkActivityChart() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let samples = traffic_samples(js_sys::Math::random);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		match context_2d(&canvas) {
			Some(ctx) => draw_chart(&ctx, &samples),
			None => warn!("2d canvas context unavailable; chart not drawn"),
		}
	});

	view! {
		<div class="widget">
			<h4 class="widget-title">"Network Traffic [Real-time]"</h4>
			<canvas node_ref=canvas_ref width=CHART_WIDTH height=CHART_HEIGHT />
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scores_stay_in_range() {
		assert_eq!(threat_score(0.0), 20);
		assert_eq!(threat_score(0.5), 50);
		assert_eq!(threat_score(0.9999), 79);
	}

	#[test]
	fn gauge_color_bands() {
		assert_eq!(gauge_color(40), "#10b981");
		assert_eq!(gauge_color(41), "#f59e0b");
		assert_eq!(gauge_color(75), "#f59e0b");
		assert_eq!(gauge_color(76), "#ef4444");
	}

	#[test]
	fn samples_fill_the_chart_range() {
		let low = traffic_samples(|| 0.0);
		assert_eq!(low.len(), SAMPLES);
		assert_eq!(low[0], Sample { traffic: 200.0, anomalies: 0.0 });
		let high = traffic_samples(|| 0.999);
		assert!(high.iter().all(|s| s.traffic <= TRAFFIC_MAX && s.anomalies < 100.0));
	}
}

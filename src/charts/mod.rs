use crate::analysis::AnalysisSummary;
use crate::shared::constants;
use crate::utils::logger;
use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

const PIE_SIZE: (u32, u32) = (640, 480);
const BAR_SIZE: (u32, u32) = (800, 600);

fn rgb(color: (u8, u8, u8)) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Renders the three report artifacts into `out_dir` and returns their paths:
/// overall correctness pie, per-factor bars, per-distance bars.
pub fn render_all(summary: &AnalysisSummary, out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create chart directory: {}", out_dir.display()))?;

    let pie = out_dir.join(constants::PIE_CHART_FILE);
    render_correctness_pie(summary, &pie)?;

    let factors = out_dir.join(constants::FACTOR_CHART_FILE);
    render_factor_bars(summary, &factors)?;

    let distances = out_dir.join(constants::DISTANCE_CHART_FILE);
    render_distance_bars(summary, &distances)?;

    logger::info(&format!("Rendered 3 chart(s) into {}", out_dir.display()));
    Ok(vec![pie, factors, distances])
}

/// Correct vs incorrect share of all trials.
pub fn render_correctness_pie(summary: &AnalysisSummary, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, PIE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Overall answer correctness", ("sans-serif", 28).into_font())?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = 160.0;
    let sizes = [summary.percent_correct, summary.percent_incorrect];
    let colors = [rgb(constants::COLOR_CORRECT), rgb(constants::COLOR_INCORRECT)];
    let labels = ["Correct", "Incorrect"];

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 22).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 20).into_font().color(&WHITE));
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}

/// Per-factor share of the incorrect answers, plus their unweighted sum.
/// The sum bar can legitimately exceed 100%.
pub fn render_factor_bars(summary: &AnalysisSummary, path: &Path) -> Result<()> {
    let values = [
        summary.factors.blend,
        summary.factors.clutter,
        summary.factors.edge,
        summary.factors.total,
    ];
    let colors = [
        rgb(constants::COLOR_FACTOR_BAR),
        rgb(constants::COLOR_FACTOR_BAR),
        rgb(constants::COLOR_FACTOR_BAR),
        rgb(constants::COLOR_FACTOR_TOTAL_BAR),
    ];
    render_bar_chart(
        path,
        "Percent of cases causing incorrect answers",
        constants::CHART_FACTOR_LABELS,
        &values,
        &colors,
    )
}

/// Per-distance-bucket share of that bucket's frames answered incorrectly.
pub fn render_distance_bars(summary: &AnalysisSummary, path: &Path) -> Result<()> {
    let colors = [rgb(constants::COLOR_DISTANCE_BAR); 4];
    render_bar_chart(
        path,
        "Percent of incorrect answers based on distance",
        constants::CHART_DISTANCE_LABELS,
        &summary.distance_percentages,
        &colors,
    )
}

fn render_bar_chart(
    path: &Path,
    title: &str,
    labels: &[&str],
    values: &[f64],
    colors: &[RGBColor],
) -> Result<()> {
    let root = BitMapBackend::new(path, BAR_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    // Y axis runs 0..100 in 25-steps unless a bar (the factor sum) pokes past
    let highest = values.iter().cloned().fold(0.0f64, f64::max);
    let y_top = (highest.max(100.0) / 25.0).ceil() * 25.0 + 8.0;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d((0usize..labels.len()).into_segmented(), 0f64..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_labels((y_top / 25.0).ceil() as usize + 1)
        .y_desc("Percent (%)")
        .axis_desc_style(("sans-serif", 20))
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i).map(|s| s.to_string()).unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .label_style(("sans-serif", 18))
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, v)| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), *v),
            ],
            colors[i % colors.len()].filled(),
        );
        bar.set_margin(0, 0, 24, 24);
        bar
    }))?;

    // Value labels above each bar
    let value_style = ("sans-serif", 18)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(values.iter().enumerate().map(|(i, v)| {
        Text::new(
            format!("{:.0}", v),
            (SegmentValue::CenterOf(i), *v + y_top * 0.01),
            value_style.clone(),
        )
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FactorBreakdown;
    use std::fs::create_dir_all;

    fn sample_summary() -> AnalysisSummary {
        AnalysisSummary {
            trials: 41,
            mismatches: 12,
            percent_correct: 71.0,
            percent_incorrect: 29.0,
            factors: FactorBreakdown {
                blend: 42.0,
                clutter: 33.0,
                edge: 25.0,
                total: 100.0,
            },
            distance_percentages: [10.0, 25.0, 40.0, 75.0],
            distance_counts: [12, 11, 10, 8],
        }
    }

    #[test]
    fn test_render_all_writes_three_pngs() {
        let dir = std::env::temp_dir().join("framesight_chart_tests");
        create_dir_all(&dir).unwrap();

        let written = render_all(&sample_summary(), &dir).unwrap();
        assert_eq!(written.len(), 3);
        for path in &written {
            let meta = std::fs::metadata(path).unwrap();
            assert!(meta.len() > 0, "empty chart file: {}", path.display());
        }
    }

    #[test]
    fn test_factor_sum_above_100_still_renders() {
        let dir = std::env::temp_dir().join("framesight_chart_tests_oversum");
        create_dir_all(&dir).unwrap();

        let mut summary = sample_summary();
        summary.factors = FactorBreakdown {
            blend: 80.0,
            clutter: 70.0,
            edge: 60.0,
            total: 210.0,
        };
        let path = dir.join("factors.png");
        render_factor_bars(&summary, &path).unwrap();
        assert!(path.exists());
    }
}

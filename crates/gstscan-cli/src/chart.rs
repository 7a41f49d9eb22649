//! SVG line chart of total sales per month.

use std::fs;
use std::path::Path;

use plotters::prelude::*;

use gstscan_core::MonthlyAggregate;

/// Render the monthly series as an SVG document.
pub fn render_sales_chart(
    aggregate: &MonthlyAggregate,
    size: (u32, u32),
) -> anyhow::Result<String> {
    let series = aggregate.series();
    let labels: Vec<String> = series.iter().map(|(month, _)| month.clone()).collect();
    let max_value = series.iter().map(|(_, total)| *total).max().unwrap_or(0).max(1);
    // A single month still needs a non-empty x range.
    let x_max = series.len().max(2) - 1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Total Sales per Month", ("sans-serif", 30).into_font())
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0..x_max, 0u64..(max_value + max_value / 10))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Month")
            .y_desc("Total Sales")
            .axis_desc_style(("sans-serif", 15))
            .x_labels(labels.len())
            .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
            .draw()?;

        chart.draw_series(LineSeries::new(
            series.iter().enumerate().map(|(i, (_, total))| (i, *total)),
            &BLUE,
        ))?;

        root.present()?;
    }

    Ok(svg)
}

/// Write the chart to `path`.
pub fn write_sales_chart(
    aggregate: &MonthlyAggregate,
    size: (u32, u32),
    path: &Path,
) -> anyhow::Result<()> {
    let svg = render_sales_chart(aggregate, size)?;
    fs::write(path, svg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gstscan_core::{aggregate_monthly, InvoiceRecord};

    #[test]
    fn test_chart_labels_months() {
        let records = vec![
            InvoiceRecord::new("a", Some("10-01-2024".into()), None, None, Some(1000)),
            InvoiceRecord::new("b", Some("03-02-2024".into()), None, None, Some(2500)),
        ];
        let aggregate = aggregate_monthly(&records).unwrap();

        let svg = render_sales_chart(&aggregate, (640, 480)).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("2024-01"));
        assert!(svg.contains("Total Sales per Month"));
    }

    #[test]
    fn test_single_month_chart() {
        let records = vec![InvoiceRecord::new(
            "a",
            Some("10-01-2024".into()),
            None,
            None,
            Some(10),
        )];
        let aggregate = aggregate_monthly(&records).unwrap();

        let svg = render_sales_chart(&aggregate, (320, 240)).unwrap();
        assert!(svg.contains("2024-01"));
    }
}

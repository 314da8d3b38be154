//! ASCII plotting for terminal output.
//!
//! Fixed-size character grid, deterministic output:
//! - band/line values: `o`
//! - connecting spectrum: `-`
//!
//! Flux spans several decades, so the y axis is `log10(flux)` whenever every
//! plotted value is positive and linear otherwise.

use crate::domain::SpectrumResult;

/// Render the spectrum of one proxy input (column `input` of `result`).
///
/// Returns `None` when `input` is out of range.
pub fn render_spectrum_plot(
    result: &SpectrumResult,
    input: usize,
    width: usize,
    height: usize,
) -> Option<String> {
    let flux = result.spectrum_at(input)?;
    let proxy = result.proxy_axis.values.get(input)?;

    let log_scale = !flux.is_empty() && flux.iter().all(|&v| v > 0.0);
    let mut points: Vec<(f64, f64)> = result
        .spectral_axis
        .values
        .iter()
        .zip(&flux)
        .map(|(&x, &y)| (x, if log_scale { y.log10() } else { y }))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    // Merged spectra interleave lines with bands.
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut out = format!(
        "{} {} at {}={} | ",
        result.model,
        kind_label(result),
        result.proxy_axis.name,
        proxy
    );
    out.push_str(&render_plot(
        &points,
        &result.spectral_axis.name,
        result.attr("wavelength units").unwrap_or(""),
        if log_scale { "log10(flux)" } else { "flux" },
        width,
        height,
    ));
    Some(out)
}

fn kind_label(result: &SpectrumResult) -> &'static str {
    match result.kind {
        crate::domain::SpectrumKind::Bands => "bands",
        crate::domain::SpectrumKind::Lines => "lines",
        crate::domain::SpectrumKind::Merged => "spectrum",
    }
}

fn render_plot(
    points: &[(f64, f64)],
    x_name: &str,
    x_units: &str,
    y_name: &str,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = match range(points.iter().map(|p| p.0)) {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((lo, _)) => (lo - 0.5, lo + 0.5),
        None => (0.0, 1.0),
    };
    let (y_min, y_max) = match range(points.iter().map(|p| p.1)) {
        Some((lo, hi)) if hi > lo => pad_range(lo, hi, 0.05),
        Some((lo, _)) => pad_range(lo, lo, 0.05),
        None => (0.0, 1.0),
    };

    let mut grid = vec![vec![' '; width]; height];

    // Line first so the points overlay it.
    let cells: Vec<(usize, usize)> = points
        .iter()
        .map(|&(x, y)| (map_x(x, x_min, x_max, width), map_y(y, y_min, y_max, height)))
        .collect();
    for pair in cells.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        draw_line(&mut grid, x0, y0, x1, y1, '-');
    }
    for &(x, y) in &cells {
        grid[y][x] = 'o';
    }

    let units = if x_units.is_empty() {
        String::new()
    } else {
        format!(" {x_units}")
    };
    let mut out = format!(
        "{x_name}=[{x_min:.1}, {x_max:.1}]{units} | {y_name}=[{y_min:.2}, {y_max:.2}]\n"
    );
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // max at row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham), never overwriting a set cell.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

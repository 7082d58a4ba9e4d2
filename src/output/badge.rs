//! SVG score badge

use crate::scoring::ScoreBand;

/// Default left-hand badge text
pub const DEFAULT_BADGE_LABEL: &str = "GEO Score";

/// Labels are cut to this many characters
pub const MAX_LABEL_LENGTH: usize = 50;

/// Fill color of the score half of the badge
pub fn band_color(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Excellent => "#22c55e",
        ScoreBand::Good => "#06b6d4",
        ScoreBand::Foundation => "#eab308",
        ScoreBand::Critical => "#ef4444",
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Widths always carry a fractional part ("77.0", "70.5")
fn dimension(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Generates a shields-style badge showing `{score}/100`
///
/// The score is clamped to 0-100. The label is cut to
/// [`MAX_LABEL_LENGTH`] characters and XML-escaped; widths are computed from
/// the unescaped text.
pub fn generate_badge_svg(score: u32, band: ScoreBand, label: &str) -> String {
    let color = band_color(band);
    let score_text = format!("{}/100", score.min(100));

    let label: String = label.chars().take(MAX_LABEL_LENGTH).collect();
    let safe_label = escape_xml(&label);

    let label_width = label.chars().count() as f64 * 6.5 + 12.0;
    let score_width = score_text.len() as f64 * 7.0 + 12.0;
    let total_width = label_width + score_width;

    let lw = dimension(label_width);
    let tw = dimension(total_width);
    let label_x = dimension(label_width / 2.0);
    let score_x = dimension(label_width + score_width / 2.0);
    // score width is integral
    let sw = format!("{}", score_width as u32);

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{tw}" height="20" role="img" aria-label="{safe_label}: {score_text}">
  <title>{safe_label}: {score_text}</title>
  <linearGradient id="s" x2="0" y2="100%">
    <stop offset="0" stop-color="#bbb" stop-opacity=".1"/>
    <stop offset="1" stop-opacity=".1"/>
  </linearGradient>
  <clipPath id="r">
    <rect width="{tw}" height="20" rx="3" fill="#fff"/>
  </clipPath>
  <g clip-path="url(#r)">
    <rect width="{lw}" height="20" fill="#555"/>
    <rect x="{lw}" width="{sw}" height="20" fill="{color}"/>
    <rect width="{tw}" height="20" fill="url(#s)"/>
  </g>
  <g fill="#fff" text-anchor="middle" font-family="Verdana,Geneva,DejaVu Sans,sans-serif" text-rendering="geometricPrecision" font-size="11">
    <text aria-hidden="true" x="{label_x}" y="15" fill="#010101" fill-opacity=".3">{safe_label}</text>
    <text x="{label_x}" y="14">{safe_label}</text>
    <text aria-hidden="true" x="{score_x}" y="15" fill="#010101" fill-opacity=".3">{score_text}</text>
    <text x="{score_x}" y="14">{score_text}</text>
  </g>
</svg>"##
    )
}

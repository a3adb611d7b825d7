use screen_ruler::{clamp, parse_css_px, parse_hex_color, px, round_px};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn clamp_keeps_inner_value() {
    assert_eq!(clamp(10.0, 0.0, 20.0), 10.0);
}

#[test]
fn clamp_limits_low_and_high() {
    assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
}

#[test]
fn round_px_matches_browser_rounding() {
    assert_eq!(round_px(2.5), 3);
    assert_eq!(round_px(2.4999), 2);
    assert_eq!(round_px(-2.5), -2);
    assert_eq!(round_px(-2.6), -3);
    assert_eq!(round_px(0.0), 0);
}

#[test]
fn round_px_non_finite_is_zero() {
    assert_eq!(round_px(f64::NAN), 0);
    assert_eq!(round_px(f64::INFINITY), 0);
}

#[test]
fn parse_css_px_reads_numeric_prefix() {
    assert_eq!(parse_css_px("12px"), Some(12.0));
    assert_eq!(parse_css_px("12.75px"), Some(12.75));
    assert_eq!(parse_css_px("  -4px"), Some(-4.0));
    assert_eq!(parse_css_px(".5em"), Some(0.5));
    assert_eq!(parse_css_px("1e2px"), Some(100.0));
    assert_eq!(parse_css_px("3em"), Some(3.0));
}

#[test]
fn parse_css_px_rejects_non_numbers() {
    assert_eq!(parse_css_px("auto"), None);
    assert_eq!(parse_css_px(""), None);
    assert_eq!(parse_css_px("-"), None);
    assert_eq!(parse_css_px("px"), None);
}

#[test]
fn px_formats_css_lengths() {
    assert_eq!(px(10.0), "10px");
    assert_eq!(px(-2.5), "-2.5px");
}

#[test]
fn parse_hex_rgb() {
    let (r, g, b, a) = parse_hex_color("#FF0080").expect("valid rgb hex");
    assert!(approx_eq(r, 1.0));
    assert!(approx_eq(g, 0.0));
    assert!(approx_eq(b, 128.0 / 255.0));
    assert!(approx_eq(a, 1.0));
}

#[test]
fn parse_hex_rgba() {
    let (r, g, b, a) = parse_hex_color("#33669980").expect("valid rgba hex");
    assert!(approx_eq(r, 51.0 / 255.0));
    assert!(approx_eq(g, 102.0 / 255.0));
    assert!(approx_eq(b, 153.0 / 255.0));
    assert!(approx_eq(a, 128.0 / 255.0));
}

#[test]
fn parse_hex_trims_and_ignores_whitespace() {
    let (r, g, b, a) = parse_hex_color("  ff00FF80  ").expect("valid with whitespace and mixed case");
    assert!(approx_eq(r, 1.0));
    assert!(approx_eq(g, 0.0));
    assert!(approx_eq(b, 1.0));
    assert!(approx_eq(a, 128.0 / 255.0));
}

#[test]
fn parse_hex_invalid_lengths_return_none() {
    assert!(parse_hex_color("#FFF").is_none());
    assert!(parse_hex_color("#FF00").is_none());
    assert!(parse_hex_color("#FF00FF0000").is_none());
}

#[test]
fn parse_hex_invalid_chars_return_none() {
    assert!(parse_hex_color("#GG0000").is_none());
    assert!(parse_hex_color("ZZZZZZZZ").is_none());
    assert!(parse_hex_color("#ÄÄÄ").is_none());
}

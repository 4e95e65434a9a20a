//! Page embedding of the series as a `window` global

use dashboard_chart_config::validation::is_js_identifier;
use dashboard_chart_shared::SeriesPoint;

use crate::{DataError, DataResult};

/// Render `<script>window.<global> = <json>;</script>`.
///
/// Characters that could end the script element or break a JS string
/// literal are escaped inside the JSON payload.
pub fn embed_script(series: &[SeriesPoint], global: &str) -> DataResult<String> {
    if !is_js_identifier(global) {
        return Err(DataError::InvalidGlobal(global.to_string()));
    }

    let json = serde_json::to_string(series)?;
    Ok(format!(
        "<script>window.{global} = {};</script>",
        escape_for_script(&json)
    ))
}

fn escape_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_series() {
        let series = vec![SeriesPoint::new("2024/01", 10.0, 8.0, 1.0, 1.0)];
        let script = embed_script(&series, "dashboardChartData").unwrap();

        assert!(script.starts_with("<script>window.dashboardChartData = ["));
        assert!(script.ends_with("];</script>"));
        assert!(script.contains(r#""date":"2024/01""#));
        assert!(script.contains(r#""sucesso":8.0"#));
    }

    #[test]
    fn test_embed_empty_series() {
        assert_eq!(
            embed_script(&[], "dashboardChartData").unwrap(),
            "<script>window.dashboardChartData = [];</script>"
        );
    }

    #[test]
    fn test_payload_cannot_close_script() {
        let mut point = SeriesPoint::default();
        point.date = Some("</script><script>alert('x')&\u{2028}".to_string());
        let script = embed_script(&[point], "dashboardChartData").unwrap();

        let payload = &script["<script>".len()..script.len() - "</script>".len()];
        assert!(!payload.contains('<'));
        assert!(!payload.contains('>'));
        assert!(!payload.contains('&'));
        assert!(!payload.contains('\u{2028}'));
        assert!(payload.contains("\\u003c/script\\u003e"));
    }

    #[test]
    fn test_invalid_global() {
        let err = embed_script(&[], "window.x").unwrap_err();
        assert!(matches!(err, DataError::InvalidGlobal(_)));
    }
}

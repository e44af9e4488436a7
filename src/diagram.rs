//! SVG schematic of the three-mesh circuit.
//!
//! The drawing is a ladder: two horizontal rails joined by four verticals,
//! giving three side-by-side meshes. Component values are printed next to
//! their branch; mesh currents are drawn as arrows under each mesh.

use crate::circuit::{CircuitParameters, Mesh, ParamName};

/// Pixels per layout unit.
const SCALE: f64 = 100.0;
/// Layout width and height, in layout units.
const WIDTH: f64 = 7.0;
const HEIGHT: f64 = 3.2;
/// Layout y coordinate drawn at the top edge.
const TOP: f64 = 3.5;

const BACKGROUND: &str = "#222";
const WIRE: &str = "white";
const RESISTOR: &str = "orange";
const SOURCE: &str = "cyan";
const CURRENT: &str = "lime";

/// Minimal SVG writer working in layout units (y grows upwards).
struct Svg {
    out: String,
}

impl Svg {
    fn new() -> Self {
        let (w, h) = (WIDTH * SCALE, HEIGHT * SCALE);
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n"
        );
        out.push_str(&format!(
            "  <defs><marker id=\"arrow\" markerWidth=\"10\" markerHeight=\"10\" refX=\"8\" refY=\"5\" orient=\"auto\">\
<path d=\"M0,0 L10,5 L0,10 z\" fill=\"{CURRENT}\"/></marker></defs>\n"
        ));
        out.push_str(&format!("  <rect width=\"100%\" height=\"100%\" fill=\"{BACKGROUND}\"/>\n"));
        Self { out }
    }

    fn point(x: f64, y: f64) -> (f64, f64) {
        (x * SCALE, (TOP - y) * SCALE)
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64, marker: bool) {
        let (x1, y1) = Self::point(from.0, from.1);
        let (x2, y2) = Self::point(to.0, to.1);
        let marker = if marker { " marker-end=\"url(#arrow)\"" } else { "" };
        self.out.push_str(&format!(
            "  <line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke=\"{color}\" stroke-width=\"{width}\"{marker}/>\n"
        ));
    }

    fn circle(&mut self, center: (f64, f64), radius: f64, color: &str) {
        let (cx, cy) = Self::point(center.0, center.1);
        let r = radius * SCALE;
        self.out.push_str(&format!(
            "  <circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{r:.1}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"/>\n"
        ));
    }

    fn text(&mut self, at: (f64, f64), content: &str, color: &str, anchor: &str, rotate: bool) {
        let (x, y) = Self::point(at.0, at.1);
        let transform = if rotate {
            format!(" transform=\"rotate(-90 {x:.1} {y:.1})\"")
        } else {
            String::new()
        };
        self.out.push_str(&format!(
            "  <text x=\"{x:.1}\" y=\"{y:.1}\" fill=\"{color}\" font-size=\"15\" font-weight=\"bold\" text-anchor=\"{anchor}\" dominant-baseline=\"middle\"{transform}>{content}</text>\n"
        ));
    }

    fn finish(mut self) -> String {
        self.out.push_str("</svg>\n");
        self.out
    }
}

/// Render the schematic with the given component values.
pub fn render_svg(params: &CircuitParameters) -> String {
    let mut svg = Svg::new();

    // Rails and verticals
    svg.line((0.5, 3.0), (6.5, 3.0), WIRE, 3.0, false);
    svg.line((0.5, 1.0), (6.5, 1.0), WIRE, 3.0, false);
    for x in [0.5, 2.5, 4.5, 6.5] {
        svg.line((x, 1.0), (x, 3.0), WIRE, 3.0, false);
    }

    // Resistors on the top rail, then on the verticals
    let top = [(1.5, ParamName::R1), (3.5, ParamName::R3), (5.5, ParamName::R5)];
    for (x, name) in top {
        let label = format!("{}={}Ω", name, params.get(name));
        svg.text((x, 3.2), &label, RESISTOR, "middle", false);
    }
    let vertical = [(0.75, ParamName::R2), (2.75, ParamName::R4), (4.75, ParamName::R6)];
    for (x, name) in vertical {
        let label = format!("{}={}Ω", name, params.get(name));
        svg.text((x, 2.0), &label, RESISTOR, "middle", true);
    }

    // Source V1 on the leftmost vertical
    let (sx, sy) = (0.5, 2.6);
    svg.circle((sx, sy), 0.18, SOURCE);
    svg.text((sx, sy + 0.08), "+", SOURCE, "middle", false);
    svg.text((sx, sy - 0.08), "−", SOURCE, "middle", false);
    svg.text((sx - 0.25, sy), &format!("V1={}V", params.v1), SOURCE, "end", false);

    // Mesh currents and zone captions
    for mesh in Mesh::ALL {
        let left = 1.0 + 2.0 * mesh.index() as f64;
        svg.line((left, 0.9), (left + 1.0, 0.9), CURRENT, 2.0, true);
        svg.text((left + 0.5, 0.75), mesh.current_label(), CURRENT, "middle", false);
        svg.text(
            (left + 0.5, 0.45),
            &format!("{} ({})", mesh, mesh.zone()),
            WIRE,
            "middle",
            false,
        );
    }

    svg.finish()
}

/// Read parameter overrides from a URL query string (`R1=1.5&V1=110`).
///
/// Keys and values are percent-decoded (`+` is a space) before parsing.
/// Unknown keys and unparsable values are ignored and leave the default.
pub fn params_from_query(query: &str, defaults: CircuitParameters) -> CircuitParameters {
    let mut params = defaults;
    let pairs = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes());
    for (key, raw) in pairs {
        let Ok(name) = key.parse::<ParamName>() else {
            continue;
        };
        if let Ok(value) = crate::api::parse_number(name.as_str(), &raw) {
            params.set(name, value);
        }
    }
    params
}

/// Read parameter overrides from a JSON object (`{"R1": 7.5}`).
///
/// Each numeric `R1`..`V3` key replaces its default on its own; missing
/// keys, non-numeric values and a body that is not an object leave the
/// defaults untouched.
pub fn params_from_json(json: &str, defaults: CircuitParameters) -> CircuitParameters {
    let object = match serde_json::from_str::<serde_json::Value>(json) {
        Ok(serde_json::Value::Object(object)) => object,
        _ => return defaults,
    };
    let mut params = defaults;
    for name in ParamName::ALL {
        if let Some(value) = object.get(name.as_str()).and_then(serde_json::Value::as_f64) {
            params.set(name, value);
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::RESIDENTIAL_DEFAULT;

    #[test]
    fn test_svg_contains_values() {
        let svg = render_svg(&RESIDENTIAL_DEFAULT);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("R1=0.5Ω"));
        assert!(svg.contains("R6=25Ω"));
        assert!(svg.contains("V1=120V"));
        assert!(svg.contains("Mesh 3 (bedrooms)"));
        assert_eq!(svg.matches("marker-end").count(), 3);
    }

    #[test]
    fn test_query_overrides() {
        let params = params_from_query("?R1=1,5&V1=abc&X=3&R4", RESIDENTIAL_DEFAULT);
        assert_eq!(params.r1, 1.5);
        assert_eq!(params.v1, RESIDENTIAL_DEFAULT.v1);
        assert_eq!(params.r4, RESIDENTIAL_DEFAULT.r4);
    }

    #[test]
    fn test_query_values_are_percent_decoded() {
        let params = params_from_query("R1=1%2C5&V1=+110&R%32=2.5&V2=%32%30%30", RESIDENTIAL_DEFAULT);
        assert_eq!(params.r1, 1.5);
        assert_eq!(params.v1, 110.0);
        assert_eq!(params.r2, 2.5);
        assert_eq!(params.v2, 200.0);
    }

    #[test]
    fn test_json_overrides_each_key() {
        let params = params_from_json(r#"{"R1": 7.5, "V3": 90, "R2": "x", "Q": 1}"#, RESIDENTIAL_DEFAULT);
        assert_eq!(params, RESIDENTIAL_DEFAULT.with(ParamName::R1, 7.5).with(ParamName::V3, 90.0));

        assert_eq!(params_from_json("not json", RESIDENTIAL_DEFAULT), RESIDENTIAL_DEFAULT);
        assert_eq!(params_from_json("[1, 2]", RESIDENTIAL_DEFAULT), RESIDENTIAL_DEFAULT);
    }
}

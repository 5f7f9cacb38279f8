use super::render_loop::{CancellationToken, RenderLoop, Style, Surface};
use super::{Field, Point, Pointer, Viewport};

use rand::rngs::StdRng;
use rand::SeedableRng;

pub const BACKGROUND: &str = "#05060a";

/// Records draw calls as SVG elements. `clear` starts a new document, so
/// after a loop only the last frame is kept.
#[derive(Debug, Default)]
pub struct SvgSurface {
    viewport: Option<Viewport>,
    background: Option<String>,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(self, color: &str) -> Self {
        Self {
            background: Some(color.to_owned()),
            ..self
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn into_document(self) -> String {
        let Viewport { width, height } = self.viewport.unwrap_or(Viewport::new(0.0, 0.0));
        let mut doc = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{1}" viewBox="0 0 {0} {1}">"#,
            width, height
        );
        doc.push('\n');
        if let Some(background) = &self.background {
            doc.push_str(&format!(
                r#"<rect width="100%" height="100%" fill="{}"/>"#,
                background
            ));
            doc.push('\n');
        }
        for element in &self.elements {
            doc.push_str(element);
            doc.push('\n');
        }
        doc.push_str("</svg>\n");
        doc
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        self.elements.clear();
    }

    fn line(&mut self, from: Point, to: Point, style: Style) {
        self.elements.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{:.4}" stroke-width="{}"/>"#,
            from.x, from.y, to.x, to.y, style.color, style.alpha, style.width
        ));
    }

    fn disc(&mut self, center: Point, radius: f64, style: Style) {
        self.elements.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" fill-opacity="{:.4}"/>"#,
            center.x, center.y, radius, style.color, style.alpha
        ));
    }
}

/// A still of the sphere at `ts` ms, for social cards and no-JS fallbacks
pub fn render_poster(viewport: Viewport, ts: f64, pointer: Pointer, seed: u64) -> String {
    let field = Field::new(viewport, &mut StdRng::seed_from_u64(seed));
    let render_loop = RenderLoop::new(field);
    render_loop.pointer().set(pointer);

    let mut surface = SvgSurface::new().with_background(BACKGROUND);
    let mut frame = Some(ts);
    render_loop.run(&mut || frame.take(), &mut surface, &CancellationToken::new());
    surface.into_document()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: Style = Style {
        color: "#22d3ee",
        alpha: 0.5,
        width: 0.4,
    };

    #[test]
    fn test_document() {
        let mut surface = SvgSurface::new().with_background("#05060a");
        surface.clear(Viewport::new(320.0, 200.0));
        surface.line(Point { x: 1.0, y: 2.0 }, Point { x: 3.0, y: 4.0 }, STYLE);
        surface.disc(Point { x: 10.0, y: 20.0 }, 1.5, STYLE);

        let doc = surface.into_document();

        assert!(doc.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="320" height="200" viewBox="0 0 320 200">"#));
        assert!(doc.contains(r##"<rect width="100%" height="100%" fill="#05060a"/>"##));
        assert!(doc.contains(r##"<line x1="1.00" y1="2.00" x2="3.00" y2="4.00" stroke="#22d3ee" stroke-opacity="0.5000" stroke-width="0.4"/>"##));
        assert!(doc.contains(r##"<circle cx="10.00" cy="20.00" r="1.50" fill="#22d3ee" fill-opacity="0.5000"/>"##));
        assert!(doc.ends_with("</svg>\n"));
    }

    #[test]
    fn test_render_poster_is_deterministic() {
        let viewport = Viewport::new(400.0, 300.0);
        let a = render_poster(viewport, 5000.0, Pointer::default(), 42);
        let b = render_poster(viewport, 5000.0, Pointer::default(), 42);
        assert_eq!(a, b);
        assert_eq!(crate::sphere::TOTAL, a.matches("<circle").count());
        assert_ne!(a, render_poster(viewport, 9000.0, Pointer::default(), 42));
    }

    #[test]
    fn test_clear_discards_previous_frame() {
        let mut surface = SvgSurface::new();
        surface.clear(Viewport::new(10.0, 10.0));
        surface.disc(Point { x: 1.0, y: 1.0 }, 1.0, STYLE);
        surface.clear(Viewport::new(10.0, 10.0));
        assert_eq!(0, surface.element_count());
    }
}

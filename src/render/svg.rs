//! Standalone SVG documents for a [`SceneFrame`].
//!
//! Output is byte-stable for a given frame: numbers are written with three decimals and
//! trailing zeros trimmed. Partially drawn edges are emitted as truncated geometry (cut at the
//! drawn fraction of their arc length) rather than relying on dash tricks, so any SVG consumer
//! renders them identically.

use std::fmt::Write as _;

use kurbo::{ParamCurve, ParamCurveArclen};

use crate::{
    foundation::core::{Line, QuadBez, Rgb8},
    layout::{
        branch::TRUNK_COLOR,
        roots::{ROOT_COLOR, ROOT_STROKE_OPACITY, SEED_FILL, SEED_RADIUS, SEED_STROKE},
    },
    model::story::StorySection,
    render::glyph::GlyphSource,
    stage::{EdgeFrame, SceneFrame, ViewMode},
};

/// Width reserved left of the canvas for the info panel.
pub const PANEL_COLUMN: f64 = 384.0;
pub const NARROW_WIDTH: f64 = 480.0;

const BACKGROUND: Rgb8 = Rgb8::hex(0x020617);
const GRID_DOT: Rgb8 = Rgb8::hex(0x334155);
const ACCENT: Rgb8 = Rgb8::hex(0x10b981);
const ACCENT_LIGHT: Rgb8 = Rgb8::hex(0x34d399);
const CHIP_TEXT: Rgb8 = Rgb8::hex(0x22d3ee);
const PILL_FILL: Rgb8 = Rgb8::hex(0x0f172a);
const PILL_STROKE: Rgb8 = Rgb8::hex(0x94a3b8);
const CARD_BORDER: Rgb8 = Rgb8::hex(0x334155);
const JOINT_FILL: Rgb8 = Rgb8::hex(0xf8fafc);
const LABEL_TEXT: Rgb8 = Rgb8::hex(0xe2e8f0);
const MUTED: Rgb8 = Rgb8::hex(0x64748b);
const SUBTLE: Rgb8 = Rgb8::hex(0x94a3b8);
const BODY: Rgb8 = Rgb8::hex(0xcbd5e1);

const ARCLEN_ACCURACY: f64 = 1e-6;

const PANEL_X: f64 = 32.0;
const PANEL_Y: f64 = 128.0;
const PANEL_WIDTH: f64 = 320.0;
const PANEL_WRAP: usize = 44;
const CARD_WRAP: usize = 52;
const LINE_HEIGHT: f64 = 20.0;
const CHIP_CHAR_WIDTH: f64 = 7.2;

/// Fixed-precision number formatting.
pub fn num(v: f64) -> String {
    let v = if v.abs() < 0.0005 || !v.is_finite() {
        0.0
    } else {
        v
    };
    let mut s = format!("{v:.3}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Greedy word wrap at `width` characters; overlong words get their own line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Leading `fraction` of `line` by length.
pub fn partial_line(line: Line, fraction: f64) -> Line {
    Line::new(line.p0, line.eval(fraction.clamp(0.0, 1.0)))
}

/// Leading `fraction` of `curve` by arc length.
pub fn partial_quad(curve: QuadBez, fraction: f64) -> QuadBez {
    let fraction = fraction.clamp(0.0, 1.0);
    if fraction >= 1.0 {
        return curve;
    }
    let total = curve.arclen(ARCLEN_ACCURACY);
    let t = curve.inv_arclen(total * fraction, ARCLEN_ACCURACY);
    curve.subsegment(0.0..t)
}

pub struct SvgWriter<'g> {
    glyphs: &'g dyn GlyphSource,
}

impl<'g> SvgWriter<'g> {
    pub fn new(glyphs: &'g dyn GlyphSource) -> Self {
        Self { glyphs }
    }

    /// Whole page for the frame's view mode.
    pub fn document(&self, frame: &SceneFrame<'_>) -> String {
        match frame.mode {
            ViewMode::Wide => self.wide_document(frame),
            ViewMode::Narrow => self.narrow_document(frame),
        }
    }

    /// Only the tree canvas, in viewbox coordinates.
    pub fn canvas(&self, frame: &SceneFrame<'_>) -> String {
        let vb = frame.layout.viewbox;
        let mut out = String::new();
        open_svg(&mut out, vb.width, vb.height);
        self.write_canvas(&mut out, frame);
        out.push_str("</svg>\n");
        out
    }

    fn wide_document(&self, frame: &SceneFrame<'_>) -> String {
        let vb = frame.layout.viewbox;
        let width = PANEL_COLUMN + vb.width;
        let height = vb.height;
        let mut out = String::new();
        open_svg(&mut out, width, height);
        write_background(&mut out, width, height);

        let _ = writeln!(out, r#"<g transform="translate({} 0)">"#, num(PANEL_COLUMN));
        self.write_canvas(&mut out, frame);
        out.push_str("</g>\n");

        write_panel(&mut out, frame);
        write_scroll_hint(&mut out, width, height, frame.hint_opacity);
        out.push_str("</svg>\n");
        out
    }

    fn narrow_document(&self, frame: &SceneFrame<'_>) -> String {
        let cards: Vec<Card> = frame.story.sections().iter().map(Card::new).collect();
        let height = cards.iter().map(|c| c.height + 24.0).sum::<f64>() + 24.0;
        let mut out = String::new();
        open_svg(&mut out, NARROW_WIDTH, height);
        write_background(&mut out, NARROW_WIDTH, height);
        let mut y = 24.0;
        for card in &cards {
            card.write(&mut out, y);
            y += card.height + 24.0;
        }
        out.push_str("</svg>\n");
        out
    }

    fn write_canvas(&self, out: &mut String, frame: &SceneFrame<'_>) {
        let vb = frame.layout.viewbox;
        let base = frame.layout.base;

        let _ = writeln!(
            out,
            r#"<line x1="0" y1="{y}" x2="{w}" y2="{y}" stroke="{c}" stroke-width="2" stroke-dasharray="8 8" opacity="0.3"/>"#,
            y = num(base.y),
            w = num(vb.width),
            c = TRUNK_COLOR.to_css(),
        );
        let _ = writeln!(
            out,
            r#"<text x="20" y="{y}" fill="{c}" font-size="10" font-family="monospace" letter-spacing="2">// ENVIRONMENT: PRODUCTION</text>"#,
            y = num(base.y + 20.0),
            c = MUTED.to_css(),
        );

        write_roots(out, frame);
        for ef in &frame.edges {
            self.write_edge(out, ef);
        }
    }

    fn write_edge(&self, out: &mut String, ef: &EdgeFrame<'_>) {
        let edge = ef.edge;
        if ef.draw > 0.0 && ef.opacity > 0.0 {
            let seg = partial_line(edge.line, ef.draw);
            let _ = writeln!(
                out,
                r#"<path data-node="{id}" d="M {x0} {y0} L {x1} {y1}" stroke="{c}" stroke-width="{w}" stroke-linecap="round" fill="none" opacity="{o}"/>"#,
                id = escape(&edge.node_id),
                x0 = num(seg.p0.x),
                y0 = num(seg.p0.y),
                x1 = num(seg.p1.x),
                y1 = num(seg.p1.y),
                c = edge.stroke.to_css(),
                w = num(edge.stroke_width),
                o = num(ef.opacity),
            );
        }

        if ef.scale <= 0.0 {
            return;
        }
        let end = edge.end();
        let _ = writeln!(
            out,
            r#"<g transform="translate({x} {y}) scale({s})" opacity="{s}">"#,
            x = num(end.x),
            y = num(end.y),
            s = num(ef.scale),
        );
        if edge.joint_radius > 0.0 {
            let _ = writeln!(
                out,
                r#"<circle r="{r}" fill="{f}" stroke="{c}" stroke-width="2"/>"#,
                r = num(edge.joint_radius),
                f = JOINT_FILL.to_css(),
                c = edge.stroke.to_css(),
            );
        }
        if let Some(label) = &edge.label {
            let (stroke, stroke_opacity, stroke_width) = if ef.highlighted {
                (ACCENT_LIGHT, 0.9, 1.5)
            } else {
                (PILL_STROKE, 0.2, 1.0)
            };
            let _ = writeln!(
                out,
                r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="6" fill="{f}" fill-opacity="0.9" stroke="{s}" stroke-opacity="{so}" stroke-width="{sw}"/>"#,
                x = num(label.pill.x0),
                y = num(label.pill.y0),
                w = num(label.pill.width()),
                h = num(label.pill.height()),
                f = PILL_FILL.to_css(),
                s = stroke.to_css(),
                so = num(stroke_opacity),
                sw = num(stroke_width),
            );
            if let (Some(icon), Some(bounds)) = (edge.icon, label.icon_box) {
                if let Some(markup) = self.glyphs.glyph(icon, bounds) {
                    out.push_str(&markup);
                    out.push('\n');
                }
            }
            let _ = writeln!(
                out,
                r#"<text x="{x}" y="{y}" fill="{c}" font-size="11" font-family="monospace" font-weight="bold" letter-spacing="0.5">{name}</text>"#,
                x = num(label.text_at.x),
                y = num(label.text_at.y),
                c = LABEL_TEXT.to_css(),
                name = escape(&edge.name),
            );
        }
        out.push_str("</g>\n");
    }
}

fn open_svg(out: &mut String, width: f64, height: f64) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(width),
        h = num(height),
    );
}

fn write_background(out: &mut String, width: f64, height: f64) {
    let _ = writeln!(
        out,
        r#"<defs><pattern id="grid" width="32" height="32" patternUnits="userSpaceOnUse"><circle cx="1" cy="1" r="1" fill="{dot}"/></pattern></defs>"#,
        dot = GRID_DOT.to_css(),
    );
    let _ = writeln!(
        out,
        r#"<rect width="{w}" height="{h}" fill="{bg}"/><rect width="{w}" height="{h}" fill="url(#grid)" opacity="0.2"/>"#,
        w = num(width),
        h = num(height),
        bg = BACKGROUND.to_css(),
    );
}

fn write_roots(out: &mut String, frame: &SceneFrame<'_>) {
    let roots = &frame.layout.roots;
    if frame.roots.opacity > 0.0 {
        for (curve, &draw) in roots.curves.iter().zip(&frame.roots.draw) {
            if draw <= 0.0 {
                continue;
            }
            let q = partial_quad(curve.curve, draw);
            let dash = if curve.dashed {
                r#" stroke-dasharray="4 4""#
            } else {
                ""
            };
            let _ = writeln!(
                out,
                r#"<path d="M {x0} {y0} Q {cx} {cy}, {x1} {y1}" stroke="{c}" stroke-width="{w}"{dash} stroke-opacity="{so}" fill="none" opacity="{o}"/>"#,
                x0 = num(q.p0.x),
                y0 = num(q.p0.y),
                cx = num(q.p1.x),
                cy = num(q.p1.y),
                x1 = num(q.p2.x),
                y1 = num(q.p2.y),
                c = ROOT_COLOR.to_css(),
                w = num(curve.stroke_width),
                so = num(ROOT_STROKE_OPACITY),
                o = num(frame.roots.opacity),
            );
        }
    }

    if frame.roots.seed_scale > 0.0 {
        let _ = writeln!(
            out,
            r#"<circle transform="translate({x} {y}) scale({s})" r="{r}" fill="{f}" stroke="{c}" stroke-width="2"/>"#,
            x = num(roots.base.x),
            y = num(roots.base.y),
            s = num(frame.roots.seed_scale),
            r = num(SEED_RADIUS),
            f = SEED_FILL.to_css(),
            c = SEED_STROKE.to_css(),
        );
    }
}

fn write_panel(out: &mut String, frame: &SceneFrame<'_>) {
    let panel = &frame.panel;
    if panel.opacity <= 0.0 {
        return;
    }
    let section = panel.section;
    let lines = wrap(&section.description, PANEL_WRAP);
    let chip_rows = chip_layout(&section.highlight_node_ids, PANEL_WIDTH - 48.0);
    let desc_top = 150.0;
    let nodes_top = desc_top + lines.len() as f64 * LINE_HEIGHT + 24.0;
    let rows = chip_rows.iter().map(|c| c.row).max().map_or(0, |r| r + 1);
    let height = nodes_top + 24.0 + rows as f64 * 30.0 + 16.0;

    let _ = writeln!(
        out,
        r#"<g data-section="{id}" transform="translate({x} {y})" opacity="{o}">"#,
        id = escape(&section.id),
        x = num(PANEL_X + panel.offset_x),
        y = num(PANEL_Y),
        o = num(panel.opacity),
    );
    let _ = writeln!(
        out,
        r#"<rect width="{w}" height="{h}" rx="8" fill="{f}" fill-opacity="0.8" stroke="{b}"/>"#,
        w = num(PANEL_WIDTH),
        h = num(height),
        f = PILL_FILL.to_css(),
        b = CARD_BORDER.to_css(),
    );
    let _ = writeln!(
        out,
        r#"<circle cx="28" cy="32" r="4" fill="{a}"/><text x="40" y="36" fill="{a}" font-size="11" font-family="monospace" letter-spacing="2">SYSTEM STATUS: ACTIVE</text>"#,
        a = ACCENT.to_css(),
    );
    let _ = writeln!(
        out,
        r##"<text x="24" y="84" fill="#ffffff" font-size="28" font-family="monospace" font-weight="bold">{t}</text>"##,
        t = escape(&section.title),
    );
    let _ = writeln!(
        out,
        r#"<text x="24" y="114" fill="{c}" font-size="18" font-style="italic">{s}</text>"#,
        c = SUBTLE.to_css(),
        s = escape(&section.subtitle),
    );
    let _ = writeln!(
        out,
        r#"<line x1="24" y1="132" x2="{x2}" y2="132" stroke="{a}" stroke-opacity="0.5"/>"#,
        x2 = num(PANEL_WIDTH - 24.0),
        a = ACCENT.to_css(),
    );
    for (i, line) in lines.iter().enumerate() {
        let _ = writeln!(
            out,
            r#"<text x="24" y="{y}" fill="{c}" font-size="13">{l}</text>"#,
            y = num(desc_top + i as f64 * LINE_HEIGHT),
            c = BODY.to_css(),
            l = escape(line),
        );
    }
    let _ = writeln!(
        out,
        r#"<text x="24" y="{y}" fill="{c}" font-size="11" font-weight="bold">ACTIVE NODES</text>"#,
        y = num(nodes_top),
        c = MUTED.to_css(),
    );
    for chip in &chip_rows {
        let y = nodes_top + 12.0 + chip.row as f64 * 30.0;
        let _ = writeln!(
            out,
            r#"<rect x="{x}" y="{y}" width="{w}" height="22" rx="4" fill="{f}" stroke="{b}"/><text x="{tx}" y="{ty}" fill="{c}" font-size="11" font-family="monospace">{id}</text>"#,
            x = num(24.0 + chip.x),
            y = num(y),
            w = num(chip.width),
            f = PILL_FILL.to_css(),
            b = CARD_BORDER.to_css(),
            tx = num(32.0 + chip.x),
            ty = num(y + 15.0),
            c = CHIP_TEXT.to_css(),
            id = escape(chip.id),
        );
    }
    out.push_str("</g>\n");
}

fn write_scroll_hint(out: &mut String, width: f64, height: f64, opacity: f64) {
    if opacity <= 0.0 {
        return;
    }
    let x = width - 48.0;
    let _ = writeln!(
        out,
        r#"<g opacity="{o}"><text x="{x}" y="{ty}" fill="{a}" font-size="10" font-family="monospace" letter-spacing="2" text-anchor="middle">INIT GROWTH</text><line x1="{x}" y1="{y1}" x2="{x}" y2="{y2}" stroke="{a}" stroke-opacity="0.5"/></g>"#,
        o = num(opacity),
        x = num(x),
        ty = num(height - 88.0),
        y1 = num(height - 80.0),
        y2 = num(height - 32.0),
        a = ACCENT.to_css(),
    );
}

struct Chip<'a> {
    id: &'a str,
    x: f64,
    width: f64,
    row: usize,
}

/// Flow chips left to right, wrapping at `max_width`.
fn chip_layout(ids: &[String], max_width: f64) -> Vec<Chip<'_>> {
    let mut chips = Vec::with_capacity(ids.len());
    let (mut x, mut row) = (0.0, 0usize);
    for id in ids {
        let width = id.chars().count() as f64 * CHIP_CHAR_WIDTH + 16.0;
        if x > 0.0 && x + width > max_width {
            x = 0.0;
            row += 1;
        }
        chips.push(Chip { id, x, width, row });
        x += width + 8.0;
    }
    chips
}

/// Static card for the narrow layout.
struct Card<'a> {
    section: &'a StorySection,
    lines: Vec<String>,
    height: f64,
}

impl<'a> Card<'a> {
    fn new(section: &'a StorySection) -> Self {
        let lines = wrap(&section.description, CARD_WRAP);
        let height = 96.0 + lines.len() as f64 * LINE_HEIGHT;
        Self {
            section,
            lines,
            height,
        }
    }

    fn write(&self, out: &mut String, y: f64) {
        let _ = writeln!(
            out,
            r#"<g data-section="{id}" transform="translate(16 {y})">"#,
            id = escape(&self.section.id),
            y = num(y),
        );
        let _ = writeln!(
            out,
            r#"<rect width="{w}" height="{h}" rx="12" fill="{f}" fill-opacity="0.9" stroke="{b}"/>"#,
            w = num(NARROW_WIDTH - 32.0),
            h = num(self.height),
            f = PILL_FILL.to_css(),
            b = CARD_BORDER.to_css(),
        );
        let _ = writeln!(
            out,
            r#"<text x="24" y="40" fill="{a}" font-size="24" font-weight="bold">{t}</text><text x="24" y="68" fill="{c}" font-size="18">{s}</text>"#,
            a = ACCENT_LIGHT.to_css(),
            t = escape(&self.section.title),
            c = SUBTLE.to_css(),
            s = escape(&self.section.subtitle),
        );
        for (i, line) in self.lines.iter().enumerate() {
            let _ = writeln!(
                out,
                r#"<text x="24" y="{y}" fill="{c}" font-size="14">{l}</text>"#,
                y = num(96.0 + i as f64 * LINE_HEIGHT),
                c = BODY.to_css(),
                l = escape(line),
            );
        }
        out.push_str("</g>\n");
    }
}

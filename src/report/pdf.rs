use std::path::Path;

use anyhow::{Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use super::ReportData;
use crate::models::{ComplianceVerdict, DisplayStatus};

type Rgb3 = (f32, f32, f32);

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const T_END: f32 = PAGE_W - MARGIN;
const COVER_HDR_H: f32 = 72.0;

const BG: Rgb3 = (1.00, 1.00, 1.00);
const PANEL: Rgb3 = (1.00, 1.00, 1.00);
const PANEL_ALT: Rgb3 = (0.95, 0.96, 0.99);
const PANEL_BORDER: Rgb3 = (0.85, 0.87, 0.92);
const ACCENT_TEAL: Rgb3 = (0.05, 0.55, 0.60);
const ACCENT_BLU: Rgb3 = (0.20, 0.46, 0.95);
const TEXT_PRI: Rgb3 = (0.07, 0.08, 0.14);
const TEXT_SEC: Rgb3 = (0.36, 0.40, 0.52);
const TEXT_MUT: Rgb3 = (0.58, 0.63, 0.72);
const WHITE: Rgb3 = (1.00, 1.00, 1.00);
const WHITE_DIM: Rgb3 = (0.85, 0.95, 0.97);

const OK_BG: Rgb3 = (0.90, 0.98, 0.92);
const OK_FG: Rgb3 = (0.07, 0.52, 0.22);
const WARN_BG: Rgb3 = (1.00, 0.95, 0.87);
const WARN_FG: Rgb3 = (0.70, 0.40, 0.02);
const CRIT_BG: Rgb3 = (1.00, 0.91, 0.91);
const CRIT_FG: Rgb3 = (0.76, 0.09, 0.13);
const NONE_BG: Rgb3 = (0.93, 0.93, 0.95);
const NONE_FG: Rgb3 = (0.40, 0.42, 0.50);
const PEND_BG: Rgb3 = (0.91, 0.93, 1.00);
const PEND_FG: Rgb3 = (0.20, 0.34, 0.82);

const R_BADGE: f32 = 1.5;

/// Render a PDF report: cover page, driver table, then reminders when requested.
pub fn render(data: &ReportData<'_>, output_path: &Path) -> Result<()> {
    let doc = PdfDocument::empty("Document Compliance Report");
    let fonts = Fonts {
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
    };

    add_cover_page(&doc, &fonts, data);

    let driver_rows: Vec<TableRow> = data
        .drivers
        .iter()
        .map(|d| TableRow {
            cells: vec![
                d.driver_name.clone(),
                d.counts.total.to_string(),
                d.counts.expired.to_string(),
                d.counts.expiring.to_string(),
                d.counts.pending.to_string(),
            ],
            badge: verdict_badge(d.verdict),
        })
        .collect();
    add_table_pages(
        &doc,
        &fonts,
        &TableLayout {
            title: "Drivers",
            headers: &["DRIVER", "DOCS", "EXPIRED", "EXPIRING", "PENDING", "VERDICT"],
            col_x: &[0.0, 72.0, 90.0, 110.0, 130.0, 148.0],
        },
        &driver_rows,
    );

    if let Some(reminders) = data.reminders {
        let rows: Vec<TableRow> = reminders
            .iter()
            .map(|r| TableRow {
                cells: vec![
                    r.driver_name.clone(),
                    r.document_type.clone(),
                    r.expiry_date.to_string(),
                    r.days_until_expiry.to_string(),
                ],
                badge: status_badge(r.display_status),
            })
            .collect();
        add_table_pages(
            &doc,
            &fonts,
            &TableLayout {
                title: "Expiry Reminders",
                headers: &["DRIVER", "DOCUMENT", "EXPIRY", "DAYS", "STATUS"],
                col_x: &[0.0, 56.0, 104.0, 130.0, 148.0],
            },
            &rows,
        );
    }

    let bytes = doc.save_to_bytes()?;
    std::fs::write(output_path, &bytes)
        .with_context(|| format!("Failed to write PDF to {}", output_path.display()))?;

    println!("PDF report written to: {}", output_path.display());
    Ok(())
}

struct Fonts {
    bold: IndirectFontRef,
    regular: IndirectFontRef,
}

struct Badge {
    label: &'static str,
    fg: Rgb3,
    bg: Rgb3,
}

fn verdict_badge(verdict: ComplianceVerdict) -> Badge {
    let (label, fg, bg) = match verdict {
        ComplianceVerdict::Critical => ("CRITICAL", CRIT_FG, CRIT_BG),
        ComplianceVerdict::Warning => ("WARNING", WARN_FG, WARN_BG),
        ComplianceVerdict::Compliant => ("COMPLIANT", OK_FG, OK_BG),
        ComplianceVerdict::NoDocuments => ("NO DOCS", NONE_FG, NONE_BG),
    };
    Badge { label, fg, bg }
}

fn status_badge(status: DisplayStatus) -> Badge {
    let (label, fg, bg) = match status {
        DisplayStatus::Expired => ("EXPIRED", CRIT_FG, CRIT_BG),
        DisplayStatus::Expiring => ("EXPIRING", WARN_FG, WARN_BG),
        DisplayStatus::Pending => ("PENDING", PEND_FG, PEND_BG),
        DisplayStatus::Verified => ("VERIFIED", OK_FG, OK_BG),
    };
    Badge { label, fg, bg }
}

// ── Cover page ────────────────────────────────────────────────────────────────

fn add_cover_page(doc: &PdfDocumentReference, fonts: &Fonts, data: &ReportData<'_>) {
    let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Cover");
    let layer = doc.get_page(page_idx).get_layer(layer_idx);
    let summary = data.summary;
    let counts = &summary.counts;

    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
    let hdr_bot = PAGE_H - COVER_HDR_H;
    fill_gradient_h(&layer, 0.0, hdr_bot, PAGE_W, COVER_HDR_H, ACCENT_TEAL, ACCENT_BLU, 28);

    set_color(&layer, WHITE_DIM);
    layer.use_text(
        format!("fleetdoc v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(PAGE_W - MARGIN - 30.0), Mm(PAGE_H - 10.5), &fonts.regular,
    );

    set_color(&layer, WHITE);
    layer.use_text("Document Compliance", 28.0, Mm(MARGIN), Mm(PAGE_H - 26.0), &fonts.bold);
    set_color(&layer, WHITE_DIM);
    layer.use_text("Report", 28.0, Mm(MARGIN), Mm(PAGE_H - 41.0), &fonts.bold);

    // Source chip
    let chip_y = hdr_bot - 18.0;
    let chip_h = 12.0;
    let chip_w = 120.0;
    fill_rounded_rect(&layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL);
    stroke_rounded_rect(&layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL_BORDER);
    fill_rect(&layer, MARGIN, chip_y, 2.5, chip_h, ACCENT_TEAL);
    set_color(&layer, TEXT_MUT);
    layer.use_text("SOURCE", 6.0, Mm(MARGIN + 5.0), Mm(chip_y + chip_h - 3.8), &fonts.bold);
    set_color(&layer, TEXT_PRI);
    layer.use_text(
        truncate(data.source, 40),
        9.5, Mm(MARGIN + 5.0), Mm(chip_y + 2.8), &fonts.bold,
    );

    set_color(&layer, TEXT_SEC);
    layer.use_text(
        format!("As of  {}", data.as_of),
        9.0, Mm(MARGIN), Mm(chip_y - 8.0), &fonts.regular,
    );

    let rule_y = chip_y - 16.5;
    draw_hline(&layer, MARGIN, T_END, rule_y, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text("DRIVERS", 6.5, Mm(MARGIN), Mm(rule_y - 7.0), &fonts.bold);

    let driver_cards = [
        ("TOTAL", summary.drivers, ACCENT_BLU),
        ("CRITICAL", summary.critical, CRIT_FG),
        ("WARNING", summary.warning, WARN_FG),
        ("COMPLIANT", summary.compliant, OK_FG),
    ];
    let card_y = rule_y - 42.0;
    draw_card_row(&layer, fonts, card_y, &driver_cards);

    let docs_rule_y = card_y - 13.0;
    draw_hline(&layer, MARGIN, T_END, docs_rule_y, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text("DOCUMENTS", 6.5, Mm(MARGIN), Mm(docs_rule_y - 7.0), &fonts.bold);

    let doc_cards = [
        ("EXPIRED", counts.expired, CRIT_FG),
        ("EXPIRING", counts.expiring, WARN_FG),
        ("PENDING", counts.pending, PEND_FG),
        ("VERIFIED", counts.verified, OK_FG),
    ];
    draw_card_row(&layer, fonts, docs_rule_y - 42.0, &doc_cards);

    if summary.no_documents > 0 {
        set_color(&layer, TEXT_SEC);
        layer.use_text(
            format!("{} driver(s) have no documents on file.", summary.no_documents),
            8.5, Mm(MARGIN), Mm(docs_rule_y - 52.0), &fonts.regular,
        );
    }

    draw_hline(&layer, MARGIN, T_END, 22.0, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text(
        format!("Generated by fleetdoc v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(MARGIN), Mm(15.0), &fonts.regular,
    );
}

fn draw_card_row(layer: &PdfLayerReference, fonts: &Fonts, y: f32, cards: &[(&str, usize, Rgb3)]) {
    let h = 26.0;
    let gap = 4.0;
    let n = cards.len() as f32;
    let w = (T_END - MARGIN - gap * (n - 1.0)) / n;

    for (i, (label, value, accent)) in cards.iter().enumerate() {
        let x = MARGIN + (w + gap) * i as f32;
        fill_rounded_rect(layer, x, y, w, h, R_BADGE, PANEL);
        stroke_rounded_rect(layer, x, y, w, h, R_BADGE, PANEL_BORDER);
        fill_rect(layer, x, y + h - 2.0, w, 2.0, *accent);

        set_color(layer, *accent);
        layer.use_text(value.to_string(), 20.0, Mm(x + 5.0), Mm(y + h * 0.38), &fonts.bold);
        set_color(layer, TEXT_MUT);
        layer.use_text(*label, 6.5, Mm(x + 5.0), Mm(y + 3.5), &fonts.regular);
    }
}

// ── Table pages ───────────────────────────────────────────────────────────────

struct TableLayout<'a> {
    title: &'a str,
    /// Column headers; the last column holds the badge.
    headers: &'a [&'a str],
    /// Column offsets from the left margin, in mm.
    col_x: &'a [f32],
}

struct TableRow {
    cells: Vec<String>,
    badge: Badge,
}

fn add_table_pages(
    doc: &PdfDocumentReference,
    fonts: &Fonts,
    layout: &TableLayout<'_>,
    rows: &[TableRow],
) {
    const ROW_H: f32 = 7.0;
    const HDR_Y: f32 = 268.5;
    const FIRST_Y: f32 = 259.5;
    const BOT_MARGIN: f32 = 25.0;

    let mut page: Option<PdfLayerReference> = None;
    let mut page_num: u32 = 0;
    let mut cur_y = FIRST_Y;

    if rows.is_empty() {
        let layer = new_table_page(doc, fonts, layout, 1, HDR_Y);
        set_color(&layer, TEXT_SEC);
        layer.use_text("Nothing to report.", 9.0, Mm(MARGIN + 1.5), Mm(FIRST_Y - 4.0), &fonts.regular);
        return;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let layer = match page.take() {
            Some(layer) if cur_y - ROW_H >= BOT_MARGIN => layer,
            _ => {
                page_num += 1;
                cur_y = FIRST_Y;
                new_table_page(doc, fonts, layout, page_num, HDR_Y)
            }
        };

        if row_idx % 2 == 0 {
            fill_rect(&layer, MARGIN, cur_y - ROW_H + 1.5, T_END - MARGIN, ROW_H, PANEL_ALT);
        }

        let text_y = cur_y - 4.0;
        for (i, cell) in row.cells.iter().enumerate() {
            set_color(&layer, if i == 0 { TEXT_PRI } else { TEXT_SEC });
            let max = if i == 0 { 34 } else { 22 };
            layer.use_text(
                truncate(cell, max),
                8.0, Mm(MARGIN + layout.col_x[i] + 1.5), Mm(text_y), &fonts.regular,
            );
        }

        let badge_x = MARGIN + layout.col_x[row.cells.len()] + 1.5;
        let badge_y = cur_y - ROW_H + 2.2;
        fill_rounded_rect(&layer, badge_x, badge_y, 24.0, 4.8, R_BADGE, row.badge.bg);
        set_color(&layer, row.badge.fg);
        layer.use_text(row.badge.label, 7.0, Mm(badge_x + 2.5), Mm(badge_y + 1.1), &fonts.bold);

        draw_hline(&layer, MARGIN, T_END, cur_y - ROW_H + 1.5, PANEL_BORDER);

        cur_y -= ROW_H;
        page = Some(layer);
    }
}

fn new_table_page(
    doc: &PdfDocumentReference,
    fonts: &Fonts,
    layout: &TableLayout<'_>,
    page_num: u32,
    hdr_y: f32,
) -> PdfLayerReference {
    let (pi, li) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), layout.title);
    let layer = doc.get_page(pi).get_layer(li);

    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
    fill_gradient_h(&layer, 0.0, PAGE_H - 2.5, PAGE_W, 2.5, ACCENT_TEAL, ACCENT_BLU, 21);

    set_color(&layer, TEXT_PRI);
    layer.use_text(layout.title, 14.0, Mm(MARGIN), Mm(282.5), &fonts.bold);
    set_color(&layer, TEXT_MUT);
    layer.use_text(
        format!("Page {}", page_num),
        8.0, Mm(PAGE_W - MARGIN - 14.0), Mm(283.0), &fonts.regular,
    );
    draw_hline(&layer, MARGIN, T_END, 277.5, PANEL_BORDER);

    fill_rounded_rect(&layer, MARGIN, hdr_y - 7.5, T_END - MARGIN, 9.5, R_BADGE, PANEL);
    stroke_rounded_rect(&layer, MARGIN, hdr_y - 7.5, T_END - MARGIN, 9.5, R_BADGE, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    for (h, x) in layout.headers.iter().zip(layout.col_x) {
        layer.use_text(*h, 7.0, Mm(MARGIN + x + 1.5), Mm(hdr_y - 4.0), &fonts.bold);
    }

    draw_hline(&layer, MARGIN, T_END, 22.0, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text(
        format!("fleetdoc v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(MARGIN), Mm(15.0), &fonts.regular,
    );

    layer
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

fn rgb((r, g, b): Rgb3) -> Color {
    Color::Rgb(Rgb { r, g, b, icc_profile: None })
}

fn set_color(layer: &PdfLayerReference, color: Rgb3) {
    layer.set_fill_color(rgb(color));
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, color: Rgb3) {
    layer.set_fill_color(rgb(color));
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x), Mm(y + h)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
}

/// Clockwise polygon ring approximating a rounded rectangle, 8 segments per corner.
fn rounded_rect_ring(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<(Point, bool)> {
    const SEGS: usize = 8;
    let r = r.min(w / 2.0).min(h / 2.0);
    let corners = [
        (x + w - r, y + r, 270.0f32, 360.0f32),
        (x + w - r, y + h - r, 0.0, 90.0),
        (x + r, y + h - r, 90.0, 180.0),
        (x + r, y + r, 180.0, 270.0),
    ];

    let mut pts = Vec::with_capacity(4 * (SEGS + 1));
    for (cx, cy, start, end) in corners {
        for i in 0..=SEGS {
            let angle = (start + (end - start) * i as f32 / SEGS as f32).to_radians();
            pts.push((Point::new(Mm(cx + r * angle.cos()), Mm(cy + r * angle.sin())), false));
        }
    }
    pts
}

fn fill_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, r: f32, color: Rgb3) {
    layer.set_fill_color(rgb(color));
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
}

fn stroke_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, r: f32, color: Rgb3) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(0.4);
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Stroke,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
    layer.set_outline_thickness(1.0);
}

fn draw_hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32, color: Rgb3) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(0.3);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
    layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
    layer.set_outline_thickness(1.0);
}

/// Left-to-right gradient built from `steps` vertical strips.
#[allow(clippy::too_many_arguments)]
fn fill_gradient_h(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    from: Rgb3,
    to: Rgb3,
    steps: usize,
) {
    let step_w = w / steps as f32;
    for i in 0..steps {
        let t = i as f32 / (steps - 1).max(1) as f32;
        let color = (
            from.0 + (to.0 - from.0) * t,
            from.1 + (to.1 - from.1) * t,
            from.2 + (to.2 - from.2) * t,
        );
        fill_rect(layer, x + i as f32 * step_w, y, step_w + 0.6, h, color);
    }
}

fn truncate(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max {
        format!("{}…", chars[..max - 1].iter().collect::<String>())
    } else {
        s.to_string()
    }
}

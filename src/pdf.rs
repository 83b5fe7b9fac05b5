use anyhow::Result;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::adzuna::JobListing;
use crate::compose::{format_distance, format_salary, title_case};

const PAGE_WIDTH: f64 = 215.9;
const PAGE_HEIGHT: f64 = 279.4;
const MARGIN: f64 = 15.0;
const USABLE_WIDTH: f64 = PAGE_WIDTH - MARGIN * 2.0;

const CHART_HEIGHT: f64 = 45.0;
const BAR_COLORS: [(u8, u8, u8); 4] = [
    (196, 122, 255),
    (121, 120, 255),
    (70, 73, 255),
    (29, 28, 229),
];

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f64 / 255.0,
        g as f64 / 255.0,
        b as f64 / 255.0,
        None,
    ))
}

struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    y: f64,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(PageWriter {
            doc,
            layer,
            y: PAGE_HEIGHT - MARGIN,
            regular,
            bold,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_space(&mut self, needed: f64) {
        if self.y - needed < MARGIN {
            self.new_page();
        }
    }

    fn advance(&mut self, amount: f64) {
        self.y -= amount;
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.layer.set_fill_color(color);
        let shape = Line {
            points: vec![
                (Point::new(Mm(x), Mm(y)), false),
                (Point::new(Mm(x + width), Mm(y)), false),
                (Point::new(Mm(x + width), Mm(y + height)), false),
                (Point::new(Mm(x), Mm(y + height)), false),
            ],
            is_closed: true,
            has_fill: true,
            has_stroke: false,
            is_clipping_path: false,
        };
        self.layer.add_shape(shape);
    }

    // Wrapped text block at `indent` mm from the left margin; returns to a
    // fresh page mid-block when the cursor runs out.
    fn text_block(&mut self, text: &str, size: f64, indent: f64, bold: bool, color: Color) {
        let char_width = size * 0.5 * 0.3528;
        let max_chars = ((USABLE_WIDTH - indent) / char_width).max(8.0) as usize;
        let line_height = size * 0.45;
        let font = if bold {
            self.bold.clone()
        } else {
            self.regular.clone()
        };

        for line in textwrap::wrap(text, max_chars) {
            self.ensure_space(line_height);
            self.layer.set_fill_color(color.clone());
            self.layer
                .use_text(line.to_string(), size, Mm(MARGIN + indent), Mm(self.y), &font);
            self.advance(line_height);
        }
    }

    // Three-segment banner plus document title, as on the first page.
    fn banner(&mut self, title: &str) {
        let segment = USABLE_WIDTH / 3.0;
        let y = self.y - 3.0;
        self.rect(MARGIN, y, segment, 3.0, rgb(135, 59, 29));
        self.rect(MARGIN + segment, y, segment, 3.0, rgb(237, 118, 71));
        self.rect(MARGIN + segment * 2.0, y, segment, 3.0, rgb(13, 158, 198));
        self.advance(14.0);
        self.text_block(title, 26.0, 0.0, true, rgb(114, 53, 9));
        self.advance(2.0);
        self.rect(MARGIN, self.y, segment / 2.0, 1.0, rgb(135, 59, 29));
        self.advance(8.0);
    }

    fn histogram(&mut self, title: &str, buckets: &[(i64, u64)]) {
        let max_count = buckets.iter().map(|(_, c)| *c).max().unwrap_or(0);
        if max_count == 0 {
            return;
        }

        self.ensure_space(CHART_HEIGHT + 16.0);
        self.text_block(
            &format!("Salary distribution for {title}"),
            9.0,
            6.0,
            false,
            rgb(94, 74, 74),
        );
        self.advance(CHART_HEIGHT);

        let base = self.y;
        let chart_width = USABLE_WIDTH - 12.0;
        let bar_width = chart_width / buckets.len() as f64;
        let label_font = self.regular.clone();
        for (i, (bucket, count)) in buckets.iter().enumerate() {
            let height = CHART_HEIGHT * (*count as f64 / max_count as f64);
            let x = MARGIN + 6.0 + bar_width * i as f64;
            let (r, g, b) = BAR_COLORS[i % BAR_COLORS.len()];
            self.rect(x, base, bar_width * 0.85, height, rgb(r, g, b));
            // label every other bucket to keep the axis readable
            if i % 2 == 0 {
                self.layer.set_fill_color(rgb(94, 74, 74));
                self.layer.use_text(
                    format!("{}k", bucket / 1000),
                    6.0,
                    Mm(x),
                    Mm(base - 3.0),
                    &label_font,
                );
            }
        }
        self.rect(MARGIN + 6.0, base - 0.5, chart_width, 0.5, rgb(94, 74, 74));
        self.advance(8.0);
    }
}

/// Renders the listing set as a downloadable PDF. `histograms` is parallel
/// to `listings`; a missing entry just omits the chart for that listing.
pub fn render_jobs_pdf(
    listings: &[JobListing],
    city: &str,
    histograms: &[Option<Vec<(i64, u64)>>],
) -> Result<Vec<u8>> {
    let mut writer = PageWriter::new("List of Jobs")?;
    writer.banner("List of Jobs");

    for (i, job) in listings.iter().enumerate() {
        writer.ensure_space(30.0);
        writer.text_block(
            &format!("{}. {}", i + 1, job.title),
            16.0,
            0.0,
            true,
            rgb(241, 113, 34),
        );
        writer.advance(2.0);

        let location = if job.distance >= 0.0 {
            format!(
                "{}, {} from {}",
                job.location,
                format_distance(job.distance),
                title_case(city)
            )
        } else {
            job.location.clone()
        };
        let bullets = [
            ("Location", location),
            ("Salary", format_salary(job)),
            ("Apply Here", job.link.clone()),
        ];
        for (label, value) in bullets {
            writer.text_block(&format!("- {label}"), 11.0, 4.0, true, rgb(94, 74, 74));
            writer.text_block(&value, 10.0, 10.0, false, rgb(13, 158, 198));
            writer.advance(2.0);
        }

        if let Some(buckets) = histograms.get(i).and_then(|h| h.as_ref()) {
            writer.histogram(&job.title, buckets);
        }
        writer.advance(8.0);
    }

    Ok(writer.doc.save_to_bytes()?)
}

//! Schema diagram generators (SVG source and its PNG rasterization).

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use nestforge_core::GeneratedFile;
use nestforge_schema::SchemaModel;
use resvg::{tiny_skia, usvg};

const BOX_WIDTH: u32 = 250;
const PADDING: u32 = 50;
const STEP: u32 = BOX_WIDTH + PADDING;
const BOXES_PER_ROW: u32 = 4;
const LINE_HEIGHT: u32 = 20;
const MIN_WIDTH: u32 = 800;
const MIN_HEIGHT: u32 = 600;
const ORIGIN: (u32, u32) = (10, 20);

/// One table box on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBox {
    pub x: u32,
    pub y: u32,
    pub title: String,
    /// `name: type` per column.
    pub lines: Vec<String>,
}

/// Grid placement of every table.
///
/// All boxes share the height of the tallest table. Boxes are placed left to
/// right and wrap once the next box would cross the right padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramLayout {
    pub width: u32,
    pub height: u32,
    pub box_height: u32,
    pub boxes: Vec<TableBox>,
}

impl DiagramLayout {
    pub fn new(model: &SchemaModel) -> Self {
        let count = model.tables().len() as u32;
        let box_height = 2 * LINE_HEIGHT + LINE_HEIGHT * model.max_column_count() as u32;
        // A full row of boxes plus the right padding.
        let width = MIN_WIDTH.max(count.min(BOXES_PER_ROW) * STEP + PADDING);

        let (mut x, mut y) = ORIGIN;
        let mut rows = 0;
        let mut boxes = Vec::with_capacity(model.tables().len());
        for table in model.tables() {
            if x == ORIGIN.0 {
                rows += 1;
            }
            boxes.push(TableBox {
                x,
                y,
                title: table.table_name.clone(),
                lines: table
                    .columns
                    .iter()
                    .map(|c| format!("{}: {}", c.column_name, c.data_type))
                    .collect(),
            });

            x += STEP;
            if x + BOX_WIDTH > width - PADDING {
                x = ORIGIN.0;
                y += box_height + PADDING;
            }
        }

        Self {
            width,
            height: MIN_HEIGHT.max(rows * (box_height + PADDING) + ORIGIN.1),
            box_height,
            boxes,
        }
    }

    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
            self.width, self.height
        );
        svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
        for b in &self.boxes {
            svg.push_str(&format!(
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"lightgrey\" stroke=\"black\"/>\n",
                b.x, b.y, BOX_WIDTH, self.box_height
            ));
            svg.push_str(&text(b.x + 10, b.y + 20, 12, &b.title));
            for (i, line) in b.lines.iter().enumerate() {
                let y = b.y + 2 * LINE_HEIGHT + LINE_HEIGHT * i as u32;
                svg.push_str(&text(b.x + 10, y, 10, line));
            }
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn text(x: u32, y: u32, size: u32, content: &str) -> String {
    format!(
        "  <text x=\"{}\" y=\"{}\" font-family=\"Arial\" font-size=\"{}\" fill=\"black\">{}</text>\n",
        x,
        y,
        size,
        escape_xml(content)
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// `public/diagram.svg`.
pub struct DiagramSvg {
    layout: DiagramLayout,
}

impl DiagramSvg {
    pub fn new(model: &SchemaModel) -> Self {
        Self {
            layout: DiagramLayout::new(model),
        }
    }
}

impl GeneratedFile for DiagramSvg {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("public").join("diagram.svg")
    }

    fn render(&self) -> String {
        self.layout.to_svg()
    }
}

/// `public/diagram.png`, rasterized from the same layout as [`DiagramSvg`].
pub struct DiagramPng {
    layout: DiagramLayout,
}

impl DiagramPng {
    pub fn new(model: &SchemaModel) -> Self {
        Self {
            layout: DiagramLayout::new(model),
        }
    }
}

impl GeneratedFile for DiagramPng {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("public").join("diagram.png")
    }

    /// The SVG source the PNG is rasterized from.
    fn render(&self) -> String {
        self.layout.to_svg()
    }

    fn render_bytes(&self) -> Result<Vec<u8>> {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();

        let tree = usvg::Tree::from_str(&self.render(), &options)
            .wrap_err("failed to parse diagram SVG")?;
        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| eyre!("invalid diagram size {}x{}", size.width(), size.height()))?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap.encode_png().wrap_err("failed to encode diagram PNG")
    }

    fn is_binary(&self) -> bool {
        true
    }
}

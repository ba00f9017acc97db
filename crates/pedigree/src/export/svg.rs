//! SVG rendering backend.
//!
//! [`SvgBuilder`] turns a [`StyleConfig`] into an [`Svg`] renderer. Grid cells
//! are scaled to pixels after the orientation transform, so one renderer
//! serves all four directions.

mod chart;

use log::{debug, info};
use svg::{self, node::element as svg_element};

use pedigree_core::{chart::Direction, geometry::GridBounds};

use super::{Error, LabelSource, Renderer};
use crate::{
    color::Color, config::StyleConfig, layout::LayoutResult, orientation, tree::AncestorTree,
};

/// Default width of one grid cell in pixels.
const DEFAULT_CELL_WIDTH: f32 = 60.0;
/// Default height of one grid cell in pixels.
const DEFAULT_CELL_HEIGHT: f32 = 24.0;
/// Space around the chart in pixels.
const MARGIN: f32 = 20.0;

/// Builder for [`Svg`] renderers.
#[derive(Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the colors and cell size of `style`
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Build the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the configured background color is
    /// invalid or a cell dimension is not positive.
    pub fn build(self) -> Result<Svg, Error> {
        let Some(style) = self.style else {
            return Ok(Svg::new(None, DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT));
        };

        let background = style.background_color().map_err(Error::Render)?;
        let cell_width = style.cell_width().unwrap_or(DEFAULT_CELL_WIDTH);
        let cell_height = style.cell_height().unwrap_or(DEFAULT_CELL_HEIGHT);
        if cell_width <= 0.0 || cell_height <= 0.0 {
            return Err(Error::Render(format!(
                "Cell size must be positive, got {cell_width}x{cell_height}"
            )));
        }

        Ok(Svg::new(background, cell_width, cell_height))
    }
}

/// SVG pedigree renderer.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    cell_width: f32,
    cell_height: f32,
}

/// Geometry shared by every element of one chart.
#[derive(Debug, Clone, Copy)]
struct Frame {
    bounds: GridBounds,
    direction: Direction,
}

impl Svg {
    fn new(background: Option<Color>, cell_width: f32, cell_height: f32) -> Self {
        Self {
            background,
            cell_width,
            cell_height,
        }
    }

    /// Renders a chart to an SVG document.
    pub fn render_document(
        &self,
        tree: &AncestorTree,
        layout: &LayoutResult,
        direction: Direction,
        labels: &dyn LabelSource,
    ) -> svg::Document {
        let frame = Frame {
            bounds: layout.bounds(),
            direction,
        };
        let canvas = orientation::place_bounds(layout.bounds(), direction);
        let width = canvas.xmax() as f32 * self.cell_width + 2.0 * MARGIN;
        let height = canvas.ymax() as f32 * self.cell_height + 2.0 * MARGIN;
        debug!(width, height, direction:% = direction; "SVG canvas");

        let mut doc = svg::Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background)
                    .set("fill-opacity", background.alpha()),
            );
        }

        let mut lines = svg_element::Group::new().set("class", "connectors");
        for (&child, connector) in layout.connectors() {
            lines = self
                .render_connector(frame, layout, child, connector)
                .into_iter()
                .fold(lines, |group, line| group.add(line));
        }

        let mut boxes = svg_element::Group::new().set("class", "people");
        for (&index, person_box) in layout.boxes() {
            boxes = boxes.add(self.render_person_box(frame, tree, index, person_box, labels));
        }

        let mut marriages = svg_element::Group::new().set("class", "marriages");
        for (&child, &cell) in layout.marriage_labels() {
            let label = tree
                .slot(child)
                .and_then(|slot| slot.family())
                .and_then(|family| labels.marriage_label(family));
            if let Some(label) = label {
                marriages = marriages.add(self.render_marriage_label(frame, cell, &label));
            }
        }

        let mut navigation = svg_element::Group::new().set("class", "navigation");
        if let Some(cells) = layout.navigation() {
            navigation = self
                .render_navigation(frame, cells)
                .into_iter()
                .fold(navigation, |group, arrow| group.add(arrow));
        }

        doc.add(
            svg_element::Group::new()
                .set("transform", format!("translate({MARGIN}, {MARGIN})"))
                .add(lines)
                .add(boxes)
                .add(marriages)
                .add(navigation),
        )
    }
}

impl Renderer for Svg {
    fn render(
        &mut self,
        tree: &AncestorTree,
        layout: &LayoutResult,
        direction: Direction,
        labels: &dyn LabelSource,
    ) -> Result<String, Error> {
        let document = self.render_document(tree, layout, direction, labels);
        let output = document.to_string();
        info!(bytes = output.len(); "SVG rendered");
        Ok(output)
    }
}

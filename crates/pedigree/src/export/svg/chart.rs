//! SVG rendering of pedigree chart elements.
//!
//! Lines and arrows are computed in canonical cell units and mapped point by
//! point; boxes are mapped as whole cells.

use svg::{node::Text as SvgText, node::element as svg_element};

use pedigree_core::geometry::Rectangle;

use super::{Frame, Svg};
use crate::{
    color::Color,
    export::LabelSource,
    layout::{Connector, LayoutResult, LineStyle, Navigation, NavigationCell, PersonBox},
    orientation,
    tree::{AncestorTree, father_index, mother_index},
};

const FONT_FAMILY: &str = "sans-serif";
const DASH_PATTERN: &str = "4 3";

fn centre_y(rect: Rectangle) -> f32 {
    rect.y() as f32 + rect.height() as f32 / 2.0
}

/// Which way a navigation arrow points on the canonical grid.
#[derive(Debug, Clone, Copy)]
enum Heading {
    /// Toward the descendants
    Back,
    /// Toward the ancestors
    Forward,
}

impl Svg {
    /// Maps a canonical point to pixels
    fn point(&self, frame: Frame, x: f32, y: f32) -> (f32, f32) {
        let (x, y) = orientation::place_point(x, y, frame.bounds, frame.direction);
        (x * self.cell_width, y * self.cell_height)
    }

    /// Maps a canonical cell to a pixel rectangle `(x, y, width, height)`
    fn cell(&self, frame: Frame, rect: Rectangle) -> (f32, f32, f32, f32) {
        let placed = orientation::place(rect, frame.bounds, frame.direction);
        (
            placed.x() as f32 * self.cell_width,
            placed.y() as f32 * self.cell_height,
            placed.width() as f32 * self.cell_width,
            placed.height() as f32 * self.cell_height,
        )
    }

    fn line(
        &self,
        frame: Frame,
        from: (f32, f32),
        to: (f32, f32),
        style: LineStyle,
    ) -> svg_element::Line {
        let (x1, y1) = self.point(frame, from.0, from.1);
        let (x2, y2) = self.point(frame, to.0, to.1);
        let line = svg_element::Line::new()
            .set("x1", x1)
            .set("y1", y1)
            .set("x2", x2)
            .set("y2", y2)
            .set("stroke", "black")
            .set("stroke-width", 1.5);

        match style {
            LineStyle::Solid => line,
            LineStyle::Dashed => line.set("stroke-dasharray", DASH_PATTERN),
        }
    }

    fn text(&self, x: f32, y: f32, font_size: f32, content: &str) -> svg_element::Text {
        svg_element::Text::new("")
            .set("x", x)
            .set("y", y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", font_size)
            .add(SvgText::new(content))
    }

    /// Renders the lines from the box of `child` to the boxes of its parents.
    pub(super) fn render_connector(
        &self,
        frame: Frame,
        layout: &LayoutResult,
        child: usize,
        connector: &Connector,
    ) -> Vec<svg_element::Line> {
        let parent_y = |index: usize| layout.boxes().get(&index).map(|b| centre_y(b.rect));
        let mut lines = Vec::new();

        match *connector {
            Connector::Joined {
                cell,
                father,
                mother,
            } => {
                let left = cell.x() as f32;
                let spine = left + 0.5;
                let right = cell.right() as f32;
                let middle = centre_y(cell);
                lines.push(self.line(frame, (left, middle), (spine, middle), LineStyle::Solid));

                let sides = [(father, father_index(child)), (mother, mother_index(child))];
                for (style, parent) in sides {
                    let (Some(style), Some(y)) = (style, parent_y(parent)) else {
                        continue;
                    };
                    lines.push(self.line(frame, (spine, middle), (spine, y), style));
                    lines.push(self.line(frame, (spine, y), (right, y), style));
                }
            }
            Connector::Split { father, mother } => {
                // The father line rises from the top of the child box, the
                // mother line drops from its bottom.
                let sides = [
                    (father, father_index(child), true),
                    (mother, mother_index(child), false),
                ];
                for (link, parent, above) in sides {
                    let (Some(link), Some(y)) = (link, parent_y(parent)) else {
                        continue;
                    };
                    let x = link.cell.x() as f32 + 0.5;
                    let start = if above {
                        link.cell.bottom() as f32
                    } else {
                        link.cell.y() as f32
                    };
                    let right = link.cell.right() as f32;
                    lines.push(self.line(frame, (x, start), (x, y), link.style));
                    lines.push(self.line(frame, (x, y), (right, y), link.style));
                }
            }
        }

        lines
    }

    /// Renders a person or placeholder box with its label.
    pub(super) fn render_person_box(
        &self,
        frame: Frame,
        tree: &AncestorTree,
        index: usize,
        person_box: &PersonBox,
        labels: &dyn LabelSource,
    ) -> svg_element::Group {
        let (x, y, width, height) = self.cell(frame, person_box.rect);
        let inset = 2.0;
        let mut rect = svg_element::Rectangle::new()
            .set("x", x + inset)
            .set("y", y + inset)
            .set("width", (width - 2.0 * inset).max(1.0))
            .set("height", (height - 2.0 * inset).max(1.0))
            .set("rx", 3.0)
            .set("stroke", "black");

        let group = svg_element::Group::new().set("data-slot", index.to_string());

        let Some(person) = person_box.person else {
            rect = rect
                .set("fill", "none")
                .set("stroke-opacity", 0.6)
                .set("stroke-dasharray", DASH_PATTERN);
            return group.set("class", "placeholder").add(rect);
        };

        let alive = tree.slot(index).is_none_or(|slot| slot.is_alive());
        let fill = if alive {
            Color::named(color::palette::css::WHITE)
        } else {
            Color::named(color::palette::css::LIGHT_GRAY)
        };
        rect = rect.set("fill", &fill);

        let label = labels
            .person_label(person)
            .unwrap_or_else(|| person.to_string());
        let font_size = (self.cell_height * 0.5).min(12.0);

        group
            .set("class", "person")
            .set("data-person", person.to_string())
            .add(rect)
            .add(self.text(x + width / 2.0, y + height / 2.0, font_size, &label))
    }

    /// Renders the marriage text of the parents of a child.
    pub(super) fn render_marriage_label(
        &self,
        frame: Frame,
        cell: Rectangle,
        label: &str,
    ) -> svg_element::Text {
        let (x, y, width, height) = self.cell(frame, cell);
        let font_size = (self.cell_height * 0.4).min(10.0);
        self.text(x + width / 2.0, y + height / 2.0, font_size, label)
            .set("fill", "dimgray")
    }

    /// Renders the arrows leading away from the root: back to a child, and
    /// forward to each known parent.
    pub(super) fn render_navigation(
        &self,
        frame: Frame,
        navigation: &Navigation,
    ) -> Vec<svg_element::Polygon> {
        let mut arrows = vec![
            self.arrow(frame, &navigation.child, Heading::Back)
                .set("fill", "lightgray"),
        ];

        for cell in [&navigation.father, &navigation.mother] {
            if let Some(target) = cell.target {
                arrows.push(
                    self.arrow(frame, cell, Heading::Forward)
                        .set("fill", "black")
                        .set("data-target", target.to_string()),
                );
            }
        }

        arrows
    }

    fn arrow(&self, frame: Frame, cell: &NavigationCell, heading: Heading) -> svg_element::Polygon {
        let left = cell.rect.x() as f32 + 0.25;
        let right = cell.rect.right() as f32 - 0.25;
        let middle = centre_y(cell.rect);
        let (base, tip) = match heading {
            Heading::Back => (right, left),
            Heading::Forward => (left, right),
        };

        let corners = [(base, middle - 0.4), (tip, middle), (base, middle + 0.4)];
        let points = corners
            .iter()
            .map(|&(x, y)| {
                let (x, y) = self.point(frame, x, y);
                format!("{x},{y}")
            })
            .collect::<Vec<_>>()
            .join(" ");

        svg_element::Polygon::new().set("points", points)
    }
}

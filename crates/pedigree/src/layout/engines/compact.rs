//! Compact pedigree layout engine
//!
//! Compact pedigrees use wider boxes packed tightly, with positions read from
//! a fixed table per depth. Only 2 to 5 generations have tables.

mod tables;

use log::debug;

use pedigree_core::{chart::TreeStyle, geometry::Rectangle};

use crate::{
    error::PedigreeError,
    layout::{
        Connector, LayoutOptions, LayoutResult, LineStyle, Link, PersonBox,
        engines::PedigreeEngine,
    },
    tree::{AncestorTree, father_index, mother_index},
};

/// Width of the navigation gutter left of and above the table
const GUTTER: i32 = 1;

/// Compact layout engine implementation
#[derive(Default)]
pub struct Engine {
    options: LayoutOptions,
}

impl Engine {
    /// Create a new compact layout engine
    pub fn new() -> Self {
        Self {
            options: LayoutOptions::default(),
        }
    }

    /// Set the display switches
    pub fn set_options(&mut self, options: LayoutOptions) -> &mut Self {
        self.options = options;
        self
    }
}

fn shifted(rect: Rectangle) -> Rectangle {
    rect.translate(GUTTER, GUTTER)
}

impl PedigreeEngine for Engine {
    fn calculate(&self, tree: &AncestorTree, depth: usize) -> Result<LayoutResult, PedigreeError> {
        let (Some(table), Some(bounds)) = (tables::entries(depth), tables::bounds(depth)) else {
            return Err(PedigreeError::InvalidDepth {
                style: TreeStyle::Compact,
                depth,
            });
        };
        debug!(depth, slots = table.len(); "Compact layout");

        let mut layout = LayoutResult::new(TreeStyle::Compact, depth, bounds);

        for (index, entry) in table.iter().enumerate() {
            let person = tree.slot(index).map(|slot| slot.person());
            if person.is_some() || self.options.show_unknown_placeholders {
                layout.boxes.insert(
                    index,
                    PersonBox {
                        rect: shifted(entry.person()),
                        person,
                    },
                );
            }
        }

        for (index, entry) in table.iter().enumerate() {
            let Some(slot) = tree.slot(index) else {
                continue;
            };

            if let Some((father_line, mother_line)) = entry.lines() {
                let link = |parent: usize, cell: Rectangle| {
                    layout.boxes.contains_key(&parent).then(|| Link {
                        cell: shifted(cell),
                        style: LineStyle::for_parent(tree.slot(parent)),
                    })
                };
                let father = link(father_index(index), father_line);
                let mother = link(mother_index(index), mother_line);

                if father.is_some() || mother.is_some() {
                    layout
                        .connectors
                        .insert(index, Connector::Split { father, mother });
                }
            }

            if self.options.show_marriage_labels && slot.family().is_some() {
                if let Some(label) = entry.label() {
                    layout.marriage_labels.insert(index, shifted(label));
                }
            }
        }

        Ok(layout.finish(tree))
    }
}

#[cfg(test)]
mod tests {
    use pedigree_core::{
        ancestry::{AncestryProvider, ChildRelations, Family, FamilyRef, LoopDetected, PersonRef},
        geometry::GridBounds,
    };

    use super::*;
    use crate::tree::AncestorTreeBuilder;

    /// Everyone has both parents, named after their slot.
    struct FullProvider;

    impl AncestryProvider for FullProvider {
        fn parent_family(&self, person: PersonRef) -> Option<Family> {
            let name = person.to_string();
            Some(Family::new(
                FamilyRef::new(&format!("F{name}")),
                Some(PersonRef::new(&format!("{name}f"))),
                Some(PersonRef::new(&format!("{name}m"))),
            ))
        }

        fn child_relations(&self, _family: &Family, _child: PersonRef) -> Option<ChildRelations> {
            Some(ChildRelations::default())
        }

        fn is_probably_alive(&self, _person: PersonRef) -> Result<bool, LoopDetected> {
            Ok(true)
        }
    }

    fn full_tree(depth: usize) -> AncestorTree {
        AncestorTreeBuilder::new(&FullProvider, depth)
            .unwrap()
            .build(PersonRef::new("p"))
    }

    #[test]
    fn test_bounds_per_depth() {
        let expected = [(2, 6, 10), (3, 8, 14), (4, 10, 16), (5, 12, 32)];
        for (depth, xmax, ymax) in expected {
            let layout = Engine::new().calculate(&full_tree(depth), depth).unwrap();
            assert_eq!(layout.bounds(), GridBounds::new(xmax, ymax));
        }
    }

    #[test]
    fn test_unsupported_depth_is_rejected() {
        for depth in [1, 6] {
            let result = Engine::new().calculate(&full_tree(depth), depth);
            assert!(matches!(
                result,
                Err(PedigreeError::InvalidDepth {
                    style: TreeStyle::Compact,
                    depth: d,
                }) if d == depth
            ));
        }
    }

    #[test]
    fn test_full_tree_cells_are_disjoint_and_inside() {
        for depth in 2..=5 {
            let layout = Engine::new().calculate(&full_tree(depth), depth).unwrap();
            let rects: Vec<_> = layout.rectangles().collect();

            assert_eq!(layout.boxes().len(), (1 << depth) - 1);
            assert_eq!(layout.marriage_labels().len(), ((1 << depth) - 1) / 2);
            for (i, a) in rects.iter().enumerate() {
                assert!(a.is_within(layout.bounds()), "{a:?} outside at depth {depth}");
                for b in &rects[i + 1..] {
                    assert!(!a.overlaps(b), "{a:?} overlaps {b:?} at depth {depth}");
                }
            }
        }
    }

    #[test]
    fn test_root_box_is_shifted_into_grid() {
        let layout = Engine::new().calculate(&full_tree(2), 2).unwrap();
        assert_eq!(layout.boxes()[&0].rect, Rectangle::new(1, 4, 3, 3));
        assert_eq!(
            layout.connectors()[&0],
            Connector::Split {
                father: Some(Link {
                    cell: Rectangle::new(2, 1, 1, 3),
                    style: LineStyle::Solid,
                }),
                mother: Some(Link {
                    cell: Rectangle::new(2, 7, 1, 3),
                    style: LineStyle::Solid,
                }),
            }
        );
    }

    #[test]
    fn test_placeholders_fill_every_empty_slot() {
        struct Nobody;
        impl AncestryProvider for Nobody {
            fn parent_family(&self, _person: PersonRef) -> Option<Family> {
                None
            }
            fn child_relations(&self, _: &Family, _: PersonRef) -> Option<ChildRelations> {
                None
            }
            fn is_probably_alive(&self, _person: PersonRef) -> Result<bool, LoopDetected> {
                Ok(true)
            }
        }

        let tree = AncestorTreeBuilder::new(&Nobody, 3)
            .unwrap()
            .build(PersonRef::new("p"));
        let layout = Engine::new().calculate(&tree, 3).unwrap();
        assert_eq!(layout.boxes().len(), 7);
        assert_eq!(layout.boxes().values().filter(|b| b.is_placeholder()).count(), 6);
        assert!(layout.marriage_labels().is_empty());

        let mut engine = Engine::new();
        engine.set_options(LayoutOptions {
            show_marriage_labels: true,
            show_unknown_placeholders: false,
        });
        let layout = engine.calculate(&tree, 3).unwrap();
        assert_eq!(layout.boxes().len(), 1);
        assert!(layout.connectors().is_empty());
    }
}

use super::text::pick;
use super::*;
use crate::ir::{Category, Classification};

struct Frame {
    spine_y: f32,
    spine_end: f32,
    branch_rise: f32,
}

pub(super) fn compute_fishbone_layout(
    tree: &FishboneTree,
    title: &str,
    theme: &Theme,
    config: &LayoutConfig,
) -> FishboneLayout {
    let tiers = &config.font_tiers;
    let class_count = tree.classifications.len();
    let pair_count = class_count.div_ceil(2);

    let width = config.base_width
        + pair_count.saturating_sub(2) as f32 * config.width_per_pair;
    let load = tree.max_branch_load() as f32;
    let height = config
        .min_height
        .max(config.base_height + load * config.unit_row_height);

    let head_width = tiers.head_widths[tier_index(title.chars().count(), tiers)];
    let frame = Frame {
        spine_y: height / 2.0,
        spine_end: width - config.margin - head_width,
        branch_rise: (height / 2.0 - config.margin - config.branch_label_band).max(40.0),
    };

    let mut primitives = Vec::new();

    // Spine first, head on top of it; branch lines precede their labels.
    // The ordering is a z-layering hint for renderers, nothing more.
    primitives.push(Primitive::Line {
        from: Point::new(config.margin, frame.spine_y),
        to: Point::new(frame.spine_end, frame.spine_y),
        style: LineStyle {
            color: theme.spine_color.clone(),
            width: config.spine_width,
        },
    });
    primitives.push(Primitive::Label {
        position: Point::new(frame.spine_end + head_width / 2.0, frame.spine_y),
        text: title.to_string(),
        style: LabelStyle {
            color: theme.head_text_color.clone(),
            font_size: pick(&tiers.title_sizes, title, tiers),
            bold: true,
            marker: Some(MarkerBox {
                fill: theme.head_fill.clone(),
                width: head_width,
            }),
        },
        anchor: Anchor::Middle,
    });

    for (index, classification) in tree.classifications.iter().enumerate() {
        place_classification(index, classification, theme, config, &frame, &mut primitives);
    }

    FishboneLayout {
        width,
        height,
        primitives,
    }
}

fn place_classification(
    index: usize,
    classification: &Classification,
    theme: &Theme,
    config: &LayoutConfig,
    frame: &Frame,
    primitives: &mut Vec<Primitive>,
) {
    let tiers = &config.font_tiers;
    // Even indices branch upward, odd downward; an index pair shares the
    // same x-band so branches fill in back-to-front from the head.
    let dir = if index % 2 == 0 { -1.0 } else { 1.0 };
    let pair = (index / 2) as f32;

    let anchor = Point::new(
        frame.spine_end - (pair + 1.0) * config.classification_spacing,
        frame.spine_y,
    );
    let tip = Point::new(
        anchor.x - config.branch_run,
        frame.spine_y + dir * frame.branch_rise,
    );

    primitives.push(Primitive::Line {
        from: anchor,
        to: tip,
        style: LineStyle {
            color: theme.spine_color.clone(),
            width: config.branch_width,
        },
    });
    let marker_width =
        tiers.classification_marker_widths[tier_index(classification.name.chars().count(), tiers)];
    primitives.push(Primitive::Label {
        position: Point::new(tip.x, tip.y + dir * config.classification_label_offset),
        text: classification.name.clone(),
        style: LabelStyle {
            color: theme.classification_label_color.clone(),
            font_size: pick(&tiers.classification_sizes, &classification.name, tiers),
            bold: true,
            marker: Some(MarkerBox {
                fill: theme.spine_color.clone(),
                width: marker_width,
            }),
        },
        anchor: Anchor::Middle,
    });

    let n = classification.categories.len();
    for (j, category) in classification.categories.iter().enumerate() {
        let ratio = (j + 1) as f32 / (n + 1) as f32;
        let joint = Point::new(
            anchor.x + (tip.x - anchor.x) * ratio,
            anchor.y + (tip.y - anchor.y) * ratio,
        );
        place_category(category, dir, joint, theme, config, frame, primitives);
    }
}

fn place_category(
    category: &Category,
    dir: f32,
    joint: Point,
    theme: &Theme,
    config: &LayoutConfig,
    frame: &Frame,
    primitives: &mut Vec<Primitive>,
) {
    let tiers = &config.font_tiers;
    let cat_tip = Point::new(joint.x - config.category_run, joint.y);

    primitives.push(Primitive::Line {
        from: joint,
        to: cat_tip,
        style: LineStyle {
            color: theme.spine_color.clone(),
            width: config.branch_width,
        },
    });
    // Right-aligned on top branches, left-aligned on bottom ones, so the
    // text never crosses the diagonal it hangs off.
    let anchor = if dir < 0.0 { Anchor::End } else { Anchor::Start };
    primitives.push(Primitive::Label {
        position: Point::new(cat_tip.x - 6.0, cat_tip.y - 5.0),
        text: category.name.clone(),
        style: LabelStyle {
            color: theme.category_label_color.clone(),
            font_size: pick(&tiers.category_sizes, &category.name, tiers),
            bold: true,
            marker: None,
        },
        anchor,
    });

    let m = category.causes.len();
    if m == 0 {
        return;
    }
    // Symmetric stack centered on the category line. The per-item gap
    // shrinks once the stack would overflow its share of the branch rise.
    let budget = frame.branch_rise * config.cause_budget_fraction;
    let spacing = config.cause_spacing_max.min(budget / m as f32);

    for (k, cause) in category.causes.iter().enumerate() {
        let offset = (k as f32 - (m as f32 - 1.0) / 2.0) * spacing;
        let from = Point::new(cat_tip.x, cat_tip.y + offset);
        let to = Point::new(
            cat_tip.x - config.cause_run,
            cat_tip.y + offset + dir * config.cause_droop,
        );
        primitives.push(Primitive::Connector {
            from,
            to,
            style: LineStyle {
                color: theme.spine_color.clone(),
                width: config.connector_width,
            },
        });
        let label_pos = Point::new(to.x - 8.0, to.y);
        primitives.push(Primitive::Label {
            position: label_pos,
            text: cause.name.clone(),
            style: LabelStyle {
                color: theme.cause_label_color.clone(),
                font_size: pick(&tiers.cause_sizes, &cause.name, tiers),
                bold: false,
                marker: None,
            },
            anchor: Anchor::End,
        });

        // Sub-causes cascade away from the spine, under their cause.
        for (idx, sub) in cause.sub_causes.iter().enumerate() {
            primitives.push(Primitive::Label {
                position: Point::new(
                    label_pos.x,
                    label_pos.y + dir * (idx + 1) as f32 * config.subcause_spacing,
                ),
                text: format!("{}{}", config.subcause_glyph, sub),
                style: LabelStyle {
                    color: theme.subcause_label_color.clone(),
                    font_size: pick(&tiers.subcause_sizes, sub, tiers),
                    bold: false,
                    marker: None,
                },
                anchor: Anchor::End,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FishboneTree;

    fn layout(tree: &FishboneTree, title: &str) -> FishboneLayout {
        compute_layout(tree, title, &Theme::classic(), &LayoutConfig::default())
    }

    fn branch_lines(layout: &FishboneLayout) -> Vec<(Point, Point)> {
        let branch_width = LayoutConfig::default().branch_width;
        layout
            .primitives
            .iter()
            .filter_map(|p| match p {
                // Diagonal lines at branch width; category runs are
                // horizontal and the spine uses its own width.
                Primitive::Line { from, to, style }
                    if style.width == branch_width && from.y != to.y =>
                {
                    Some((*from, *to))
                }
                _ => None,
            })
            .collect()
    }

    fn labels<'a>(layout: &'a FishboneLayout) -> Vec<(&'a str, Point)> {
        layout
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Label { text, position, .. } => Some((text.as_str(), *position)),
                _ => None,
            })
            .collect()
    }

    fn wide_tree(classifications: usize) -> FishboneTree {
        let mut tree = FishboneTree::new();
        for i in 0..classifications {
            tree.insert_row(&format!("Class {i}"), "Cat", "Cause", None);
        }
        tree
    }

    #[test]
    fn empty_tree_yields_spine_and_head_only() {
        let result = layout(&FishboneTree::new(), "Problem");
        assert_eq!(result.primitives.len(), 2);
        assert!(matches!(result.primitives[0], Primitive::Line { .. }));
        match &result.primitives[1] {
            Primitive::Label { text, style, .. } => {
                assert_eq!(text, "Problem");
                assert!(style.marker.is_some());
            }
            other => panic!("expected head label, got {other:?}"),
        }
    }

    #[test]
    fn one_branch_per_classification() {
        for count in [1, 2, 3, 6, 9] {
            let result = layout(&wide_tree(count), "t");
            assert_eq!(branch_lines(&result).len(), count, "count {count}");
        }
    }

    #[test]
    fn alternation_is_index_mod_two() {
        let result = layout(&wide_tree(5), "t");
        let spine_y = result.height / 2.0;
        for (i, (_, tip)) in branch_lines(&result).iter().enumerate() {
            if i % 2 == 0 {
                assert!(tip.y < spine_y, "branch {i} should rise above the spine");
            } else {
                assert!(tip.y > spine_y, "branch {i} should drop below the spine");
            }
        }
    }

    #[test]
    fn index_pairs_share_an_x_band() {
        let result = layout(&wide_tree(4), "t");
        let lines = branch_lines(&result);
        assert_eq!(lines[0].0.x, lines[1].0.x);
        assert_eq!(lines[2].0.x, lines[3].0.x);
        assert!(lines[2].0.x < lines[0].0.x, "later pairs sit further from the head");
    }

    #[test]
    fn category_ratios_are_evenly_interpolated() {
        let mut tree = FishboneTree::new();
        for j in 0..3 {
            tree.insert_row("Class", &format!("Cat {j}"), "Cause", None);
        }
        let result = layout(&tree, "t");
        let (anchor, tip) = branch_lines(&result)[0];
        let cat_labels: Vec<Point> = labels(&result)
            .into_iter()
            .filter(|(text, _)| text.starts_with("Cat "))
            .map(|(_, p)| p)
            .collect();
        assert_eq!(cat_labels.len(), 3);
        let config = LayoutConfig::default();
        let mut previous = 0.0;
        for (j, pos) in cat_labels.iter().enumerate() {
            let expected = (j + 1) as f32 / 4.0;
            let joint_x = pos.x + config.category_run + 6.0;
            let ratio = (joint_x - anchor.x) / (tip.x - anchor.x);
            assert!((ratio - expected).abs() < 1e-4, "ratio {ratio} vs {expected}");
            assert!(ratio > previous && ratio < 1.0);
            previous = ratio;
        }
    }

    #[test]
    fn cause_offsets_center_on_the_category_line() {
        let mut tree = FishboneTree::new();
        for k in 0..4 {
            tree.insert_row("Class", "Cat", &format!("Cause {k}"), None);
        }
        let result = layout(&tree, "t");
        let ys: Vec<f32> = result
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Connector { from, .. } => Some(from.y),
                _ => None,
            })
            .collect();
        assert_eq!(ys.len(), 4);
        let center = ys.iter().sum::<f32>() / ys.len() as f32;
        let branch_width = LayoutConfig::default().branch_width;
        let category_y = result
            .primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Line { from, to, style }
                    if style.width == branch_width && from.y == to.y =>
                {
                    Some(to.y)
                }
                _ => None,
            })
            .expect("category line missing");
        // Signed offsets sum to zero, so the mean attachment y equals the
        // category line y.
        assert!((center - category_y).abs() < 1e-3);
        let gaps: Vec<f32> = ys.windows(2).map(|w| w[1] - w[0]).collect();
        for gap in &gaps {
            assert!((gap - gaps[0]).abs() < 1e-4, "uneven cause spacing");
        }
    }

    #[test]
    fn dense_cause_stack_stays_within_budget() {
        let mut tree = FishboneTree::new();
        for k in 0..25 {
            tree.insert_row("Class", "Cat", &format!("Cause {k}"), None);
        }
        let result = layout(&tree, "t");
        let config = LayoutConfig::default();
        let ys: Vec<f32> = result
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Connector { from, .. } => Some(from.y),
                _ => None,
            })
            .collect();
        let extent = ys.iter().fold(f32::MIN, |a, b| a.max(*b))
            - ys.iter().fold(f32::MAX, |a, b| a.min(*b));
        let branch_rise = result.height / 2.0 - config.margin - config.branch_label_band;
        assert!(extent <= branch_rise * config.cause_budget_fraction + 1e-3);
    }

    #[test]
    fn sub_causes_cascade_away_from_the_spine() {
        let mut tree = FishboneTree::new();
        tree.insert_row("Equipment", "Hardware", "Faulty card", Some("Vendor X"));
        tree.insert_row("Equipment", "Hardware", "Faulty card", Some("Vendor Y"));
        let result = layout(&tree, "Outages");

        assert_eq!(branch_lines(&result).len(), 1);
        let all = labels(&result);
        let cause = all.iter().find(|(t, _)| *t == "Faulty card").unwrap().1;
        let glyph = LayoutConfig::default().subcause_glyph;
        let subs: Vec<Point> = all
            .iter()
            .filter(|(t, _)| t.starts_with(glyph.as_str()))
            .map(|(_, p)| *p)
            .collect();
        assert_eq!(subs.len(), 2);
        // Top branch: sub-causes stack strictly upward, at increasing
        // distance from the cause point.
        assert!(subs[0].y < cause.y);
        assert!(subs[1].y < subs[0].y);
        assert_eq!(subs[0].x, cause.x);
    }

    #[test]
    fn single_cause_sits_on_the_category_line() {
        let mut tree = FishboneTree::new();
        tree.insert_row("Equipment", "Hardware", "Faulty card", None);
        let result = layout(&tree, "Outages");
        let connector_y = result
            .primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Connector { from, .. } => Some(from.y),
                _ => None,
            })
            .unwrap();
        // m = 1 means offset 0: the attachment point is the category y.
        let (anchor, tip) = branch_lines(&result)[0];
        let expected = anchor.y + (tip.y - anchor.y) * 0.5;
        assert!((connector_y - expected).abs() < 1e-3);
    }

    #[test]
    fn layout_is_idempotent() {
        let mut tree = FishboneTree::new();
        tree.insert_row("Equipment", "Hardware", "Faulty card", Some("Vendor X"));
        tree.insert_row("Process", "Change mgmt", "No rollback", None);
        let a = layout(&tree, "Outages");
        let b = layout(&tree, "Outages");
        assert_eq!(a, b);
    }

    #[test]
    fn canvas_height_grows_monotonically_with_load() {
        let mut heights = Vec::new();
        for load in [0, 1, 5, 10, 20, 40] {
            let mut tree = FishboneTree::new();
            for k in 0..load {
                tree.insert_row("Class", "Cat", &format!("Cause {k}"), None);
            }
            heights.push(layout(&tree, "t").height);
        }
        for pair in heights.windows(2) {
            assert!(pair[1] >= pair[0], "height shrank: {heights:?}");
        }
    }

    #[test]
    fn canvas_width_grows_with_classification_pairs() {
        let w2 = layout(&wide_tree(4), "t").width;
        let w4 = layout(&wide_tree(8), "t").width;
        assert!(w4 > w2);
        // Growth keeps branch anchors on the spine.
        let result = layout(&wide_tree(8), "t");
        let config = LayoutConfig::default();
        for (anchor, _) in branch_lines(&result) {
            assert!(anchor.x >= config.margin);
        }
    }

    #[test]
    fn head_box_width_follows_title_tier() {
        let tiers = crate::config::FontTiers::default();
        let short = layout(&FishboneTree::new(), "Short");
        let long = layout(
            &FishboneTree::new(),
            "A title comfortably past the medium threshold",
        );
        let head_width = |l: &FishboneLayout| match &l.primitives[1] {
            Primitive::Label { style, .. } => style.marker.as_ref().unwrap().width,
            _ => unreachable!(),
        };
        assert_eq!(head_width(&short), tiers.head_widths[0]);
        assert_eq!(head_width(&long), tiers.head_widths[2]);
    }

    #[test]
    fn empty_title_still_draws_the_head() {
        let result = layout(&FishboneTree::new(), "");
        assert_eq!(result.primitives.len(), 2);
    }

    #[test]
    fn classification_without_categories_draws_bare_branch() {
        let mut tree = FishboneTree::new();
        tree.ensure_classification("Lonely");
        let result = layout(&tree, "t");
        // Spine, head, branch line, branch label. Nothing below the node.
        assert_eq!(result.primitives.len(), 4);
    }
}

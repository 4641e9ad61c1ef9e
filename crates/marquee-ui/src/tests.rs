#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use marquee_core::*;

    use crate::Text;
    use crate::adapter::{CompositionalList, flexible_list};
    use crate::container::{DiffListView, HeaderFooterBuilder, HostContext, Inner};
    use crate::host::{ContentHost, HostState};
    use crate::layout::{ListLayout, SectionLayout};
    use crate::slot::{Slot, SlotKind};

    fn rows_layout() -> ListLayout {
        ListLayout::uniform(SectionLayout::rows(100.0))
    }

    fn dangling_context() -> Weak<dyn HostContext> {
        let weak: Weak<RefCell<Inner<&'static str, u32>>> = Weak::new();
        weak
    }

    fn text_kind(view: &View) -> Option<&str> {
        match &view.kind {
            ViewKind::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_host_bind_replaces_previous_content() {
        let mut host = ContentHost::new();
        assert_eq!(host.state(), HostState::Idle);

        host.bind(Text("C1"));
        assert_eq!(host.state(), HostState::Bound);
        assert_eq!(host.content().and_then(text_kind), Some("C1"));

        // no intervening recycle: exactly one active content afterwards
        host.bind(Text("C2"));
        assert_eq!(host.state(), HostState::Bound);
        assert_eq!(host.content().and_then(text_kind), Some("C2"));
        assert_eq!(host.mounted().map(|w| w.children.len()), Some(1));

        host.detach();
        assert_eq!(host.state(), HostState::Idle);
        assert!(host.content().is_none());
    }

    #[test]
    fn test_recycling_idle_slot_is_noop() {
        let mut slot = Slot::new(SlotKind::Cell, dangling_context());
        slot.recycle();
        slot.recycle();
        assert_eq!(slot.generation(), 0);
        assert!(!slot.is_bound());
        assert_eq!(slot.position(), None);
    }

    #[test]
    fn test_slot_recycle_after_bind() {
        let mut slot = Slot::new(SlotKind::Cell, dangling_context());
        slot.bind_content(
            Text("row"),
            ListPosition::new(0, 0),
            Rect {
                x: 0.0,
                y: 0.0,
                w: 100.0,
                h: 40.0,
            },
        );
        assert!(slot.is_bound());
        assert_eq!(slot.generation(), 1);

        slot.recycle();
        assert!(!slot.is_bound());
        assert_eq!(slot.position(), None);
        assert_eq!(slot.frame(), Rect::default());
    }

    #[test]
    fn test_end_to_end_apply_and_minimal_removal() {
        let calls: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let probe = calls.clone();

        let list: DiffListView<&'static str, &'static str> = DiffListView::new();
        list.configure(
            rows_layout(),
            Rc::new(move |item: &&str, _position| {
                probe.borrow_mut().push((*item).to_string());
                Text(*item)
            }),
            None,
        );

        list.apply(vec![
            ("Main", vec!["m1", "m2", "m3"]),
            ("More", vec!["m4", "m5"]),
        ]);
        assert_eq!(list.displayed_snapshot().section_count(), 2);
        assert_eq!(list.displayed_snapshot().item_count(), 5);
        assert_eq!(list.bound_positions().len(), 5);
        assert_eq!(list.builder_invocations(), 5);

        // idempotent: unchanged input produces no slot traffic
        list.apply(vec![
            ("Main", vec!["m1", "m2", "m3"]),
            ("More", vec!["m4", "m5"]),
        ]);
        assert_eq!(list.builder_invocations(), 5);
        assert_eq!(list.recycled_count(), 0);

        // removing m2 rebuilds nothing and recycles exactly one slot
        list.apply(vec![("Main", vec!["m1", "m3"]), ("More", vec!["m4", "m5"])]);
        assert_eq!(
            list.displayed_snapshot().items_of(&"Main"),
            Some(["m1", "m3"].as_slice())
        );
        assert_eq!(
            list.displayed_snapshot().items_of(&"More"),
            Some(["m4", "m5"].as_slice())
        );
        assert_eq!(list.builder_invocations(), 5);
        assert_eq!(list.recycled_count(), 1);
        assert_eq!(
            list.bound_positions(),
            vec![
                ListPosition::new(0, 0),
                ListPosition::new(0, 1),
                ListPosition::new(1, 0),
                ListPosition::new(1, 1),
            ]
        );
        assert_eq!(*calls.borrow(), vec!["m1", "m2", "m3", "m4", "m5"]);
    }

    #[test]
    fn test_emptied_section_leaves_zero_sections() {
        let list: DiffListView<&'static str, u32> = DiffListView::new();
        list.configure(rows_layout(), Rc::new(|n: &u32, _| Text(format!("{n}"))), None);

        list.apply(vec![("A", vec![1, 2])]);
        assert_eq!(list.bound_positions().len(), 2);

        list.apply(vec![("A", vec![])]);
        assert_eq!(list.displayed_snapshot().section_count(), 0);
        assert!(list.bound_positions().is_empty());
        assert_eq!(list.recycled_count(), 2);
    }

    #[test]
    fn test_builder_panic_is_isolated_to_its_slot() {
        let errors: Rc<RefCell<Vec<BuildError>>> = Rc::new(RefCell::new(Vec::new()));
        let probe = errors.clone();

        let list: DiffListView<&'static str, &'static str> = DiffListView::new();
        list.configure(
            rows_layout(),
            Rc::new(|item: &&str, _| {
                if *item == "m3" {
                    panic!("no artwork for m3");
                }
                Text(*item)
            }),
            None,
        );
        list.on_build_error(move |error| probe.borrow_mut().push(error.clone()));

        list.apply(vec![("Main", vec!["m1", "m2", "m3"])]);

        // siblings unaffected, failing slot renders placeholder
        assert_eq!(list.bound_positions().len(), 3);
        let ok = list.mounted_content(ListPosition::new(0, 0)).unwrap();
        assert_eq!(text_kind(&ok), Some("m1"));
        let failed = list.mounted_content(ListPosition::new(0, 2)).unwrap();
        assert!(matches!(failed.kind, ViewKind::Box));

        let errors = errors.borrow();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].target.contains("m3"));
        assert_eq!(errors[0].row, 2);
        assert!(errors[0].message.contains("no artwork"));
    }

    #[test]
    #[should_panic(expected = "before configure")]
    fn test_apply_before_configure_is_fatal() {
        let list: DiffListView<&'static str, u32> = DiffListView::new();
        list.apply(vec![("A", vec![1])]);
    }

    #[test]
    #[should_panic(expected = "duplicate item identifier")]
    fn test_duplicate_identifiers_are_fatal() {
        let list: DiffListView<&'static str, u32> = DiffListView::new();
        list.configure(rows_layout(), Rc::new(|n: &u32, _| Text(format!("{n}"))), None);
        list.apply(vec![("A", vec![1, 2]), ("B", vec![2])]);
    }

    #[test]
    fn test_selection_forwards_item_and_position() {
        let selected: Rc<RefCell<Vec<(String, ListPosition)>>> = Rc::new(RefCell::new(Vec::new()));
        let probe = selected.clone();

        let list: DiffListView<&'static str, &'static str> = DiffListView::new();
        list.configure(rows_layout(), Rc::new(|item: &&str, _| Text(*item)), None);
        list.on_select(move |item, position| {
            probe.borrow_mut().push(((*item).to_string(), position));
        });
        list.apply(vec![("Main", vec!["m1"]), ("More", vec!["m4", "m5"])]);

        list.select_at(ListPosition::new(1, 0));
        assert_eq!(
            *selected.borrow(),
            vec![("m4".to_string(), ListPosition::new(1, 0))]
        );

        // out of range: dropped
        list.select_at(ListPosition::new(5, 0));
        assert_eq!(selected.borrow().len(), 1);
    }

    #[test]
    fn test_selection_without_observer_is_dropped() {
        let list: DiffListView<&'static str, u32> = DiffListView::new();
        list.select_at(ListPosition::new(0, 0));
    }

    #[test]
    fn test_tap_target_reports_current_position_after_moves() {
        let selected: Rc<RefCell<Vec<(String, ListPosition)>>> = Rc::new(RefCell::new(Vec::new()));
        let probe = selected.clone();

        let list: DiffListView<&'static str, &'static str> = DiffListView::new();
        list.configure(rows_layout(), Rc::new(|item: &&str, _| Text(*item)), None);
        list.on_select(move |item, position| {
            probe.borrow_mut().push(((*item).to_string(), position));
        });

        list.apply(vec![("Main", vec!["a", "b"])]);
        list.apply(vec![("Main", vec!["b"])]);

        // the surviving slot's tap target follows the row to its new position
        let content = list.mounted_content(ListPosition::new(0, 0)).unwrap();
        let tap = content.modifier.on_click.clone().unwrap();
        tap();
        assert_eq!(
            *selected.borrow(),
            vec![("b".to_string(), ListPosition::new(0, 0))]
        );
    }

    #[test]
    fn test_section_hop_reloads_under_section_scoped_identity() {
        let calls = Rc::new(RefCell::new(0u32));
        let probe = calls.clone();

        let list: DiffListView<&'static str, &'static str> = DiffListView::new();
        list.configure(
            rows_layout(),
            Rc::new(move |item: &&str, _| {
                *probe.borrow_mut() += 1;
                Text(*item)
            }),
            None,
        );
        list.apply(vec![("a", vec!["x", "y"]), ("b", vec!["z"])]);
        assert_eq!(*calls.borrow(), 3);

        // y hops a -> b: delete + insert, so its content is rebuilt
        list.apply(vec![("a", vec!["x"]), ("b", vec!["z", "y"])]);
        assert_eq!(*calls.borrow(), 4);
        assert_eq!(list.recycled_count(), 1);
    }

    #[test]
    fn test_section_hop_keeps_content_under_stable_identity() {
        let calls = Rc::new(RefCell::new(0u32));
        let probe = calls.clone();

        let list: DiffListView<&'static str, &'static str> = DiffListView::new();
        list.configure(
            rows_layout(),
            Rc::new(move |item: &&str, _| {
                *probe.borrow_mut() += 1;
                Text(*item)
            }),
            None,
        );
        list.set_move_policy(MovePolicy::StableIdentity);
        list.apply(vec![("a", vec!["x", "y"]), ("b", vec!["z"])]);
        list.apply(vec![("a", vec!["x"]), ("b", vec!["z", "y"])]);

        // the tracked move keeps the slot and its content
        assert_eq!(*calls.borrow(), 3);
        assert_eq!(list.recycled_count(), 0);
        let content = list.mounted_content(ListPosition::new(1, 1)).unwrap();
        assert_eq!(text_kind(&content), Some("y"));
    }

    #[test]
    fn test_header_builder_none_shows_no_supplementary() {
        let layout = ListLayout::per_section(|section| {
            if section == 0 {
                SectionLayout::rows(100.0)
            } else {
                SectionLayout::rows(100.0).with_header(40.0)
            }
        });
        let header: HeaderFooterBuilder<&'static str> =
            Rc::new(|section: &&str, kind, _position| {
                (*section == "More" && kind == SlotKind::Header).then(|| Text("More"))
            });

        let list: DiffListView<&'static str, &'static str> = DiffListView::new();
        list.configure(layout, Rc::new(|item: &&str, _| Text(*item)), Some(header));
        list.apply(vec![
            ("Main", vec!["m1"]),
            ("More", vec!["m2"]),
            ("Extra", vec!["m3"]),
        ]);

        // Extra has a header extent too, but its builder declines
        assert_eq!(list.supplementary_count(), 1);
    }

    #[test]
    fn test_scrolling_recycles_offscreen_slots() {
        let list: DiffListView<&'static str, u32> = DiffListView::new();
        list.configure(rows_layout(), Rc::new(|n: &u32, _| Text(format!("{n}"))), None);
        list.apply(vec![("all", (0..100).collect())]);

        // default viewport is 1280x800: 8 rows plus 2 of buffer
        assert_eq!(list.bound_positions().len(), 10);
        assert_eq!(list.builder_invocations(), 10);

        list.set_scroll_offset(5000.0);
        let bound = list.bound_positions();
        assert_eq!(bound.first(), Some(&ListPosition::new(0, 48)));
        assert_eq!(bound.len(), 12);
        assert_eq!(list.recycled_count(), 10);
        assert_eq!(list.builder_invocations(), 22);
        // the pool reuses recycled slots instead of growing
        assert_eq!(list.live_slot_count(), 12);
    }

    #[test]
    fn test_scroll_offset_is_clamped_to_content() {
        let list: DiffListView<&'static str, u32> = DiffListView::new();
        list.configure(rows_layout(), Rc::new(|n: &u32, _| Text(format!("{n}"))), None);
        list.apply(vec![("all", (0..20).collect())]);

        list.set_scroll_offset(1e9);
        // 20 rows of 100 against an 800 viewport
        assert_eq!(list.scroll_offset(), 1200.0);

        list.set_scroll_offset(-50.0);
        assert_eq!(list.scroll_offset(), 0.0);
    }

    #[test]
    fn test_adapter_reapplies_on_signal_change_and_detaches_on_drop() {
        let calls = Rc::new(RefCell::new(0u32));
        let probe = calls.clone();

        let sections: Signal<Vec<(&'static str, Vec<u32>)>> = signal(vec![("main", vec![1, 2])]);
        let bound = CompositionalList::new(move |n: &u32, _| {
            *probe.borrow_mut() += 1;
            Text(format!("{n}"))
        })
        .layout(rows_layout())
        .bind(&sections);

        assert_eq!(bound.list().displayed_snapshot().item_count(), 2);
        assert_eq!(*calls.borrow(), 2);

        sections.update(|v| v[0].1.push(3));
        assert_eq!(bound.list().displayed_snapshot().item_count(), 3);
        assert_eq!(*calls.borrow(), 3);

        drop(bound);
        sections.update(|v| v[0].1.push(4));
        assert_eq!(*calls.borrow(), 3);
    }

    #[test]
    #[should_panic(expected = "before configure")]
    fn test_adapter_without_layout_is_fatal() {
        let sections: Signal<Vec<(&'static str, Vec<u32>)>> = signal(vec![]);
        let _ = CompositionalList::new(|n: &u32, _| Text(format!("{n}"))).bind(&sections);
    }

    #[test]
    fn test_flexible_list_single_shot() {
        let list = flexible_list(
            vec![("only", vec![1u32, 2, 3])],
            rows_layout(),
            |n: &u32, _| Text(format!("row {n}")),
        );
        assert_eq!(list.displayed_snapshot().section_count(), 1);
        assert_eq!(list.bound_positions().len(), 3);
        assert_eq!(list.supplementary_count(), 0);
    }

    #[test]
    fn test_compositional_layout_frames() {
        let layout = ListLayout::per_section(|section| {
            if section == 0 {
                SectionLayout::paged_full_bleed(420.0)
            } else {
                SectionLayout::horizontal_strip(140.0, 200.0).with_header(40.0)
            }
        });
        let viewport = Size {
            width: 1280.0,
            height: 800.0,
        };
        let counts = [5usize, 10];

        assert_eq!(layout.content_height(&counts), 420.0 + 40.0 + 200.0);

        // pages span the viewport width
        let page = layout.item_frame(&counts, viewport, ListPosition::new(0, 2));
        assert_eq!((page.x, page.y, page.w, page.h), (2560.0, 0.0, 1280.0, 420.0));

        // strip items stack on x below the hero and its header
        let tile = layout.item_frame(&counts, viewport, ListPosition::new(1, 3));
        assert_eq!((tile.x, tile.y, tile.w, tile.h), (420.0, 460.0, 140.0, 200.0));

        let header = layout.header_frame(&counts, viewport, 1).unwrap();
        assert_eq!((header.y, header.h), (420.0, 40.0));
        assert!(layout.header_frame(&counts, viewport, 0).is_none());
    }

    #[test]
    fn test_visible_rows_window() {
        let layout = ListLayout::uniform(SectionLayout::rows(100.0));
        let viewport = Size {
            width: 1280.0,
            height: 800.0,
        };
        let rows = layout.visible_rows(&[100], viewport, 5000.0, 2);
        assert_eq!(rows.first(), Some(&ListPosition::new(0, 48)));
        assert_eq!(rows.last(), Some(&ListPosition::new(0, 59)));
        assert_eq!(rows.len(), 12);
    }

    #[test]
    fn test_render_places_visible_slots() {
        let list: DiffListView<&'static str, u32> = DiffListView::new();
        list.configure(rows_layout(), Rc::new(|n: &u32, _| Text(format!("{n}"))), None);
        list.apply(vec![("all", vec![1, 2, 3])]);

        let root = list.render();
        assert!(matches!(root.kind, ViewKind::Stack));
        // extent ghost + one wrapper per bound slot
        assert_eq!(root.children.len(), 4);
        let ghost = &root.children[0];
        assert_eq!(ghost.modifier.size.map(|s| s.height), Some(300.0));
        let second = &root.children[2];
        assert_eq!(second.modifier.offset.map(|o| o.y), Some(100.0));
    }
}

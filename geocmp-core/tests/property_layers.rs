mod common;

use common::{points, RecordingSurface};
use geocmp_core::{LayerSetController, LayerState, ViewerConfig};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Add { n: u8 },
    Remove { idx: u16 },
    RemoveUnknown { id: u32 },
    SetEnabled { idx: u16, enabled: bool },
    SwitchTo { idx: u16 },
    Cycle,
    Hotkey { digit: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4).prop_map(|n| Op::Add { n }),
        any::<u16>().prop_map(|idx| Op::Remove { idx }),
        (1000u32..2000).prop_map(|id| Op::RemoveUnknown { id }),
        (any::<u16>(), any::<bool>()).prop_map(|(idx, enabled)| Op::SetEnabled { idx, enabled }),
        any::<u16>().prop_map(|idx| Op::SwitchTo { idx }),
        Just(Op::Cycle),
        (0u8..10).prop_map(|digit| Op::Hotkey { digit }),
    ]
}

// Picks an id among all records ever created, tombstones included.
fn pick(ctl: &LayerSetController<RecordingSurface>, idx: u16) -> Option<u32> {
    let n = ctl.record_count();
    if n == 0 {
        return None;
    }
    Some((idx as usize % n) as u32 + 1)
}

fn apply(ctl: &mut LayerSetController<RecordingSurface>, op: Op) {
    match op {
        Op::Add { n } => {
            let _ = ctl.add_layer(points(n as usize), "layer", "prop");
        }
        Op::Remove { idx } => {
            if let Some(id) = pick(ctl, idx) {
                ctl.remove_layer(id);
            }
        }
        Op::RemoveUnknown { id } => {
            let before = ctl.active();
            assert!(!ctl.remove_layer(id));
            assert_eq!(ctl.active(), before);
        }
        Op::SetEnabled { idx, enabled } => {
            if let Some(id) = pick(ctl, idx) {
                ctl.set_enabled(id, enabled);
            }
        }
        Op::SwitchTo { idx } => {
            if let Some(id) = pick(ctl, idx) {
                ctl.switch_to(id);
            }
        }
        Op::Cycle => {
            ctl.cycle_next();
        }
        Op::Hotkey { digit } => {
            ctl.handle_key(&digit.to_string());
        }
    }
}

fn check_invariants(ctl: &LayerSetController<RecordingSurface>) {
    if let Some(active) = ctl.active() {
        assert!(ctl.is_enabled(active), "active {} not enabled", active);
        let rec = ctl.record(active).unwrap();
        assert_eq!(rec.state, LayerState::Live);
        assert!(rec.has_overlay());
        assert_eq!(ctl.surface().shown.iter().copied().collect::<Vec<_>>(), vec![active]);
    } else {
        assert!(ctl.surface().shown.is_empty());
    }
    for id in ctl.enabled() {
        assert_eq!(ctl.record(id).unwrap().state, LayerState::Live);
    }
    for id in ctl.order() {
        assert_ne!(ctl.record(*id).unwrap().state, LayerState::Removed);
    }
    let listed = ctl.records().filter(|r| r.state != LayerState::Removed).count();
    assert_eq!(listed, ctl.order().len());
    // Ids are dense and ascending: never reused
    for (i, r) in ctl.records().enumerate() {
        assert_eq!(r.id as usize, i + 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn controller_invariants_hold(ops in proptest::collection::vec(op_strategy(), 1..80)) {
        let mut ctl = LayerSetController::new(RecordingSurface::default(), ViewerConfig::default()).unwrap();
        for op in ops {
            apply(&mut ctl, op);
            check_invariants(&ctl);
        }
    }

    #[test]
    fn removing_active_selects_lowest_enabled(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let mut ctl = LayerSetController::new(RecordingSurface::default(), ViewerConfig::default()).unwrap();
        for op in ops {
            apply(&mut ctl, op);
        }
        if let Some(active) = ctl.active() {
            ctl.remove_layer(active);
            let lowest = ctl.enabled().next();
            prop_assert_eq!(ctl.active(), lowest);
        }
    }

    #[test]
    fn full_cycle_returns_to_start(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let mut ctl = LayerSetController::new(RecordingSurface::default(), ViewerConfig::default()).unwrap();
        for op in ops {
            apply(&mut ctl, op);
        }
        let start = ctl.active();
        let k = ctl.enabled().count();
        for _ in 0..k {
            ctl.cycle_next();
        }
        prop_assert_eq!(ctl.active(), start);
    }
}

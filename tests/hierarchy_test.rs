use approx::assert_relative_eq;
use nalgebra::Point3;
use spaceframe::{Axis, Frame, HierarchyError};

/// Unproject a local point through the whole ancestor chain into global
/// coordinates.
fn global_point(frame: &Frame, p: Point3<f64>) -> Point3<f64> {
    let mut p = frame.unproject_point(p);
    let mut cursor = frame.parent();
    while let Some(node) = cursor {
        p = node.unproject_point(p);
        cursor = node.parent();
    }
    p
}

#[test]
fn root_depth_is_zero() {
    let root = Frame::new();
    assert_eq!(root.depth().unwrap(), 0);
}

#[test]
fn child_depth_is_parent_plus_one() {
    let root = Frame::new();
    let a = Frame::with_parent(&root);
    let b = Frame::with_parent(&a);
    assert_eq!(a.depth().unwrap(), 1);
    assert_eq!(b.depth().unwrap(), 2);
}

#[test]
fn recompute_depths_refreshes_the_whole_chain() {
    let root = Frame::new();
    let a = Frame::with_parent(&root);
    let b = Frame::with_parent(&a);
    // Reparenting a to global leaves b's cache stale on purpose.
    a.reparent(None).unwrap();
    assert_eq!(b.cached_depth(), 2);
    assert_eq!(b.recompute_depths().unwrap(), 1);
    assert_eq!(b.cached_depth(), 1);
}

#[test]
fn reparent_preserves_absolute_placement() {
    let root = Frame::new();
    let a = Frame::with_parent(&root);
    a.translate((1.0, 2.0, 0.0)).rotate_about_parent_axis(0.1, Axis::Z);
    let b = Frame::with_parent(&a);
    b.translate((0.0, 3.0, 1.0)).rotate_about_parent_axis(0.2, Axis::X);
    let c = Frame::with_parent(&root);
    c.translate((-2.0, 0.0, 5.0)).rotate_about_parent_axis(0.3, Axis::Y);

    let p = Point3::new(1.0, 2.0, 3.0);
    let before = global_point(&b, p);

    b.reparent(Some(&c)).unwrap();

    assert!(b.parent().unwrap().is_same(&c));
    assert_eq!(b.cached_depth(), 2);
    let after = global_point(&b, p);
    assert_relative_eq!(after, before, epsilon = 1e-10);
}

#[test]
fn reparent_between_same_depth_branches() {
    let root = Frame::new();
    let a = Frame::with_parent(&root);
    a.translate((1.0, 0.0, 0.0));
    let a2 = Frame::with_parent(&a);
    a2.translate((0.0, 1.0, 0.0)).rotate_about_parent_axis(0.05, Axis::Z);
    let b = Frame::with_parent(&root);
    b.translate((0.0, 0.0, 4.0)).rotate_about_parent_axis(0.35, Axis::Y);
    let b2 = Frame::with_parent(&b);
    b2.translate((2.0, 2.0, 2.0));

    let p = Point3::new(-1.0, 0.5, 2.0);
    let before = global_point(&a2, p);

    a2.reparent(Some(&b2)).unwrap();

    assert!(a2.parent().unwrap().is_same(&b2));
    assert_eq!(a2.cached_depth(), 3);
    assert_relative_eq!(global_point(&a2, p), before, epsilon = 1e-10);
}

#[test]
fn reparent_to_global_detaches_the_frame() {
    let root = Frame::new();
    root.translate((5.0, 0.0, 0.0));
    let a = Frame::with_parent(&root);
    a.translate((0.0, 3.0, 0.0)).rotate_about_parent_axis(0.25, Axis::Z);

    let p = Point3::new(1.0, 1.0, 1.0);
    let before = global_point(&a, p);

    a.reparent(None).unwrap();

    assert!(a.parent().is_none());
    assert_eq!(a.cached_depth(), 0);
    assert_relative_eq!(a.unproject_point(p), before, epsilon = 1e-10);
}

#[test]
fn reparent_attaches_a_root_frame() {
    let island = Frame::new();
    island.translate((7.0, -1.0, 0.0)).rotate_about_parent_axis(0.125, Axis::Z);
    let anchor = Frame::new();
    anchor.translate((1.0, 1.0, 1.0));
    let mount = Frame::with_parent(&anchor);
    mount.rotate_about_parent_axis(0.25, Axis::Y);

    let p = Point3::new(0.5, 0.5, 0.5);
    let before = global_point(&island, p);

    island.reparent(Some(&mount)).unwrap();

    assert!(island.parent().unwrap().is_same(&mount));
    assert_eq!(island.cached_depth(), 2);
    assert_relative_eq!(global_point(&island, p), before, epsilon = 1e-10);
}

#[test]
fn reparent_to_current_parent_is_bit_identical() {
    let root = Frame::new();
    let a = Frame::with_parent(&root);
    a.translate((0.1, 0.2, 0.3)).rotate_about_parent_axis(0.17, Axis::Z);
    let before = a.to_floats();

    let parent = a.parent().unwrap();
    a.reparent(Some(&parent)).unwrap();

    assert_eq!(a.to_floats(), before);
    assert!(a.parent().unwrap().is_same(&root));
}

#[test]
fn reparent_to_self_is_a_cycle() {
    let root = Frame::new();
    let a = Frame::with_parent(&root);
    let err = a.reparent(Some(&a)).unwrap_err();
    assert_eq!(err, HierarchyError::CycleDetected);
}

#[test]
fn reparent_to_a_descendant_is_a_cycle_and_mutates_nothing() {
    let root = Frame::new();
    let a = Frame::with_parent(&root);
    a.translate((1.0, 2.0, 3.0));
    let b = Frame::with_parent(&a);
    let c = Frame::with_parent(&b);

    let before = a.to_floats();
    let err = a.reparent(Some(&c)).unwrap_err();

    assert_eq!(err, HierarchyError::CycleDetected);
    assert_eq!(a.to_floats(), before);
    assert!(a.parent().unwrap().is_same(&root));
}

#[test]
fn hundred_deep_chain_and_mid_chain_reparent() {
    let root = Frame::new();
    let mut nodes = vec![root.clone()];
    for i in 0..100 {
        let f = Frame::with_parent(&nodes[i]);
        f.translate((1.0, 0.0, 0.0));
        nodes.push(f);
    }
    assert_eq!(nodes[100].depth().unwrap(), 100);

    let before = global_point(&nodes[100], Point3::origin());
    nodes[11].reparent(Some(&root)).unwrap();

    assert_eq!(nodes[11].depth().unwrap(), 1);
    assert_eq!(nodes[100].depth().unwrap(), 90);
    assert_relative_eq!(global_point(&nodes[100], Point3::origin()), before, epsilon = 1e-9);
}

#[test]
fn corrupted_chain_is_reported_not_spun_on() {
    let root = Frame::new();
    let a = Frame::with_parent(&root);
    // Force a cycle through the raw projection primitive, which performs
    // no hierarchy checks of its own.
    a.project_frame(&root);

    assert_eq!(root.recompute_depths().unwrap_err(), HierarchyError::CycleDetected);
    assert_eq!(a.depth().unwrap_err(), HierarchyError::CycleDetected);

    let outsider = Frame::new();
    assert_eq!(
        a.reparent(Some(&outsider)).unwrap_err(),
        HierarchyError::CycleDetected
    );
}

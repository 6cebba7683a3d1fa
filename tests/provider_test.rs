mod common;

use approx::assert_relative_eq;
use nalgebra::Vector3;

use ephemkit::errors::EphemkitError;
use ephemkit::kernel::registry::KernelRegistry;
use ephemkit::provider::{EphemerisProvider, FixedPoint, InterpGrid, KernelBody};
use ephemkit::time::Epoch;

use common::{temp_path, write_two_body_spk};

#[test]
fn test_kernel_provider_evaluates_linear_motion() {
    let dir = tempfile::tempdir().unwrap();
    let spk = temp_path(&dir, "two_body.bsp");
    write_two_body_spk(&spk);

    let mut registry = KernelRegistry::new();
    registry.load(&spk).unwrap();

    let provider: EphemerisProvider = KernelBody::new(5, 0).into();

    // Epoch 1.5 days -> ET 86400 s: position (44200, 23600, 13800) km,
    // velocity (0.5, 0.25, 0.125) km/s, normalized to m and m/s.
    let state = provider.evaluate(1.5, &mut registry).unwrap();
    assert_eq!(
        state.position,
        Vector3::new(44_200_000.0, 23_600_000.0, 13_800_000.0)
    );
    assert_relative_eq!(state.velocity.x, 500.0, epsilon = 1e-9);
    assert_relative_eq!(state.velocity.y, 250.0, epsilon = 1e-9);
    assert_relative_eq!(state.velocity.z, 125.0, epsilon = 1e-9);

    // Raw day counts and wrapped epochs evaluate identically.
    let wrapped = provider.evaluate(Epoch::new(1.5), &mut registry).unwrap();
    assert_eq!(state, wrapped);
}

#[test]
fn test_kernel_provider_without_matching_kernel() {
    let mut registry = KernelRegistry::new();
    let provider: EphemerisProvider = KernelBody::new(5, 0).into();

    let err = provider.evaluate(1.5, &mut registry).unwrap_err();
    assert!(matches!(
        err,
        EphemkitError::EphemerisQuery { target: 5, .. }
    ));
}

#[test]
fn test_clone_is_independent_and_evaluate_equal() {
    let dir = tempfile::tempdir().unwrap();
    let spk = temp_path(&dir, "two_body.bsp");
    write_two_body_spk(&spk);

    let mut registry = KernelRegistry::new();
    registry.load(&spk).unwrap();

    let provider: EphemerisProvider = KernelBody::new(5, 0).into();
    let clone = provider.clone();

    for epoch in [0.0, 0.5, 1.0, 1.75, 2.0] {
        assert_eq!(
            provider.evaluate(epoch, &mut registry).unwrap(),
            clone.evaluate(epoch, &mut registry).unwrap()
        );
    }

    // Dropping the original leaves the clone fully usable.
    drop(provider);
    assert!(clone.evaluate(1.0, &mut registry).is_ok());
}

#[test]
fn test_serde_roundtrip_reconstructs_equivalent_providers() {
    let fixed: EphemerisProvider =
        FixedPoint::from_components(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).into();
    let kernel: EphemerisProvider = KernelBody::new(5, 0).into();

    for provider in [&fixed, &kernel] {
        let json = serde_json::to_string(provider).unwrap();
        let back: EphemerisProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(provider, &back);
        assert_eq!(provider.describe(), back.describe());
    }

    let mut registry = KernelRegistry::new();
    let back: EphemerisProvider =
        serde_json::from_str(&serde_json::to_string(&fixed).unwrap()).unwrap();
    assert_eq!(
        fixed.evaluate(123.456, &mut registry).unwrap(),
        back.evaluate(123.456, &mut registry).unwrap()
    );
}

#[test]
fn test_interp_grid_persists_kernel_ephemerides() {
    let dir = tempfile::tempdir().unwrap();
    let spk = temp_path(&dir, "two_body.bsp");
    write_two_body_spk(&spk);

    let mut registry = KernelRegistry::new();
    registry.load(&spk).unwrap();

    let source: EphemerisProvider = KernelBody::new(5, 0).into();
    let grid: EphemerisProvider =
        InterpGrid::sample(&source, &mut registry, 0.0, 2.0, 8).unwrap().into();

    // The motion is linear, so linear interpolation reproduces it.
    let expected = source.evaluate(0.6875, &mut registry).unwrap();
    let interpolated = grid.evaluate(0.6875, &mut registry).unwrap();
    assert_relative_eq!(
        interpolated.position.x,
        expected.position.x,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        interpolated.velocity.x,
        expected.velocity.x,
        epsilon = 1e-6
    );

    // Once sampled, the grid no longer needs the kernel.
    registry.unload(&spk);
    assert!(grid.evaluate(1.0, &mut registry).is_ok());

    // And it serializes without external state.
    let json = serde_json::to_string(&grid).unwrap();
    let back: EphemerisProvider = serde_json::from_str(&json).unwrap();
    assert_eq!(
        back.evaluate(1.0, &mut registry).unwrap(),
        grid.evaluate(1.0, &mut registry).unwrap()
    );

    // Epochs outside the sampled range are rejected.
    let err = grid.evaluate(2.5, &mut registry).unwrap_err();
    assert!(matches!(err, EphemkitError::EpochOutOfRange { .. }));
}

/// Fixed compute workgroup size (width, height, depth).
///
/// Must match the `@workgroup_size` attribute on `cMain` in the program
/// library.
pub const WORKGROUP_SIZE: (u32, u32, u32) = (10, 10, 1);

/// Number of workgroups needed to cover a `width x height` image.
///
/// The grid covers at least `width x height` invocations; every pixel in
/// `[0, width) x [0, height)` is addressed by exactly one invocation index.
/// Clamping the ragged edge on non-multiple extents is the kernel's
/// obligation.
pub fn dispatch_extent(width: u32, height: u32) -> (u32, u32, u32) {
    (
        width.div_ceil(WORKGROUP_SIZE.0),
        height.div_ceil(WORKGROUP_SIZE.1),
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocations((gx, gy, gz): (u32, u32, u32)) -> u64 {
        u64::from(gx * WORKGROUP_SIZE.0) * u64::from(gy * WORKGROUP_SIZE.1) * u64::from(gz)
    }

    #[test]
    fn grid_for_1300_square_is_exact() {
        let grid = dispatch_extent(1300, 1300);
        assert_eq!(grid, (130, 130, 1));
        // 1300 is divisible by 10: exactly one thread per pixel, zero
        // overshoot.
        assert_eq!(invocations(grid), 1_690_000);
    }

    #[test]
    fn grid_covers_non_multiple_extents() {
        for (w, h) in [(1301, 1299), (1, 1), (9, 11), (641, 480)] {
            let grid = dispatch_extent(w, h);
            assert!(invocations(grid) >= u64::from(w) * u64::from(h));
            // No more than one extra workgroup per axis.
            assert!(grid.0 * WORKGROUP_SIZE.0 < w + WORKGROUP_SIZE.0);
            assert!(grid.1 * WORKGROUP_SIZE.1 < h + WORKGROUP_SIZE.1);
        }
    }

    #[test]
    fn zero_extent_yields_empty_grid() {
        assert_eq!(dispatch_extent(0, 0), (0, 0, 1));
    }
}

use bonkgrid::*;
use glam::Vec2;
use std::time::Instant;

fn lcg(seed: &mut u32) -> u32 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    *seed
}

fn unit(seed: &mut u32) -> f32 {
    lcg(seed) as f32 / u32::MAX as f32
}

fn main() {
    let extent = 2000.0;
    let n = 20_000usize; // number of objects

    for cell in [16.0f32, 32.0, 64.0, 128.0] {
        let mut grid = Grid::new(GridConfig {
            enable_timing: true,
            ..GridConfig::new(BoundingVolume::new(0.0, 0.0, extent, extent), cell, cell)
        });

        let mut seed = 1u32;
        let objects: Vec<ObjectDesc> = (0..n)
            .map(|i| {
                let c = Vec2::new(unit(&mut seed) * extent, unit(&mut seed) * extent);
                let h = Vec2::new(2.0 + unit(&mut seed) * 8.0, 2.0 + unit(&mut seed) * 8.0);
                ObjectDesc::centered(ObjectId(i as u64), c, h, 1 + (i % 3) as u32)
            })
            .collect();

        grid.rebuild(objects.iter());

        let t0 = Instant::now();
        let mut hits = 0usize;
        for o in &objects {
            hits += grid.bbox_collisions(o, TypeFilter::Any).len();
        }
        let t_coll = t0.elapsed();

        let t1 = Instant::now();
        let mut near = 0usize;
        for o in objects.iter().take(1000) {
            near += grid.objects_within_distance(o.position, 50.0, TypeFilter::Only(1)).len();
        }
        let t_dist = t1.elapsed();

        let stats = grid.debug_stats();
        let rebuild_ms = grid.timing().map(|t| t.rebuild_ms).unwrap_or(0.0);
        println!(
            "N={} cell={} cells={} occupied={} memberships={} max_bucket={} rebuild={:.3}ms collisions={:?} ({} hits) distance={:?} ({} near)",
            n,
            cell,
            stats.cells,
            stats.occupied_cells,
            stats.memberships,
            stats.max_bucket,
            rebuild_ms,
            t_coll,
            hits,
            t_dist,
            near
        );
    }
}

use glam::{Mat4, Quat, Vec3};
use glyphgrid_common::GridParameters;

/// Number of distinct glyph meshes.
pub const GLYPH_KINDS: u8 = 4;

/// Child glyphs are drawn at this fraction of their parent's size.
const ORBITER_SCALE: f32 = 0.25;
/// Offset mixed into the hash when picking child glyphs.
const ORBITER_SALT: i32 = 12345;

/// Integer coordinates of one cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl GridCell {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Centre of the cell with the grid centred on the origin.
    pub fn center(&self, grid: &GridParameters) -> Vec3 {
        let c = (grid.size() - 1) as f32 * 0.5;
        Vec3::new(self.x as f32 - c, self.y as f32 - c, self.z as f32 - c) * grid.spacing()
    }

    /// How many child glyphs orbit this cell's main glyph.
    pub fn orbiter_count(&self, grid: &GridParameters) -> u32 {
        let min = grid.orbit_min();
        let span = u64::from(grid.orbit_max().saturating_sub(min) + 1);
        let mix = 7 * u64::from(self.x) + 13 * u64::from(self.y) + 17 * u64::from(self.z);
        min + (mix % span) as u32
    }

    /// Starting angle offset of orbiter `k`.
    pub fn orbit_phase(&self, k: u32) -> f32 {
        (23 * self.x + 29 * self.y + 31 * self.z + 11 * k) as f32 * 0.37
    }
}

/// Stable pseudo-random glyph choice for a cell, in `0..GLYPH_KINDS`.
///
/// FNV-1a over the spatially hashed coordinates, salted by `extra`.
pub fn glyph_id(x: u32, y: u32, z: u32, extra: i32) -> u8 {
    const OFFSET_BASIS: u32 = 2_166_136_261;
    const PRIME: u32 = 16_777_619;

    let mut h = OFFSET_BASIS;
    for (v, k) in [(x, 73_856_093_i32), (y, 19_349_663), (z, 83_492_791)] {
        h = (h ^ (v as i32).wrapping_mul(k) as u32).wrapping_mul(PRIME);
    }
    h ^= (extra as u32).wrapping_mul(2_654_435_761);
    (h % u32::from(GLYPH_KINDS)) as u8
}

/// Per-cell size jitter between 0.35 and 0.7.
pub fn glyph_scale(x: u32, y: u32, z: u32) -> f32 {
    let h = ((x as f32 * 12.9898 + y as f32 * 78.233 + z as f32 * 37.719).sin() * 43758.5453).abs();
    0.35 + 0.35 * (h - h.floor())
}

/// Main glyph or one of its orbiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceKind {
    Main,
    Orbiter(u32),
}

/// One draw of a glyph mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInstance {
    pub cell: GridCell,
    pub kind: InstanceKind,
    /// Mesh index, `0..GLYPH_KINDS`.
    pub glyph: u8,
    pub world: Mat4,
}

/// Everything needed to lay out one frame of glyphs.
///
/// Instances are produced lazily; a full grid can hold millions of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneFrame {
    pub grid: GridParameters,
    /// Animation angle in radians.
    pub angle: f32,
}

impl SceneFrame {
    pub fn new(grid: GridParameters, angle: f32) -> Self {
        Self { grid, angle }
    }

    /// Spin shared by every main glyph.
    fn spin(&self) -> Quat {
        Quat::from_rotation_y(self.angle * 0.7) * Quat::from_rotation_x(self.angle)
    }

    /// Scale then spin then move into the cell.
    pub fn main_world(&self, cell: GridCell) -> Mat4 {
        let scale = glyph_scale(cell.x, cell.y, cell.z);
        Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            self.spin(),
            cell.center(&self.grid),
        )
    }

    /// Shrink, push out to the orbit radius, revolve, then follow the
    /// parent's scale and position (but not its spin).
    pub fn orbiter_world(&self, cell: GridCell, k: u32) -> Mat4 {
        let phase = cell.orbit_phase(k);
        let parent = Mat4::from_scale_rotation_translation(
            Vec3::splat(glyph_scale(cell.x, cell.y, cell.z)),
            Quat::IDENTITY,
            cell.center(&self.grid),
        );
        let revolve = Quat::from_rotation_x(self.angle * 0.3 + phase * 0.2)
            * Quat::from_rotation_y(self.angle * 1.6 + phase);
        parent
            * Mat4::from_quat(revolve)
            * Mat4::from_translation(Vec3::X * self.grid.orbit_radius())
            * Mat4::from_scale(Vec3::splat(ORBITER_SCALE))
    }

    /// Cells in x-major, then y, then z order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let n = self.grid.size();
        (0..n).flat_map(move |x| {
            (0..n).flat_map(move |y| (0..n).map(move |z| GridCell::new(x, y, z)))
        })
    }

    /// Main glyph followed by its orbiters, for every cell.
    pub fn instances(&self) -> impl Iterator<Item = GlyphInstance> + '_ {
        self.cells().flat_map(move |cell| {
            let main = GlyphInstance {
                cell,
                kind: InstanceKind::Main,
                glyph: glyph_id(cell.x, cell.y, cell.z, 0),
                world: self.main_world(cell),
            };
            let orbiters = (0..cell.orbiter_count(&self.grid)).map(move |k| GlyphInstance {
                cell,
                kind: InstanceKind::Orbiter(k),
                glyph: glyph_id(cell.x, cell.y, cell.z, k as i32 + ORBITER_SALT),
                world: self.orbiter_world(cell, k),
            });
            std::iter::once(main).chain(orbiters)
        })
    }

    /// Total instance count, without building any matrices.
    pub fn instance_count(&self) -> u64 {
        self.cells()
            .map(|cell| 1 + u64::from(cell.orbiter_count(&self.grid)))
            .sum()
    }
}

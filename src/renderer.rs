use glam::DVec2;
use rayon::prelude::*;
use std::time::{Duration, Instant};

use crate::camera::Camera;
use crate::color::shade;
use crate::consts::{FAR_SENTINEL, MIN_PERP_DIST, RAY_DIR_EPSILON};
use crate::framebuffer::Framebuffer;
use crate::map::{Tile, WorldGrid};
use crate::textures::{Texture, TextureBank};

/// Which grid line the ray crossed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Side {
    /// Crossed a vertical grid line (x changed). Drawn darker.
    #[default]
    X = 0,
    /// Crossed a horizontal grid line (y changed).
    Y = 1,
}

/// Vertical extent of a wall strip on screen and how it walks the texture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Strip {
    pub line_height: i64,
    /// First screen row drawn.
    pub draw_start: usize,
    /// Last screen row drawn, inclusive.
    pub draw_end: usize,
    /// Texture row position at `draw_start`.
    pub tex_start: f64,
    /// Texels per screen pixel.
    pub tex_step: f64,
}

impl Strip {
    pub fn new(perp_dist: f64, screen_h: usize, tex_side: usize) -> Self {
        let h = screen_h as i64;
        let line_height = (screen_h as f64 / perp_dist) as i64;
        let unclipped_start = -line_height / 2 + h / 2;
        let draw_start = unclipped_start.max(0);
        let draw_end = (line_height / 2 + h / 2).min(h - 1);

        // a strip shorter than one pixel still draws a single row
        let tex_step = tex_side as f64 / line_height.max(1) as f64;
        let tex_start = (draw_start - unclipped_start) as f64 * tex_step;

        Strip {
            line_height,
            draw_start: draw_start as usize,
            draw_end: draw_end as usize,
            tex_start,
            tex_step,
        }
    }

    /// `(screen row, texture row)` from top to bottom. The texture position
    /// is accumulated row by row and wrapped with `mask`.
    pub fn rows(&self, mask: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let mut tex_pos = self.tex_start;
        (self.draw_start..=self.draw_end).map(move |y| {
            let tex_y = (tex_pos as usize) & mask;
            tex_pos += self.tex_step;
            (y, tex_y)
        })
    }
}

/// Everything one screen column needs to draw its wall.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WallSlice {
    pub ray_dir: DVec2,
    pub map_x: i64,
    pub map_y: i64,
    pub side: Side,
    /// False when the ray left the grid. The slice then describes the
    /// first cell outside the grid and is drawn anyway.
    pub hit: bool,
    /// DDA iterations taken.
    pub steps: usize,
    pub perp_dist: f64,
    pub strip: Strip,
    pub tex_x: usize,
    pub tex_slot: usize,
}

impl WallSlice {
    /// `(screen row, color)` pairs for this column, top to bottom.
    pub fn texels<'a>(&'a self, texture: &'a Texture) -> impl Iterator<Item = (usize, u32)> + 'a {
        self.strip.rows(texture.side() - 1).map(move |(y, tex_y)| {
            let color = texture.texel(self.tex_x, tex_y);
            match self.side {
                Side::X => (y, shade(color)),
                Side::Y => (y, color),
            }
        })
    }

    /// Writes the strip into `column`, indexed by screen row.
    pub fn sample(&self, textures: &TextureBank, column: &mut [u32]) {
        let texture = textures
            .get(self.tex_slot)
            .unwrap_or_else(|| textures.for_tile(0));
        for (y, color) in self.texels(texture) {
            column[y] = color;
        }
    }

    /// Copies the sampled rows of `column` into screen column `x`.
    pub fn blit(&self, x: usize, column: &[u32], fb: &mut Framebuffer) {
        for y in self.strip.draw_start..=self.strip.draw_end {
            fb.put(x, y, column[y]);
        }
    }
}

#[inline]
fn delta_dist(component: f64) -> f64 {
    if component == 0.0 {
        FAR_SENTINEL
    } else {
        (1.0 / component).abs()
    }
}

#[inline]
fn nonzero(component: f64) -> f64 {
    if component == 0.0 { RAY_DIR_EPSILON } else { component }
}

/// Casts the ray for screen column `x` and works out its wall strip.
/// Depends only on its arguments, so columns can be cast in any order.
pub fn cast_column(
    x: usize,
    screen_w: usize,
    screen_h: usize,
    camera: &Camera,
    world: &WorldGrid,
    textures: &TextureBank,
) -> WallSlice {
    let pos = camera.pos();
    let camera_x = 2.0 * x as f64 / screen_w as f64 - 1.0;
    let ray_dir = camera.ray_dir(camera_x);

    let mut map_x = pos.x.floor() as i64;
    let mut map_y = pos.y.floor() as i64;

    let delta_dist_x = delta_dist(ray_dir.x);
    let delta_dist_y = delta_dist(ray_dir.y);

    let (step_x, mut side_dist_x) = if ray_dir.x < 0.0 {
        (-1, (pos.x - map_x as f64) * delta_dist_x)
    } else {
        (1, (map_x as f64 + 1.0 - pos.x) * delta_dist_x)
    };
    let (step_y, mut side_dist_y) = if ray_dir.y < 0.0 {
        (-1, (pos.y - map_y as f64) * delta_dist_y)
    } else {
        (1, (map_y as f64 + 1.0 - pos.y) * delta_dist_y)
    };

    // Digital Differential Analyzer
    let mut side = Side::X;
    let mut hit = false;
    let mut steps = 0;
    loop {
        if side_dist_x < side_dist_y {
            side_dist_x += delta_dist_x;
            map_x = map_x.saturating_add(step_x);
            side = Side::X;
        } else {
            side_dist_y += delta_dist_y;
            map_y = map_y.saturating_add(step_y);
            side = Side::Y;
        }
        steps += 1;

        match world.tile_at(map_x, map_y) {
            Tile::Open => {}
            Tile::Wall(_) => {
                hit = true;
                break;
            }
            Tile::OutOfBounds => break,
        }
    }

    // Distance to the camera plane, not the camera point, so walls don't bulge
    let perp_dist = match side {
        Side::X => (map_x as f64 - pos.x + (1 - step_x) as f64 / 2.0) / nonzero(ray_dir.x),
        Side::Y => (map_y as f64 - pos.y + (1 - step_y) as f64 / 2.0) / nonzero(ray_dir.y),
    }
    .max(MIN_PERP_DIST);

    let tex_side = textures.side();
    let strip = Strip::new(perp_dist, screen_h, tex_side);

    // Where along the wall face the ray landed
    let mut wall_x = match side {
        Side::X => pos.y + perp_dist * ray_dir.y,
        Side::Y => pos.x + perp_dist * ray_dir.x,
    };
    wall_x -= wall_x.floor();

    let mut tex_x = ((wall_x * tex_side as f64) as usize).min(tex_side - 1);
    if (side == Side::X && ray_dir.x > 0.0) || (side == Side::Y && ray_dir.y < 0.0) {
        tex_x = tex_side - tex_x - 1;
    }

    let tex_slot = TextureBank::slot_for_tile(world.id_at(map_x, map_y).unwrap_or(0));

    WallSlice {
        ray_dir,
        map_x,
        map_y,
        side,
        hit,
        steps,
        perp_dist,
        strip,
        tex_x,
        tex_slot,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Time spent clearing, casting and drawing.
    pub elapsed: Duration,
    pub hits: usize,
    pub misses: usize,
}

pub struct RayCaster {
    pub parallel: bool,
    pub ceiling_color: u32,
    pub floor_color: u32,
    slices: Vec<WallSlice>,
    // column-major, `height` texels per screen column
    columns: Vec<u32>,
}

impl RayCaster {
    pub fn new(parallel: bool, ceiling_color: u32, floor_color: u32) -> Self {
        RayCaster {
            parallel,
            ceiling_color,
            floor_color,
            slices: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Slices from the most recent frame, one per column.
    pub fn slices(&self) -> &[WallSlice] {
        &self.slices
    }

    pub fn render(
        &mut self,
        fb: &mut Framebuffer,
        camera: &Camera,
        world: &WorldGrid,
        textures: &TextureBank,
    ) -> FrameStats {
        let start = Instant::now();
        let (w, h) = (fb.width(), fb.height());

        fb.clear_background(self.ceiling_color, self.floor_color);

        self.slices.resize(w, WallSlice::default());
        self.columns.resize(w * h, 0);
        let cast = |(x, (slice, column)): (usize, (&mut WallSlice, &mut [u32]))| {
            *slice = cast_column(x, w, h, camera, world, textures);
            slice.sample(textures, column);
        };
        if self.parallel {
            self.slices
                .par_iter_mut()
                .zip(self.columns.par_chunks_mut(h))
                .enumerate()
                .for_each(cast);
        } else {
            self.slices
                .iter_mut()
                .zip(self.columns.chunks_mut(h))
                .enumerate()
                .for_each(cast);
        }

        let mut hits = 0;
        for (x, (slice, column)) in self.slices.iter().zip(self.columns.chunks(h)).enumerate() {
            slice.blit(x, column, fb);
            if slice.hit {
                hits += 1;
            }
        }

        FrameStats {
            elapsed: start.elapsed(),
            hits,
            misses: w - hits,
        }
    }
}

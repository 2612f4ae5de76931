use crate::db::core::{RoutedDesign, RoutingDB};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

const TARGET_SIDE: u32 = 1000;

/// Renders the routed grid to a PNG: obstacles in grey, layer-1 wires
/// blue, layer-2 wires red, pins in white. Both layers are composited
/// into one image; cells carrying wire on both layers blend toward
/// purple, which makes vias easy to spot.
pub fn draw_routed_grid(db: &RoutingDB, design: &RoutedDesign, filename: &str) {
    if db.rows == 0 || db.cols == 0 {
        return;
    }
    let cell = (TARGET_SIDE / db.rows.max(db.cols)).max(1);
    let width = db.rows * cell;
    let height = db.cols * cell;

    let mut img = RgbaImage::from_pixel(width, height, Rgba([20, 20, 20, 255]));

    let cell_rect = |x: u32, y: u32| {
        // y grows upward in grid space, downward in image space.
        ImageRect::at((x * cell) as i32, (height - (y + 1) * cell) as i32).of_size(cell, cell)
    };

    let obstacle_color = Rgba([90, 90, 90, 255]);
    for obs in db.obstacles.iter().filter(|o| db.in_bounds(**o)) {
        draw_filled_rect_mut(&mut img, cell_rect(obs.x, obs.y), obstacle_color);
    }

    let layer_colors = [
        // Layer 1 (horizontal-preferred): blue
        Rgba([0, 110, 255, 160]),
        // Layer 2 (vertical-preferred): red
        Rgba([255, 20, 80, 160]),
    ];
    for net in &design.nets {
        for c in net.path.iter().filter(|c| db.in_bounds(**c)) {
            blend_rect(&mut img, cell_rect(c.x, c.y), layer_colors[c.layer as usize]);
        }
    }

    let pin_color = Rgba([255, 255, 255, 255]);
    for pins in db.nets.values() {
        for p in pins.iter().filter(|p| db.in_bounds(**p)) {
            draw_filled_rect_mut(&mut img, cell_rect(p.x, p.y), pin_color);
        }
    }

    match img.save(Path::new(filename)) {
        Ok(()) => log::info!("Wrote routing image to {}", filename),
        Err(e) => log::warn!("Failed to write {}: {}", filename, e),
    }
}

fn blend_rect(img: &mut RgbaImage, rect: ImageRect, color: Rgba<u8>) {
    let alpha = color[3] as u32;
    for y in rect.top()..rect.top() + rect.height() as i32 {
        for x in rect.left()..rect.left() + rect.width() as i32 {
            if x < 0 || y < 0 || x as u32 >= img.width() || y as u32 >= img.height() {
                continue;
            }
            let px = img.get_pixel_mut(x as u32, y as u32);
            for ch in 0..3 {
                let base = px[ch] as u32;
                px[ch] = ((color[ch] as u32 * alpha + base * (255 - alpha)) / 255) as u8;
            }
        }
    }
}

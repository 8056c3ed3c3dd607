//! Draws a [`NeuralField`] frame onto a 2D canvas context.

use std::f64::consts::TAU;

use synapse_core::{NeuralField, Rgb};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub fn draw(ctx: &CanvasRenderingContext2d, field: &NeuralField) -> Result<(), JsValue> {
    let viewport = field.viewport();
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);

    draw_grid(ctx, field);
    draw_links(ctx, field);
    draw_nodes(ctx, field)
}

/// The grid shares one style, so it is stroked as a single path.
fn draw_grid(ctx: &CanvasRenderingContext2d, field: &NeuralField) {
    let config = field.config();
    ctx.begin_path();
    for line in field.grid_lines() {
        ctx.move_to(line.from.0, line.from.1);
        ctx.line_to(line.to.0, line.to.1);
    }
    ctx.set_stroke_style_str(&Rgb::CYAN.css_rgba(config.grid_alpha));
    ctx.set_line_width(config.grid_width);
    ctx.stroke();
}

fn draw_links(ctx: &CanvasRenderingContext2d, field: &NeuralField) {
    ctx.set_line_width(field.config().link_width);
    for link in field.links() {
        ctx.begin_path();
        ctx.move_to(link.from.0, link.from.1);
        ctx.line_to(link.to.0, link.to.1);
        ctx.set_stroke_style_str(&Rgb::CYAN.css_rgba(link.alpha));
        ctx.stroke();
    }
}

fn draw_nodes(ctx: &CanvasRenderingContext2d, field: &NeuralField) -> Result<(), JsValue> {
    for sprite in field.sprites() {
        if let Some(glow) = sprite.glow {
            let gradient =
                ctx.create_radial_gradient(sprite.x, sprite.y, 0.0, sprite.x, sprite.y, glow.radius)?;
            gradient.add_color_stop(0.0, &glow.color.css_rgba(glow.alpha))?;
            gradient.add_color_stop(1.0, "transparent")?;

            ctx.begin_path();
            ctx.arc(sprite.x, sprite.y, glow.radius, 0.0, TAU)?;
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.fill();
        }

        ctx.begin_path();
        ctx.arc(sprite.x, sprite.y, sprite.radius, 0.0, TAU)?;
        ctx.set_fill_style_str(&sprite.color.css_rgba(sprite.alpha));
        ctx.fill();
    }
    Ok(())
}

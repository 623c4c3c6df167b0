const EYE: Rgba = rgb(0x000000);
const SHADOW: Rgba = with_alpha(EYE, 51);
const OUTLINE: Rgba = with_alpha(EYE, 77);
const WINDOW_LIGHT: Rgba = rgb(0xFFD700);
const WOOD_DARK: Rgba = rgb(0x654321);
const INTERIOR_WALL: Rgba = rgb(0xF5DEB3);
const INTERIOR_FLOOR: Rgba = rgb(0x8B4513);
const INTERIOR_FLOOR_TOP: f32 = 400.0;
const TARGET_MARKER: Rgba = rgb(0xFF69B4);

fn draw_scene<U: UiNotifier>(
    draw_list: &mut DrawList,
    state: &GameState<U>,
    colors: &CaviaColors,
    viewport: Viewport,
) {
    let player = state.player();
    let bob = animation_offset(player);
    match state.mode() {
        Mode::Outside(world) => {
            let camera = state.camera();
            let backdrop = state.catalog().backdrop(*world);
            draw_backdrop(draw_list, backdrop, state.config().world_size, camera, viewport);
            draw_building_markers(draw_list, state.visible_buildings(), camera);
            if let Some(target) = player.target() {
                draw_target_marker(draw_list, world_to_screen(target, camera));
            }
            let at = world_to_screen(player.position, camera);
            draw_cavia(
                draw_list,
                Vec2::new(at.x, at.y + bob),
                colors,
                PLAYER_DRAW_SCALE,
            );
        }
        Mode::Inside { .. } => {
            draw_interior(draw_list, state.config());
            if let Some(target) = player.target() {
                draw_target_marker(draw_list, target);
            }
            let at = Vec2::new(player.position.x, player.position.y + bob);
            draw_cavia(draw_list, at, colors, PLAYER_DRAW_SCALE);
        }
    }
}

fn draw_backdrop(
    draw_list: &mut DrawList,
    backdrop: WorldBackdrop,
    world_size: Vec2,
    camera: &Camera2D,
    viewport: Viewport,
) {
    let (view_w, view_h) = viewport.size_f32();
    draw_list.clear(backdrop.sky);
    let horizon = world_to_screen(Vec2::new(0.0, backdrop.horizon_y), camera);
    let ground_bottom = world_to_screen(world_size, camera).y;
    draw_list.fill_rect(
        Rect::new(0.0, horizon.y, view_w, ground_bottom.min(view_h) - horizon.y),
        backdrop.ground,
    );
}

fn draw_building_markers(draw_list: &mut DrawList, buildings: &[Building], camera: &Camera2D) {
    for building in buildings {
        let origin = world_to_screen(Vec2::new(building.rect.x, building.rect.y), camera);
        let rect = Rect::new(origin.x, origin.y, building.rect.w, building.rect.h);

        draw_list.fill_rect(Rect::new(rect.x + 5.0, rect.y + 5.0, rect.w, rect.h), SHADOW);
        draw_list.fill_rect(rect, building.color);
        draw_list.stroke_rect(rect, 2.0, OUTLINE);

        let rows = ((rect.h - 60.0) / 50.0).floor().max(0.0) as u32;
        let cols = ((rect.w - 40.0) / 40.0).floor().max(0.0) as u32;
        for row in 0..rows {
            for col in 0..cols {
                let window = Rect::new(
                    rect.x + 20.0 + col as f32 * 40.0,
                    rect.y + 20.0 + row as f32 * 50.0,
                    25.0,
                    30.0,
                );
                draw_list.fill_rect(window, WINDOW_LIGHT);
                draw_list.stroke_rect(window, 1.0, WOOD_DARK);
            }
        }

        let door = Rect::new(rect.x + (rect.w - 40.0) / 2.0, rect.bottom() - 60.0, 40.0, 60.0);
        draw_list.fill_rect(door, WOOD_DARK);
        draw_list.fill_ellipse(
            Vec2::new(door.right() - 10.0, door.y + door.h / 2.0),
            Vec2::new(3.0, 3.0),
            WINDOW_LIGHT,
        );
    }
}

fn draw_interior(draw_list: &mut DrawList, config: &GameConfig) {
    let size = config.interior_size;
    draw_list.clear(INTERIOR_WALL);
    draw_list.fill_rect(
        Rect::new(0.0, INTERIOR_FLOOR_TOP, size.x, size.y - INTERIOR_FLOOR_TOP),
        INTERIOR_FLOOR,
    );
    let zone = config.exit_zone;
    draw_list.fill_rect(
        Rect::new(zone.min_x, zone.min_y, zone.max_x - zone.min_x, size.y - zone.min_y),
        WOOD_DARK,
    );
}

fn draw_target_marker(draw_list: &mut DrawList, screen: Vec2) {
    draw_list.cross(screen, 10.0, TARGET_MARKER);
    draw_list.fill_ellipse(screen, Vec2::new(3.0, 3.0), TARGET_MARKER);
}

pub(crate) fn draw_cavia(draw_list: &mut DrawList, center: Vec2, colors: &CaviaColors, scale: f32) {
    let at = |dx: f32, dy: f32| Vec2::new(center.x + dx * scale, center.y + dy * scale);
    let radii = |rx: f32, ry: f32| Vec2::new(rx * scale, ry * scale);

    draw_list.fill_ellipse(at(0.0, 30.0), radii(25.0, 10.0), SHADOW);
    draw_list.fill_ellipse(at(0.0, 0.0), radii(30.0, 25.0), colors.body.rgba());
    draw_list.fill_ellipse(at(0.0, 5.0), radii(20.0, 15.0), colors.belly.rgba());
    for side in [-1.0, 1.0] {
        draw_list.fill_ellipse(at(side * 15.0, -15.0), radii(8.0, 10.0), colors.ears.rgba());
    }
    for side in [-1.0, 1.0] {
        draw_list.fill_ellipse(at(side * 15.0, 20.0), radii(7.0, 5.0), colors.feet.rgba());
    }
    for side in [-1.0, 1.0] {
        draw_list.fill_ellipse(at(side * 10.0, -5.0), radii(3.0, 3.0), EYE);
    }
    draw_list.fill_ellipse(at(0.0, 0.0), radii(4.0, 3.0), colors.nose.rgba());
}

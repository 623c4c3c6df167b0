fn advance_player(player: &mut PlayerState, held: &HeldKeys, bounds: Rect, config: &GameConfig) {
    player.is_moving = false;
    if held.any_direction_down() {
        move_with_keys(player, held);
    } else if let Some(target) = player.target() {
        step_toward_target(player, target, config.arrival_threshold);
    }
    advance_animation(player, config.animation_increment);
    clamp_player(player, bounds, config.bounds_margin);
}

/// Moves `speed` units along the straight line to `target`, or clears the
/// target once within `arrival_threshold`. Not scaled by frame time.
fn step_toward_target(player: &mut PlayerState, target: Vec2, arrival_threshold: f32) {
    let distance = player.position.distance(target);
    if distance <= arrival_threshold {
        player.clear_target();
        player.is_moving = false;
        return;
    }
    let inv_distance = distance.recip();
    player.position.x += (target.x - player.position.x) * inv_distance * player.speed;
    player.position.y += (target.y - player.position.y) * inv_distance * player.speed;
    player.is_moving = true;
}

/// Per-axis `±speed` for every held direction; diagonals are not normalized.
fn move_with_keys(player: &mut PlayerState, held: &HeldKeys) {
    if !held.any_direction_down() {
        return;
    }
    for direction in Direction::ALL {
        if !held.direction_down(direction) {
            continue;
        }
        match direction {
            Direction::Left => player.position.x -= player.speed,
            Direction::Right => player.position.x += player.speed,
            Direction::Up => player.position.y -= player.speed,
            Direction::Down => player.position.y += player.speed,
        }
    }
    player.clear_target();
    player.is_moving = true;
}

fn advance_animation(player: &mut PlayerState, increment: f32) {
    if !player.is_moving {
        player.animation_phase = 0.0;
        return;
    }
    player.animation_phase += increment;
    if player.animation_phase >= 1.0 {
        player.animation_phase = 0.0;
    }
}

fn clamp_player(player: &mut PlayerState, bounds: Rect, margin: f32) {
    player.position = bounds.clamp_with_margin(player.position, margin);
}

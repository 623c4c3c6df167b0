const fn rgb(hex: u32) -> Rgba {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255]
}

const fn with_alpha(color: Rgba, alpha: u8) -> Rgba {
    [color[0], color[1], color[2], alpha]
}

fn world_token_list() -> String {
    WorldId::ALL
        .iter()
        .map(|world| world.token())
        .collect::<Vec<_>>()
        .join(", ")
}

fn building_at(buildings: &[Building], point: Vec2) -> Option<&Building> {
    buildings
        .iter()
        .find(|building| building.rect.contains(point))
}

fn animation_offset(player: &PlayerState) -> f32 {
    if player.is_moving {
        (player.animation_phase * TAU).sin() * ANIMATION_BOB_AMPLITUDE
    } else {
        0.0
    }
}

use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::color::Srgba;

use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;

/// Component tagging each bob mesh with its rod and bob index
#[derive(Component)]
struct BobIndex {
    rod: usize,
    bob: usize,
}

/// Screen radius of a bob
const BOB_RADIUS: f32 = 5.0;

/// Tint used for bob masses and for tags that are not hex colours
const FALLBACK_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.3);

pub fn run_2d(scenario: Scenario) {
    info!("run_2d: starting Bevy 2D viewer with {} rods", scenario.rods.len());

    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_system)
        .add_systems(
            Update,
            (
                keyboard_system,
                physics_step_system,
                divergence_system,
                sync_transforms_system,
                draw_rods_system,
            )
                .chain(),
        )
        .run();
}

/// Canvas coordinates grow downward, Bevy's grow upward
fn to_screen(p: NVec2) -> Vec2 {
    Vec2::new(p.x as f32, -p.y as f32)
}

fn tag_color(tag: &str) -> Color {
    Srgba::hex(tag).map(Color::from).unwrap_or(FALLBACK_COLOR)
}

fn setup_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    commands.spawn(Camera2dBundle::default());

    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line_width = 4.0;

    let mesh = Mesh2dHandle(meshes.add(Circle::new(BOB_RADIUS)));
    let material = materials.add(ColorMaterial::from(FALLBACK_COLOR));

    for (r, rod) in scenario.rods.iter().enumerate() {
        for (b, pos) in rod.bob_positions().into_iter().enumerate() {
            let p = to_screen(pos);
            commands.spawn((
                MaterialMesh2dBundle {
                    mesh: mesh.clone(),
                    material: material.clone(),
                    transform: Transform::from_xyz(p.x, p.y, 1.0),
                    ..Default::default()
                },
                BobIndex { rod: r, bob: b },
            ));
        }
    }
}

/// Space pauses, arrows change speed, R restarts every rod
fn keyboard_system(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    if keys.just_pressed(KeyCode::Space) {
        scenario.speed.toggle_pause();
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        scenario.speed.faster();
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        scenario.speed.slower();
    }
    if keys.just_pressed(KeyCode::KeyR) {
        scenario.reset();
        info!("scenario reset");
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    scenario.advance();
}

fn divergence_system(mut scenario: ResMut<Scenario>) {
    let reset = scenario.recover_diverged();
    if reset > 0 {
        warn!("{reset} rod(s) diverged at speed {:.1}", scenario.speed.multiplier());
    }
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&BobIndex, &mut Transform)>) {
    let positions: Vec<Vec<NVec2>> = scenario.rods.iter().map(|r| r.bob_positions()).collect();
    for (idx, mut transform) in &mut query {
        if let Some(p) = positions.get(idx.rod).and_then(|bobs| bobs.get(idx.bob)) {
            let p = to_screen(*p);
            transform.translation.x = p.x;
            transform.translation.y = p.y;
        }
    }
}

/// Rod line plus one tracer circle per bob, riding around the bob's origin
fn draw_rods_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    for rod in &scenario.rods {
        let (a, b) = rod.endpoints();
        gizmos.line_2d(to_screen(a), to_screen(b), Color::srgba(1.0, 1.0, 1.0, 0.2));

        let (s, c) = rod.tracer_angle.sin_cos();
        for (end, bob) in rod.bobs() {
            let origin = rod.end_point(end);
            let center = origin + bob.length() * NVec2::new(s, c);
            gizmos.circle_2d(to_screen(center), bob.length() as f32, tag_color(&bob.tag));
        }
    }
}

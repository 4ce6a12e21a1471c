//! Interactive 3D board viewer using kiss3d.

use kiss3d::prelude::*;

use flagstack::board::{self, Board, BoardConfig};
use flagstack::countries::Continent;
use flagstack::easing;
use flagstack::layouts::Preset;

/// Display color per continent.
///
/// The mapping is stable so reseeding never recolors a continent.
fn continent_color(continent: Continent) -> Color {
    match continent {
        Continent::Africa => Color::new(0.9, 0.7, 0.2, 1.0),   // ochre
        Continent::Americas => Color::new(0.2, 0.6, 1.0, 1.0), // blue
        Continent::Asia => Color::new(0.9, 0.3, 0.3, 1.0),     // red
        Continent::Europe => Color::new(0.4, 0.8, 0.4, 1.0),   // green
        Continent::Oceania => Color::new(0.6, 0.4, 0.9, 1.0),  // violet
        Continent::Unknown => Color::new(0.7, 0.7, 0.7, 1.0),  // grey
    }
}

/// Whether the viewer shows the mahjong layout or the pile columns.
#[derive(Clone, Copy, PartialEq)]
enum ViewMode {
    Mahjong,
    Piles,
}

/// A rendered tile in the scene.
struct RenderedTile {
    node: SceneNode3d,
    base_position: Vec3,
}

/// Frames over which freshly built tiles rise into place.
const INTRO_FRAMES: u32 = 36;

fn build_for(config: &BoardConfig, mode: ViewMode) -> Board {
    match mode {
        ViewMode::Mahjong => board::build_board(config),
        ViewMode::Piles => board::build_piles(config),
    }
}

/// Spawns one cuboid per slot, colored by continent. The hand tile renders
/// slightly enlarged so it reads as held.
fn build_scene(scene: &mut SceneNode3d, board: &Board) -> Vec<RenderedTile> {
    let m = &board.metrics;
    let mut tiles = Vec::with_capacity(board.slots.len() + 1);

    for slot in &board.slots {
        let base_position = Vec3::new(
            slot.position.x as f32,
            slot.position.y as f32,
            slot.position.z as f32,
        );
        let node = scene
            .add_cube(m.width as f32, m.height as f32, m.depth as f32)
            .set_color(continent_color(slot.continent()))
            .set_position(base_position);
        tiles.push(RenderedTile {
            node,
            base_position,
        });
    }
    if let Some(hand) = &board.hand {
        let scale = 1.1f32;
        let base_position = Vec3::new(
            hand.position.x as f32,
            hand.position.y as f32,
            hand.position.z as f32,
        );
        let node = scene
            .add_cube(
                m.width as f32 * scale,
                m.height as f32 * scale,
                m.depth as f32 * scale,
            )
            .set_color(continent_color(hand.continent()))
            .set_position(base_position);
        tiles.push(RenderedTile {
            node,
            base_position,
        });
    }
    tiles
}

fn title_for(board: &Board, mode: ViewMode) -> String {
    let layout = match mode {
        ViewMode::Mahjong => board
            .preset
            .map(Preset::name)
            .unwrap_or("mahjong")
            .to_string(),
        ViewMode::Piles => "piles".to_string(),
    };
    format!(
        "flagstack seed {} ({layout}) - [Left/Right] reseed, [P] preset, [M] mode",
        board.seed
    )
}

/// Displays a board in an interactive viewer.
pub fn display(config: BoardConfig) {
    pollster::block_on(display_async(config));
}

async fn display_async(mut config: BoardConfig) {
    let mut mode = ViewMode::Mahjong;
    let mut board = build_for(&config, mode);

    let mut window = Window::new(&title_for(&board, mode)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(18.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(400.0))
        .set_position(Vec3::new(8.0, 14.0, 8.0));

    let mut tiles = build_scene(&mut scene, &board);
    let mut intro_frame = 0u32;
    let mut needs_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Right => {
                            config.seed = config.seed.wrapping_add(1);
                            needs_rebuild = true;
                        }
                        Key::Left => {
                            config.seed = config.seed.wrapping_sub(1);
                            needs_rebuild = true;
                        }
                        Key::P => {
                            // cycle: auto-pick, then each preset in turn
                            config.preset = match config.preset {
                                None => Some(Preset::ALL[0]),
                                Some(p) => {
                                    let idx =
                                        Preset::ALL.iter().position(|&q| q == p).unwrap_or(0);
                                    Preset::ALL.get(idx + 1).copied()
                                }
                            };
                            needs_rebuild = true;
                        }
                        Key::M => {
                            mode = match mode {
                                ViewMode::Mahjong => ViewMode::Piles,
                                ViewMode::Piles => ViewMode::Mahjong,
                            };
                            needs_rebuild = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        if needs_rebuild {
            for mut tile in tiles.drain(..) {
                tile.node.remove();
            }
            board = build_for(&config, mode);
            for diagnostic in &board.diagnostics {
                eprintln!("{diagnostic}");
            }
            tiles = build_scene(&mut scene, &board);
            window.set_title(&title_for(&board, mode));
            intro_frame = 0;
            needs_rebuild = false;
        }

        // intro: tiles rise from below with an overshooting ease
        if intro_frame <= INTRO_FRAMES {
            let t = f64::from(intro_frame) / f64::from(INTRO_FRAMES);
            let offset = ((easing::back_out(t) - 1.0) * 2.0) as f32;
            for tile in &mut tiles {
                tile.node
                    .set_position(tile.base_position + Vec3::new(0.0, offset, 0.0));
            }
            intro_frame += 1;
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}

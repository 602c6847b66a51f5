use super::*;
use crate::core::TextAnchor;
use crate::scene::{HitTest, NodeId, Primitive, Scene, SceneChange, SceneNode};
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::ui::ComputedNode;
use bevy::window::PrimaryWindow;

/// Hit testing through a camera: casts the ray under a screen point into the
/// scene.
pub struct CameraHitTest<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
    pub scene: &'a Scene,
}

impl HitTest for CameraHitTest<'_> {
    fn hit_test(&self, screen: Vec2) -> Option<NodeId> {
        let ray = self.camera.viewport_to_world(self.transform, screen).ok()?;
        self.scene.ray_cast(ray.origin, *ray.direction)
    }
}

/// Orbit (left drag or one finger), pan (right drag) and zoom (wheel).
pub fn orbit_camera(
    mut cameras: Query<(&mut PlotCamera, &mut Transform)>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut wheel: MessageReader<MouseWheel>,
    mut motion: MessageReader<MouseMotion>,
) {
    let mut scroll = 0.0;
    for event in wheel.read() {
        scroll += event.y;
    }

    let mut delta = Vec2::ZERO;
    for event in motion.read() {
        delta += event.delta;
    }

    let mut touch_delta = Vec2::ZERO;
    if touches.iter().count() == 1 {
        touch_delta = touches.iter().map(|t| t.delta()).sum();
    }

    for (mut cam, mut transform) in cameras.iter_mut() {
        let mut changed = false;

        if scroll.abs() > 0.001 {
            cam.radius = (cam.radius * (1.0 - scroll * 0.1)).clamp(1.0, 500.0);
            changed = true;
        }

        let orbit = if mouse.pressed(MouseButton::Left) {
            delta
        } else {
            touch_delta
        };
        if orbit != Vec2::ZERO {
            cam.yaw -= orbit.x * cam.orbit_speed;
            cam.pitch = (cam.pitch + orbit.y * cam.orbit_speed).clamp(-1.5, 1.5);
            changed = true;
        }

        if mouse.pressed(MouseButton::Right) && delta != Vec2::ZERO {
            let right = Vec3::new(cam.yaw.cos(), 0.0, -cam.yaw.sin());
            let fwd = Vec3::new(cam.yaw.sin(), 0.0, cam.yaw.cos());
            let pan = (-right * delta.x + fwd * delta.y) * cam.pan_speed * cam.radius;
            cam.target += pan;
            changed = true;
        }

        if changed {
            *transform = cam.transform();
        }
    }
}

/// Turns a press and release without a drag into a tap on the plot space.
pub fn detect_taps(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<PlotCamera>>,
    mut tap: ResMut<TapState>,
    mut space: ResMut<PlotSpaceRes>,
) {
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());

    let mut taps: Vec<Vec2> = Vec::new();
    if mouse.just_pressed(MouseButton::Left) {
        tap.pressed_at = cursor;
    }
    if mouse.just_released(MouseButton::Left)
        && let (Some(start), Some(end)) = (tap.pressed_at.take(), cursor)
        && start.distance(end) < TAP_SLOP
    {
        taps.push(end);
    }
    for touch in touches.iter_just_released() {
        if touch.distance().length() < TAP_SLOP {
            taps.push(touch.position());
        }
    }
    if taps.is_empty() {
        return;
    }

    let Ok((camera, transform)) = cameras.single() else {
        return;
    };
    for screen in taps {
        let picked = CameraHitTest {
            camera,
            transform,
            scene: space.0.scene(),
        }
        .hit_test(screen);

        if let Some(node) = picked {
            space.0.select_node(node);
        }
    }
}

/// Picks up data the application added since the last frame.
pub fn follow_data(options: Res<PlotHostOptions>, mut space: ResMut<PlotSpaceRes>) {
    if options.follow_data {
        space.0.plot_new_points();
    }
}

/// Mirrors the scene journal into entities.
pub fn sync_scene_nodes(
    mut commands: Commands,
    mut space: ResMut<PlotSpaceRes>,
    mut registry: ResMut<SceneEntities>,
    options: Res<PlotHostOptions>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut nodes: Query<(
        &mut Visibility,
        Option<&MeshMaterial3d<StandardMaterial>>,
        Option<&mut TextColor>,
    )>,
) {
    let scene = space.0.scene_mut();
    let changes = scene.drain_changes();
    if changes.is_empty() {
        return;
    }

    for change in changes {
        match change {
            SceneChange::Added(id) => {
                let Some(node) = scene.get(id) else {
                    continue;
                };
                if registry.by_node.contains_key(&id) {
                    continue;
                }
                let entity = spawn_node(
                    &mut commands,
                    node,
                    &options,
                    &mut meshes,
                    &mut materials,
                );
                if let Some(parent) = node.parent.and_then(|p| registry.by_node.get(&p))
                    && !matches!(node.primitive, Some(Primitive::Text(_)))
                {
                    commands.entity(*parent).add_child(entity);
                }
                registry.by_node.insert(id, entity);
            }
            SceneChange::Removed(id) => {
                if let Some(entity) = registry.by_node.remove(&id) {
                    commands.entity(entity).try_despawn();
                }
            }
            SceneChange::Updated(id) => {
                let (Some(node), Some(&entity)) = (scene.get(id), registry.by_node.get(&id)) else {
                    continue;
                };
                let Ok((mut visibility, material, text_color)) = nodes.get_mut(entity) else {
                    continue;
                };
                *visibility = node_visibility(node);
                if let Some(color) = node.color {
                    if let Some(handle) = material
                        && let Some(mat) = materials.get_mut(&handle.0)
                    {
                        mat.base_color = color.into();
                        mat.alpha_mode = alpha_mode(color);
                    }
                    if let Some(mut text_color) = text_color {
                        text_color.0 = color.into();
                    }
                }
            }
        }
    }
}

fn spawn_node(
    commands: &mut Commands,
    node: &SceneNode,
    options: &PlotHostOptions,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let link = SceneNodeLink(node.id);
    let visibility = node_visibility(node);
    let color = node.color.unwrap_or(crate::core::Color::WHITE);

    let mesh = match &node.primitive {
        None => {
            let mut e = commands.spawn((link, node.transform, visibility));
            if node.parent.is_none() {
                e.insert(PlotRenderRoot);
            }
            return e.id();
        }
        Some(Primitive::Text(spec)) => {
            return commands
                .spawn((
                    link,
                    PlotLabel {
                        node: node.id,
                        anchor: spec.anchor,
                    },
                    Text::new(spec.text.clone()),
                    TextFont {
                        font_size: spec.font_size * options.label_scale,
                        ..default()
                    },
                    TextColor(color.into()),
                    Node {
                        position_type: PositionType::Absolute,
                        ..default()
                    },
                    visibility,
                ))
                .id();
        }
        Some(Primitive::Cylinder { radius, height }) => meshes.add(Cylinder::new(*radius, *height)),
        Some(Primitive::Cone {
            top_radius,
            bottom_radius,
            height,
        }) => {
            if *top_radius <= 0.0 {
                meshes.add(Cone {
                    radius: *bottom_radius,
                    height: *height,
                })
            } else {
                meshes.add(ConicalFrustum {
                    radius_top: *top_radius,
                    radius_bottom: *bottom_radius,
                    height: *height,
                })
            }
        }
        Some(Primitive::Sphere { radius }) => meshes.add(Sphere::new(*radius)),
        Some(Primitive::Plane { width, height }) => meshes.add(Rectangle::new(*width, *height)),
        Some(Primitive::Cuboid {
            width,
            height,
            length,
        }) => meshes.add(Cuboid::new(*width, *height, *length)),
    };

    let material = materials.add(StandardMaterial {
        base_color: color.into(),
        alpha_mode: alpha_mode(color),
        perceptual_roughness: 0.5,
        cull_mode: None,
        double_sided: true,
        ..default()
    });

    commands
        .spawn((
            link,
            Mesh3d(mesh),
            MeshMaterial3d(material),
            node.transform,
            visibility,
        ))
        .id()
}

fn node_visibility(node: &SceneNode) -> Visibility {
    if node.visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn alpha_mode(color: crate::core::Color) -> AlphaMode {
    if color.a < 1.0 {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    }
}

/// Pins label text to the screen projection of its scene node.
pub fn project_labels(
    space: Res<PlotSpaceRes>,
    cameras: Query<(&Camera, &GlobalTransform), With<PlotCamera>>,
    mut labels: Query<(&PlotLabel, &mut Node, &ComputedNode, &mut Visibility)>,
) {
    let Ok((camera, cam_transform)) = cameras.single() else {
        return;
    };
    let scene = space.0.scene();

    for (label, mut node, computed, mut visibility) in labels.iter_mut() {
        let projected = scene
            .world_position(label.node)
            .filter(|_| scene.is_visible(label.node))
            .and_then(|p| camera.world_to_viewport(cam_transform, p).ok());

        let Some(screen) = projected else {
            *visibility = Visibility::Hidden;
            continue;
        };

        let size = computed.size() * computed.inverse_scale_factor();
        let left = match label.anchor {
            TextAnchor::Center => screen.x - size.x * 0.5,
            TextAnchor::Right => screen.x - size.x,
        };
        node.left = Val::Px(left);
        node.top = Val::Px(screen.y - size.y * 0.5);
        *visibility = Visibility::Inherited;
    }
}

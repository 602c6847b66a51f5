use bevy::prelude::{Res, ResMut, Resource, Time, Timer, TimerMode, Update};
use plot_space::prelude::*;
use std::sync::Arc;

#[derive(Resource)]
struct Grower {
    data: Arc<PlotDataset>,
    timer: Timer,
    step: usize,
}

fn main() -> plot_space::Result<()> {
    let data = Arc::new(PlotDataset::new());
    data.push_point([0.0, 0.0, 0.0], Some(Marker::sphere(0.15, Color::WHITE)));

    let config = PlotConfig {
        x_domain_min: -10.0,
        x_domain_max: 10.0,
        z_domain_min: -10.0,
        z_domain_max: 10.0,
        x_tick_interval: 4.0,
        z_tick_interval: 4.0,
        ..PlotConfig::default()
    };
    data.numeric_tick_labels(&config);

    let mut app = plot_space()
        .config(config)
        .follow_data(true)
        .walls_hidden(true)
        .axis_title(Axis::Y, "generation")
        .into_app(data.clone())?;

    app.insert_resource(Grower {
        data,
        timer: Timer::from_seconds(0.4, TimerMode::Repeating),
        step: 0,
    })
    .add_systems(Update, grow);
    app.run();
    Ok(())
}

// Each tick adds a child to an earlier node and links the two.
fn grow(time: Res<Time>, mut grower: ResMut<Grower>, space: Res<PlotSpaceRes>) {
    if !grower.timer.tick(time.delta()).just_finished() || grower.step >= 60 {
        return;
    }
    grower.step += 1;
    let step = grower.step;

    let parent = (step * 7 / 11) % step;
    let Some(from) = space.0.plotted_point(parent).map(|p| p.domain) else {
        return;
    };
    let angle = step as f32 * 2.4;
    let child = grower.data.push_point(
        [
            from.x + 2.0 * angle.cos(),
            from.y + 1.0,
            from.z + 2.0 * angle.sin(),
        ],
        Some(Marker::sphere(0.1, Color::rgb(0.3, 0.7, 1.0))),
    );
    grower
        .data
        .push_connection(parent, child, ConnectionSpec::default());
}

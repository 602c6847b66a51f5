use plot_space::prelude::*;
use std::sync::Arc;

fn main() -> plot_space::Result<()> {
    let data = Arc::new(PlotDataset::new());

    // A loose helix through the default 0..15 domain.
    for i in 0..40 {
        let t = i as f32 * 0.35;
        let hue = i as f32 / 40.0;
        data.push_point(
            [7.5 + 5.0 * t.cos(), t * 1.05, 7.5 + 5.0 * t.sin()],
            Some(Marker::sphere(0.12, Color::rgb(1.0 - hue, 0.4, hue))),
        );
    }
    data.push_point([2.0, 2.0, 2.0], Some(Marker::cube(0.25, Color::YELLOW)));

    let config = PlotConfig::default();
    data.numeric_tick_labels(&config);

    plot_space()
        .config(config)
        .background_color(Color::BLACK)
        .axis_title(Axis::X, "x")
        .axis_title(Axis::Y, "height")
        .axis_title(Axis::Z, "z")
        .highlight(|h| HighlightSettings {
            multiple: true,
            color: Color::YELLOW,
            ..h
        })
        .run_local(data)
}
